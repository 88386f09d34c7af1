use serde::{Deserialize, Serialize};

pub const MEMBERSHIP_NAME: &str = "Hangtime+";
pub const TRIAL_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Monthly,
    Yearly,
}

impl Plan {
    pub fn price_cents(self) -> u32 {
        match self {
            Plan::Monthly => 499,
            Plan::Yearly => 4999,
        }
    }

    pub fn period(self) -> &'static str {
        match self {
            Plan::Monthly => "month",
            Plan::Yearly => "year",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Perk {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerksOffer {
    pub name: &'static str,
    pub plan: Plan,
    pub price_cents: u32,
    pub price: String,
    pub period: &'static str,
    pub yearly_savings_percent: u32,
    pub trial_days: u32,
    pub perks: &'static [Perk],
}

#[derive(Debug, Deserialize, Default)]
pub struct PerksQuery {
    pub plan: Option<Plan>,
}

const fn perk(icon: &'static str, title: &'static str, description: &'static str) -> Perk {
    Perk {
        icon,
        title,
        description,
    }
}

pub static PERKS: [Perk; 7] = [
    perk("🎟️", "Free Day Pass", "One free visit per month to partner gyms"),
    perk("☕", "Free Coffee or Snack", "Monthly treat from gym cafes or partners"),
    perk("🧗", "Discounted Coaching", "Save up to 25% on private coaching sessions"),
    perk(
        "📚",
        "Course Discounts",
        "Reduced pricing on beginner, lead, and bouldering courses",
    ),
    perk("📊", "Advanced Stats", "Access to streaks, climb trends, and more"),
    perk("🏅", "Custom Profile & Badge", "Stand out on the leaderboard and profile"),
    perk("🚀", "Priority Access", "Try new features and join invite-only events first"),
];

/// Percent saved by a year up front against twelve monthly payments, rounded half up.
pub fn yearly_savings_percent() -> u32 {
    let twelve_months = Plan::Monthly.price_cents() * 12;
    let saved = twelve_months.saturating_sub(Plan::Yearly.price_cents()) * 100;
    (2 * saved + twelve_months) / (2 * twelve_months)
}

pub fn format_price(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

pub fn offer(plan: Plan) -> PerksOffer {
    PerksOffer {
        name: MEMBERSHIP_NAME,
        plan,
        price_cents: plan.price_cents(),
        price: format_price(plan.price_cents()),
        period: plan.period(),
        yearly_savings_percent: yearly_savings_percent(),
        trial_days: TRIAL_DAYS,
        perks: &PERKS,
    }
}
