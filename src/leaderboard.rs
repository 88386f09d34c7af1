use serde::{Deserialize, Serialize};

pub const ALL_COUNTRIES: &str = "All Countries";
pub const CURRENT_USER_ID: &str = "current";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Climbs,
    Visits,
    Gyms,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Climbs => "Total Climbs",
            Category::Visits => "Total Visits",
            Category::Gyms => "Unique Gyms",
        }
    }

    fn score(self, user: &LeaderboardUser) -> u32 {
        match self {
            Category::Climbs => user.total_climbs,
            Category::Visits => user.total_visits,
            Category::Gyms => user.unique_gyms,
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Category::Climbs => "climbs",
            Category::Visits => "visits",
            Category::Gyms => "gyms",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardUser {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub total_climbs: u32,
    pub total_visits: u32,
    pub unique_gyms: u32,
    pub country: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub badge: Option<&'static str>,
    pub stat: String,
    pub user: LeaderboardUser,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub category: Category,
    pub title: &'static str,
    pub country: String,
    pub entries: Vec<LeaderboardEntry>,
    pub current_user_rank: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LeaderboardQuery {
    pub category: Option<Category>,
    pub country: Option<String>,
}

const fn user(
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    total_climbs: u32,
    total_visits: u32,
    unique_gyms: u32,
    country: &'static str,
) -> LeaderboardUser {
    LeaderboardUser {
        id,
        name,
        emoji,
        total_climbs,
        total_visits,
        unique_gyms,
        country,
    }
}

pub const USERS: [LeaderboardUser; 11] = [
    user("1", "Alex Honnold", "🧗", 892, 156, 12, "USA"),
    user("2", "Emma Stone", "🎯", 745, 134, 8, "UK"),
    user("3", "Chris Sharma", "💪", 678, 98, 15, "USA"),
    user("4", "Janja Garnbret", "⚡", 589, 87, 10, "Slovenia"),
    user("5", "Adam Ondra", "🌟", 534, 76, 9, "Czech Republic"),
    user(CURRENT_USER_ID, "You", "😎", 359, 45, 5, "USA"),
    user("6", "Ashima Shiraishi", "🎨", 423, 65, 7, "Japan"),
    user("7", "Tommy Caldwell", "🏔️", 389, 54, 6, "USA"),
    user("8", "Lynn Hill", "🦋", 345, 43, 8, "USA"),
    user("9", "Jimmy Webb", "🌊", 312, 39, 5, "USA"),
    user("10", "Sasha DiGiulian", "🎭", 289, 35, 4, "USA"),
];

pub const COUNTRIES: [&str; 6] = [
    ALL_COUNTRIES,
    "USA",
    "UK",
    "Japan",
    "Slovenia",
    "Czech Republic",
];

pub fn badge(rank: usize) -> Option<&'static str> {
    match rank {
        1 => Some("🏆"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}

/// Ranks the board for `category`, keeping only `country` unless it is
/// `None` or "All Countries". Ties keep their listing order.
pub fn rank(category: Category, country: Option<&str>) -> Leaderboard {
    let country = country
        .map(str::trim)
        .filter(|country| !country.is_empty())
        .unwrap_or(ALL_COUNTRIES);

    let mut users: Vec<LeaderboardUser> = USERS
        .into_iter()
        .filter(|user| country == ALL_COUNTRIES || user.country == country)
        .collect();
    users.sort_by(|a, b| category.score(b).cmp(&category.score(a)));

    let entries: Vec<LeaderboardEntry> = users
        .into_iter()
        .enumerate()
        .map(|(index, user)| LeaderboardEntry {
            rank: index + 1,
            badge: badge(index + 1),
            stat: format!("{} {}", category.score(&user), category.unit()),
            user,
        })
        .collect();

    let current_user_rank = entries
        .iter()
        .find(|entry| entry.user.id == CURRENT_USER_ID)
        .map(|entry| entry.rank);

    Leaderboard {
        category,
        title: category.title(),
        country: country.to_string(),
        entries,
        current_user_rank,
    }
}
