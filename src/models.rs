use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GymVisit {
    pub gym_id: String,
    pub gym_name: String,
    pub last_visited: String,
    pub visit_count: u64,
    pub climb_count: u64,
}

impl GymVisit {
    /// Climbs per visit rounded half up, `None` before the first visit.
    pub fn average_climbs(&self) -> Option<u64> {
        if self.visit_count == 0 {
            return None;
        }
        let climbs = u128::from(self.climb_count);
        let visits = u128::from(self.visit_count);
        u64::try_from((2 * climbs + visits) / (2 * visits)).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GymStats {
    pub visits: BTreeMap<String, GymVisit>,
    pub total_climbs: u64,
}

impl GymStats {
    /// Sum of the per-gym climb counters. Can differ from `total_climbs`,
    /// which is only ever incremented.
    pub fn recorded_climbs(&self) -> u64 {
        self.visits
            .values()
            .fold(0u64, |sum, visit| sum.saturating_add(visit.climb_count))
    }

    pub fn total_visits(&self) -> u64 {
        self.visits
            .values()
            .fold(0u64, |sum, visit| sum.saturating_add(visit.visit_count))
    }

    pub fn unique_gyms(&self) -> usize {
        self.visits.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub display_name: String,
    pub avatar: String,
    pub home_gym_id: Option<String>,
    pub join_date: String,
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
        if let Some(home_gym_id) = update.home_gym_id {
            self.home_gym_id = home_gym_id;
        }
    }
}

/// Partial profile update. There is no `join_date` field, so a `joinDate`
/// key in a request body is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Absent leaves the home gym untouched, `null` clears it.
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_gym_id: Option<Option<String>>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeGymSnapshot {
    pub gym_id: String,
    pub name: String,
    pub location: String,
}

impl From<&Gym> for HomeGymSnapshot {
    fn from(gym: &Gym) -> Self {
        Self {
            gym_id: gym.id.to_string(),
            name: gym.name.clone(),
            location: gym.location.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    Moonboard,
    Cafe,
    Weights,
    Sauna,
    Yoga,
    Showers,
    Lockers,
    Training,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymHours {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub distance: f64,
    pub rating: f64,
    pub hours: GymHours,
    pub image_url: String,
    pub facilities: Vec<Facility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FacilityInfo {
    pub id: Facility,
    pub label: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Deserialize, Default)]
pub struct GymQuery {
    pub q: Option<String>,
    /// Comma separated facility tags, all of which must be present.
    pub facilities: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GymDetailResponse {
    pub gym: Gym,
    pub banner: &'static str,
    pub logo: &'static str,
    pub facilities: Vec<FacilityInfo>,
    pub visit: Option<GymVisit>,
    pub avg_climbs_per_visit: Option<u64>,
    pub is_home: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummaryResponse {
    pub profile: UserProfile,
    pub home_gym: Option<HomeGymSnapshot>,
    pub total_visits: u64,
    pub total_climbs: u64,
    pub unique_gyms: usize,
}

/// Renders `at` the way browsers print `Date.toISOString()`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
