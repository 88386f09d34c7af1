use crate::models::{Facility, FacilityInfo, Gym, GymHours};
use std::str::FromStr;

pub const DEFAULT_BANNER: &str = "/default-gym-banner.jpg";
pub const DEFAULT_LOGO: &str = "/default-gym-logo.png";

pub const FACILITIES: [Facility; 8] = [
    Facility::Moonboard,
    Facility::Cafe,
    Facility::Weights,
    Facility::Sauna,
    Facility::Yoga,
    Facility::Showers,
    Facility::Lockers,
    Facility::Training,
];

impl Facility {
    pub fn as_str(self) -> &'static str {
        match self {
            Facility::Moonboard => "moonboard",
            Facility::Cafe => "cafe",
            Facility::Weights => "weights",
            Facility::Sauna => "sauna",
            Facility::Yoga => "yoga",
            Facility::Showers => "showers",
            Facility::Lockers => "lockers",
            Facility::Training => "training",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facility::Moonboard => "Moonboard",
            Facility::Cafe => "Cafe",
            Facility::Weights => "Weights",
            Facility::Sauna => "Sauna",
            Facility::Yoga => "Yoga Studio",
            Facility::Showers => "Showers",
            Facility::Lockers => "Lockers",
            Facility::Training => "Training Area",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Facility::Moonboard => "🌙",
            Facility::Cafe => "☕",
            Facility::Weights => "🏋️",
            Facility::Sauna => "🧖",
            Facility::Yoga => "🧘",
            Facility::Showers => "🚿",
            Facility::Lockers => "🔒",
            Facility::Training => "💪",
        }
    }

    pub fn info(self) -> FacilityInfo {
        FacilityInfo {
            id: self,
            label: self.label(),
            icon: self.icon(),
        }
    }
}

impl FromStr for Facility {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        FACILITIES
            .into_iter()
            .find(|facility| facility.as_str() == wanted)
            .ok_or_else(|| format!("unknown facility '{}'", value.trim()))
    }
}

pub fn facility_vocabulary() -> Vec<FacilityInfo> {
    FACILITIES.into_iter().map(Facility::info).collect()
}

/// Parses a comma separated facility list; blank entries are skipped.
pub fn parse_facilities(csv: &str) -> Result<Vec<Facility>, String> {
    csv.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Facility::from_str)
        .collect()
}

pub fn gyms() -> Vec<Gym> {
    vec![
        gym(
            1,
            "Boulder District",
            "Downtown Seattle",
            1.2,
            4.8,
            ("6:00 AM", "11:00 PM"),
            "/images/gym1.jpg",
            &[
                Facility::Moonboard,
                Facility::Cafe,
                Facility::Weights,
                Facility::Showers,
                Facility::Lockers,
            ],
        ),
        gym(
            2,
            "Vertical World",
            "Ballard",
            2.5,
            4.9,
            ("7:00 AM", "10:00 PM"),
            "/images/gym2.jpg",
            &[
                Facility::Training,
                Facility::Yoga,
                Facility::Weights,
                Facility::Showers,
                Facility::Lockers,
                Facility::Sauna,
            ],
        ),
        gym(
            3,
            "Seattle Bouldering Project",
            "Fremont",
            3.1,
            4.7,
            ("6:30 AM", "11:00 PM"),
            "/images/gym3.jpg",
            &[
                Facility::Moonboard,
                Facility::Cafe,
                Facility::Yoga,
                Facility::Training,
                Facility::Showers,
                Facility::Lockers,
            ],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn gym(
    id: u32,
    name: &str,
    location: &str,
    distance: f64,
    rating: f64,
    (open, close): (&str, &str),
    image_url: &str,
    facilities: &[Facility],
) -> Gym {
    Gym {
        id,
        name: name.to_string(),
        location: location.to_string(),
        distance,
        rating,
        hours: GymHours {
            open: open.to_string(),
            close: close.to_string(),
        },
        image_url: image_url.to_string(),
        facilities: facilities.to_vec(),
    }
}

pub fn find_by_id(id: u32) -> Option<Gym> {
    gyms().into_iter().find(|gym| gym.id == id)
}

/// Looks up a gym from a stored string id such as `UserProfile::home_gym_id`.
pub fn find_by_key(key: &str) -> Option<Gym> {
    key.trim().parse().ok().and_then(find_by_id)
}

/// Exact, case-sensitive name match.
pub fn find_by_name(name: &str) -> Option<Gym> {
    gyms().into_iter().find(|gym| gym.name == name)
}

/// Keeps gyms whose name or location contains `query` (case-insensitive)
/// and that offer every facility in `required`.
pub fn filter_gyms(gyms: Vec<Gym>, query: &str, required: &[Facility]) -> Vec<Gym> {
    let needle = query.to_lowercase();
    gyms.into_iter()
        .filter(|gym| {
            gym.name.to_lowercase().contains(&needle)
                || gym.location.to_lowercase().contains(&needle)
        })
        .filter(|gym| required.iter().all(|facility| gym.facilities.contains(facility)))
        .collect()
}

pub fn banner_for(gym_name: &str) -> &'static str {
    match gym_name {
        "Boulder District" => "/boulder-district-banner.png",
        "Vertical World" => "/vertical-world-banner.png",
        "Seattle Bouldering Project" => "/seattle-boulder-project-banner.png",
        _ => DEFAULT_BANNER,
    }
}

pub fn logo_for(gym_name: &str) -> &'static str {
    match gym_name {
        "Boulder District" => "/boulder-district-logo.png",
        "Vertical World" => "/vertical-world-logo.png",
        "Seattle Bouldering Project" => "/seattle-boulder-project-logo.png",
        _ => DEFAULT_LOGO,
    }
}
