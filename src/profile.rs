//! Single local user profile, plus the home gym.
//!
//! `UserProfile::home_gym_id` is the only record of which gym is home. The
//! `homeGymData` snapshot caches its display fields and is ignored whenever
//! it disagrees with the profile.

use crate::errors::StoreError;
use crate::models::{Gym, HomeGymSnapshot, ProfileUpdate, UserProfile, iso_timestamp};
use crate::storage::{
    HOME_GYM_DATA_KEY, INSTALL_DATE_KEY, KeyValueStore, USER_PROFILE_KEY, read_json, write_json,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

pub const DEFAULT_DISPLAY_NAME: &str = "Jane Smith";
pub const DEFAULT_AVATAR: &str = "🧗";

pub fn get_profile(store: &mut impl KeyValueStore) -> Result<UserProfile, StoreError> {
    get_profile_at(store, Utc::now())
}

/// Returns the stored profile, or a default one joined at the install date.
///
/// The install date is written the first time it is missing. The default
/// profile itself is not written until the first update.
pub fn get_profile_at(
    store: &mut impl KeyValueStore,
    now: DateTime<Utc>,
) -> Result<UserProfile, StoreError> {
    if let Some(profile) = read_json::<UserProfile>(store, USER_PROFILE_KEY) {
        return Ok(profile);
    }

    let join_date = match read_json::<String>(store, INSTALL_DATE_KEY) {
        Some(install_date) => install_date,
        None => {
            let install_date = iso_timestamp(now);
            write_json(store, INSTALL_DATE_KEY, &install_date)?;
            info!(%install_date, "recorded install date");
            install_date
        }
    };

    Ok(UserProfile {
        display_name: DEFAULT_DISPLAY_NAME.to_string(),
        avatar: DEFAULT_AVATAR.to_string(),
        home_gym_id: None,
        join_date,
    })
}

pub fn update_profile(
    store: &mut impl KeyValueStore,
    update: ProfileUpdate,
) -> Result<UserProfile, StoreError> {
    let mut profile = get_profile(store)?;
    profile.apply(update);
    write_json(store, USER_PROFILE_KEY, &profile)?;
    debug!(display_name = %profile.display_name, "updated profile");
    Ok(profile)
}

pub fn set_home_gym(store: &mut impl KeyValueStore, gym: &Gym) -> Result<UserProfile, StoreError> {
    let profile = update_profile(
        store,
        ProfileUpdate {
            home_gym_id: Some(Some(gym.id.to_string())),
            ..ProfileUpdate::default()
        },
    )?;
    cache_home_gym(store, gym)?;
    info!(gym_id = gym.id, gym = %gym.name, "set home gym");
    Ok(profile)
}

pub fn clear_home_gym(store: &mut impl KeyValueStore) -> Result<UserProfile, StoreError> {
    let profile = update_profile(
        store,
        ProfileUpdate {
            home_gym_id: Some(None),
            ..ProfileUpdate::default()
        },
    )?;
    forget_home_gym(store);
    info!("cleared home gym");
    Ok(profile)
}

/// Refreshes the display snapshot for `gym`. Does not touch the profile.
pub fn cache_home_gym(store: &mut impl KeyValueStore, gym: &Gym) -> Result<(), StoreError> {
    write_json(store, HOME_GYM_DATA_KEY, &HomeGymSnapshot::from(gym))
}

pub fn forget_home_gym(store: &mut impl KeyValueStore) {
    store.remove(HOME_GYM_DATA_KEY);
}

pub fn home_gym_id(store: &impl KeyValueStore) -> Option<String> {
    read_json::<UserProfile>(store, USER_PROFILE_KEY)?.home_gym_id
}

pub fn is_home_gym(store: &impl KeyValueStore, gym_id: &str) -> bool {
    home_gym_id(store).is_some_and(|home| home == gym_id)
}

/// The cached snapshot, when it belongs to the profile's home gym.
pub fn home_gym(store: &impl KeyValueStore) -> Option<HomeGymSnapshot> {
    let home = home_gym_id(store)?;
    let snapshot: HomeGymSnapshot = read_json(store, HOME_GYM_DATA_KEY)?;
    (snapshot.gym_id == home).then_some(snapshot)
}
