//! Per-gym visit and climb counters.
//!
//! Every call loads the whole ledger from the store and every mutation writes
//! the whole ledger back.

use crate::errors::StoreError;
use crate::models::{GymStats, GymVisit, iso_timestamp};
use crate::storage::{GYM_STATS_KEY, KeyValueStore, read_json, write_json};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Returns the stored ledger, or an empty one when nothing readable is stored.
pub fn get_stats(store: &impl KeyValueStore) -> GymStats {
    read_json(store, GYM_STATS_KEY).unwrap_or_default()
}

pub fn mark_visit(
    store: &mut impl KeyValueStore,
    gym_id: &str,
    gym_name: &str,
) -> Result<GymVisit, StoreError> {
    mark_visit_at(store, gym_id, gym_name, Utc::now())
}

/// Records a visit at `now`. The first visit creates the record; later visits
/// bump the counter and keep the original gym name.
pub fn mark_visit_at(
    store: &mut impl KeyValueStore,
    gym_id: &str,
    gym_name: &str,
    now: DateTime<Utc>,
) -> Result<GymVisit, StoreError> {
    let mut stats = get_stats(store);
    let last_visited = iso_timestamp(now);

    let visit = stats
        .visits
        .entry(gym_id.to_string())
        .and_modify(|visit| {
            visit.visit_count = visit.visit_count.saturating_add(1);
            visit.last_visited = last_visited.clone();
        })
        .or_insert_with(|| GymVisit {
            gym_id: gym_id.to_string(),
            gym_name: gym_name.to_string(),
            last_visited: last_visited.clone(),
            visit_count: 1,
            climb_count: 0,
        })
        .clone();

    write_json(store, GYM_STATS_KEY, &stats)?;
    debug!(gym_id, visit_count = visit.visit_count, "marked gym visit");

    Ok(visit)
}

/// Fails without writing anything when the gym has never been visited.
pub fn log_climb(store: &mut impl KeyValueStore, gym_id: &str) -> Result<GymVisit, StoreError> {
    let mut stats = get_stats(store);
    let Some(visit) = stats.visits.get_mut(gym_id) else {
        return Err(StoreError::PreconditionViolation {
            gym_id: gym_id.to_string(),
        });
    };

    visit.climb_count = visit.climb_count.saturating_add(1);
    let visit = visit.clone();
    stats.total_climbs = stats.total_climbs.saturating_add(1);

    write_json(store, GYM_STATS_KEY, &stats)?;
    debug!(gym_id, climb_count = visit.climb_count, total = stats.total_climbs, "logged climb");

    Ok(visit)
}

pub fn is_visited(store: &impl KeyValueStore, gym_id: &str) -> bool {
    get_stats(store).visits.contains_key(gym_id)
}

pub fn visit_count_of(store: &impl KeyValueStore, gym_id: &str) -> u64 {
    get_stats(store)
        .visits
        .get(gym_id)
        .map_or(0, |visit| visit.visit_count)
}

pub fn climb_count_of(store: &impl KeyValueStore, gym_id: &str) -> u64 {
    get_stats(store)
        .visits
        .get(gym_id)
        .map_or(0, |visit| visit.climb_count)
}
