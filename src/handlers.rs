use crate::catalog;
use crate::errors::{AppError, StoreError};
use crate::leaderboard::{self, COUNTRIES, Leaderboard, LeaderboardQuery};
use crate::ledger;
use crate::listing::fetch_gyms;
use crate::models::{
    FacilityInfo, Gym, GymDetailResponse, GymQuery, GymStats, GymVisit, HomeGymSnapshot,
    ProfileSummaryResponse, ProfileUpdate, UserProfile,
};
use crate::perks::{self, PerksOffer, PerksQuery};
use crate::profile;
use crate::state::AppState;
use crate::storage::{StoreData, persist_data};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (stats, user) = with_store(&state, |data| {
        Ok((ledger::get_stats(&*data), profile::get_profile(data)?))
    })
    .await?;
    Ok(Html(render_index(&catalog::gyms(), &stats, &user)))
}

pub async fn list_gyms(
    State(state): State<AppState>,
    Query(query): Query<GymQuery>,
) -> Result<Json<Vec<Gym>>, AppError> {
    let required = catalog::parse_facilities(query.facilities.as_deref().unwrap_or_default())
        .map_err(AppError::bad_request)?;
    let gyms = fetch_gyms(&state.listing).await?;
    Ok(Json(catalog::filter_gyms(
        gyms,
        query.q.as_deref().unwrap_or_default(),
        &required,
    )))
}

pub async fn gym_detail(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<GymDetailResponse>, AppError> {
    let gym = gym_or_not_found(id)?;
    Ok(Json(detail(&state, gym).await))
}

pub async fn gym_detail_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<GymDetailResponse>, AppError> {
    let gym = catalog::find_by_name(&name)
        .ok_or_else(|| AppError::not_found(format!("no gym named '{name}'")))?;
    Ok(Json(detail(&state, gym).await))
}

pub async fn mark_visit(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<GymVisit>, AppError> {
    let gym = gym_or_not_found(id)?;
    let visit = with_store(&state, |data| {
        ledger::mark_visit(data, &gym.id.to_string(), &gym.name)
    })
    .await?;
    info!(gym = %gym.name, visits = visit.visit_count, "gym visit recorded");
    Ok(Json(visit))
}

pub async fn log_climb(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<GymVisit>, AppError> {
    let gym = gym_or_not_found(id)?;
    let visit = with_store(&state, |data| ledger::log_climb(data, &gym.id.to_string())).await?;
    info!(gym = %gym.name, climbs = visit.climb_count, "climb logged");
    Ok(Json(visit))
}

pub async fn set_home_gym(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<UserProfile>, AppError> {
    let gym = gym_or_not_found(id)?;
    let updated = with_store(&state, |data| profile::set_home_gym(data, &gym)).await?;
    Ok(Json(updated))
}

pub async fn clear_home_gym(State(state): State<AppState>) -> Result<Json<UserProfile>, AppError> {
    let updated = with_store(&state, |data| profile::clear_home_gym(data)).await?;
    Ok(Json(updated))
}

pub async fn get_home_gym(State(state): State<AppState>) -> Json<Option<HomeGymSnapshot>> {
    let data = state.data.lock().await;
    Json(resolve_home_gym(&data))
}

pub async fn facilities() -> Json<Vec<FacilityInfo>> {
    Json(catalog::facility_vocabulary())
}

pub async fn get_stats(State(state): State<AppState>) -> Json<GymStats> {
    let data = state.data.lock().await;
    Json(ledger::get_stats(&*data))
}

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, AppError> {
    let current = with_store(&state, |data| profile::get_profile(data)).await?;
    Ok(Json(current))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    let updated = with_store(&state, |data| {
        let updated = profile::update_profile(data, update)?;
        match updated.home_gym_id.as_deref().and_then(catalog::find_by_key) {
            Some(gym) => profile::cache_home_gym(data, &gym)?,
            None => profile::forget_home_gym(data),
        }
        Ok(updated)
    })
    .await?;
    Ok(Json(updated))
}

pub async fn profile_summary(
    State(state): State<AppState>,
) -> Result<Json<ProfileSummaryResponse>, AppError> {
    let summary = with_store(&state, |data| {
        let stats = ledger::get_stats(&*data);
        Ok(ProfileSummaryResponse {
            profile: profile::get_profile(data)?,
            home_gym: resolve_home_gym(&*data),
            total_visits: stats.total_visits(),
            total_climbs: stats.total_climbs,
            unique_gyms: stats.unique_gyms(),
        })
    })
    .await?;
    Ok(Json(summary))
}

pub async fn leaderboard(Query(query): Query<LeaderboardQuery>) -> Json<Leaderboard> {
    Json(leaderboard::rank(
        query.category.unwrap_or_default(),
        query.country.as_deref(),
    ))
}

pub async fn leaderboard_countries() -> Json<Vec<&'static str>> {
    Json(COUNTRIES.to_vec())
}

pub async fn perks(Query(query): Query<PerksQuery>) -> Json<PerksOffer> {
    Json(perks::offer(query.plan.unwrap_or_default()))
}

/// Runs `op` against the locked store and writes the store to disk when
/// `op` changed it.
async fn with_store<T>(
    state: &AppState,
    op: impl FnOnce(&mut StoreData) -> Result<T, StoreError>,
) -> Result<T, AppError> {
    let mut data = state.data.lock().await;
    let before = data.clone();
    let value = op(&mut *data)?;
    if *data != before {
        persist_data(&state.data_path, &data).await?;
    }
    Ok(value)
}

async fn detail(state: &AppState, gym: Gym) -> GymDetailResponse {
    let key = gym.id.to_string();
    let data = state.data.lock().await;
    let visit = ledger::get_stats(&*data).visits.remove(&key);
    let is_home = profile::is_home_gym(&*data, &key);
    drop(data);

    GymDetailResponse {
        banner: catalog::banner_for(&gym.name),
        logo: catalog::logo_for(&gym.name),
        facilities: gym.facilities.iter().map(|facility| facility.info()).collect(),
        avg_climbs_per_visit: visit.as_ref().and_then(GymVisit::average_climbs),
        visit,
        is_home,
        gym,
    }
}

/// Prefers the cached snapshot; rebuilds it from the catalog when the cache
/// is missing or belongs to another gym.
fn resolve_home_gym(data: &StoreData) -> Option<HomeGymSnapshot> {
    profile::home_gym(data).or_else(|| {
        profile::home_gym_id(data)
            .and_then(|id| catalog::find_by_key(&id))
            .map(|gym| HomeGymSnapshot::from(&gym))
    })
}

fn gym_or_not_found(id: u32) -> Result<Gym, AppError> {
    catalog::find_by_id(id).ok_or_else(|| AppError::not_found(format!("no gym with id {id}")))
}
