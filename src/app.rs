use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/gyms", get(handlers::list_gyms))
        .route("/api/gyms/:id", get(handlers::gym_detail))
        .route("/api/gym-by-name/:name", get(handlers::gym_detail_by_name))
        .route("/api/gyms/:id/visit", post(handlers::mark_visit))
        .route("/api/gyms/:id/climb", post(handlers::log_climb))
        .route("/api/gyms/:id/home", post(handlers::set_home_gym))
        .route(
            "/api/home",
            get(handlers::get_home_gym).delete(handlers::clear_home_gym),
        )
        .route("/api/facilities", get(handlers::facilities))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/profile",
            get(handlers::get_profile).patch(handlers::update_profile),
        )
        .route("/api/profile/summary", get(handlers::profile_summary))
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/leaderboard/countries", get(handlers::leaderboard_countries))
        .route("/api/perks", get(handlers::perks))
        .with_state(state)
}
