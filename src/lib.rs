pub mod app;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod leaderboard;
pub mod ledger;
pub mod listing;
pub mod models;
pub mod perks;
pub mod profile;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{KeyValueStore, StoreData, load_data};
