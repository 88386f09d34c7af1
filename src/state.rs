use crate::listing::ListingConfig;
use crate::storage::StoreData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<StoreData>>,
    pub listing: ListingConfig,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: StoreData, listing: ListingConfig) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            listing,
        }
    }
}
