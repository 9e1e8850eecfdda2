use std::sync::Arc;

use sqlx::MySqlPool;

use crate::config::Config;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: MySqlPool,
    pub config: Config,
}
