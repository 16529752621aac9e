//! Application constants and configuration

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEVOTION_ENDPOINT: &str = "/api/gamified/daily_devotion";
pub const COMPLETE_ENDPOINT: &str = "/api/gamified/complete_devotion";
pub const PROGRESS_ENDPOINT: &str = "/api/gamified/progress";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// XP awarded for a devotion when the server response omits the field
pub const DEFAULT_XP_REWARD: u32 = 2;
