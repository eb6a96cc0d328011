use std::path::PathBuf;

pub const TEMP_PATH: &str = "./temp";

/// Public Nominatim instance
pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying User-Agent
pub const USER_AGENT: &str = concat!("geotasks/", env!("CARGO_PKG_VERSION"));

pub const REQUEST_TIMEOUT_SECS: u64 = 30;

pub fn get_temp_path() -> PathBuf {
    PathBuf::from(TEMP_PATH)
}
