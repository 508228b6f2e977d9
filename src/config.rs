use std::time::Duration;

pub const DEFAULT_ZOOM: u8 = 13;
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const DEFAULT_HIDE_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    /// How long the hidden form waits before its grid display comes back.
    pub hide_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            hide_delay: Duration::from_millis(DEFAULT_HIDE_DELAY_MS),
        }
    }
}
