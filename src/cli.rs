use crate::config::{
    Config, DEFAULT_ATTRIBUTION, DEFAULT_HIDE_DELAY_MS, DEFAULT_TILE_URL, DEFAULT_ZOOM,
};
use crate::types::Coords;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "mapty",
    about = "Log running and cycling workouts from a script of map and form events"
)]
pub struct Cli {
    /// Event script to replay (`-` for stdin).
    #[arg(value_name = "SCRIPT", default_value = "-")]
    pub script: PathBuf,

    /// Latitude reported as the current position.
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude reported as the current position.
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Initial map zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Tile URL template
    #[arg(long, default_value = DEFAULT_TILE_URL)]
    pub tile_url: String,

    #[arg(long, default_value = DEFAULT_ATTRIBUTION)]
    pub attribution: String,

    /// Delay before the hidden form gets its layout back, in milliseconds
    #[arg(long, default_value_t = DEFAULT_HIDE_DELAY_MS)]
    pub hide_delay_ms: u64,

    /// Print all logged workouts as JSON lines when the script ends.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,
}

impl Cli {
    /// Both coordinates, or nothing.
    pub fn position(&self) -> Option<Coords> {
        Some(Coords::new(self.lat?, self.lon?))
    }

    pub fn config(&self) -> Config {
        Config {
            zoom: self.zoom,
            tile_url: self.tile_url.clone(),
            attribution: self.attribution.clone(),
            hide_delay: Duration::from_millis(self.hide_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let cli = Cli::parse_from(["mapty"]);
        assert_eq!(cli.script, PathBuf::from("-"));
        assert_eq!(cli.config(), Config::default());
        assert_eq!(cli.position(), None);
    }

    #[test]
    fn position_needs_both_coordinates() {
        let cli = Cli::parse_from(["mapty", "--lat", "-33.9", "--lon", "18.4", "run.events"]);
        assert_eq!(cli.position(), Some(Coords::new(-33.9, 18.4)));

        let half = Cli::parse_from(["mapty", "--lat", "10"]);
        assert_eq!(half.position(), None);
    }
}
