use clap::Args;
use mazerun_core as maze;
use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Overrides taken from the URL hash, e.g. `#--rows=12&--cols=16&--walls=0.3`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub(crate) struct ConfigArgs {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<String>,

    /// Number of rows
    #[arg(long)]
    pub rows: Option<maze::Coord>,

    /// Number of columns
    #[arg(long)]
    pub cols: Option<maze::Coord>,

    /// Chance for each cell to become a wall
    #[arg(long = "walls")]
    pub wall_probability: Option<f64>,

    /// Pause after each search step, in milliseconds
    #[arg(long)]
    pub visit_delay: Option<u32>,

    /// Pause after each step of the user path, in milliseconds
    #[arg(long)]
    pub path_delay: Option<u32>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub config: maze::MazeConfig,
}

impl Settings {
    /// Layers the overrides on top of these settings, falling back to defaults when the result is invalid.
    pub(crate) fn resolve(self, args: &ConfigArgs) -> maze::MazeConfig {
        let base = self.config;
        let config = maze::MazeConfig {
            size: (
                args.rows.unwrap_or(base.rows()),
                args.cols.unwrap_or(base.cols()),
            ),
            wall_probability: args.wall_probability.unwrap_or(base.wall_probability),
            visit_delay_ms: args.visit_delay.unwrap_or(base.visit_delay_ms),
            user_path_delay_ms: args.path_delay.unwrap_or(base.user_path_delay_ms),
        };

        match config.validated() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}, using default maze settings", err);
                maze::MazeConfig::default()
            }
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "mazerun:settings:v1";
}
