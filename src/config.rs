use std::fmt::Display;

/// Message used for every automatic commit.
pub const COMMIT_MESSAGE: &str = "auto commit";

pub const DEFAULT_REMOTE: &str = "origin";

/// How each branch is brought up to date during the sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SweepMode {
    /// Merge upstream changes into each branch (`git pull`)
    #[default]
    Pull,
    /// Only update remote-tracking refs (`git fetch`)
    Fetch,
}

impl Display for SweepMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepMode::Pull => f.write_str("pull"),
            SweepMode::Fetch => f.write_str("fetch"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Remote a newly created branch is published to.
    pub remote: String,
    pub sweep_mode: SweepMode,
    pub commit_message: String,
}

impl Config {
    pub fn new(remote: String, sweep_mode: SweepMode) -> Self {
        Self {
            remote,
            sweep_mode,
            commit_message: COMMIT_MESSAGE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_REMOTE.to_string(), SweepMode::default())
    }
}
