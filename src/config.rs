//! Run configuration from the command line and environment.
//!
//! ```text
//! neural-juggler [--seed N] [--log PATH]
//! ```
//!
//! `NEURAL_JUGGLER_SEED` and `NEURAL_JUGGLER_LOG_PATH` supply the same values;
//! flags win over environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

pub const SEED_ENV: &str = "NEURAL_JUGGLER_SEED";
pub const LOG_PATH_ENV: &str = "NEURAL_JUGGLER_LOG_PATH";

pub const USAGE: &str = "usage: neural-juggler [--seed N] [--log PATH]

  --seed N     seed the game RNG (env NEURAL_JUGGLER_SEED)
  --log PATH   append log records to PATH (env NEURAL_JUGGLER_LOG_PATH)
  -h, --help   print this help";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` seeds from the clock.
    pub seed: Option<u32>,
    /// `None` disables logging.
    pub log_path: Option<PathBuf>,
    pub show_help: bool,
}

impl RunConfig {
    /// Read the process environment and arguments (without the program name).
    pub fn load(args: &[String]) -> Result<Self> {
        Self::from_env()?.apply_args(args)
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = match non_empty(SEED_ENV) {
            Some(v) => Some(parse_seed(&v).map_err(|e| anyhow!("{}: {}", SEED_ENV, e))?),
            None => None,
        };
        let log_path = non_empty(LOG_PATH_ENV).map(PathBuf::from);

        Ok(Self {
            seed,
            log_path,
            show_help: false,
        })
    }

    /// Layer command-line flags over `self`.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --seed"))?;
                    self.seed = Some(parse_seed(v)?);
                }
                "--log" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for --log"))?;
                    self.log_path = Some(PathBuf::from(v));
                }
                "-h" | "--help" => self.show_help = true,
                other => return Err(anyhow!("unknown argument: {}\n\n{}", other, USAGE)),
            }
            i += 1;
        }
        Ok(self)
    }

    /// The configured seed, or one derived from the current time.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn parse_seed(v: &str) -> Result<u32> {
    v.parse::<u32>()
        .map_err(|_| anyhow!("invalid seed value: {}", v))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
