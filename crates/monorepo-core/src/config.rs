//! Run settings resolved from flags and the environment

use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the generator timeout, in seconds
pub const TIMEOUT_ENV: &str = "CREATE_MONOREPO_TIMEOUT";

/// Settings that shape a run but are not part of the operator's answers
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory project names are resolved against
    pub base_dir: PathBuf,

    /// Kill external commands that run longer than this (none = wait forever)
    pub generator_timeout: Option<Duration>,

    /// Skip the Node.js / package manager availability check
    pub skip_checks: bool,
}

impl Settings {
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            generator_timeout: None,
            skip_checks: false,
        }
    }

    /// Apply the timeout flag, falling back to [`TIMEOUT_ENV`]
    pub fn with_timeout(mut self, flag_secs: Option<u64>) -> Self {
        let env_value = std::env::var(TIMEOUT_ENV).ok();
        self.generator_timeout = resolve_timeout(flag_secs, env_value.as_deref());
        self
    }

    pub fn with_skip_checks(mut self, skip: bool) -> Self {
        self.skip_checks = skip;
        self
    }
}

/// Flag wins over env; zero or unparsable values mean no timeout
fn resolve_timeout(flag_secs: Option<u64>, env_value: Option<&str>) -> Option<Duration> {
    let secs = flag_secs.or_else(|| env_value.and_then(|v| v.trim().parse::<u64>().ok()))?;
    (secs > 0).then(|| Duration::from_secs(secs))
}
