use anyhow::Context as _;
use serde::Deserialize;
use stdcheck_core::report;

pub const ENV_PREFIX: &str = "STDCHECK_";

/// Runtime settings, read from `STDCHECK_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Print progress, failure details and a summary on stderr.
    #[serde(default = "Config::default_summary")]
    pub summary: bool,

    /// Indent width of the JSON report.
    #[serde(default = "Config::default_indent")]
    pub indent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary: Self::default_summary(),
            indent: Self::default_indent(),
        }
    }
}

impl Config {
    fn default_summary() -> bool {
        true
    }

    fn default_indent() -> usize {
        report::DEFAULT_INDENT
    }

    pub fn from_env() -> anyhow::Result<Self> {
        envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .with_context(|| format!("Invalid {}* environment variable", ENV_PREFIX))
    }

    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Self>(vars)
            .with_context(|| format!("Invalid {}* environment variable", ENV_PREFIX))
    }
}
