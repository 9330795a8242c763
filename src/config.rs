use serde::Deserialize;

use crate::screening::ranking::DEFAULT_TOP_N;

pub const DEFAULT_CONFIG_PATH: &str = "config/default";
pub const ENV_PREFIX: &str = "ADVISOR";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    pub report: ReportConfig,
    pub clinic: ClinicConfig,
    #[serde(default)]
    pub glossary: Vec<GlossaryEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub catalog_path: String,
    pub members_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Fail the whole evaluation on a malformed history entry instead of skipping it
    #[serde(default)]
    pub strict_history: bool,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            strict_history: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub title: String,
    pub reward_banner: String,
    pub footer: String,
    /// Supplied externally; the engine never computes it
    pub health_priority_score: Option<u8>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClinicConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub booking_link: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GlossaryEntry {
    pub term: String,
    pub description: String,
}

impl Config {
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(score) = self.report.health_priority_score {
            if score > 100 {
                anyhow::bail!("report.health_priority_score must be 0-100, got {}", score);
            }
        }
        Ok(())
    }
}
