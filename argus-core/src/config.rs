use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ArgusConfig {
    pub service: ServiceConfig,
    pub graph: GraphConfig,
    pub llm: LlmServiceConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub socket_path: String,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphConfig {
    /// Knowledge-graph extraction output file loaded at startup
    pub data_file: String,
    pub max_paths: usize,
    pub max_depth: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            data_file: "data/kg_outputs.json".to_string(),
            max_paths: 5,
            max_depth: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmServiceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for LlmServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8020".to_string(),
            timeout_seconds: 30,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: "127.0.0.1".to_string(),
            port: 8021,
        }
    }
}

impl ArgusConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .build()?;
        s.try_deserialize()
    }
}
