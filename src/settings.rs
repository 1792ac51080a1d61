use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Destination port for DNS queries.
    pub port: u16,
    /// Seconds to wait for a reply before retransmitting.
    pub timeout: u64,
    /// Retransmissions after the first send.
    pub max_retries: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 53,
            timeout: 5,
            max_retries: 3,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("/etc/anfrage/config.toml").required(false))
            .add_source(Environment::with_prefix("anfrage"))
            .build()?;

        config.try_deserialize()
    }
}
