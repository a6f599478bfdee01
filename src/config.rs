//! Environment-driven service configuration.

use std::env;
use std::path::PathBuf;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODEL_PATH: &str = "govt_scheme_predictor.json";

/// Runtime settings, read once at startup.
///
/// * `SCHEME_API_HOST` — bind address, default all interfaces.
/// * `SCHEME_API_PORT` — listen port, default 5000.
/// * `SCHEME_API_MODEL` — path to the model artifact, default
///   `govt_scheme_predictor.json` in the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Ok(host) = env::var("SCHEME_API_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("SCHEME_API_PORT") {
            match port.parse() {
                Ok(port) => config.port = port,
                Err(_) => log::warn!(
                    "SCHEME_API_PORT `{port}` is not a valid port, using {DEFAULT_PORT}"
                ),
            }
        }
        if let Ok(path) = env::var("SCHEME_API_MODEL") {
            config.model_path = PathBuf::from(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_deployment() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.model_path, PathBuf::from("govt_scheme_predictor.json"));
    }
}
