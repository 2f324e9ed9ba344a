use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::fs;

pub static GLOBAL_CONFIG: OnceCell<Config> = OnceCell::new();

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Build {
    pub host: String,
    pub service_port: i32,
    pub web_socket_port: i32,
    pub service_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfigs {
    pub time_budget_ms: u64,
    pub tick_period_ms: u64,
    pub expired_linger_ms: u64,
    pub reap_interval_ms: u64,
    pub max_sessions: usize,
}

#[derive(Debug, Deserialize)]
pub struct Judge {
    pub endpoint: String,
    pub request_timeout_ms: u64,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub build: Build,
    pub session_configs: SessionConfigs,
    pub judge: Judge,
    pub auth: Auth,
}

impl Config {
    pub fn from_file(path: &str) -> Self {
        let content = fs::read_to_string(path).expect("Failed to read config file");
        toml::from_str(&content).expect("Failed to parse config file")
    }
}

pub fn set_global_config(config: Config) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Failed to set global config");
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [build]
        host = "127.0.0.1"
        service_port = 50051
        web_socket_port = 9001
        service_name = "practice-engine"

        [session_configs]
        time_budget_ms = 20000
        tick_period_ms = 1000
        expired_linger_ms = 60000
        reap_interval_ms = 30000
        max_sessions = 512

        [judge]
        endpoint = "http://127.0.0.1:8080/api/judge/execute"
        request_timeout_ms = 5000
        max_attempts = 3
        backoff_base_ms = 250

        [auth]
        base_url = "http://127.0.0.1:8080"
        request_timeout_ms = 5000
    "#;

    #[test]
    fn sample_config_parses_into_typed_sections() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.build.service_port, 50051);
        assert_eq!(config.session_configs.time_budget_ms, 20_000);
        assert_eq!(config.session_configs.tick_period_ms, 1_000);
        assert_eq!(config.judge.max_attempts, 3);
        assert_eq!(config.auth.base_url, "http://127.0.0.1:8080");
    }
}
