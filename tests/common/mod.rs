#![allow(dead_code)]

use fixture_stats_rs::config_handler::Config;

pub mod external_server;
pub mod payloads;

pub const TEST_KEY: &str = "TEST_KEY";

/// Config pointing at the mock, with sleeps shrunk to keep tests fast.
pub fn test_config(base_url: &str, out_dir: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        api_key: TEST_KEY.to_string(),
        out_dir: out_dir.to_string(),
        stats_sleep_ms: 0,
        retry_backoff_ms: 1,
        ..Default::default()
    }
}
