use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the greenlight_data module (`modules.greenlight_data`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GreenlightDataConfig {
    /// Deadline applied to every store round trip.
    #[serde(with = "humantime_serde", default = "default_query_timeout")]
    pub query_timeout: Duration,
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,
    /// Automatic re-fetch/re-apply attempts after an edit conflict on unpinned updates.
    #[serde(default = "default_max_edit_retries")]
    pub max_edit_retries: u32,
    #[serde(default)]
    pub password_hashing: PasswordHashing,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordHashing {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for GreenlightDataConfig {
    fn default() -> Self {
        Self {
            query_timeout: default_query_timeout(),
            default_page_size: default_page_size(),
            max_edit_retries: default_max_edit_retries(),
            password_hashing: PasswordHashing::default(),
        }
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

fn default_query_timeout() -> Duration {
    Duration::from_secs(3)
}

fn default_page_size() -> i64 {
    20
}

fn default_max_edit_retries() -> u32 {
    3
}

fn default_memory_kib() -> u32 {
    19 * 1024
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}
