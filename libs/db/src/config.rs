//! Database configuration types.
//!
//! These are deserialized straight out of the application configuration
//! (see `greenlight-runtime`). Durations use humantime notation, e.g. `"30s"`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ConnectOpts;

/// Connection settings for the single PostgreSQL server backing the data core.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DbConnConfig {
    /// Full PostgreSQL DSN. `${VAR}` placeholders are expanded from the environment.
    pub url: String,
    /// Shorthand for `pool.max_conns`; the pool section wins when both are set.
    pub max_conns: Option<u32>,
    #[serde(default)]
    pub pool: Option<PoolCfg>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PoolCfg {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    #[serde(with = "humantime_serde", default)]
    pub acquire_timeout: Option<Duration>,
    #[serde(with = "humantime_serde", default)]
    pub idle_timeout: Option<Duration>,
    #[serde(with = "humantime_serde", default)]
    pub max_lifetime: Option<Duration>,
    pub test_before_acquire: Option<bool>,
}

impl DbConnConfig {
    /// Resolve pool knobs on top of [`ConnectOpts::default`].
    pub fn connect_opts(&self) -> ConnectOpts {
        let mut opts = ConnectOpts::default();
        if let Some(n) = self.max_conns {
            opts.max_conns = Some(n);
        }
        if let Some(pool) = &self.pool {
            pool.apply_to(&mut opts);
        }
        opts
    }
}

impl PoolCfg {
    /// Overlay the explicitly configured fields onto `opts`.
    pub fn apply_to(&self, opts: &mut ConnectOpts) {
        if let Some(n) = self.max_conns {
            opts.max_conns = Some(n);
        }
        if let Some(n) = self.min_conns {
            opts.min_conns = Some(n);
        }
        if let Some(t) = self.acquire_timeout {
            opts.acquire_timeout = Some(t);
        }
        if let Some(t) = self.idle_timeout {
            opts.idle_timeout = Some(t);
        }
        if let Some(t) = self.max_lifetime {
            opts.max_lifetime = Some(t);
        }
        if let Some(b) = self.test_before_acquire {
            opts.test_before_acquire = b;
        }
    }
}
