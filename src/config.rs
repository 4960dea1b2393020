// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

pub const DB_ENV: &str = "SPENDTRAIL_DB";

/// Settings resolved once at startup from flags and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_filter: String,
}

impl Config {
    /// `--db` wins over `SPENDTRAIL_DB` (clap reads the env var for the same
    /// arg), which wins over the platform data dir.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
            _ => crate::db::default_db_path()?,
        };
        Ok(Config {
            db_path,
            log_filter: verbosity_filter(m.get_count("verbose")).to_string(),
        })
    }
}

pub fn verbosity_filter(count: u8) -> &'static str {
    match count {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
