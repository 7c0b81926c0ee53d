// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Load-time configuration of the leap-second table.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment flag disabling leap seconds entirely (`true`/`1`).
pub const ENV_SUPPRESSED: &str = "TEMPORA_LEAPSECONDS_SUPPRESSED";

/// Environment flag freezing the table after load (`true`/`1`).
pub const ENV_FINAL: &str = "TEMPORA_LEAPSECONDS_FINAL";

/// Environment variable naming a leap-second data file.
pub const ENV_DATA_FILE: &str = "TEMPORA_LEAPSECONDS_FILE";

/// How a [`super::LeapSeconds`] table is loaded.
///
/// `suppressed` yields an empty table behaving as pure POSIX time;
/// `final_table` forbids runtime registration; `data_file` adds a provider
/// reading the given file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LeapSecondConfig {
    pub suppressed: bool,
    pub final_table: bool,
    pub data_file: Option<PathBuf>,
}

impl LeapSecondConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| {
            lookup(name)
                .map(|v| {
                    let v = v.trim();
                    v.eq_ignore_ascii_case("true") || v == "1"
                })
                .unwrap_or(false)
        };
        Self {
            suppressed: flag(ENV_SUPPRESSED),
            final_table: flag(ENV_FINAL),
            data_file: lookup(ENV_DATA_FILE)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = LeapSecondConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, LeapSecondConfig::default());
    }

    #[test]
    fn flags_accept_true_and_one() {
        let cfg = LeapSecondConfig::from_lookup(lookup(&[
            (ENV_SUPPRESSED, "TRUE"),
            (ENV_FINAL, "1"),
            (ENV_DATA_FILE, " /tmp/leaps.txt "),
        ]));
        assert!(cfg.suppressed);
        assert!(cfg.final_table);
        assert_eq!(cfg.data_file, Some(PathBuf::from("/tmp/leaps.txt")));
    }

    #[test]
    fn other_values_are_false() {
        let cfg = LeapSecondConfig::from_lookup(lookup(&[(ENV_SUPPRESSED, "yes"), (ENV_DATA_FILE, "")]));
        assert!(!cfg.suppressed);
        assert!(cfg.data_file.is_none());
    }
}
