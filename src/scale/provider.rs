// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Leap-second data sources.
//!
//! A provider supplies the table of leap-second dates; the
//! [`ProviderRegistry`] holds the candidates and [`super::LeapSeconds`]
//! picks the one with the most entries.
//!
//! # Data file format
//!
//! ```text
//! # comment
//! @expires=2026-12-28
//! 1972-06-30, +
//! 2016-12-31
//! ```
//!
//! Each data line names the last day of the affected UTC day, optionally
//! followed by `,+` (insertion, the default) or `,-` (removal).

use crate::date::PlainDate;
use crate::error::TimeError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// A source of leap-second events.
pub trait LeapSecondProvider: Send + Sync + fmt::Debug {
    /// Name reported in diagnostics.
    fn name(&self) -> &str;

    /// Event dates mapped to their shift (`+1` or `-1`).
    fn table(&self) -> &BTreeMap<PlainDate, i32>;

    /// Whether the source may contain negative leap seconds.
    fn supports_negative(&self) -> bool;

    /// Date after which the table is no longer guaranteed.
    fn expiration(&self) -> Option<PlainDate> {
        None
    }
}

const BUILTIN_NAME: &str = "builtin";

/// Built-in dataset: every leap second inserted between 1972 and 2016.
const BUILTIN_DATA: &str = "\
# Leap seconds announced by the IERS (Bulletin C).
# Each line is the last day of the UTC day that received the extra second.
@expires=2026-12-28
1972-06-30, +
1972-12-31, +
1973-12-31, +
1974-12-31, +
1975-12-31, +
1976-12-31, +
1977-12-31, +
1978-12-31, +
1979-12-31, +
1981-06-30, +
1982-06-30, +
1983-06-30, +
1985-06-30, +
1987-12-31, +
1989-12-31, +
1990-12-31, +
1992-06-30, +
1993-06-30, +
1994-06-30, +
1995-12-31, +
1997-06-30, +
1998-12-31, +
2005-12-31, +
2008-12-31, +
2012-06-30, +
2015-06-30, +
2016-12-31, +
";

/// Provider backed by an in-memory table, parsed from the data-file format
/// or assembled from entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProvider {
    name: String,
    table: BTreeMap<PlainDate, i32>,
    expires: Option<PlainDate>,
}

impl TableProvider {
    /// The dataset compiled into the crate.
    pub fn builtin() -> Self {
        match Self::parse(BUILTIN_NAME, BUILTIN_DATA) {
            Ok(provider) => provider,
            // The built-in text is a constant covered by tests.
            Err(err) => {
                warn!(error = %err, "built-in leap-second data rejected");
                Self {
                    name: BUILTIN_NAME.to_owned(),
                    table: BTreeMap::new(),
                    expires: None,
                }
            }
        }
    }

    /// Builds a provider from `(date, shift)` pairs.
    ///
    /// Shifts other than `+1`/`-1` and duplicate dates are rejected.
    pub fn from_entries<I>(name: impl Into<String>, entries: I) -> Result<Self, TimeError>
    where
        I: IntoIterator<Item = (PlainDate, i32)>,
    {
        let mut table = BTreeMap::new();
        for (date, shift) in entries {
            if shift != 1 && shift != -1 {
                return Err(TimeError::InvalidArgument(format!(
                    "leap second shift must be +1 or -1: {shift}"
                )));
            }
            if table.insert(date, shift).is_some() {
                return Err(TimeError::InvalidArgument(format!(
                    "Duplicate leap second event found: {date}"
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            table,
            expires: None,
        })
    }

    /// Sets the expiration date.
    pub fn with_expiration(mut self, date: PlainDate) -> Self {
        self.expires = Some(date);
        self
    }

    /// Parses the data-file format.
    ///
    /// Errors carry the byte offset of the offending line start.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, TimeError> {
        let name = name.into();
        let mut table = BTreeMap::new();
        let mut expires = None;
        let mut offset = 0;

        for (number, raw_line) in text.split_inclusive('\n').enumerate() {
            let line_start = offset;
            offset += raw_line.len();
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fail = |message: String| {
                warn!(provider = %name, line = number + 1, "{message}");
                TimeError::parse(format!("line {}: {message}", number + 1), line_start)
            };

            if let Some(value) = line.strip_prefix("@expires=") {
                let date = parse_iso_date(value.trim())
                    .ok_or_else(|| fail(format!("invalid expiration date: {value}")))?;
                expires = Some(date);
                continue;
            }

            let (date_text, sign) = match line.split_once(',') {
                Some((date, sign)) => (date.trim(), sign.trim()),
                None => (line, "+"),
            };
            let shift = match sign {
                "+" => 1,
                "-" => -1,
                _ => return Err(fail(format!("Missing leap second sign: {line}"))),
            };
            let date = parse_iso_date(date_text)
                .ok_or_else(|| fail(format!("invalid leap second date: {date_text}")))?;
            if table.insert(date, shift).is_some() {
                return Err(fail(format!("Duplicate leap second event found: {date}")));
            }
        }

        debug!(provider = %name, events = table.len(), "parsed leap-second data");
        Ok(Self {
            name,
            table,
            expires,
        })
    }

    /// Reads and parses a data file; the provider is named after the path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TimeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::parse(path.display().to_string(), &text)
    }
}

/// `YYYY-MM-DD` with a four-digit year.
fn parse_iso_date(text: &str) -> Option<PlainDate> {
    let mut parts = text.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }
    PlainDate::of(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?).ok()
}

impl LeapSecondProvider for TableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn table(&self) -> &BTreeMap<PlainDate, i32> {
        &self.table
    }

    fn supports_negative(&self) -> bool {
        true
    }

    fn expiration(&self) -> Option<PlainDate> {
        self.expires
    }
}

/// Explicit list of candidate providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn LeapSecondProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding only the built-in dataset.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(TableProvider::builtin());
        registry
    }

    pub fn register<P: LeapSecondProvider + 'static>(&mut self, provider: P) -> &mut Self {
        self.providers.push(Arc::new(provider));
        self
    }

    pub fn register_shared(&mut self, provider: Arc<dyn LeapSecondProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// The provider reporting the most entries; the first one wins ties.
    ///
    /// Providers without any entry are never selected.
    pub fn select(&self) -> Option<Arc<dyn LeapSecondProvider>> {
        let mut best: Option<&Arc<dyn LeapSecondProvider>> = None;
        let mut most = 0;
        for provider in &self.providers {
            let count = provider.table().len();
            if count > most {
                most = count;
                best = Some(provider);
            }
        }
        best.cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> PlainDate {
        PlainDate::of(y, m, d).unwrap()
    }

    #[test]
    fn builtin_has_27_insertions() {
        let p = TableProvider::builtin();
        assert_eq!(p.table().len(), 27);
        assert!(p.table().values().all(|&s| s == 1));
        assert_eq!(p.table().keys().next(), Some(&date(1972, 6, 30)));
        assert_eq!(p.table().keys().last(), Some(&date(2016, 12, 31)));
        assert_eq!(p.expiration(), Some(date(2026, 12, 28)));
    }

    #[test]
    fn parse_accepts_signs_comments_and_blank_lines() {
        let text = "# header\n\n1972-06-30\n1973-12-31,+\n1974-12-31, -\n";
        let p = TableProvider::parse("test", text).unwrap();
        assert_eq!(p.table().get(&date(1972, 6, 30)), Some(&1));
        assert_eq!(p.table().get(&date(1973, 12, 31)), Some(&1));
        assert_eq!(p.table().get(&date(1974, 12, 31)), Some(&-1));
        assert_eq!(p.expiration(), None);
    }

    #[test]
    fn parse_rejects_bad_sign_with_line_offset() {
        let text = "1972-06-30\n1972-12-31,x\n";
        let err = TableProvider::parse("test", text).unwrap_err();
        match err {
            TimeError::Parse { message, index } => {
                assert!(message.contains("Missing leap second sign"));
                assert!(message.starts_with("line 2"));
                assert_eq!(index, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_duplicates() {
        let err = TableProvider::parse("test", "1972-06-30\n1972-06-30\n").unwrap_err();
        assert!(err.to_string().contains("Duplicate leap second event found"));
    }

    #[test]
    fn parse_rejects_invalid_dates() {
        assert!(TableProvider::parse("test", "1972-02-30\n").is_err());
        assert!(TableProvider::parse("test", "@expires=soon\n").is_err());
    }

    #[test]
    fn from_entries_validates_shift() {
        assert!(TableProvider::from_entries("x", [(date(1972, 6, 30), 2)]).is_err());
        assert!(TableProvider::from_entries("x", [(date(1972, 6, 30), 1), (date(1972, 6, 30), -1)]).is_err());
    }

    #[test]
    fn registry_prefers_largest_table() {
        let small = TableProvider::from_entries("small", [(date(1972, 6, 30), 1)]).unwrap();
        let mut registry = ProviderRegistry::new();
        assert!(registry.select().is_none());
        registry.register(small).register(TableProvider::builtin());
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.select().unwrap().name(), "builtin");
    }

    #[test]
    fn registry_skips_empty_tables() {
        let empty = TableProvider::from_entries("empty", []).unwrap();
        let mut registry = ProviderRegistry::new();
        registry.register(empty);
        assert!(registry.select().is_none());

        let one = TableProvider::from_entries("one", [(date(1972, 6, 30), 1)]).unwrap();
        registry.register(one);
        assert_eq!(registry.select().unwrap().name(), "one");
    }
}
