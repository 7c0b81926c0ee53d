// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The UTC leap-second table.
//!
//! Two counting systems meet here:
//!
//! - **POSIX seconds** since 1970-01-01, where every day has 86 400 seconds;
//! - **UTC seconds** since 1972-01-01, which also count inserted leap seconds.
//!
//! [`LeapSeconds::enhance`] maps the first onto the second and
//! [`LeapSeconds::strip`] goes back. Inside an inserted leap second the
//! mapping is not bijective: `strip` folds 23:59:60 onto 23:59:59.
//!
//! Reads load one immutable snapshot through [`ArcSwap`] and never block;
//! registrations serialize on a mutex and publish a new snapshot with a single
//! atomic swap.

use super::config::LeapSecondConfig;
use super::provider::{LeapSecondProvider, ProviderRegistry, TableProvider};
use super::{TAI_MINUS_UTC_AT_EPOCH, UTC_EPOCH_POSIX};
use crate::date::PlainDate;
use crate::error::TimeError;
use crate::gregorian::MJD_OF_UNIX_EPOCH;
use crate::timestamp::SECONDS_PER_DAY;
use arc_swap::ArcSwap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
// Events
// ═══════════════════════════════════════════════════════════════════════════

/// One leap-second transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeapSecondEvent {
    date: PlainDate,
    shift: i32,
    raw: i64,
    utc: i64,
}

impl LeapSecondEvent {
    /// Last day of the UTC day carrying the transition.
    #[inline]
    pub fn date(&self) -> PlainDate {
        self.date
    }

    /// `+1` for an inserted second, `-1` for a removed one.
    #[inline]
    pub fn shift(&self) -> i32 {
        self.shift
    }

    /// POSIX second 23:59:59 of [`Self::date`], counted from 1972-01-01.
    #[inline]
    pub fn raw(&self) -> i64 {
        self.raw
    }

    /// UTC-scale value of the transition: `raw` plus all shifts up to and
    /// including this one.
    #[inline]
    pub fn utc(&self) -> i64 {
        self.utc
    }

    fn raw_of(date: PlainDate) -> i64 {
        (date.mjd() - MJD_OF_UNIX_EPOCH + 1) * SECONDS_PER_DAY - UTC_EPOCH_POSIX - 1
    }
}

impl fmt::Display for LeapSecondEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: utc={}, raw={} (shift={})",
            self.date, self.utc, self.raw, self.shift
        )
    }
}

/// Immutable table state; replaced as a whole on registration.
#[derive(Debug, Default)]
struct Snapshot {
    ascending: Vec<LeapSecondEvent>,
    descending: Vec<LeapSecondEvent>,
}

impl Snapshot {
    fn from_ascending(ascending: Vec<LeapSecondEvent>) -> Self {
        let mut descending = ascending.clone();
        descending.reverse();
        Self {
            ascending,
            descending,
        }
    }

    fn build(table: &BTreeMap<PlainDate, i32>) -> Self {
        let mut diff = 0i64;
        let events = table
            .iter()
            .map(|(&date, &shift)| {
                diff += shift as i64;
                let raw = LeapSecondEvent::raw_of(date);
                LeapSecondEvent {
                    date,
                    shift,
                    raw,
                    utc: raw + diff,
                }
            })
            .collect();
        Self::from_ascending(events)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LeapSeconds
// ═══════════════════════════════════════════════════════════════════════════

/// The authoritative leap-second table.
///
/// # Examples
///
/// ```
/// use tempora::LeapSeconds;
///
/// let leaps = LeapSeconds::builder().build();
/// // 2017-01-01T00:00Z in POSIX seconds
/// let posix = 1_483_228_800;
/// let utc = leaps.enhance(posix);
/// assert_eq!(utc, posix - 63_072_000 + 27);
/// assert_eq!(leaps.strip(utc), posix);
/// ```
pub struct LeapSeconds {
    provider: String,
    expires: Option<PlainDate>,
    suppressed: bool,
    final_table: bool,
    supports_negative: bool,
    snapshot: ArcSwap<Snapshot>,
    writer: Mutex<()>,
}

static SHARED: OnceLock<Arc<LeapSeconds>> = OnceLock::new();

impl LeapSeconds {
    /// Process-wide table configured from the environment on first use.
    ///
    /// See [`LeapSecondConfig::from_env`] for the recognised variables.
    pub fn shared() -> Arc<LeapSeconds> {
        SHARED
            .get_or_init(|| {
                let config = LeapSecondConfig::from_env();
                Arc::new(Self::builder().config(config).build())
            })
            .clone()
    }

    pub fn builder() -> LeapSecondsBuilder {
        LeapSecondsBuilder::default()
    }

    /// A table without leap seconds: UTC degenerates to POSIX time.
    pub fn suppressed() -> Self {
        Self::builder()
            .config(LeapSecondConfig {
                suppressed: true,
                ..LeapSecondConfig::default()
            })
            .build()
    }

    fn from_registry(config: &LeapSecondConfig, registry: &ProviderRegistry) -> Self {
        if config.suppressed {
            info!("leap seconds suppressed");
            return Self {
                provider: String::new(),
                expires: None,
                suppressed: true,
                final_table: config.final_table,
                supports_negative: false,
                snapshot: ArcSwap::from_pointee(Snapshot::default()),
                writer: Mutex::new(()),
            };
        }

        let provider: Arc<dyn LeapSecondProvider> = match registry.select() {
            Some(p) => p,
            None => {
                debug!("no leap-second provider registered, using built-in data");
                Arc::new(TableProvider::builtin())
            }
        };
        let snapshot = Snapshot::build(provider.table());
        let supports_negative = if config.final_table {
            provider.supports_negative() && snapshot.ascending.iter().any(|e| e.shift < 0)
        } else {
            true
        };
        info!(
            provider = provider.name(),
            events = snapshot.ascending.len(),
            final_table = config.final_table,
            "leap-second table loaded"
        );

        Self {
            provider: provider.name().to_owned(),
            expires: provider.expiration(),
            suppressed: false,
            final_table: config.final_table,
            supports_negative,
            snapshot: ArcSwap::from_pointee(snapshot),
            writer: Mutex::new(()),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// `true` when at least one event is known.
    pub fn is_enabled(&self) -> bool {
        !self.snapshot.load().ascending.is_empty()
    }

    /// `true` when new events may be registered.
    pub fn is_extensible(&self) -> bool {
        !self.final_table && !self.suppressed && self.is_enabled()
    }

    pub fn is_final(&self) -> bool {
        self.final_table
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.snapshot.load().ascending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All events, newest first.
    pub fn events(&self) -> Vec<LeapSecondEvent> {
        self.snapshot.load().descending.clone()
    }

    /// Most recent event.
    pub fn last_event(&self) -> Option<LeapSecondEvent> {
        self.snapshot.load().descending.first().copied()
    }

    pub fn supports_negative(&self) -> bool {
        self.supports_negative
    }

    pub fn provider_name(&self) -> &str {
        &self.provider
    }

    pub fn expiration_date(&self) -> Option<PlainDate> {
        self.expires
    }

    // ── conversions ───────────────────────────────────────────────────

    /// POSIX seconds → UTC seconds since 1972-01-01.
    ///
    /// Values at or before the UTC epoch carry no shift, but they are still
    /// re-based onto 1972-01-01: `enhance(0)` is `-63_072_000`, not `0`. This
    /// keeps [`LeapSeconds::strip`] an exact inverse there, so
    /// `strip(enhance(t)) == t` for every `t` before 1972.
    pub fn enhance(&self, unix: i64) -> i64 {
        let epoch_time = unix - UTC_EPOCH_POSIX;
        if epoch_time <= 0 {
            return epoch_time;
        }
        let snapshot = self.snapshot.load();
        for event in &snapshot.descending {
            if event.raw < epoch_time {
                return epoch_time + (event.utc - event.raw);
            }
        }
        epoch_time
    }

    /// UTC seconds since 1972-01-01 → POSIX seconds.
    ///
    /// An inserted leap second maps onto the POSIX second preceding it.
    pub fn strip(&self, utc: i64) -> i64 {
        if utc <= 0 {
            return utc + UTC_EPOCH_POSIX;
        }
        let snapshot = self.snapshot.load();
        let negatives = self.supports_negative;
        for event in &snapshot.descending {
            let shift = event.shift as i64;
            if event.utc - shift < utc || (negatives && shift < 0 && event.utc < utc) {
                return utc + (event.raw - event.utc) + UTC_EPOCH_POSIX;
            }
        }
        utc + UTC_EPOCH_POSIX
    }

    /// Shift applied at the end of `date`; 0 for ordinary days and days
    /// before 1972.
    pub fn shift_on(&self, date: PlainDate) -> i32 {
        if date.year() < 1972 {
            return 0;
        }
        let snapshot = self.snapshot.load();
        snapshot
            .descending
            .iter()
            .find(|e| e.date == date)
            .map_or(0, |e| e.shift)
    }

    /// How far `utc` reaches into a positive leap second: 1 for the leap
    /// second itself, 0 elsewhere.
    pub fn shift_at(&self, utc: i64) -> i32 {
        if utc <= 0 {
            return 0;
        }
        let snapshot = self.snapshot.load();
        for event in &snapshot.descending {
            if utc > event.utc {
                return 0;
            }
            let start = event.utc - event.shift as i64;
            if utc > start {
                return (utc - start) as i32;
            }
        }
        0
    }

    /// `true` when `utc` is an inserted leap second.
    pub fn is_positive_leap_second(&self, utc: i64) -> bool {
        self.is_event_at(utc, 1)
    }

    /// `true` when `utc` is the last second before a removed one.
    pub fn is_negative_leap_second(&self, utc: i64) -> bool {
        self.is_event_at(utc, -1)
    }

    fn is_event_at(&self, utc: i64, shift: i32) -> bool {
        if utc <= 0 {
            return false;
        }
        let snapshot = self.snapshot.load();
        snapshot
            .descending
            .iter()
            .take_while(|e| e.utc >= utc)
            .any(|e| e.utc == utc && e.shift == shift)
    }

    /// TAI − UTC in whole seconds at a POSIX instant.
    ///
    /// Constant 10 s before 1972.
    pub fn tai_minus_utc(&self, unix: i64) -> i64 {
        TAI_MINUS_UTC_AT_EPOCH + self.enhance(unix) - (unix - UTC_EPOCH_POSIX)
    }

    // ── registration ──────────────────────────────────────────────────

    /// Appends an inserted leap second at the end of the given day.
    pub fn register_positive(&self, year: i32, month: u8, day: u8) -> Result<(), TimeError> {
        self.register(year, month, day, 1)
    }

    /// Appends a removed leap second at the end of the given day.
    pub fn register_negative(&self, year: i32, month: u8, day: u8) -> Result<(), TimeError> {
        self.register(year, month, day, -1)
    }

    fn register(&self, year: i32, month: u8, day: u8, shift: i32) -> Result<(), TimeError> {
        if self.suppressed {
            return Err(TimeError::IllegalState("Leap seconds are suppressed.".into()));
        }
        if self.final_table {
            return Err(TimeError::IllegalState("Leap seconds are final.".into()));
        }
        let date = PlainDate::of(year, month, day)?;

        // A snapshot is never left half-built, so a poisoned lock is reclaimed.
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.snapshot.load_full();
        let last = snapshot
            .descending
            .first()
            .ok_or_else(|| TimeError::IllegalState("Leap seconds not activated.".into()))?;
        if date <= last.date {
            return Err(TimeError::InvalidArgument(format!(
                "New leap second must be after last leap second: {date} <= {}",
                last.date
            )));
        }

        let raw = LeapSecondEvent::raw_of(date);
        let diff = last.utc - last.raw + shift as i64;
        let event = LeapSecondEvent {
            date,
            shift,
            raw,
            utc: raw + diff,
        };
        let mut ascending = snapshot.ascending.clone();
        ascending.push(event);
        self.snapshot.store(Arc::new(Snapshot::from_ascending(ascending)));
        info!(date = %date, shift, utc = event.utc, "leap second registered");
        Ok(())
    }
}

impl Default for LeapSeconds {
    /// Built-in data, mutable.
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for LeapSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeapSeconds")
            .field("provider", &self.provider)
            .field("events", &self.len())
            .field("suppressed", &self.suppressed)
            .field("final_table", &self.final_table)
            .finish()
    }
}

impl fmt::Display for LeapSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_enabled() {
            return f.write_str("[LEAP SECONDS NOT SUPPORTED]");
        }
        write!(f, "[PROVIDER={}", self.provider)?;
        if let Some(expires) = self.expires {
            write!(f, ",EXPIRES={expires}")?;
        }
        f.write_str(",EVENTS=[")?;
        for (i, event) in self.snapshot.load().descending.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{event}")?;
        }
        f.write_str("]]")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════

/// Builder for explicit [`LeapSeconds`] handles.
///
/// Without any provider the built-in dataset is used; a configured data file
/// is registered as an additional provider.
#[derive(Debug, Default)]
pub struct LeapSecondsBuilder {
    config: LeapSecondConfig,
    registry: ProviderRegistry,
}

impl LeapSecondsBuilder {
    pub fn config(mut self, config: LeapSecondConfig) -> Self {
        self.config = config;
        self
    }

    pub fn final_table(mut self, value: bool) -> Self {
        self.config.final_table = value;
        self
    }

    pub fn provider<P: LeapSecondProvider + 'static>(mut self, provider: P) -> Self {
        self.registry.register(provider);
        self
    }

    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(mut self) -> LeapSeconds {
        if let Some(path) = self.config.data_file.clone() {
            match TableProvider::from_file(&path) {
                Ok(provider) => {
                    self.registry.register(provider);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "ignoring leap-second data file");
                }
            }
        }
        if self.registry.is_empty() {
            self.registry.register(TableProvider::builtin());
        }
        LeapSeconds::from_registry(&self.config, &self.registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> PlainDate {
        PlainDate::of(y, m, d).unwrap()
    }

    /// POSIX seconds at 00:00 of the given day.
    fn posix(y: i32, m: u8, d: u8) -> i64 {
        (date(y, m, d).mjd() - MJD_OF_UNIX_EPOCH) * SECONDS_PER_DAY
    }

    #[test]
    fn builtin_table_cumulates_27_seconds() {
        let ls = LeapSeconds::default();
        assert_eq!(ls.len(), 27);
        assert!(ls.is_enabled());
        assert!(ls.is_extensible());
        assert_eq!(ls.provider_name(), "builtin");
        let last = ls.last_event().unwrap();
        assert_eq!(last.date(), date(2016, 12, 31));
        assert_eq!(last.utc() - last.raw(), 27);
        assert_eq!(ls.events().len(), 27);
        assert_eq!(ls.events()[26].date(), date(1972, 6, 30));
    }

    #[test]
    fn first_event_values() {
        let ls = LeapSeconds::default();
        let first = ls.events()[26];
        // 1972-06-30T23:59:59 counted from 1972-01-01
        assert_eq!(first.raw(), 182 * 86_400 - 1);
        assert_eq!(first.utc(), first.raw() + 1);
    }

    #[test]
    fn enhance_and_strip_around_2016_leap_second() {
        let ls = LeapSeconds::default();
        let midnight = posix(2017, 1, 1);
        let before = midnight - 1; // 2016-12-31T23:59:59

        let utc_before = ls.enhance(before);
        assert_eq!(utc_before, before - UTC_EPOCH_POSIX + 26);
        let utc_midnight = ls.enhance(midnight);
        assert_eq!(utc_midnight, utc_before + 2);

        // The leap second 23:59:60 sits between the two.
        let leap = utc_before + 1;
        assert!(ls.is_positive_leap_second(leap));
        assert!(!ls.is_positive_leap_second(utc_before));
        assert_eq!(ls.strip(leap), before);
        assert_eq!(ls.strip(utc_before), before);
        assert_eq!(ls.strip(utc_midnight), midnight);
        assert_eq!(ls.shift_at(leap), 1);
        assert_eq!(ls.shift_at(utc_before), 0);
    }

    #[test]
    fn before_1972_there_is_no_shift() {
        let ls = LeapSeconds::default();
        assert_eq!(ls.enhance(0), -UTC_EPOCH_POSIX);
        assert_eq!(ls.strip(-UTC_EPOCH_POSIX), 0);
        assert_eq!(ls.shift_on(date(1971, 12, 31)), 0);
        assert_eq!(ls.tai_minus_utc(0), 10);
        assert_eq!(ls.tai_minus_utc(posix(2017, 1, 1)), 37);
    }

    #[test]
    fn shift_on_dates() {
        let ls = LeapSeconds::default();
        assert_eq!(ls.shift_on(date(2016, 12, 31)), 1);
        assert_eq!(ls.shift_on(date(2016, 12, 30)), 0);
        assert_eq!(ls.shift_on(date(1972, 6, 30)), 1);
    }

    #[test]
    fn suppressed_table_is_posix_passthrough() {
        let ls = LeapSeconds::suppressed();
        assert!(!ls.is_enabled());
        assert!(!ls.is_extensible());
        let t = posix(2017, 1, 1);
        assert_eq!(ls.enhance(t), t - UTC_EPOCH_POSIX);
        assert_eq!(ls.strip(t - UTC_EPOCH_POSIX), t);
        assert!(matches!(
            ls.register_positive(2030, 6, 30),
            Err(TimeError::IllegalState(_))
        ));
        assert_eq!(ls.to_string(), "[LEAP SECONDS NOT SUPPORTED]");
    }

    #[test]
    fn registration_rules() {
        let ls = LeapSeconds::default();
        assert!(matches!(
            ls.register_positive(2016, 12, 31),
            Err(TimeError::InvalidArgument(_))
        ));
        assert!(matches!(
            ls.register_positive(2030, 2, 30),
            Err(TimeError::InvalidDate(_))
        ));
        ls.register_positive(2030, 6, 30).unwrap();
        assert_eq!(ls.len(), 28);
        let last = ls.last_event().unwrap();
        assert_eq!(last.utc() - last.raw(), 28);
        assert_eq!(ls.shift_on(date(2030, 6, 30)), 1);
    }

    #[test]
    fn negative_registration_reverses_shift() {
        let ls = LeapSeconds::default();
        ls.register_negative(2030, 6, 30).unwrap();
        let last = ls.last_event().unwrap();
        assert_eq!(last.shift(), -1);
        assert_eq!(last.utc() - last.raw(), 26);
        assert!(ls.is_negative_leap_second(last.utc()));

        // 23:59:58 is the last second of the shortened day.
        let midnight = posix(2030, 7, 1);
        let utc_midnight = ls.enhance(midnight);
        assert_eq!(ls.enhance(midnight - 2) + 1, utc_midnight);
        assert_eq!(ls.strip(utc_midnight), midnight);
    }

    #[test]
    fn final_table_rejects_registration() {
        let ls = LeapSeconds::builder().final_table(true).build();
        assert!(ls.is_final());
        assert!(!ls.supports_negative());
        assert!(matches!(
            ls.register_positive(2030, 6, 30),
            Err(TimeError::IllegalState(_))
        ));
    }

    #[test]
    fn empty_provider_falls_back_to_builtin() {
        let empty = TableProvider::from_entries("empty", []).unwrap();
        let ls = LeapSeconds::builder().provider(empty).build();
        assert!(ls.is_enabled());
        assert_eq!(ls.provider_name(), "builtin");
        assert_eq!(ls.len(), 27);
        ls.register_positive(2030, 6, 30).unwrap();
        assert_eq!(ls.len(), 28);
    }

    #[test]
    fn enhance_rebases_times_before_1972() {
        let ls = LeapSeconds::default();
        assert_eq!(ls.enhance(0), -63_072_000);
        assert_eq!(ls.enhance(posix(1972, 1, 1)), 0);
        for t in [-86_400, 0, 1_000_000, posix(1972, 1, 1)] {
            assert_eq!(ls.strip(ls.enhance(t)), t);
        }
    }

    #[test]
    fn reads_do_not_wait_for_registration() {
        let ls = LeapSeconds::default();
        let _writer = ls.writer.lock().unwrap();
        assert_eq!(ls.len(), 27);
        assert_eq!(ls.shift_on(date(2016, 12, 31)), 1);
    }

    #[test]
    fn display_lists_newest_first() {
        let provider = TableProvider::from_entries("two", [(date(1972, 6, 30), 1), (date(1972, 12, 31), 1)]).unwrap();
        let ls = LeapSeconds::builder().provider(provider).build();
        let text = ls.to_string();
        assert!(text.starts_with("[PROVIDER=two,EVENTS=[1972-12-31"));
        assert!(text.contains("|1972-06-30"));
    }

    #[test]
    fn missing_data_file_falls_back_to_builtin() {
        let config = LeapSecondConfig {
            data_file: Some("/nonexistent/tempora-leaps.txt".into()),
            ..LeapSecondConfig::default()
        };
        let ls = LeapSeconds::builder().config(config).build();
        assert_eq!(ls.provider_name(), "builtin");
        assert_eq!(ls.len(), 27);
    }

    #[test]
    fn concurrent_readers_see_complete_snapshots() {
        let ls = Arc::new(LeapSeconds::default());
        let writer = {
            let ls = Arc::clone(&ls);
            std::thread::spawn(move || {
                for year in 2030..2040 {
                    ls.register_positive(year, 6, 30).unwrap();
                }
            })
        };
        for _ in 0..1_000 {
            let events = ls.events();
            let len = events.len();
            assert!((27..=37).contains(&len));
            // every snapshot is internally consistent
            assert_eq!(events[0].utc() - events[0].raw(), len as i64);
        }
        writer.join().unwrap();
        assert_eq!(ls.len(), 37);
    }
}
