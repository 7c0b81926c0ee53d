// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ISO-8601 text for dates, timestamps, moments and intervals.
//!
//! Dates come in three styles, each in extended or basic form:
//!
//! | Style    | Extended       | Basic      |
//! |----------|----------------|------------|
//! | calendar | `2012-02-29`   | `20120229` |
//! | ordinal  | `2012-060`     | `2012060`  |
//! | week     | `2012-W09-3`   | `2012W093` |
//!
//! Intervals are `start/end`, `start/period` or `period/end`, optionally
//! wrapped in `[`/`(` and `]`/`)`. An end may omit leading fields it shares
//! with the start (`2012-01-01/02-14`, `2012-01-01T10:00/12:00`).

use super::{Boundary, Interval, IntervalEdge};
use crate::date::{CalendarUnit, PlainDate};
use crate::error::TimeError;
use crate::instant::TimeInstant;
use crate::moment::Moment;
use crate::scale::{LeapSeconds, TimeScale};
use crate::timestamp::{utc_offset, ClockUnit, PlainTime, PlainTimestamp};
use crate::weekday::Weekday;
use chrono::FixedOffset;
use tracing::debug;

/// Layout of a date component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateStyle {
    Calendar,
    Ordinal,
    Week,
}

#[inline]
fn err(message: impl Into<String>, index: usize) -> TimeError {
    TimeError::parse(message, index)
}

/// Reads exactly `count` ASCII digits at `from`.
fn digits(text: &str, from: usize, count: usize, base: usize) -> Result<u32, TimeError> {
    let slice = text
        .get(from..from + count)
        .ok_or_else(|| err("Unexpected end of text", base + text.len().min(from)))?;
    let mut value = 0u32;
    for (i, b) in slice.bytes().enumerate() {
        if !b.is_ascii_digit() {
            return Err(err(format!("Digit expected, found '{}'", b as char), base + from + i));
        }
        value = value * 10 + u32::from(b - b'0');
    }
    Ok(value)
}

fn digit_run(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Year with optional sign; unsigned years have exactly four digits.
pub(crate) fn parse_year(text: &str, base: usize) -> Result<i32, TimeError> {
    let bytes = text.as_bytes();
    let (negative, start) = match bytes.first() {
        Some(b'+') => (false, 1),
        Some(b'-') => (true, 1),
        Some(_) => (false, 0),
        None => return Err(err("Missing year", base)),
    };
    let count = digit_run(bytes, start);
    if start + count != bytes.len() {
        return Err(err("Digit expected in year", base + start + count));
    }
    if count < 4 || (start == 0 && count != 4) || count > 9 {
        return Err(err(format!("Invalid year: {text}"), base));
    }
    let magnitude: i32 = text[start..]
        .parse()
        .map_err(|_| err(format!("Invalid year: {text}"), base))?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parses a complete date component.
pub(crate) fn parse_date_at(text: &str, base: usize) -> Result<(PlainDate, DateStyle), TimeError> {
    let bytes = text.as_bytes();
    let signed = matches!(bytes.first(), Some(b'+' | b'-'));
    let year_start = usize::from(signed);
    let year_end = year_start + digit_run(bytes, year_start);
    let invalid = |e: TimeError| err(e.to_string(), base);

    match bytes.get(year_end) {
        // extended
        Some(b'-') => {
            let year = parse_year(&text[..year_end], base)?;
            let from = year_end + 1;
            let rest = &text[from..];
            if rest.starts_with('W') {
                let week = digits(text, from + 1, 2, base)?;
                if bytes.get(from + 3) != Some(&b'-') {
                    return Err(err("Expected '-' after week", base + from + 3));
                }
                let day = digits(text, from + 4, 1, base)?;
                expect_end(text, from + 5, base)?;
                week_date(year, week, day).map(|d| (d, DateStyle::Week)).map_err(invalid)
            } else if rest.len() == 3 {
                let day = digits(text, from, 3, base)?;
                PlainDate::of_year_day(year, day as u16)
                    .map(|d| (d, DateStyle::Ordinal))
                    .map_err(invalid)
            } else {
                let month = digits(text, from, 2, base)?;
                if bytes.get(from + 2) != Some(&b'-') {
                    return Err(err("Expected '-' after month", base + from + 2));
                }
                let day = digits(text, from + 3, 2, base)?;
                expect_end(text, from + 5, base)?;
                PlainDate::of(year, month as u8, day as u8)
                    .map(|d| (d, DateStyle::Calendar))
                    .map_err(invalid)
            }
        }
        // basic week date
        Some(b'W') if !signed && year_end == 4 => {
            let year = parse_year(&text[..4], base)?;
            let week = digits(text, 5, 2, base)?;
            let day = digits(text, 7, 1, base)?;
            expect_end(text, 8, base)?;
            week_date(year, week, day).map(|d| (d, DateStyle::Week)).map_err(invalid)
        }
        None if signed => Err(err("Signed years need the extended format", base)),
        None if year_end == 8 => {
            let year = parse_year(&text[..4], base)?;
            let month = digits(text, 4, 2, base)?;
            let day = digits(text, 6, 2, base)?;
            PlainDate::of(year, month as u8, day as u8)
                .map(|d| (d, DateStyle::Calendar))
                .map_err(invalid)
        }
        None if year_end == 7 => {
            let year = parse_year(&text[..4], base)?;
            let day = digits(text, 4, 3, base)?;
            PlainDate::of_year_day(year, day as u16)
                .map(|d| (d, DateStyle::Ordinal))
                .map_err(invalid)
        }
        None => Err(err(format!("Unrecognised date: '{text}'"), base)),
        Some(_) => Err(err("Unexpected character in date", base + year_end)),
    }
}

fn week_date(year: i32, week: u32, day: u32) -> Result<PlainDate, TimeError> {
    let weekday = Weekday::from_value(day as u8)?;
    PlainDate::of_week_date(year, week as u8, weekday)
}

fn expect_end(text: &str, pos: usize, base: usize) -> Result<(), TimeError> {
    if pos < text.len() {
        Err(err("Unexpected trailing characters", base + pos))
    } else {
        Ok(())
    }
}

/// Raw clock fields; `hour` may be 24 and `second` 60 until validated.
#[derive(Debug, Clone, Copy)]
struct Clock {
    hour: u32,
    minute: u32,
    second: u32,
    nano: u32,
}

/// `hh[:mm[:ss[.f]]]` or `hh[mm[ss[.f]]]`; comma is accepted as decimal mark.
fn parse_clock(text: &str, base: usize) -> Result<Clock, TimeError> {
    let bytes = text.as_bytes();
    let hour = digits(text, 0, 2, base)?;
    let (mut minute, mut second, mut nano) = (0, 0, 0);
    let mut pos = 2;
    let extended = bytes.get(2) == Some(&b':');
    if extended {
        minute = digits(text, 3, 2, base)?;
        pos = 5;
        if bytes.get(pos) == Some(&b':') {
            second = digits(text, 6, 2, base)?;
            pos = 8;
        }
    } else if digit_run(bytes, 2) >= 2 {
        minute = digits(text, 2, 2, base)?;
        pos = 4;
        if digit_run(bytes, 4) >= 2 {
            second = digits(text, 4, 2, base)?;
            pos = 6;
        }
    }
    if matches!(bytes.get(pos), Some(b'.' | b',')) {
        let count = digit_run(bytes, pos + 1);
        if count == 0 || count > 9 {
            return Err(err("Invalid fraction of second", base + pos + 1));
        }
        nano = digits(text, pos + 1, count, base)? * 10u32.pow(9 - count as u32);
        pos += 1 + count;
    }
    expect_end(text, pos, base)?;
    if hour > 24 || minute > 59 || second > 60 || (hour == 24 && (minute | second | nano) != 0) {
        return Err(err(format!("Invalid time: '{text}'"), base));
    }
    Ok(Clock {
        hour,
        minute,
        second,
        nano,
    })
}

/// Combines date and clock; `24:00` rolls over to the next midnight.
fn timestamp_of(date: PlainDate, clock: Clock, index: usize) -> Result<PlainTimestamp, TimeError> {
    if clock.hour == 24 {
        let next = date.plus_days(1).map_err(|e| err(e.to_string(), index))?;
        return Ok(PlainTimestamp::of(next, PlainTime::MIDNIGHT));
    }
    let time = PlainTime::of_nanos(clock.hour as u8, clock.minute as u8, clock.second as u8, clock.nano)
        .map_err(|e| err(e.to_string(), index))?;
    Ok(PlainTimestamp::of(date, time))
}

/// `Z`, `±hh:mm`, `±hhmm` or `±hh`.
fn parse_offset(text: &str, base: usize) -> Result<FixedOffset, TimeError> {
    if text == "Z" {
        return Ok(utc_offset());
    }
    let sign = match text.as_bytes().first() {
        Some(b'+') => 1,
        Some(b'-') => -1,
        _ => return Err(err("Offset expected", base)),
    };
    let hours = digits(text, 1, 2, base)?;
    let minutes = match text.len() {
        3 => 0,
        5 => digits(text, 3, 2, base)?,
        6 if text.as_bytes()[3] == b':' => digits(text, 4, 2, base)?,
        _ => return Err(err(format!("Invalid offset: '{text}'"), base)),
    };
    if minutes > 59 {
        return Err(err(format!("Invalid offset: '{text}'"), base));
    }
    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60) as i32)
        .ok_or_else(|| err(format!("Offset out of range: '{text}'"), base))
}

fn split_at_t(text: &str, base: usize) -> Result<usize, TimeError> {
    text.find('T')
        .ok_or_else(|| err("Missing 'T' between date and time", base + text.len()))
}

fn parse_timestamp_at(text: &str, base: usize) -> Result<(PlainTimestamp, DateStyle), TimeError> {
    let t = split_at_t(text, base)?;
    let (date, style) = parse_date_at(&text[..t], base)?;
    let clock = parse_clock(&text[t + 1..], base + t + 1)?;
    if clock.second == 60 {
        return Err(err("Leap second needs an offset", base + t + 1));
    }
    Ok((timestamp_of(date, clock, base)?, style))
}

/// Byte index of the offset in a timestamp with offset.
fn offset_start(text: &str, t: usize) -> Option<usize> {
    text[t + 1..]
        .find(|c| matches!(c, 'Z' | '+' | '-'))
        .map(|i| t + 1 + i)
}

fn parse_moment_at(
    text: &str,
    base: usize,
    leaps: &LeapSeconds,
) -> Result<(Moment, DateStyle, FixedOffset), TimeError> {
    let t = split_at_t(text, base)?;
    let o = offset_start(text, t).ok_or_else(|| err("Missing offset", base + text.len()))?;
    let offset = parse_offset(&text[o..], base + o)?;
    let (date, style) = parse_date_at(&text[..t], base)?;
    let mut clock = parse_clock(&text[t + 1..o], base + t + 1)?;
    let leap = clock.second == 60;
    if leap {
        clock.second = 59;
    }
    let moment = timestamp_of(date, clock, base)?
        .at(offset)
        .map_err(|e| err(e.to_string(), base))?;
    if !leap {
        return Ok((moment, style, offset));
    }
    let utc = moment.elapsed_time(TimeScale::Utc, leaps) + 1;
    if !leaps.is_positive_leap_second(utc) {
        return Err(err(format!("No leap second at '{text}'"), base + t + 1));
    }
    let moment = Moment::of_scale(utc, clock.nano, TimeScale::Utc, leaps)
        .map_err(|e| err(e.to_string(), base))?;
    Ok((moment, style, offset))
}

/// Parses a whole text as a date.
pub(crate) fn parse_date(text: &str) -> Result<PlainDate, TimeError> {
    parse_date_at(text, 0).map(|(d, _)| d)
}

pub(crate) fn parse_timestamp(text: &str) -> Result<PlainTimestamp, TimeError> {
    parse_timestamp_at(text, 0).map(|(t, _)| t)
}

/// Parses a timestamp with offset; `23:59:60` is checked against `leaps`.
pub(crate) fn parse_moment_with(text: &str, leaps: &LeapSeconds) -> Result<Moment, TimeError> {
    parse_moment_at(text, 0, leaps).map(|(m, _, _)| m)
}

// ═══════════════════════════════════════════════════════════════════════════
// Periods
// ═══════════════════════════════════════════════════════════════════════════

/// An ISO-8601 duration such as `P1Y2M10DT2H30M`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct IsoPeriod {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanos: i64,
}

impl IsoPeriod {
    fn has_time(&self) -> bool {
        (self.hours | self.minutes | self.seconds | self.nanos) != 0
    }

    fn calendar_parts(&self) -> [(i64, CalendarUnit); 4] {
        [
            (self.years, CalendarUnit::Years),
            (self.months, CalendarUnit::Months),
            (self.weeks, CalendarUnit::Weeks),
            (self.days, CalendarUnit::Days),
        ]
    }

    fn clock_parts(&self) -> [(i64, ClockUnit); 4] {
        [
            (self.hours, ClockUnit::Hours),
            (self.minutes, ClockUnit::Minutes),
            (self.seconds, ClockUnit::Seconds),
            (self.nanos, ClockUnit::Nanos),
        ]
    }

    fn apply_to_date(&self, date: PlainDate, sign: i64) -> Result<PlainDate, TimeError> {
        self.calendar_parts()
            .into_iter()
            .filter(|&(amount, _)| amount != 0)
            .try_fold(date, |d, (amount, unit)| d.plus(sign * amount, unit))
    }

    fn apply_to_timestamp(&self, ts: PlainTimestamp, sign: i64) -> Result<PlainTimestamp, TimeError> {
        let ts = PlainTimestamp::of(self.apply_to_date(ts.date(), sign)?, ts.time());
        self.clock_parts()
            .into_iter()
            .filter(|&(amount, _)| amount != 0)
            .try_fold(ts, |t, (amount, unit)| t.plus(sign * amount, unit))
    }
}

pub(crate) fn parse_period(text: &str, base: usize) -> Result<IsoPeriod, TimeError> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'P') {
        return Err(err("Period must start with 'P'", base));
    }
    let mut period = IsoPeriod::default();
    let mut pos = 1;
    let mut in_time = false;
    let mut rank = 0;
    let mut any = false;
    while pos < bytes.len() {
        if bytes[pos] == b'T' {
            if in_time {
                return Err(err("Duplicate 'T' in period", base + pos));
            }
            in_time = true;
            pos += 1;
            continue;
        }
        let count = digit_run(bytes, pos);
        if count == 0 || count > 18 {
            return Err(err("Digit expected in period", base + pos));
        }
        let value: i64 = text[pos..pos + count]
            .parse()
            .map_err(|_| err("Invalid number in period", base + pos))?;
        pos += count;
        let mut fraction = 0;
        if in_time && matches!(bytes.get(pos), Some(b'.' | b',')) {
            let n = digit_run(bytes, pos + 1);
            if n == 0 || n > 9 {
                return Err(err("Invalid fraction in period", base + pos + 1));
            }
            fraction = i64::from(digits(text, pos + 1, n, base)?) * 10i64.pow(9 - n as u32);
            pos += 1 + n;
            if bytes.get(pos) != Some(&b'S') {
                return Err(err("Fraction only allowed for seconds", base + pos));
            }
        }
        let (new_rank, slot) = match (in_time, bytes.get(pos)) {
            (false, Some(b'Y')) => (1, &mut period.years),
            (false, Some(b'M')) => (2, &mut period.months),
            (false, Some(b'W')) => (3, &mut period.weeks),
            (false, Some(b'D')) => (4, &mut period.days),
            (true, Some(b'H')) => (5, &mut period.hours),
            (true, Some(b'M')) => (6, &mut period.minutes),
            (true, Some(b'S')) => (7, &mut period.seconds),
            _ => return Err(err("Unknown period unit", base + pos)),
        };
        if new_rank <= rank {
            return Err(err("Period units out of order", base + pos));
        }
        *slot = value;
        if fraction != 0 {
            period.nanos = fraction;
        }
        rank = new_rank;
        any = true;
        pos += 1;
    }
    if !any || bytes.last() == Some(&b'T') {
        return Err(err("Empty period", base + bytes.len()));
    }
    Ok(period)
}

// ═══════════════════════════════════════════════════════════════════════════
// Interval endpoints
// ═══════════════════════════════════════════════════════════════════════════

/// A parsed endpoint with the data a sibling endpoint may inherit.
pub(crate) struct Endpoint<T> {
    value: T,
    style: DateStyle,
    offset: FixedOffset,
}

/// Instants that can appear in ISO interval text.
pub(crate) trait IsoEndpoint: TimeInstant {
    /// End edge used when the text has no brackets.
    const END_EDGE: IntervalEdge;

    /// Data the endpoint parser consults besides the text.
    type Context: ?Sized;

    fn parse_endpoint(
        text: &str,
        base: usize,
        ctx: &Self::Context,
    ) -> Result<Endpoint<Self>, TimeError>;

    /// Fills the fields a reduced `end` omits from `start`.
    fn complete_end(start: &str, end: &str) -> String;

    fn apply_period(
        endpoint: &Endpoint<Self>,
        period: &IsoPeriod,
        sign: i64,
        index: usize,
    ) -> Result<Self, TimeError>;
}

/// Replaces the trailing fields of a start date with those of a reduced end.
fn complete_date(start: &str, end: &str) -> String {
    let body = start.trim_start_matches(['+', '-']);
    let sign = &start[..start.len() - body.len()];
    if body.contains('-') {
        let fields: Vec<&str> = body.split('-').collect();
        let given: Vec<&str> = end.split('-').collect();
        if given.len() >= fields.len() {
            return end.to_string();
        }
        let kept = &fields[..fields.len() - given.len()];
        format!("{sign}{}-{}", kept.join("-"), given.join("-"))
    } else if end.len() < start.len() {
        format!("{}{end}", &start[..start.len() - end.len()])
    } else {
        end.to_string()
    }
}

/// Date completion for timestamps; an end without `T` is a time of the
/// start date.
fn complete_timestamp(start: &str, end: &str) -> String {
    let start_t = start.find('T').unwrap_or(start.len());
    let start_date = &start[..start_t];
    match end.find('T') {
        Some(0) => format!("{start_date}{end}"),
        Some(t) => format!("{}{}", complete_date(start_date, &end[..t]), &end[t..]),
        None => format!("{start_date}T{end}"),
    }
}

impl IsoEndpoint for PlainDate {
    const END_EDGE: IntervalEdge = IntervalEdge::Closed;

    type Context = ();

    fn parse_endpoint(text: &str, base: usize, _ctx: &()) -> Result<Endpoint<Self>, TimeError> {
        let (value, style) = parse_date_at(text, base)?;
        Ok(Endpoint {
            value,
            style,
            offset: utc_offset(),
        })
    }

    fn complete_end(start: &str, end: &str) -> String {
        complete_date(start, end)
    }

    fn apply_period(
        endpoint: &Endpoint<Self>,
        period: &IsoPeriod,
        sign: i64,
        index: usize,
    ) -> Result<Self, TimeError> {
        if period.has_time() {
            return Err(err("Time components not allowed in a date period", index));
        }
        period.apply_to_date(endpoint.value, sign)
    }
}

impl IsoEndpoint for PlainTimestamp {
    const END_EDGE: IntervalEdge = IntervalEdge::Open;

    type Context = ();

    fn parse_endpoint(text: &str, base: usize, _ctx: &()) -> Result<Endpoint<Self>, TimeError> {
        let (value, style) = parse_timestamp_at(text, base)?;
        Ok(Endpoint {
            value,
            style,
            offset: utc_offset(),
        })
    }

    fn complete_end(start: &str, end: &str) -> String {
        complete_timestamp(start, end)
    }

    fn apply_period(
        endpoint: &Endpoint<Self>,
        period: &IsoPeriod,
        sign: i64,
        _index: usize,
    ) -> Result<Self, TimeError> {
        period.apply_to_timestamp(endpoint.value, sign)
    }
}

impl IsoEndpoint for Moment {
    const END_EDGE: IntervalEdge = IntervalEdge::Open;

    /// `23:59:60` is only accepted on days with a leap second in this table.
    type Context = LeapSeconds;

    fn parse_endpoint(
        text: &str,
        base: usize,
        leaps: &LeapSeconds,
    ) -> Result<Endpoint<Self>, TimeError> {
        let (value, style, offset) = parse_moment_at(text, base, leaps)?;
        Ok(Endpoint {
            value,
            style,
            offset,
        })
    }

    /// The end also inherits the offset of the start when it has none.
    fn complete_end(start: &str, end: &str) -> String {
        let start_t = start.find('T').unwrap_or(0);
        let start_offset = offset_start(start, start_t).map_or("", |o| &start[o..]);
        let has_offset = match end.find('T') {
            Some(t) => offset_start(end, t).is_some(),
            None => end.contains(['Z', '+', '-']),
        };
        let completed = complete_timestamp(start, end);
        if has_offset {
            completed
        } else {
            format!("{completed}{start_offset}")
        }
    }

    /// Calendar fields move the local time at the endpoint's offset.
    fn apply_period(
        endpoint: &Endpoint<Self>,
        period: &IsoPeriod,
        sign: i64,
        _index: usize,
    ) -> Result<Self, TimeError> {
        let local = endpoint.value.to_timestamp(endpoint.offset);
        period.apply_to_timestamp(local, sign)?.at(endpoint.offset)
    }
}

/// Extended-format flags of the date part and, unless it is a bare hour,
/// the time part.
fn format_flags(text: &str) -> (bool, Option<bool>) {
    let body = text.trim_start_matches(['+', '-']);
    let (date, time) = match body.find('T') {
        Some(t) => (&body[..t], &body[t + 1..]),
        None => (body, ""),
    };
    let clock = time.find(['Z', '+', '-']).map_or(time, |o| &time[..o]);
    let time_flag = if clock.contains(':') {
        Some(true)
    } else if clock.len() > 2 {
        Some(false)
    } else {
        None
    };
    (date.contains('-'), time_flag)
}

/// Both endpoints use the basic format or both use the extended one.
fn same_format(start: &str, end: &str) -> bool {
    let (start_date, start_time) = format_flags(start);
    let (end_date, end_time) = format_flags(end);
    start_date == end_date
        && match (start_time, end_time) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
}

enum Side<'a> {
    Infinite,
    Period(&'a str),
    Instant(&'a str),
}

fn classify<'a>(text: &'a str, infinity: &str) -> Side<'a> {
    if text == infinity {
        Side::Infinite
    } else if text.starts_with('P') {
        Side::Period(text)
    } else {
        Side::Instant(text)
    }
}

/// Parses `start/end`, `start/period` or `period/end` with optional
/// bracket notation and `-∞`/`+∞`.
pub(crate) fn parse_interval<T: IsoEndpoint>(
    text: &str,
    ctx: &T::Context,
) -> Result<Interval<T>, TimeError> {
    let result = parse_interval_inner(text, ctx);
    if let Err(e) = &result {
        debug!(text, error = %e, "interval parse failed");
    }
    result
}

fn parse_interval_inner<T: IsoEndpoint>(
    text: &str,
    ctx: &T::Context,
) -> Result<Interval<T>, TimeError> {
    if text.is_empty() {
        return Err(err("Empty text", 0));
    }
    let mut body = text;
    let mut base = 0;
    let mut start_edge = IntervalEdge::Closed;
    let mut end_edge = T::END_EDGE;
    if let Some(rest) = body.strip_prefix('[') {
        body = rest;
        base = 1;
    } else if let Some(rest) = body.strip_prefix('(') {
        body = rest;
        base = 1;
        start_edge = IntervalEdge::Open;
    }
    if let Some(rest) = body.strip_suffix(']') {
        body = rest;
        end_edge = IntervalEdge::Closed;
    } else if let Some(rest) = body.strip_suffix(')') {
        body = rest;
        end_edge = IntervalEdge::Open;
    }

    let slash = body
        .find('/')
        .ok_or_else(|| err("Missing interval separator '/'", base + body.len()))?;
    if let Some(second) = body[slash + 1..].find('/') {
        return Err(err("Interval with two slashes found", base + slash + 1 + second));
    }
    let (left, right) = (&body[..slash], &body[slash + 1..]);
    let right_base = base + slash + 1;
    if left.is_empty() {
        return Err(err("Missing start component", base));
    }
    if right.is_empty() {
        return Err(err("Missing end component", right_base));
    }

    let (start, end) = match (classify(left, "-∞"), classify(right, "+∞")) {
        (Side::Period(_), Side::Period(_)) => {
            return Err(err("Period on both sides", right_base));
        }
        (Side::Period(_), Side::Infinite) | (Side::Infinite, Side::Period(_)) => {
            return Err(err("Period cannot be combined with infinity", base));
        }
        (Side::Infinite, Side::Infinite) => (Boundary::InfinitePast, Boundary::InfiniteFuture),
        (Side::Infinite, Side::Instant(e)) => {
            let end = T::parse_endpoint(e, right_base, ctx)?;
            (Boundary::InfinitePast, Boundary::of(end_edge, end.value))
        }
        (Side::Instant(s), Side::Infinite) => {
            let start = T::parse_endpoint(s, base, ctx)?;
            (Boundary::of(start_edge, start.value), Boundary::InfiniteFuture)
        }
        (Side::Instant(s), Side::Period(p)) => {
            let start = T::parse_endpoint(s, base, ctx)?;
            let period = parse_period(p, right_base)?;
            let end = T::apply_period(&start, &period, 1, right_base)?;
            (Boundary::of(start_edge, start.value), Boundary::of(end_edge, end))
        }
        (Side::Period(p), Side::Instant(e)) => {
            let period = parse_period(p, base)?;
            let end = T::parse_endpoint(e, right_base, ctx)?;
            let start = T::apply_period(&end, &period, -1, base)?;
            (Boundary::of(start_edge, start), Boundary::of(end_edge, end.value))
        }
        (Side::Instant(s), Side::Instant(e)) => {
            let start = T::parse_endpoint(s, base, ctx)?;
            let completed = T::complete_end(s, e);
            let prefix = completed.len().saturating_sub(e.len());
            let end = T::parse_endpoint(&completed, 0, ctx).map_err(|failure| match failure {
                TimeError::Parse { message, index } => {
                    err(message, right_base + index.saturating_sub(prefix).min(e.len()))
                }
                other => other,
            })?;
            if start.style != end.style {
                return Err(err("Mixed date styles not allowed", right_base));
            }
            if !same_format(s, &completed) {
                return Err(err("Mixed basic and extended formats not allowed", right_base));
            }
            (Boundary::of(start_edge, start.value), Boundary::of(end_edge, end.value))
        }
    };
    Interval::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> PlainDate {
        PlainDate::of(y, m, d).unwrap()
    }

    #[test]
    fn date_styles() {
        assert_eq!(parse_date("2012-02-29").unwrap(), date(2012, 2, 29));
        assert_eq!(parse_date("20120229").unwrap(), date(2012, 2, 29));
        assert_eq!(parse_date("2012-060").unwrap(), date(2012, 2, 29));
        assert_eq!(parse_date("2012060").unwrap(), date(2012, 2, 29));
        assert_eq!(parse_date("2012-W09-3").unwrap(), date(2012, 2, 29));
        assert_eq!(parse_date("2012W093").unwrap(), date(2012, 2, 29));
        assert_eq!(parse_date("-0044-03-15").unwrap(), date(-44, 3, 15));
        assert_eq!(parse_date("+12345-01-01").unwrap(), date(12_345, 1, 1));
    }

    #[test]
    fn date_errors_carry_index() {
        assert_eq!(parse_date("2012-02-3x").unwrap_err().parse_index(), Some(9));
        assert_eq!(parse_date("2012-02-30").unwrap_err().parse_index(), Some(0));
        assert!(parse_date("-00440315").is_err());
        assert!(parse_date("12-02-03").is_err());
        assert!(parse_date("2012-02-03x").is_err());
        assert!(parse_date("2015-W54-1").is_err());
    }

    #[test]
    fn timestamps() {
        let ts = parse_timestamp("2012-02-29T10:15:30.5").unwrap();
        assert_eq!(ts.to_string(), "2012-02-29T10:15:30.500");
        assert_eq!(parse_timestamp("20120229T101530,5").unwrap(), ts);
        assert_eq!(parse_timestamp("2012-02-29T10").unwrap().to_string(), "2012-02-29T10:00");
        assert_eq!(
            parse_timestamp("2012-02-29T24:00").unwrap(),
            PlainTimestamp::of(date(2012, 3, 1), PlainTime::MIDNIGHT)
        );
        assert!(parse_timestamp("2012-02-29T24:01").is_err());
        assert!(parse_timestamp("2012-02-29 10:00").is_err());
        assert!(parse_timestamp("2012-02-29T23:59:60").is_err());
    }

    fn parse_moment(text: &str) -> Result<Moment, TimeError> {
        parse_moment_with(text, &LeapSeconds::default())
    }

    fn date_interval(text: &str) -> Result<Interval<PlainDate>, TimeError> {
        parse_interval(text, &())
    }

    #[test]
    fn moments_and_offsets() {
        let m = parse_moment("2012-06-30T12:00Z").unwrap();
        assert_eq!(m.to_string(), "2012-06-30T12:00Z");
        assert_eq!(parse_moment("2012-06-30T14:00+02:00").unwrap(), m);
        assert_eq!(parse_moment("2012-06-30T14:00+0200").unwrap(), m);
        assert_eq!(parse_moment("2012-06-30T10:00-02").unwrap(), m);
        assert!(parse_moment("2012-06-30T12:00").is_err());
        assert!(parse_moment("2012-06-30T12:00+25:00").is_err());
    }

    #[test]
    fn leap_second_text() {
        let leaps = LeapSeconds::default();
        let leap = parse_moment_with("2012-06-30T23:59:60Z", &leaps).unwrap();
        assert!(leap.is_leap_second());
        assert_eq!(leap.to_string(), "2012-06-30T23:59:60Z");
        let shifted = parse_moment_with("2012-07-01T01:59:60+02:00", &leaps).unwrap();
        assert_eq!(shifted, leap);
        assert!(parse_moment_with("2012-06-29T23:59:60Z", &leaps).is_err());
    }

    #[test]
    fn periods() {
        let p = parse_period("P1Y2M3W4DT5H6M7.25S", 0).unwrap();
        assert_eq!((p.years, p.months, p.weeks, p.days), (1, 2, 3, 4));
        assert_eq!((p.hours, p.minutes, p.seconds, p.nanos), (5, 6, 7, 250_000_000));
        assert!(parse_period("P", 0).is_err());
        assert!(parse_period("PT", 0).is_err());
        assert!(parse_period("P1D2Y", 0).is_err());
        assert!(parse_period("P1H", 0).is_err());
        assert_eq!(parse_period("P1X", 3).unwrap_err().parse_index(), Some(5));
    }

    #[test]
    fn date_completion() {
        assert_eq!(complete_date("2012-01-01", "02-14"), "2012-02-14");
        assert_eq!(complete_date("2012-01-01", "14"), "2012-01-14");
        assert_eq!(complete_date("-0044-03-01", "15"), "-0044-03-15");
        assert_eq!(complete_date("2012-W01-1", "W02-3"), "2012-W02-3");
        assert_eq!(complete_date("2012-001", "100"), "2012-100");
        assert_eq!(complete_date("20120101", "0214"), "20120214");
        assert_eq!(complete_date("2012-01-01", "2013-01-01"), "2013-01-01");
        assert_eq!(complete_timestamp("2012-01-01T10:00", "12:00"), "2012-01-01T12:00");
        assert_eq!(complete_timestamp("2012-01-01T10:00", "05T08:00"), "2012-01-05T08:00");
    }

    #[test]
    fn moment_end_inherits_offset() {
        assert_eq!(
            Moment::complete_end("2012-01-01T10:00+02:00", "12:00"),
            "2012-01-01T12:00+02:00"
        );
        assert_eq!(
            Moment::complete_end("2012-01-01T10:00+02:00", "12:00Z"),
            "2012-01-01T12:00Z"
        );
        assert_eq!(
            Moment::complete_end("2012-01-01T10:00Z", "2012-01-02T10:00-05:00"),
            "2012-01-02T10:00-05:00"
        );
    }

    #[test]
    fn interval_grammar_errors() {
        let two = date_interval("2012-01-01/2012-01-05/2012-01-09").unwrap_err();
        assert_eq!(two.parse_index(), Some(21));
        assert!(two.to_string().contains("two slashes"));
        assert!(date_interval("2012-01-01").is_err());
        assert!(date_interval("").is_err());
        assert_eq!(
            date_interval("2012-01-01/").unwrap_err().parse_index(),
            Some(11)
        );
        assert!(date_interval("P1D/P2D").is_err());
        let mixed = date_interval("2012-W01-1/2012-01-05").unwrap_err();
        assert!(mixed.to_string().contains("Mixed date styles"));
        assert!(date_interval("2012-01-01/PT2H").is_err());
        assert!(date_interval("2012-01-05/2012-01-01").is_err());
    }

    #[test]
    fn endpoints_share_basic_or_extended_format() {
        let mixed = date_interval("20120101/2012-02-14").unwrap_err();
        assert!(mixed.to_string().contains("basic and extended"));
        assert_eq!(mixed.parse_index(), Some(9));
        assert!(date_interval("2012-01-01/20120214").is_err());
        assert_eq!(
            date_interval("20120101/20120214").unwrap(),
            date_interval("2012-01-01/2012-02-14").unwrap()
        );
        assert!(date_interval("20120101/0214").is_ok());
        assert!(date_interval("2012-01-01/14").is_ok());

        let stamps = |text: &str| parse_interval::<PlainTimestamp>(text, &());
        assert!(stamps("2012-01-01T10:00/2012-01-01T1230").is_err());
        assert!(stamps("20120101T1000/20120101T1230").is_ok());
        assert!(stamps("2012-01-01T10/12:30").is_ok());
    }

    #[test]
    fn moment_intervals_check_leap_seconds_against_the_given_table() {
        let text = "2016-12-31T23:59:60Z/2017-01-01T00:00:01Z";
        let builtin = LeapSeconds::default();
        let iv = parse_interval::<Moment>(text, &builtin).unwrap();
        assert_eq!(iv.real_duration(&builtin).unwrap().seconds(), 2);

        let suppressed = LeapSeconds::suppressed();
        assert!(parse_interval::<Moment>(text, &suppressed).is_err());
        assert!(parse_moment_with("2016-12-31T23:59:60Z", &suppressed).is_err());
    }
}
