// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation of the crate.

/// Error type for all fallible operations in `tempora`.
///
/// Errors are raised synchronously by the call that detects them; no
/// operation leaves a partial mutation behind.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// A calendar field combination that cannot exist, e.g. February 30th in
    /// the Gregorian calendar or a day inside a cutover gap.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A malformed argument: an interval whose start is after its end, an
    /// alignment outside `[0, 1]`, a non-monotonic leap-second registration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the current state, e.g. mutation of
    /// a final or suppressed leap-second table.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// Malformed text. `index` points at the offending character (or line
    /// start for data files).
    #[error("parse error at index {index}: {message}")]
    Parse {
        /// Human-readable description of the failure.
        message: String,
        /// Position of the failure in the parsed text.
        index: usize,
    },

    /// The operation is undefined for the given value, e.g. the length of an
    /// infinite interval.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A leap-second data file could not be read.
    #[error("cannot read leap-second data: {0}")]
    Io(#[from] std::io::Error),
}

impl TimeError {
    pub(crate) fn parse(message: impl Into<String>, index: usize) -> Self {
        TimeError::Parse {
            message: message.into(),
            index,
        }
    }

    /// Position of a parse failure, if this is a [`TimeError::Parse`].
    pub fn parse_index(&self) -> Option<usize> {
        match self {
            TimeError::Parse { index, .. } => Some(*index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_reports_index() {
        let err = TimeError::parse("Missing end component.", 11);
        assert_eq!(err.parse_index(), Some(11));
        assert_eq!(
            err.to_string(),
            "parse error at index 11: Missing end component."
        );
    }

    #[test]
    fn non_parse_errors_have_no_index() {
        let err = TimeError::Unsupported("infinite interval".into());
        assert_eq!(err.parse_index(), None);
        assert_eq!(err.to_string(), "unsupported operation: infinite interval");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<TimeError>();
    }
}
