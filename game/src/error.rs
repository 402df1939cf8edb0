use std::num::ParseIntError;

use thiserror::Error;

/// A single level record could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("expected {expected} fields separated by ';', found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("field `{field}` is not an integer: {value:?}")]
    InvalidInteger {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("unknown tile lock ordinal {0}")]
    UnknownLock(i32),

    #[error("level dimensions {width}x{height} outside {min}..={max}")]
    Dimensions {
        width: i64,
        height: i64,
        min: u32,
        max: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("level set is empty")]
    Empty,

    #[error("level record {index} is empty (repeated separator?)")]
    EmptyRecord { index: usize },

    #[error("level record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: DescriptorError,
    },

    #[error("level record {index} cannot be scrambled: {source}")]
    Unplayable {
        index: usize,
        #[source]
        source: LevelError,
    },
}

/// Contract violations on a [`Level`](crate::level::Level). These indicate a caller bug, not
/// bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("tile ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("tile ({x}, {y}) is locked")]
    LockedTile { x: usize, y: usize },

    #[error("a single free tile cannot be deranged")]
    SingletonFreeTile,

    #[error("{repeated} of {free} free tiles share one color; no derangement exists")]
    NoDerangement { free: usize, repeated: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("level index {index} out of range for a catalog of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("generated level is invalid: {0}")]
    Descriptor(#[from] DescriptorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_errors_name_the_record_and_cause() {
        let err = CatalogError::Record {
            index: 3,
            source: DescriptorError::UnknownLock(9),
        };
        assert_eq!(err.to_string(), "level record 3: unknown tile lock ordinal 9");
    }

    #[test]
    fn level_errors_convert_into_session_errors() {
        let err: SessionError = LevelError::SingletonFreeTile.into();
        assert_eq!(err, SessionError::Level(LevelError::SingletonFreeTile));
        assert_eq!(err.to_string(), "a single free tile cannot be deranged");
    }
}
