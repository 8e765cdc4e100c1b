//! Errors raised while shaping API data into chart series.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Spent/budget ratio requested while the total budget is zero.
    #[error("spent/budget ratio is undefined: total budget is zero")]
    DivisionUndefined,

    #[error("invalid date format: {value:?}")]
    InvalidDateFormat { value: String },

    #[error("invalid timezone: {value}")]
    InvalidTimezone { value: String },
}

pub type ShapeResult<T> = std::result::Result<T, ShapeError>;
