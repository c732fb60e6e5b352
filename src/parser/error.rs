use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::record::Mode;

/// Unrecoverable problems found while reading a listing or detail page.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid CSS selector `{selector}`: {reason}")]
    InvalidSelector { selector: &'static str, reason: String },

    #[error("failed to extract {stat} count from `{value}`")]
    InvalidCount {
        stat: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to extract {stat} rate from `{value}`")]
    InvalidRate {
        stat: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("failed to extract win rate from `{value}`")]
    InvalidWinRate {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("expected at most {expected} game mode blocks, found {found}")]
    UnexpectedModeBlocks { expected: usize, found: usize },

    #[error("no rank found")]
    MissingRank,

    #[error("failed to extract {mode} battle rating from `{value}`")]
    InvalidBattleRating {
        mode: Mode,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("{mode} battle rating `{value}` is not a non-negative number")]
    BattleRatingOutOfRange { mode: Mode, value: String },
}
