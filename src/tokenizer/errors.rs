use super::stream::Token;
use thiserror::Error;

/// Error raised when the tokenizer reaches an offset no definition matches
///
/// Tokenizing is all-or-nothing: there is no skipping or guessing, the first
/// unmatched position is fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// Not a single token could be produced from the input
    #[error("no token definition matched the start of the input (near {preview:?})")]
    NothingMatched {
        /// Bounded preview of the unmatched input
        preview: String,
    },

    /// Tokenizing stalled after at least one token was produced
    #[error(
        "no token definition matched at line {}, column {} (near {preview:?}), after a {} token",
        one_based(.line),
        one_based(.column),
        .last_token.kind
    )]
    UnexpectedInput {
        /// Bounded preview of the unmatched input
        preview: String,

        /// Byte offset the tokenizer stalled at
        offset: usize,

        /// 0-based line of the stall point
        line: usize,

        /// 0-based column of the stall point
        column: usize,

        /// Last token successfully produced before the stall
        last_token: Token,
    },
}

fn one_based(index: &usize) -> usize {
    index + 1
}
