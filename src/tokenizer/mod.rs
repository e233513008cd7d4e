//! # Tokenizer
//!
//! This module turns a [token vocabulary](crate::compiler::TokenVocabulary)
//! into an ordered matching function, and drives it across raw input to
//! build an annotated [`TokenStream`] closed by the end-of-stream sentinel.
//!
//! Matching is strictly ordered: at every offset the definitions are tried
//! in declaration order and the first non-empty match wins. A dead offset is
//! a fatal [`TokenizeError`]; the tokenizer never skips input.

mod errors;
mod matcher;
mod scan;
mod stream;

pub use errors::TokenizeError;
pub use stream::{Token, TokenStream, END_OF_STREAM};

pub(crate) use matcher::TokenMatcher;
pub(crate) use scan::scan;
