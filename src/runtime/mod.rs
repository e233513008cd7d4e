//! # Parsing runtime
//!
//! This module contains the [`Recognizer`] driving an ordered-choice packrat
//! parse over a token stream, along with the syntax tree it produces and the
//! failure records it reports on a mismatch.

mod data;
mod executor;
mod failures;
mod session;

pub use data::{AliasBinding, NodeChild, ParseFailure, ParseOutcome, Predicate, SyntaxNode};
pub use executor::Recognizer;
pub use failures::{FailureRecord, FailureTracker};
