//! # Grammar compiler
//!
//! This module turns a declarative [`Grammar`] and [`TokenVocabulary`] into an
//! executable [`Recognizer`](crate::runtime::Recognizer).
//!
//! Compilation validates the two inputs, resolves every item reference to a
//! typed form, and compiles the vocabulary's patterns. All structural errors
//! are reported here; running the recognizer afterwards cannot fail on the
//! grammar's shape.

mod errors;
mod grammar;
mod rules;
mod validator;

pub use errors::CompileError;
pub use grammar::{Grammar, GrammarItem, TokenRule, TokenScanFn, TokenVocabulary};
pub use rules::ENTRYPOINT_RULE;

pub(crate) use rules::{CompiledAlternative, CompiledRule, Item, ItemKind, RuleTable};

use crate::runtime::Recognizer;
use crate::tokenizer::TokenMatcher;

/// Compile a grammar and its token vocabulary into a recognizer
pub fn compile(
    grammar: &Grammar,
    vocabulary: &TokenVocabulary,
) -> Result<Recognizer, CompileError> {
    validator::validate(grammar, vocabulary)?;

    let rules = RuleTable::build(grammar, vocabulary)?;
    let matcher = TokenMatcher::compile(vocabulary)?;

    Ok(Recognizer::new(rules, matcher))
}
