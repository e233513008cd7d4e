use super::errors::CompileError;
use super::grammar::{Grammar, TokenVocabulary};
use std::collections::HashSet;

/// Validate a grammar and token vocabulary before rule compilation
///
/// Checks the constraints that don't require name resolution: token names
/// must not collide with the item modifier syntax, and the rule and token
/// namespaces must be disjoint.
pub(crate) fn validate(
    grammar: &Grammar,
    vocabulary: &TokenVocabulary,
) -> Result<(), CompileError> {
    let mut token_names = HashSet::new();

    for name in vocabulary.token_names() {
        if name.contains(':') || name.contains('?') {
            return Err(CompileError::ReservedTokenName(name.to_owned()));
        }

        token_names.insert(name);
    }

    for name in grammar.rule_names() {
        if token_names.contains(name) {
            return Err(CompileError::NameConflict(name.to_owned()));
        }
    }

    Ok(())
}
