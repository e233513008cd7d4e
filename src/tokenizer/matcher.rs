use super::stream::Token;
use crate::compiler::{CompileError, TokenRule, TokenScanFn, TokenVocabulary};
use regex::Regex;
use std::fmt;

/// Ordered token matcher compiled from a [`TokenVocabulary`]
///
/// Definitions are tried in declaration order and the first one producing a
/// non-empty match wins, so disambiguation is purely positional: reserved
/// words must be declared before the general identifier pattern that would
/// swallow them.
pub(crate) struct TokenMatcher {
    defs: Vec<CompiledTokenDef>,
}

pub(crate) struct CompiledTokenDef {
    pub(crate) name: String,
    pub(crate) label: Option<String>,
    rule: CompiledTokenRule,
}

enum CompiledTokenRule {
    /// Exact literal, matched with `starts_with`
    Literal(String),

    /// Pattern anchored at the current offset
    Pattern(Regex),

    /// Custom matcher over the remaining input and the tokens matched so far
    Scan(TokenScanFn),
}

impl TokenMatcher {
    /// Compile every definition of the vocabulary, in declaration order
    ///
    /// Patterns are compiled once here; a malformed one is a compile-time
    /// error, never a tokenize-time one.
    pub(crate) fn compile(vocabulary: &TokenVocabulary) -> Result<Self, CompileError> {
        let mut defs = Vec::with_capacity(vocabulary.defs.len());

        for def in &vocabulary.defs {
            let rule = match &def.rule {
                TokenRule::Literal(text) => CompiledTokenRule::Literal(text.clone()),

                TokenRule::Pattern(source) => {
                    // Anchor at the match offset; a leading '^' in the
                    // source pattern is redundant but harmless
                    let regex = Regex::new(&format!("^(?:{})", source)).map_err(|source| {
                        CompileError::InvalidPattern {
                            name: def.name.clone(),
                            source,
                        }
                    })?;

                    CompiledTokenRule::Pattern(regex)
                }

                TokenRule::Scan(scan) => CompiledTokenRule::Scan(scan.clone()),
            };

            defs.push(CompiledTokenDef {
                name: def.name.clone(),
                label: def.label.clone(),
                rule,
            });
        }

        Ok(Self { defs })
    }

    /// Try every definition at the current offset and return the first
    /// non-empty match along with the definition that produced it
    ///
    /// An empty match is treated as no match at all, as it would stall the
    /// tokenizer without consuming anything.
    pub(crate) fn match_at(
        &self,
        remaining: &str,
        tokens: &[Token],
    ) -> Option<(String, &CompiledTokenDef)> {
        for def in &self.defs {
            let matched = match &def.rule {
                CompiledTokenRule::Literal(text) => {
                    if remaining.starts_with(text.as_str()) {
                        Some(text.clone())
                    } else {
                        None
                    }
                }

                CompiledTokenRule::Pattern(regex) => {
                    regex.find(remaining).map(|found| found.as_str().to_owned())
                }

                CompiledTokenRule::Scan(scan) => scan(remaining, tokens),
            };

            match matched {
                Some(value) if !value.is_empty() => return Some((value, def)),
                _ => {}
            }
        }

        None
    }

    /// Get the diagnostic label attached to a token definition, if any
    pub(crate) fn label_of(&self, kind: &str) -> Option<&str> {
        self.defs
            .iter()
            .find(|def| def.name == kind)
            .and_then(|def| def.label.as_deref())
    }
}

impl fmt::Debug for TokenMatcher {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TokenMatcher")
            .field("defs", &self.defs.iter().map(|def| &def.name).collect::<Vec<_>>())
            .finish()
    }
}
