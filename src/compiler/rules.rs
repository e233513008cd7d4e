use super::errors::CompileError;
use super::grammar::{Grammar, GrammarItem, TokenVocabulary};
use crate::runtime::Predicate;
use crate::tokenizer::END_OF_STREAM;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Name of the rule every parse invocation starts from
pub const ENTRYPOINT_RULE: &str = "START";

/// Immutable rule table compiled from a [`Grammar`]
///
/// Item references are resolved to typed variants at compile time, so the
/// runtime never dispatches on strings to find a rule.
#[derive(Debug)]
pub struct RuleTable {
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) entry: usize,
}

#[derive(Debug)]
pub(crate) struct CompiledRule {
    pub(crate) name: String,
    pub(crate) alternatives: Vec<CompiledAlternative>,
}

#[derive(Debug)]
pub(crate) struct CompiledAlternative {
    /// Table-wide identity, used as the memoization key
    pub(crate) id: usize,

    /// Position within the enclosing rule
    pub(crate) index: usize,

    pub(crate) items: Vec<Item>,

    /// True iff the first item names the enclosing rule itself
    pub(crate) left_recursive: bool,
}

/// A compiled item specifier
pub(crate) struct Item {
    pub(crate) kind: ItemKind,
    pub(crate) optional: bool,
    pub(crate) repeatable: bool,
    pub(crate) alias: Option<String>,
}

pub(crate) enum ItemKind {
    /// A token type to consume, or the end-of-stream marker
    Terminal(String),

    /// Another rule of the table, by index
    Nonterminal(usize),

    /// An embedded predicate over the partially built node
    Predicate(Predicate),
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match &self.kind {
            ItemKind::Terminal(name) => format!("Terminal({:?})", name),
            ItemKind::Nonterminal(index) => format!("Nonterminal({})", index),
            ItemKind::Predicate(_) => "Predicate(..)".to_owned(),
        };

        f.debug_struct("Item")
            .field("kind", &kind)
            .field("optional", &self.optional)
            .field("repeatable", &self.repeatable)
            .field("alias", &self.alias)
            .finish()
    }
}

impl RuleTable {
    /// Compile a validated grammar into a rule table
    ///
    /// Expects [`super::validator::validate`] to have run; this only raises
    /// the errors that need resolution context (unknown references) plus the
    /// missing-entrypoint check.
    pub(crate) fn build(
        grammar: &Grammar,
        vocabulary: &TokenVocabulary,
    ) -> Result<Self, CompileError> {
        let token_names: HashSet<&str> = vocabulary.token_names().collect();

        let indices: HashMap<&str, usize> = grammar
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (rule.name.as_str(), index))
            .collect();

        let entry = *indices
            .get(ENTRYPOINT_RULE)
            .ok_or(CompileError::MissingEntrypoint)?;

        let mut rules = Vec::with_capacity(grammar.rules.len());
        let mut next_id = 0;

        for rule in &grammar.rules {
            let mut alternatives = Vec::with_capacity(rule.alternatives.len());

            for (index, raw_items) in rule.alternatives.iter().enumerate() {
                let mut items = Vec::with_capacity(raw_items.len());
                let mut left_recursive = false;

                for (item_index, raw) in raw_items.iter().enumerate() {
                    let item = match raw {
                        GrammarItem::Predicate(predicate) => Item {
                            kind: ItemKind::Predicate(predicate.clone()),
                            optional: false,
                            repeatable: false,
                            alias: None,
                        },

                        GrammarItem::Name(spec) => {
                            let spec = split_item_spec(spec);

                            if item_index == 0 && spec.base == rule.name {
                                left_recursive = true;
                            }

                            // Tokens and the end marker take precedence; the
                            // validator guarantees the namespaces are disjoint
                            // anyway
                            let kind = if token_names.contains(spec.base)
                                || spec.base == END_OF_STREAM
                            {
                                ItemKind::Terminal(spec.base.to_owned())
                            } else if let Some(target) = indices.get(spec.base) {
                                ItemKind::Nonterminal(*target)
                            } else {
                                return Err(CompileError::UnknownReference {
                                    rule: rule.name.clone(),
                                    name: spec.base.to_owned(),
                                });
                            };

                            Item {
                                kind,
                                optional: spec.optional,
                                repeatable: spec.repeatable,
                                alias: spec.alias.map(str::to_owned),
                            }
                        }
                    };

                    items.push(item);
                }

                alternatives.push(CompiledAlternative {
                    id: next_id,
                    index,
                    items,
                    left_recursive,
                });
                next_id += 1;
            }

            rules.push(CompiledRule {
                name: rule.name.clone(),
                alternatives,
            });
        }

        Ok(Self { rules, entry })
    }

    /// Get the name of the rule at the provided index
    pub(crate) fn rule_name(&self, index: usize) -> &str {
        &self.rules[index].name
    }
}

/// A raw item string split into its parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ItemSpec<'a> {
    pub(crate) base: &'a str,
    pub(crate) alias: Option<&'a str>,
    pub(crate) optional: bool,
    pub(crate) repeatable: bool,
}

/// Split an optional `:alias` annotation off a raw item, then strip the
/// trailing modifiers in fixed order: `?` before `*`
pub(crate) fn split_item_spec(raw: &str) -> ItemSpec {
    let mut parts = raw.split(':');
    // `split` always yields at least one element
    let mut base = parts.next().unwrap_or(raw);
    let alias = parts.next();

    let mut optional = false;
    let mut repeatable = false;

    if let Some(stripped) = base.strip_suffix('?') {
        base = stripped;
        optional = true;
    }

    if let Some(stripped) = base.strip_suffix('*') {
        base = stripped;
        repeatable = true;
    }

    ItemSpec {
        base,
        alias,
        optional,
        repeatable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plain_item_has_no_flags() {
        assert_eq!(
            split_item_spec("exp"),
            ItemSpec {
                base: "exp",
                alias: None,
                optional: false,
                repeatable: false,
            }
        );
    }

    #[test]
    fn modifiers_strip_in_fixed_order() {
        assert_eq!(split_item_spec("exp?").optional, true);
        assert_eq!(split_item_spec("exp*").repeatable, true);

        // '?' is stripped before '*', so the combined written form is `*?`
        let both = split_item_spec("exp*?");
        assert_eq!((both.base, both.optional, both.repeatable), ("exp", true, true));
    }

    #[test]
    fn alias_splits_before_modifiers() {
        let spec = split_item_spec("exp*:operands");
        assert_eq!(spec.base, "exp");
        assert_eq!(spec.alias, Some("operands"));
        assert!(spec.repeatable);
    }

    #[test]
    fn extra_alias_separators_are_dropped() {
        assert_eq!(split_item_spec("a:b:c").alias, Some("b"));
    }

    #[test]
    fn left_recursion_flag_requires_first_position() {
        let grammar = Grammar::new()
            .rule("START", &[&["exp", "EOS"]])
            .rule("exp", &[&["exp", "plus", "exp"], &["name", "exp"]]);
        let vocabulary = TokenVocabulary::new()
            .pattern("name", "[a-z]+")
            .literal("plus", "+");

        let table = RuleTable::build(&grammar, &vocabulary).unwrap();
        let exp = &table.rules[1];

        assert!(exp.alternatives[0].left_recursive);
        // self-reference in non-first position is plain recursion
        assert!(!exp.alternatives[1].left_recursive);
    }

    #[test]
    fn unknown_reference_is_a_compile_error() {
        let grammar = Grammar::new().rule("START", &[&["missing", "EOS"]]);
        let vocabulary = TokenVocabulary::new().literal("plus", "+");

        let err = RuleTable::build(&grammar, &vocabulary).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnknownReference { name, .. } if name == "missing"
        ));
    }

    #[test]
    fn missing_entrypoint_is_a_compile_error() {
        let grammar = Grammar::new().rule("exp", &[&["name"]]);
        let vocabulary = TokenVocabulary::new().pattern("name", "[a-z]+");

        assert!(matches!(
            RuleTable::build(&grammar, &vocabulary),
            Err(CompileError::MissingEntrypoint)
        ));
    }
}
