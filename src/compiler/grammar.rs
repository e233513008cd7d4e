use crate::runtime::{Predicate, SyntaxNode};
use crate::tokenizer::Token;
use std::fmt;
use std::rc::Rc;

/// One item of a grammar alternative, before compilation
///
/// Plain items are strings of the form `name`, `name?`, `name*` or
/// `name:alias` (combinable, e.g. `name*:alias`); embedded predicates are
/// closures invoked with the partially built node.
#[derive(Clone)]
pub enum GrammarItem {
    /// Reference to a token, a rule, or the end-of-stream marker, with
    /// optional modifier suffixes and alias annotation
    Name(String),

    /// Embedded predicate
    Predicate(Predicate),
}

impl GrammarItem {
    /// Make a plain named item
    pub fn name(spec: impl Into<String>) -> Self {
        Self::Name(spec.into())
    }

    /// Make an embedded predicate item
    pub fn predicate(predicate: impl Fn(&SyntaxNode) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(predicate))
    }
}

impl From<&str> for GrammarItem {
    fn from(spec: &str) -> Self {
        Self::name(spec)
    }
}

impl fmt::Debug for GrammarItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Name(spec) => write!(f, "Name({:?})", spec),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// A raw declarative grammar: named rules, each an ordered list of
/// alternatives over [`GrammarItem`]s
///
/// Declaration order of rules and alternatives is meaningful: ordered choice
/// commits to the first alternative that matches.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    pub(crate) rules: Vec<GrammarRule>,
}

#[derive(Debug, Clone)]
pub(crate) struct GrammarRule {
    pub(crate) name: String,
    pub(crate) alternatives: Vec<Vec<GrammarItem>>,
}

impl Grammar {
    /// Create an empty grammar
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule made of plain named items
    ///
    /// Declaring the same rule name again appends the alternatives to the
    /// existing rule.
    pub fn rule(mut self, name: &str, alternatives: &[&[&str]]) -> Self {
        let entry = self.entry_mut(name);

        for alternative in alternatives {
            entry
                .alternatives
                .push(alternative.iter().map(|item| GrammarItem::name(*item)).collect());
        }

        self
    }

    /// Append a single alternative, allowing embedded predicates
    pub fn alternative(mut self, name: &str, items: Vec<GrammarItem>) -> Self {
        self.entry_mut(name).alternatives.push(items);
        self
    }

    /// Get the declared rule names, in declaration order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name.as_str())
    }

    fn entry_mut(&mut self, name: &str) -> &mut GrammarRule {
        if let Some(position) = self.rules.iter().position(|rule| rule.name == name) {
            return &mut self.rules[position];
        }

        self.rules.push(GrammarRule {
            name: name.to_owned(),
            alternatives: Vec::new(),
        });

        // Just pushed, the last entry is the new rule
        let last = self.rules.len() - 1;
        &mut self.rules[last]
    }
}

/// Custom token matcher: gets the remaining input and the tokens matched so
/// far, returns the matched substring or `None`
pub type TokenScanFn = Rc<dyn Fn(&str, &[Token]) -> Option<String>>;

/// How a single token definition matches input
#[derive(Clone)]
pub enum TokenRule {
    /// Exact literal string
    Literal(String),

    /// Pattern anchored at the current offset
    Pattern(String),

    /// Custom matcher function
    Scan(TokenScanFn),
}

impl fmt::Debug for TokenRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Literal(text) => write!(f, "Literal({:?})", text),
            Self::Pattern(source) => write!(f, "Pattern({:?})", source),
            Self::Scan(_) => write!(f, "Scan(..)"),
        }
    }
}

/// One named token definition with an optional diagnostic label
#[derive(Debug, Clone)]
pub struct TokenDef {
    pub(crate) name: String,
    pub(crate) rule: TokenRule,
    pub(crate) label: Option<String>,
}

/// The ordered token vocabulary: each definition is exactly one of literal,
/// anchored pattern, or custom matcher
///
/// Declaration order is the disambiguation rule: at every offset the first
/// non-empty match wins, so reserved words must precede the general
/// identifier pattern.
#[derive(Debug, Clone, Default)]
pub struct TokenVocabulary {
    pub(crate) defs: Vec<TokenDef>,
}

impl TokenVocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an exact literal token
    pub fn literal(mut self, name: &str, text: &str) -> Self {
        self.defs.push(TokenDef {
            name: name.to_owned(),
            rule: TokenRule::Literal(text.to_owned()),
            label: None,
        });
        self
    }

    /// Declare a pattern token, anchored at the match offset
    pub fn pattern(mut self, name: &str, source: &str) -> Self {
        self.defs.push(TokenDef {
            name: name.to_owned(),
            rule: TokenRule::Pattern(source.to_owned()),
            label: None,
        });
        self
    }

    /// Declare a custom matcher token
    pub fn scan(
        mut self,
        name: &str,
        scan: impl Fn(&str, &[Token]) -> Option<String> + 'static,
    ) -> Self {
        self.defs.push(TokenDef {
            name: name.to_owned(),
            rule: TokenRule::Scan(Rc::new(scan)),
            label: None,
        });
        self
    }

    /// Attach a human-facing diagnostic label to an already declared token
    pub fn label(mut self, name: &str, label: &str) -> Self {
        for def in self.defs.iter_mut().filter(|def| def.name == name) {
            def.label = Some(label.to_owned());
        }
        self
    }

    /// Get the declared token names, in declaration order
    pub fn token_names(&self) -> impl Iterator<Item = &str> {
        self.defs.iter().map(|def| def.name.as_str())
    }
}
