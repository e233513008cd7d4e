use super::failures::FailureRecord;
use crate::tokenizer::Token;
use std::collections::HashMap;
use std::rc::Rc;

/// Embedded predicate invoked with the partially built node of its
/// alternative
///
/// A `false` return aborts the alternative; the predicate never advances the
/// stream cursor itself.
pub type Predicate = Rc<dyn Fn(&SyntaxNode) -> bool>;

/// Concrete syntax node produced by matching one rule alternative
///
/// A node is a valid match even when it stops short of the stream end: it is
/// then usable as a sub-match through its [`last_index`](Self::last_index),
/// but its [`success`](Self::success) flag stays `false`. Only the top-level
/// rule's flag decides overall acceptance.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    /// Name of the matched rule
    pub(crate) rule: String,

    /// Index of the matched alternative within the rule
    pub(crate) alternative: usize,

    /// Stream index the match started at
    pub(crate) stream_index: usize,

    /// Stream position immediately after the last consumed token
    pub(crate) last_index: usize,

    /// Did this match reach the end of the stream?
    pub(crate) success: bool,

    /// Ordered matched children
    pub(crate) children: Vec<NodeChild>,

    /// Children captured under an alias annotation
    pub(crate) bindings: HashMap<String, AliasBinding>,
}

impl SyntaxNode {
    /// Get the name of the matched rule
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Get the index of the matched alternative within its rule
    pub fn alternative(&self) -> usize {
        self.alternative
    }

    /// Get the stream index the match started at
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Get the stream position immediately after the last consumed token
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    /// Check if the match consumed the stream through the sentinel
    pub fn success(&self) -> bool {
        self.success
    }

    /// Get the ordered matched children
    pub fn children(&self) -> &[NodeChild] {
        &self.children
    }

    /// Get the child at the provided position
    pub fn child(&self, index: usize) -> Option<&NodeChild> {
        self.children.get(index)
    }

    /// Get the child(ren) captured under the provided alias
    pub fn binding(&self, alias: &str) -> Option<&AliasBinding> {
        self.bindings.get(alias)
    }

    /// Get all alias bindings
    pub fn bindings(&self) -> &HashMap<String, AliasBinding> {
        &self.bindings
    }
}

/// A single child of a [`SyntaxNode`]
#[derive(Debug, Clone, PartialEq)]
pub enum NodeChild {
    /// A consumed terminal
    Token(Token),

    /// A nested match from another rule
    Node(Rc<SyntaxNode>),
}

impl NodeChild {
    /// Get the child as a token, if it is one
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }

    /// Get the child as a nested node, if it is one
    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }
}

/// Children captured under one alias
#[derive(Debug, Clone, PartialEq)]
pub enum AliasBinding {
    /// Alias on a plain or optional item: at most one capture
    One(NodeChild),

    /// Alias on a repeatable item: ordered list of captures
    Many(Vec<NodeChild>),
}

impl AliasBinding {
    /// Get the single captured child, if the alias was not repeatable
    pub fn one(&self) -> Option<&NodeChild> {
        match self {
            Self::One(child) => Some(child),
            Self::Many(_) => None,
        }
    }

    /// Get the captured children of a repeatable alias
    pub fn many(&self) -> Option<&[NodeChild]> {
        match self {
            Self::Many(children) => Some(children),
            Self::One(_) => None,
        }
    }
}

/// Result of a [parse](crate::runtime::Recognizer::parse) invocation
///
/// Ordinary grammar mismatches never surface as errors: a failed parse is a
/// structured [`ParseFailure`] carrying the deepest-reaching failures.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// The entry rule matched the whole stream
    Matched(Rc<SyntaxNode>),

    /// The entry rule failed, or matched without reaching the stream end
    Failed(ParseFailure),
}

impl ParseOutcome {
    /// Check if the parse succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    /// Get the matched tree, if the parse succeeded
    pub fn matched(&self) -> Option<&SyntaxNode> {
        match self {
            Self::Matched(node) => Some(node),
            Self::Failed(_) => None,
        }
    }

    /// Get the failure report, if the parse failed
    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            Self::Matched(_) => None,
        }
    }
}

/// Aggregated report of a failed parse
#[derive(Debug, Clone)]
pub struct ParseFailure {
    /// Every failure recorded at the deepest stream position reached, in
    /// recording order
    pub(crate) failures: Vec<FailureRecord>,

    /// Partial tree built by the entry rule when it matched a strict prefix
    /// of the stream
    pub(crate) partial: Option<Rc<SyntaxNode>>,
}

impl ParseFailure {
    /// Get the primary failure: the first one recorded at the deepest
    /// stream position
    pub fn primary(&self) -> Option<&FailureRecord> {
        self.failures.first()
    }

    /// Get every failure recorded at the deepest stream position, in
    /// recording order
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// Get the partial tree of an entry rule that matched a strict prefix
    /// of the stream
    pub fn partial(&self) -> Option<&SyntaxNode> {
        self.partial.as_deref()
    }
}
