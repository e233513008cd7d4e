use super::data::SyntaxNode;
use super::failures::FailureTracker;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Memoization key: (alternative identity, stream index)
///
/// Alternatives are cached independently; the rule-level dispatch across
/// them is not memoized.
pub(crate) type MemoKey = (usize, usize);

/// Cached outcome of one alternative at one stream index
///
/// `None` is a failed match. For left-recursive alternatives it doubles as
/// the in-progress sentinel primed before the first evaluation, so that a
/// recursive self-call at the same index fails instead of looping.
pub(crate) type MemoEntry = Option<Rc<SyntaxNode>>;

/// Per-invocation parsing state
///
/// A parse invocation exclusively owns its caches and failure tracker;
/// nothing here is shared between invocations, so concurrent parses over
/// the same compiled rule table just allocate one session each.
#[derive(Debug, Default)]
pub(crate) struct Session {
    /// Packrat cache of ordinary alternatives
    pub(crate) memo: FxHashMap<MemoKey, MemoEntry>,

    /// Grow-the-seed cache of left-recursive alternatives
    pub(crate) memo_recursive: FxHashMap<MemoKey, MemoEntry>,

    /// Deepest-failure state of this invocation
    pub(crate) tracker: FailureTracker,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}
