use super::data::{AliasBinding, NodeChild, ParseFailure, ParseOutcome, SyntaxNode};
use super::failures::FailureRecord;
use super::session::Session;
use crate::compiler::{CompiledAlternative, CompiledRule, Item, ItemKind, RuleTable};
use crate::tokenizer::{scan, TokenMatcher, TokenStream, TokenizeError};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// Executable recognizer produced by [`compile`](crate::compiler::compile)
///
/// Holds no mutable state: every [`parse`](Self::parse) invocation runs with
/// fresh memoization caches and a fresh failure tracker, so a recognizer can
/// be reused across inputs.
pub struct Recognizer {
    rules: RuleTable,
    matcher: TokenMatcher,
}

impl Recognizer {
    pub(crate) fn new(rules: RuleTable, matcher: TokenMatcher) -> Self {
        Self { rules, matcher }
    }

    /// Split a raw input string into an annotated token stream
    ///
    /// The stream always ends with the end-of-stream sentinel. Unrecognized
    /// input is a hard error, unlike grammar mismatches during parsing.
    pub fn tokenize(&self, input: &str) -> Result<TokenStream, TokenizeError> {
        scan(&self.matcher, input)
    }

    /// Match a token stream against the entry rule
    ///
    /// The parse succeeds only if the entry rule consumed the stream through
    /// the sentinel. A match stopping short of the stream end is reported as
    /// a failure carrying the partial tree.
    pub fn parse(&self, stream: &TokenStream) -> ParseOutcome {
        let mut session = Session::new();

        debug!(entry = self.rules.rule_name(self.rules.entry), "starting parse");

        match self.apply_rule(self.rules.entry, stream, 0, &mut session) {
            Some(node) if node.success => {
                debug!(last_index = node.last_index, "parse succeeded");
                ParseOutcome::Matched(node)
            }
            partial => {
                debug!(deepest = session.tracker.deepest(), "parse failed");
                ParseOutcome::Failed(ParseFailure {
                    failures: session.tracker.into_failures(),
                    partial,
                })
            }
        }
    }

    pub(crate) fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub(crate) fn matcher(&self) -> &TokenMatcher {
        &self.matcher
    }

    /// Try each alternative of a rule in declaration order, committing to the
    /// first one that matches
    fn apply_rule(
        &self,
        rule: usize,
        stream: &TokenStream,
        index: usize,
        session: &mut Session,
    ) -> Option<Rc<SyntaxNode>> {
        let rule = &self.rules.rules[rule];

        rule.alternatives
            .iter()
            .find_map(|alternative| self.apply_alternative(rule, alternative, stream, index, session))
    }

    fn apply_alternative(
        &self,
        rule: &CompiledRule,
        alternative: &CompiledAlternative,
        stream: &TokenStream,
        index: usize,
        session: &mut Session,
    ) -> Option<Rc<SyntaxNode>> {
        if alternative.left_recursive {
            return self.grow_seed(&rule.name, alternative, stream, index, session);
        }

        let key = (alternative.id, index);

        if let Some(cached) = session.memo.get(&key) {
            trace!(rule = %rule.name, index, "memoized result");
            return cached.clone();
        }

        let result = self.match_items(&rule.name, alternative, stream, index, session);
        session.memo.insert(key, result.clone());
        result
    }

    /// Resolve a left-recursive alternative by iteration
    ///
    /// The cache slot is primed with a failure so the alternative's own
    /// recursive call fails on the first pass and a non-recursive seed gets
    /// built. Each following pass sees the previous result as the answer of
    /// the recursive call; iteration stops as soon as the match no longer
    /// consumes more tokens, and the last consuming result wins.
    fn grow_seed(
        &self,
        rule: &str,
        alternative: &CompiledAlternative,
        stream: &TokenStream,
        index: usize,
        session: &mut Session,
    ) -> Option<Rc<SyntaxNode>> {
        let key = (alternative.id, index);

        if let Some(cached) = session.memo_recursive.get(&key) {
            return cached.clone();
        }

        session.memo_recursive.insert(key, None);

        let mut seed = None;
        let mut last_end = None;

        loop {
            let Some(node) = self.match_items(rule, alternative, stream, index, session) else {
                break;
            };

            if last_end.is_some_and(|end| node.last_index <= end) {
                break;
            }

            trace!(rule, index, grown_to = node.last_index, "grew seed");

            last_end = Some(node.last_index);
            session.memo_recursive.insert(key, Some(Rc::clone(&node)));
            seed = Some(node);
        }

        seed
    }

    /// Match every item of an alternative in sequence from the provided
    /// stream index
    fn match_items(
        &self,
        rule: &str,
        alternative: &CompiledAlternative,
        stream: &TokenStream,
        index: usize,
        session: &mut Session,
    ) -> Option<Rc<SyntaxNode>> {
        let mut cursor = index;
        let mut children = Vec::new();
        let mut bindings = HashMap::new();

        for (item_index, item) in alternative.items.iter().enumerate() {
            match &item.kind {
                ItemKind::Terminal(kind) => {
                    if item.repeatable {
                        while let Some(token) =
                            stream.get(cursor).filter(|token| token.kind() == kind)
                        {
                            bind(&mut bindings, item, NodeChild::Token(token.clone()));
                            children.push(NodeChild::Token(token.clone()));
                            cursor += 1;
                        }
                    } else if item.optional {
                        if let Some(token) =
                            stream.get(cursor).filter(|token| token.kind() == kind)
                        {
                            bind(&mut bindings, item, NodeChild::Token(token.clone()));
                            children.push(NodeChild::Token(token.clone()));
                            cursor += 1;
                        }
                    } else {
                        // past-the-sentinel reads behave as a sentinel mismatch
                        let token = stream.at_or_end(cursor);

                        if token.kind() != kind {
                            session.tracker.record(FailureRecord {
                                rule: rule.to_owned(),
                                alternative: alternative.index,
                                item_index,
                                stream_index: cursor,
                                token: token.clone(),
                                first_token: stream.at_or_end(index).clone(),
                            });
                            return None;
                        }

                        bind(&mut bindings, item, NodeChild::Token(token.clone()));
                        children.push(NodeChild::Token(token.clone()));
                        cursor += 1;
                    }
                }

                ItemKind::Nonterminal(target) => {
                    if item.repeatable {
                        while let Some(node) = self.apply_rule(*target, stream, cursor, session) {
                            // an empty sub-match would repeat forever
                            if node.last_index <= cursor {
                                break;
                            }

                            cursor = node.last_index;
                            bind(&mut bindings, item, NodeChild::Node(Rc::clone(&node)));
                            children.push(NodeChild::Node(node));
                        }
                    } else if item.optional {
                        if let Some(node) = self.apply_rule(*target, stream, cursor, session) {
                            cursor = node.last_index;
                            bind(&mut bindings, item, NodeChild::Node(Rc::clone(&node)));
                            children.push(NodeChild::Node(node));
                        }
                    } else {
                        let node = self.apply_rule(*target, stream, cursor, session)?;
                        cursor = node.last_index;
                        bind(&mut bindings, item, NodeChild::Node(Rc::clone(&node)));
                        children.push(NodeChild::Node(node));
                    }
                }

                ItemKind::Predicate(predicate) => {
                    let node = SyntaxNode {
                        rule: rule.to_owned(),
                        alternative: alternative.index,
                        stream_index: index,
                        last_index: cursor,
                        success: false,
                        children: children.clone(),
                        bindings: bindings.clone(),
                    };

                    if !predicate(&node) {
                        return None;
                    }
                }
            }
        }

        Some(Rc::new(SyntaxNode {
            rule: rule.to_owned(),
            alternative: alternative.index,
            stream_index: index,
            last_index: cursor,
            success: cursor == stream.len(),
            children,
            bindings,
        }))
    }
}

/// Capture an aliased child, accumulating repeatable captures in order
fn bind(bindings: &mut HashMap<String, AliasBinding>, item: &Item, child: NodeChild) {
    let Some(alias) = &item.alias else {
        return;
    };

    if item.repeatable {
        let entry = bindings
            .entry(alias.clone())
            .or_insert_with(|| AliasBinding::Many(Vec::new()));

        if let AliasBinding::Many(children) = entry {
            children.push(child);
        }
    } else {
        bindings.insert(alias.clone(), AliasBinding::One(child));
    }
}
