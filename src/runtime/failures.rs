use crate::tokenizer::Token;

/// A single item mismatch inside one alternative attempt
///
/// Mismatches are not errors: every one yields a record, ordered choice
/// turns it into "try the next alternative", and only the records at the
/// deepest stream position reached survive until the end of the parse.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    /// Name of the rule whose alternative failed
    pub(crate) rule: String,

    /// Index of the failing alternative within its rule
    pub(crate) alternative: usize,

    /// Index of the failing item within the alternative
    pub(crate) item_index: usize,

    /// Stream position of the mismatch
    pub(crate) stream_index: usize,

    /// The token that did not match
    pub(crate) token: Token,

    /// First token of the attempt's span
    pub(crate) first_token: Token,
}

impl FailureRecord {
    /// Get the name of the rule whose alternative failed
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Get the index of the failing alternative within its rule
    pub fn alternative(&self) -> usize {
        self.alternative
    }

    /// Get the index of the failing item within the alternative
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Get the stream position of the mismatch
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Get the token that did not match
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Get the first token of the attempt's span
    pub fn first_token(&self) -> &Token {
        &self.first_token
    }
}

/// Deepest-failure tracker of one parse invocation
///
/// Tracked state always holds exactly the failures recorded at the maximum
/// stream index seen so far: a record at a strictly greater index discards
/// everything and starts fresh, a record at the current maximum is appended,
/// and a shallower record is ignored. The first record at the maximum index
/// is the primary failure.
#[derive(Debug, Default)]
pub struct FailureTracker {
    deepest: usize,
    failures: Vec<FailureRecord>,
}

impl FailureTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one mismatch
    pub fn record(&mut self, failure: FailureRecord) {
        let index = failure.stream_index;

        if index > self.deepest {
            self.failures.clear();
            self.deepest = index;
        }

        if index == self.deepest {
            self.failures.push(failure);
        }
    }

    /// Get the deepest stream index a recorded failure reached
    pub fn deepest(&self) -> usize {
        self.deepest
    }

    /// Get the primary failure: the first one recorded at the deepest index
    pub fn primary(&self) -> Option<&FailureRecord> {
        self.failures.first()
    }

    /// Get every failure recorded at the deepest index, in recording order
    pub fn failures(&self) -> &[FailureRecord] {
        &self.failures
    }

    /// Consume the tracker into its recorded failures
    pub(crate) fn into_failures(self) -> Vec<FailureRecord> {
        self.failures
    }
}
