use std::fmt;

/// Type name of the synthetic token closing every [`TokenStream`]
///
/// Grammars may reference it like any terminal to require that a rule
/// consumes the whole stream.
pub const END_OF_STREAM: &str = "EOS";

/// A single token produced by [tokenizing](crate::runtime::Recognizer::tokenize) an input
///
/// Tokens are immutable once the stream is built. Offsets are byte-based,
/// line and column numbers are 0-based character counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Name of the matched token definition (or [`END_OF_STREAM`])
    pub(crate) kind: String,

    /// Exact substring of the input this token covers (empty for the sentinel)
    pub(crate) value: String,

    /// Byte offset of the token's first character in the input
    pub(crate) start: usize,

    /// Position of the token in its stream
    pub(crate) stream_index: usize,

    /// Line the token starts on
    pub(crate) line_start: usize,

    /// Column the token starts on
    pub(crate) column_start: usize,

    /// Line the token ends on (differs from the start for multi-line matches)
    pub(crate) line_end: usize,

    /// Column right after the token's last character
    pub(crate) column_end: usize,
}

impl Token {
    /// Get the name of the matched token definition
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Get the matched substring
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the byte length of the matched substring
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Check if the matched substring is empty (only true for the sentinel)
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the byte offset of the token in the original input
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the position of the token in its stream
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /// Get the 0-based line the token starts on
    pub fn line_start(&self) -> usize {
        self.line_start
    }

    /// Get the 0-based column the token starts on
    pub fn column_start(&self) -> usize {
        self.column_start
    }

    /// Get the 0-based line the token ends on
    pub fn line_end(&self) -> usize {
        self.line_end
    }

    /// Get the 0-based column right after the token's last character
    pub fn column_end(&self) -> usize {
        self.column_end
    }

    /// Check if this token is the end-of-stream sentinel
    pub fn is_end(&self) -> bool {
        self.kind == END_OF_STREAM
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_end() {
            write!(f, "<end of stream>")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// Ordered, 0-indexed token stream terminated by the end-of-stream sentinel
///
/// Built once per input by [`crate::runtime::Recognizer::tokenize`] and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wrap a list of tokens; the caller guarantees the sentinel is present
    pub(crate) fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Get the number of tokens, sentinel included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A stream is never empty: it at least contains the sentinel
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get the token at the provided stream index
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Get all tokens, sentinel included
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the token at the provided index, falling back to the sentinel for
    /// positions past the end of the stream
    pub(crate) fn at_or_end(&self, index: usize) -> &Token {
        match self.tokens.get(index) {
            Some(token) => token,
            // The stream invariantly ends with the sentinel
            None => &self.tokens[self.tokens.len() - 1],
        }
    }
}
