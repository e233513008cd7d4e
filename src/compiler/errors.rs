use thiserror::Error;

/// Structural error raised while compiling a grammar and token vocabulary
///
/// All of these are fatal and raised once, before any input is processed;
/// nothing here is recovered internally.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A rule and a token share a name; both namespaces are dispatched
    /// identically, so they must be disjoint
    #[error("name {0:?} is declared both as a grammar rule and as a token")]
    NameConflict(String),

    /// A token name contains a character reserved for item annotations
    #[error("token name {0:?} contains a reserved character (':' or '?')")]
    ReservedTokenName(String),

    /// A token pattern failed to compile
    #[error("invalid pattern for token {name:?}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// An item base name is neither a token, a rule, nor the end-of-stream
    /// marker
    #[error("rule {rule:?} references {name:?}, which is neither a rule, a token, nor \"EOS\"")]
    UnknownReference { rule: String, name: String },

    /// The grammar does not declare the entrypoint rule
    #[error("grammar does not declare the \"START\" rule")]
    MissingEntrypoint,
}
