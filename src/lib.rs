//! # Seedling
//!
//! Seedling compiles a declarative grammar and a token vocabulary into an
//! executable recognizer: a [tokenizer](`runtime::Recognizer::tokenize`) and
//! a recursive-descent packrat [parser](`runtime::Recognizer::parse`) with
//! support for direct left recursion through seed growing.
//!
//! Alternatives are tried in declaration order and the first match wins, so
//! grammars stay deterministic without lookahead annotations. When a parse
//! fails, the deepest-reaching failure is reported along with every other
//! failure recorded at the same stream position.
//!
//! ## Usage
//!
//! ```rust
//! use seedling::compiler::{compile, Grammar, TokenVocabulary};
//!
//! // 1. Define the token vocabulary
//! let vocabulary = TokenVocabulary::new()
//!     .pattern("name", "[a-z]+")
//!     .literal("plus", "+")
//!     .literal("times", "*");
//!
//! // 2. Define the grammar, starting from the START rule
//! let grammar = Grammar::new()
//!     .rule("START", &[&["exp", "EOS"]])
//!     .rule(
//!         "exp",
//!         &[&["exp", "plus", "exp"], &["exp", "times", "exp"], &["name"]],
//!     );
//!
//! // 3. Compile both into a recognizer
//! let recognizer = compile(&grammar, &vocabulary)
//!     .unwrap_or_else(|err| panic!("{}", err));
//!
//! // 4. Tokenize and parse a subject
//! let stream = recognizer.tokenize("a+b*c")
//!     .unwrap_or_else(|err| panic!("{}", err));
//! let outcome = recognizer.parse(&stream);
//!
//! // 5. Play with the syntax tree!
//! assert!(outcome.is_success());
//! ```

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]

pub mod compiler;
pub mod report;
pub mod runtime;
pub mod tokenizer;
