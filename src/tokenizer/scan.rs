use super::errors::TokenizeError;
use super::matcher::TokenMatcher;
use super::stream::{Token, TokenStream, END_OF_STREAM};
use tracing::trace;

/// Number of characters of unmatched input quoted in a [`TokenizeError`]
const ERROR_PREVIEW_LEN: usize = 26;

/// Drive the token matcher across the whole input
///
/// Repeatedly matches at the current offset, advances by the matched length
/// and appends an annotated token. Line and column numbers are computed
/// incrementally: a match containing newlines bumps the line count and
/// resets the column to the length of the post-newline remainder; any other
/// match just widens the column. The stream is closed with the synthetic
/// end-of-stream sentinel.
pub(crate) fn scan(matcher: &TokenMatcher, input: &str) -> Result<TokenStream, TokenizeError> {
    let mut tokens: Vec<Token> = Vec::new();

    let mut offset = 0;
    let mut line = 0;
    let mut column = 0;

    while offset < input.len() {
        let remaining = &input[offset..];

        let (value, def) = match matcher.match_at(remaining, &tokens) {
            Some(matched) => matched,
            None => {
                let preview: String = remaining.chars().take(ERROR_PREVIEW_LEN).collect();

                return Err(match tokens.pop() {
                    Some(last_token) => TokenizeError::UnexpectedInput {
                        preview,
                        offset,
                        line,
                        column,
                        last_token,
                    },
                    None => TokenizeError::NothingMatched { preview },
                });
            }
        };

        let line_start = line;
        let column_start = column;

        match value.rfind('\n') {
            Some(last_newline) => {
                line += value.matches('\n').count();
                column = value[last_newline + 1..].chars().count();
            }
            None => column += value.chars().count(),
        }

        trace!(kind = %def.name, offset, "matched token");

        let start = offset;
        offset += value.len();

        tokens.push(Token {
            kind: def.name.clone(),
            value,
            start,
            stream_index: tokens.len(),
            line_start,
            column_start,
            line_end: line,
            column_end: column,
        });
    }

    tokens.push(Token {
        kind: END_OF_STREAM.to_owned(),
        value: String::new(),
        start: input.len(),
        stream_index: tokens.len(),
        line_start: line,
        column_start: column,
        line_end: line,
        column_end: column,
    });

    Ok(TokenStream::new(tokens))
}
