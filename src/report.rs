//! Human-readable rendering of failed parses and tokenizer errors
//!
//! Rendering lives outside the runtime on purpose: the runtime reports
//! structured [`ParseFailure`] values, and this module turns the primary
//! failure into a colored message with the failing rule alternative and a
//! window of the token stream around the offending token.

use crate::compiler::{Item, ItemKind};
use crate::runtime::{FailureRecord, ParseFailure, Recognizer};
use crate::tokenizer::{Token, TokenStream, TokenizeError};
use colored::Colorize;

/// Format in a human-readable way the primary failure of a failed parse
pub fn pretty_format_parse_failure(
    recognizer: &Recognizer,
    stream: &TokenStream,
    failure: &ParseFailure,
) -> String {
    let Some(primary) = failure.primary() else {
        // no terminal mismatch was recorded; the entry rule either failed on
        // a predicate or matched a strict prefix of the stream
        return match failure.partial() {
            Some(partial) => format!(
                "ERROR: rule {} matched only the first {} token(s) of the stream",
                partial.rule(),
                partial.last_index()
            ),
            None => "ERROR: parsing failed before matching any terminal".to_owned(),
        };
    };

    let token = primary.token();
    let position = format!(
        "Parser error at line {} char {} to {}",
        token.line_start() + 1,
        token.column_start(),
        token.column_start() + token.len()
    );

    format!(
        "{}\nUnexpected {}\nBest match was in rule {} (alternative {}), at item {}: {}\ntoken {:?} (type: {}) does not match item {}\nContext:\n{}",
        position.red(),
        display_token_value(token).yellow(),
        primary.rule(),
        primary.alternative(),
        primary.item_index(),
        display_alternative(recognizer, primary),
        display_token_value(token),
        token.kind(),
        display_failing_item(recognizer, primary).yellow(),
        stream_context(stream, token, primary.first_token())
    )
}

/// Format in a human-readable way a tokenizer error
pub fn pretty_format_tokenize_err(err: &TokenizeError) -> String {
    format!("{} {}", "ERROR:".red(), err)
}

/// Render the failing alternative's items, failing item in red and the
/// others in yellow
fn display_alternative(recognizer: &Recognizer, primary: &FailureRecord) -> String {
    let Some(items) = alternative_items(recognizer, primary) else {
        return String::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let rendered = display_item(recognizer, item);

            if index == primary.item_index() {
                format!("{} ", rendered.red())
            } else {
                format!("{} ", rendered.yellow())
            }
        })
        .collect()
}

fn display_failing_item(recognizer: &Recognizer, primary: &FailureRecord) -> String {
    alternative_items(recognizer, primary)
        .and_then(|items| items.get(primary.item_index()))
        .map(|item| display_item(recognizer, item))
        .unwrap_or_default()
}

fn alternative_items<'a>(
    recognizer: &'a Recognizer,
    primary: &FailureRecord,
) -> Option<&'a [Item]> {
    let rules = recognizer.rules();

    rules
        .rules
        .iter()
        .find(|rule| rule.name == primary.rule())
        .and_then(|rule| rule.alternatives.get(primary.alternative()))
        .map(|alternative| alternative.items.as_slice())
}

/// Render a single item the way it is written in a grammar, substituting a
/// token's diagnostic label when one was declared
fn display_item(recognizer: &Recognizer, item: &Item) -> String {
    let mut rendered = match &item.kind {
        ItemKind::Terminal(kind) => match recognizer.matcher().label_of(kind) {
            Some(label) => label.replace(char::is_whitespace, "-"),
            None => kind.clone(),
        },
        ItemKind::Nonterminal(target) => recognizer.rules().rule_name(*target).to_owned(),
        ItemKind::Predicate(_) => "<predicate>".to_owned(),
    };

    if item.repeatable {
        rendered.push('*');
    }

    if item.optional {
        rendered.push('?');
    }

    rendered
}

/// Render the stream lines around the offending token, with the attempt's
/// span in yellow and the offending token in red
fn stream_context(stream: &TokenStream, token: &Token, first_token: &Token) -> String {
    let index = token.stream_index();
    let first_index = first_token.stream_index();
    let line_number = token.line_start();

    let colorize = |stream_index: usize, value: &str| {
        if stream_index == index {
            mark_invisible(value).red().to_string()
        } else if stream_index >= first_index && stream_index < index {
            mark_invisible(value).yellow().to_string()
        } else {
            value.to_owned()
        }
    };

    let mut line_nb = 1_usize;
    let mut out = String::new();

    for (stream_index, current) in stream.tokens().iter().enumerate() {
        if line_nb >= line_number + 4 {
            break;
        }

        let value = current.value();

        if value.contains('\n') {
            line_nb += 1;

            if line_nb > line_number + 3 {
                break;
            }

            if line_nb + 1 >= line_number {
                out.push_str(&colorize(stream_index, value));
                out.push_str(&format!("{:>5}: ", line_nb));
            }
        } else if line_nb + 1 >= line_number {
            if stream_index == 0 {
                out.push_str(&format!("\n{:>5}: ", line_nb));
            }

            out.push_str(&colorize(stream_index, value));
        }
    }

    out
}

fn display_token_value(token: &Token) -> String {
    if token.is_end() {
        "<end of stream>".to_owned()
    } else {
        mark_invisible(token.value())
    }
}

fn mark_invisible(value: &str) -> String {
    value
        .replace('\r', "⏎\r")
        .replace('\n', "⏎\n")
        .replace('\t', "⇥")
        .replace('\u{a0}', "nbsp")
        .replace(' ', "␣")
}
