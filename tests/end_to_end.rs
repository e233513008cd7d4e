//! End-to-end scenarios: compile a grammar, tokenize a subject and check the
//! resulting tree or failure report.

use pretty_assertions::assert_eq;
use seedling::compiler::{compile, CompileError, Grammar, GrammarItem, TokenVocabulary};
use seedling::runtime::{ParseOutcome, Recognizer, SyntaxNode};

/// `START -> exp EOS; exp -> exp plus exp | exp times exp | name`
///
/// Both left-recursive alternatives come before the base case, so growth has
/// to work through whichever operator path consumes the most input.
fn calculator() -> Recognizer {
    let vocabulary = TokenVocabulary::new()
        .pattern("name", "[a-z]+")
        .literal("plus", "+")
        .literal("times", "*");

    let grammar = Grammar::new()
        .rule("START", &[&["exp", "EOS"]])
        .rule(
            "exp",
            &[&["exp", "plus", "exp"], &["exp", "times", "exp"], &["name"]],
        );

    compile(&grammar, &vocabulary).unwrap()
}

fn parse(recognizer: &Recognizer, input: &str) -> ParseOutcome {
    let stream = recognizer.tokenize(input).unwrap();
    recognizer.parse(&stream)
}

fn root_exp(outcome: &ParseOutcome) -> &SyntaxNode {
    let root = outcome.matched().unwrap();
    assert_eq!(root.rule(), "START");
    root.child(0).unwrap().as_node().unwrap()
}

#[test]
fn single_name_matches_through_the_base_alternative() {
    let recognizer = calculator();
    let outcome = parse(&recognizer, "n");

    let exp = root_exp(&outcome);
    assert_eq!(exp.alternative(), 2);
    assert_eq!(exp.children().len(), 1);
}

#[test]
fn single_operation_builds_a_three_child_node() {
    let recognizer = calculator();

    for (input, operator) in [("a+b", "plus"), ("a*b", "times")] {
        let outcome = parse(&recognizer, input);
        let exp = root_exp(&outcome);

        assert_eq!(exp.children().len(), 3);
        assert_eq!(
            exp.child(1).unwrap().as_token().unwrap().kind(),
            operator
        );
    }
}

#[test]
fn chained_operators_associate_to_the_right() {
    // each right-hand exp grows through its own loop before the outer one
    // can incorporate it, so a+b+c comes out as a+(b+c)
    let recognizer = calculator();
    let outcome = parse(&recognizer, "a+b+c");

    let exp = root_exp(&outcome);
    assert_eq!(exp.children().len(), 3);

    let left = exp.child(0).unwrap().as_node().unwrap();
    assert_eq!(left.children().len(), 1);

    let right = exp.child(2).unwrap().as_node().unwrap();
    assert_eq!(right.rule(), "exp");
    assert_eq!(right.children().len(), 3);
}

#[test]
fn growth_works_through_both_recursive_alternatives() {
    let recognizer = calculator();

    for input in ["a*b*c", "a+b*c", "a*b+c", "a+b*c+d*e"] {
        assert!(parse(&recognizer, input).is_success(), "failed on {input}");
    }
}

#[test]
fn mixed_chain_keeps_operator_structure() {
    let recognizer = calculator();
    let outcome = parse(&recognizer, "a+b*c");

    let exp = root_exp(&outcome);
    assert_eq!(exp.alternative(), 0);

    // the right-hand side is the multiplication node
    let right = exp.child(2).unwrap().as_node().unwrap();
    assert_eq!(right.alternative(), 1);
    assert_eq!(right.children().len(), 3);
}

#[test]
fn dangling_operator_fails_at_the_stream_end() {
    let recognizer = calculator();
    let outcome = parse(&recognizer, "a+");

    let failure = outcome.failure().unwrap();
    let primary = failure.primary().unwrap();

    // "a+" tokenizes to [a, +, EOS]; the deepest attempt wanted a name at
    // index 2 and found the sentinel instead
    assert_eq!(primary.stream_index(), 2);
    assert_eq!(primary.rule(), "exp");
    assert_eq!(primary.alternative(), 2);
    assert!(primary.token().is_end());
}

#[test]
fn leading_operator_fails_on_the_first_token() {
    let recognizer = calculator();
    let outcome = parse(&recognizer, "+a");

    let primary = outcome.failure().unwrap().primary().unwrap();

    assert_eq!(primary.stream_index(), 0);
    assert_eq!(primary.token().kind(), "plus");
}

#[test]
fn repeated_parses_of_the_same_stream_agree() {
    let recognizer = calculator();
    let stream = recognizer.tokenize("a+b*c+d").unwrap();

    let first = recognizer.parse(&stream);
    let second = recognizer.parse(&stream);

    assert_eq!(first.matched(), second.matched());
}

#[test]
fn equal_depth_failures_are_all_reported() {
    let vocabulary = TokenVocabulary::new()
        .pattern("name", "[a-z]+")
        .literal("plus", "+")
        .literal("times", "*");

    let grammar = Grammar::new().rule("START", &[&["plus", "EOS"], &["times", "EOS"]]);
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    let outcome = parse(&recognizer, "a");
    let failure = outcome.failure().unwrap();

    assert_eq!(failure.failures().len(), 2);
    assert_eq!(failure.primary().unwrap().alternative(), 0);
    assert_eq!(failure.failures()[1].alternative(), 1);
}

#[test]
fn first_matching_alternative_wins() {
    let vocabulary = TokenVocabulary::new().pattern("name", "[a-z]+");
    let grammar = Grammar::new().rule("START", &[&["name", "EOS"], &["name", "EOS"]]);
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    let outcome = parse(&recognizer, "a");
    assert_eq!(outcome.matched().unwrap().alternative(), 0);
}

#[test]
fn aliases_capture_one_or_many_children() {
    let vocabulary = TokenVocabulary::new()
        .pattern("name", "[a-z]+")
        .literal("plus", "+");

    let grammar = Grammar::new().rule(
        "START",
        &[&["name:first", "plus*:ops", "name?:second", "EOS"]],
    );
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    let outcome = parse(&recognizer, "a++b");
    let root = outcome.matched().unwrap();

    let first = root.binding("first").unwrap().one().unwrap();
    assert_eq!(first.as_token().unwrap().value(), "a");

    let ops = root.binding("ops").unwrap().many().unwrap();
    assert_eq!(ops.len(), 2);

    let second = root.binding("second").unwrap().one().unwrap();
    assert_eq!(second.as_token().unwrap().value(), "b");

    // unmatched optional and repeatable items leave no binding behind
    let outcome = parse(&recognizer, "a");
    let root = outcome.matched().unwrap();
    assert!(root.binding("ops").is_none());
    assert!(root.binding("second").is_none());
}

#[test]
fn predicates_can_reject_an_otherwise_matching_alternative() {
    let vocabulary = TokenVocabulary::new().pattern("name", "[a-z]+");

    let grammar = Grammar::new()
        .rule("START", &[&["word", "EOS"]])
        .alternative(
            "word",
            vec![
                GrammarItem::name("name"),
                GrammarItem::predicate(|node| {
                    node.child(0)
                        .and_then(|child| child.as_token())
                        .is_some_and(|token| token.value() != "forbidden")
                }),
            ],
        );
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    assert!(parse(&recognizer, "allowed").is_success());

    let outcome = parse(&recognizer, "forbidden");
    let failure = outcome.failure().unwrap();

    // predicate rejections record no terminal mismatch
    assert!(failure.primary().is_none());
}

#[test]
fn prefix_match_is_reported_with_its_partial_tree() {
    let vocabulary = TokenVocabulary::new()
        .pattern("name", "[a-z]+")
        .literal("plus", "+");

    // no EOS item: the rule can only ever cover a prefix of a longer stream
    let grammar = Grammar::new().rule("START", &[&["name"]]);
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    let outcome = parse(&recognizer, "a+b");
    let failure = outcome.failure().unwrap();

    let partial = failure.partial().unwrap();
    assert_eq!(partial.rule(), "START");
    assert_eq!(partial.last_index(), 1);
    assert!(!partial.success());
}

#[test]
fn colliding_rule_and_token_names_fail_to_compile() {
    let vocabulary = TokenVocabulary::new().pattern("number", "[0-9]+");
    let grammar = Grammar::new()
        .rule("START", &[&["number", "EOS"]])
        .rule("number", &[&["number"]]);

    assert!(matches!(
        compile(&grammar, &vocabulary),
        Err(CompileError::NameConflict(name)) if name == "number"
    ));
}

#[test]
fn empty_alternatives_do_not_repeat_forever() {
    let vocabulary = TokenVocabulary::new().pattern("name", "[a-z]+");
    let nothing: &[&str] = &[];

    let grammar = Grammar::new()
        .rule("START", &[&["unit*", "EOS"]])
        .rule("unit", &[nothing]);
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    assert!(parse(&recognizer, "").is_success());
}

#[test]
fn statement_grammar_spans_multiple_lines() {
    let vocabulary = TokenVocabulary::new()
        .pattern("number", "[0-9]+(\\.[0-9]*)?")
        .pattern("math_operator", "(\\+|/|-|\\*)")
        .literal("newline", "\n")
        .literal("space", " ");

    let grammar = Grammar::new()
        .rule(
            "START",
            &[
                &["statement", "line*", "EOS"],
                &["line*", "EOS"],
            ],
        )
        .rule("line", &[&["newline", "statement"], &["newline"]])
        .rule(
            "statement",
            &[
                &["number", "math_operator", "statement"],
                &["number"],
            ],
        );
    let recognizer = compile(&grammar, &vocabulary).unwrap();

    assert!(parse(&recognizer, "9+9\n1+1+2\n").is_success());

    // spaces tokenize fine but no rule accepts them
    let outcome = parse(&recognizer, "9+9\n1 + 4\n");
    assert!(!outcome.is_success());
    assert_eq!(outcome.failure().unwrap().primary().unwrap().token().kind(), "space");
}
