// strans-core/tests/pipeline_tests.rs
//! End-to-end behaviour of compiled pipelines: expressions in, strings out.

use std::sync::Arc;
use std::thread;

use regex::Regex;
use strans_core::{
    expand_ordinals, parse_expression, Operation, ParseError, Pipeline, RegexTransliteration,
    TransformEngine,
};

fn pipeline(expressions: &[&str]) -> Pipeline {
    let mut pipeline = Pipeline::new();
    for expression in expressions {
        pipeline
            .add_expression(expression)
            .unwrap_or_else(|e| panic!("{expression} failed to compile: {e}"));
    }
    pipeline
}

fn run(expression: &str, input: &str) -> String {
    pipeline(&[expression]).apply(input)
}

#[test_log::test]
fn test_identity_noop() {
    let p = pipeline(&["y///"]);
    assert!(p.is_empty());
    assert_eq!(p.apply("unchanged \u{1F600}\n"), "unchanged \u{1F600}\n");
}

#[test]
fn test_global_substitution() {
    assert_eq!(run("s/foo/bar/g", "foo foo baz"), "bar bar baz");
}

#[test]
fn test_default_single_replacement_cap() {
    assert_eq!(run("s/a/b/", "aaa"), "baa");
}

#[test]
fn test_direct_table_transliteration() {
    assert_eq!(run("y/abc/xyz/", "aabbcc"), "xxyyzz");
}

#[test]
fn test_short_replacement_set_fallback() {
    assert_eq!(run("y/abc/x/", "abcd"), "xxxd");
}

#[test]
fn test_deletion() {
    assert_eq!(run("y/abc//d", "abcdef"), "def");
}

#[test]
fn test_range_expansion_matches_spelled_out_set() {
    let input = "a quick brown fox, abc cab";
    assert_eq!(run("y/a-c/x-z/", input), run("y/abc/xyz/", input));
    assert!(matches!(
        parse_expression("y/c-a//"),
        Err(ParseError::InvalidRange { range }) if range == "c-a"
    ));
}

#[test]
fn test_complement_squash() {
    assert_eq!(run("y/a-z//cs", "aaa111bbb"), "aaa1bbb");
}

#[test]
fn test_direct_table_matches_regex_path() {
    let cases = [
        ("abc", "xyz", ""),
        ("a-f", "A", ""),
        ("a-z0-9", "", "d"),
        ("hello", "HEL", "d"),
        ("lo", "", ""),
    ];
    let input = "hello world 42, fade to black 0xdeadbeef";

    for (charset, replset, flags) in cases {
        let expression = format!("y/{charset}/{replset}/{flags}");
        let Some(Operation::DirectTable(table)) = parse_expression(&expression).unwrap() else {
            panic!("{expression} should compile to a direct table");
        };
        let by_regex = Operation::RegexTransliteration(RegexTransliteration {
            regex: Regex::new(&format!("[{charset}]+")).unwrap(),
            table: table.clone(),
            squash: false,
        });
        assert_eq!(
            Operation::DirectTable(table).apply(input),
            by_regex.apply(input),
            "paths disagree for {expression}"
        );
    }
}

#[test]
fn test_malformed_expressions() {
    assert!(matches!(
        parse_expression("s/foo/bar"),
        Err(ParseError::UnterminatedExpression { .. })
    ));
    assert!(matches!(
        parse_expression("s9foo9bar9"),
        Err(ParseError::InvalidDelimiter { .. })
    ));
    assert!(matches!(
        parse_expression("y/a/b/z"),
        Err(ParseError::InvalidTransliterationFlag('z'))
    ));
    assert!(matches!(
        parse_expression("q/a/b/"),
        Err(ParseError::UnrecognizedOperator { .. })
    ));
    assert!(matches!(
        parse_expression("s/[/x/"),
        Err(ParseError::InvalidPattern { .. })
    ));
    assert!(matches!(
        parse_expression(r"y/\xZZ/a/"),
        Err(ParseError::InvalidEscape { .. })
    ));
}

#[test]
fn test_tr_alias_and_custom_delimiters() {
    assert_eq!(run("tr:a-z:A-Z:", "shout"), "SHOUT");
    assert_eq!(run("s,/usr,/opt,", "/usr/bin"), "/opt/bin");
    assert_eq!(run(r"s/\/\//:/g", "a//b//c"), "a:b:c");
}

#[test]
fn test_counted_substitution() {
    assert_eq!(run("s/o/0/2", "foo boo"), "f00 boo");
}

#[test]
fn test_complement_with_replacement_maps_everything_outside_the_set() {
    assert_eq!(run("y/a-zA-Z/_/c", "snake case, please!"), "snake_case__please_");
    assert_eq!(run("y/a-zA-Z/_/cs", "snake case, please!"), "snake_case_please_");
}

#[test]
fn test_newlines_are_transliterated() {
    assert_eq!(run(r"y/\n/;/", "one\ntwo\n"), "one;two;");
}

#[test]
fn test_squash_without_complement() {
    assert_eq!(run("y/a-z//s", "bookkeeper  balloon"), "bokeper  balon");
}

#[test]
fn test_chained_operations() {
    let p = pipeline(&["s/\\s+/ /g", "y/a-z/A-Z/", "s/HELLO/bye/"]);
    assert_eq!(p.len(), 3);
    assert_eq!(p.apply("hello   there\tworld"), "bye THERE WORLD");
}

#[test]
fn test_dollar_signs_in_replacements_are_kept() {
    assert_eq!(run("s/cost/$5/", "cost"), "$5");
    assert_eq!(run("s/USD/$dollars/", "10 USD"), "10 $dollars");
    assert_eq!(run(r"s/(\d+) USD/$\1/", "10 USD"), "$10");
}

#[test]
fn test_group_references_must_exist() {
    assert!(matches!(
        parse_expression(r"s/(a)(b)/\3/"),
        Err(ParseError::InvalidEscape { .. })
    ));
    assert!(matches!(
        parse_expression(r"s/(?P<x>a)/\g<nope>/"),
        Err(ParseError::InvalidEscape { .. })
    ));
}

#[test]
fn test_ascii_flag() {
    assert_eq!(run("s/./x/a", "éa"), "xa");
    assert_eq!(run("s/[^a]/x/a", "éa"), "xa");
    assert_eq!(run(r"s/\W/_/ag", "naïve-ish"), "na_ve_ish");
    assert_eq!(run(r"s/\W/_/g", "naïve-ish"), "naïve_ish");
}

#[test]
fn test_text_after_flags_line_is_ignored() {
    assert_eq!(run("s/a/b/g\n#comment", "banana"), "bbnbnb");
    assert_eq!(run("y/a-z/A-Z/\n# upper-case everything", "abc"), "ABC");
}

#[test]
fn test_replacement_range_through_surrogates_is_rejected() {
    assert!(matches!(
        parse_expression(r"y/a/\ud7ff-\ue000/"),
        Err(ParseError::InvalidRange { .. })
    ));
}

#[test]
fn test_expansion_keeps_duplicates() {
    assert_eq!(expand_ordinals("a-ca").unwrap(), vec![97, 98, 99, 97]);
}

#[test]
fn test_concurrent_apply_on_shared_pipeline() {
    let p = Arc::new(pipeline(&["s/(\\d+)/<\\1>/g", "y/a-z/A-Z/"]));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let p = Arc::clone(&p);
            thread::spawn(move || p.apply(&format!("line {i} of 8")))
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("LINE <{i}> OF <8>"));
    }
}
