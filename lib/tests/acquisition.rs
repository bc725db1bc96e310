// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Input acquisition behaviour: response files, bracketed comments, `--help`, tokenizer failures

mod common;

use assert_matches::assert_matches;
use hest::errors::{CommentProblem, Error, InputFailure, TokenizerFailure};
use hest::options::Registry;
use hest::parser::Outcome;
use common::{base_registry, fixture, parser, parser_with_help};

/// Nested response files are spliced in depth-first
#[test]
fn nested_response_files() {
    let (mut reg, v, s, _q) = base_registry();
    let at_ref = format!("@{}", fixture("nest_outer.txt"));
    parser().parse(&mut reg, &[at_ref.as_str()]).unwrap();
    assert_eq!(reg.scalar::<i32>(v), Some(4));
    assert_eq!(reg.scalars::<i32>(s), &[8, 16]);
}

/// Quotes and `#` comments work inside response files
#[test]
fn response_file_grammar() {
    let mut reg = Registry::new();
    let s = reg
        .add_multi::<i32>(Some("s"), "sx sy", 2, None, "size")
        .unwrap();
    let t = reg
        .add_multi_string(Some("t"), "t1 t2", 2, None, "two tags")
        .unwrap();
    let at_ref = format!("@{}", fixture("comments.txt"));
    parser().parse(&mut reg, &[at_ref.as_str()]).unwrap();
    assert_eq!(reg.scalars::<i32>(s), &[8, 16]);
    assert_eq!(reg.strings(t), &["a b".to_owned(), "c d".to_owned()]);
}

#[test]
fn unopenable_response_file() {
    let (mut reg, ..) = base_registry();
    let e = parser().parse(&mut reg, &["@no/such/file"]).unwrap_err();
    assert_matches!(e, Error::Input(InputFailure::CannotOpen { name, .. }) => {
        assert_eq!(name, "no/such/file");
    });
}

#[test]
fn recursive_response_file() {
    let (mut reg, ..) = base_registry();
    let at_ref = format!("@{}", fixture("selfref.txt"));
    let e = parser().parse(&mut reg, &[at_ref.as_str()]).unwrap_err();
    assert_matches!(e, Error::Input(InputFailure::RecursiveResponseFile(_)));
}

#[test]
fn response_file_depth_bound() {
    let (mut reg, ..) = base_registry();
    let at_ref = format!("@{}", fixture("d1.txt"));
    let e = parser().parse(&mut reg, &[at_ref.as_str()]).unwrap_err();
    assert_matches!(e, Error::Input(InputFailure::StackDepthExceeded(10)));
}

/// With expansion disabled, an `@` token is an ordinary argument
#[test]
fn response_files_disabled() {
    let mut reg = Registry::new();
    let s = reg
        .add_single_string(None, "name", None, "a name")
        .unwrap();
    let mut p = parser();
    p.settings().set_response_files(false);
    p.parse(&mut reg, &["@literal"]).unwrap();
    assert_eq!(reg.string(s), Some("@literal"));
}

/// An unterminated quote in a response file fails with the file named in the location
#[test]
fn unterminated_quote_located() {
    let (mut reg, ..) = base_registry();
    let at_ref = format!("@{}", fixture("unterminated.txt"));
    let e = parser().parse(&mut reg, &[at_ref.as_str()]).unwrap_err();
    assert_matches!(e, Error::Tokenizer(TokenizerFailure::UnterminatedQuote(loc)) => {
        assert!(loc.source.contains("unterminated.txt"), "{}", loc.source);
    });
}

/// A backslash at the very end of a response file has nothing to escape
#[test]
fn dangling_escape_located() {
    let (mut reg, ..) = base_registry();
    let at_ref = format!("@{}", fixture("dangling.txt"));
    let e = parser().parse(&mut reg, &[at_ref.as_str()]).unwrap_err();
    assert_matches!(e, Error::Tokenizer(TokenizerFailure::DanglingEscape(loc)) => {
        assert!(loc.source.contains("dangling.txt"), "{}", loc.source);
    });
}

/// A backslash ending an argv element continues into the next element
#[test]
fn escape_joins_argv_elements() {
    let mut reg = Registry::new();
    let t = reg
        .add_single_string(Some("t"), "tag", None, "one tag")
        .unwrap();
    parser().parse(&mut reg, &["-t", "a\\", "b"]).unwrap();
    assert_eq!(reg.string(t), Some("ab"));
}

/// `--help` is honoured from the command line only when configured
#[test]
fn help_needs_configuration() {
    let (mut reg, ..) = base_registry();
    let e = parser().parse(&mut reg, &["--help"]).unwrap_err();
    assert_matches!(e, Error::UnknownFlag { token, .. } => assert_eq!(token, "--help"));
}

/// `--help` inside a response file is rejected when help is respected
#[test]
fn help_in_response_file() {
    let (mut reg, ..) = base_registry();
    let at_ref = format!("@{}", fixture("help.txt"));
    let e = parser_with_help().parse(&mut reg, &[at_ref.as_str()]).unwrap_err();
    assert_matches!(e, Error::Input(InputFailure::HelpInResponseFile(_)));
}

/// `--help` wins even with other problems further along the command line
#[test]
fn help_preempts_later_errors() {
    let (mut reg, ..) = base_registry();
    let outcome = parser_with_help()
        .parse(&mut reg, &["--help", "-unknown", "junk"])
        .unwrap();
    assert_eq!(outcome, Outcome::HelpRequested);
}

/// Bracketed comments nest
#[test]
fn bracketed_comment_nesting() {
    let (mut reg, v, _s, q) = base_registry();
    parser()
        .parse(&mut reg, &["-{", "-{", "-v", "9", "}-", "-q", "}-", "-v", "2"])
        .unwrap();
    assert_eq!(reg.scalar::<i32>(v), Some(2));
    assert!(!reg.flag_seen(q));
}

#[test]
fn stray_comment_close() {
    let (mut reg, ..) = base_registry();
    let e = parser().parse(&mut reg, &["}-"]).unwrap_err();
    assert_matches!(e, Error::CommentUnbalanced { problem: CommentProblem::StrayClose, .. });
}

#[test]
fn comment_left_open_at_end() {
    let (mut reg, ..) = base_registry();
    let e = parser().parse(&mut reg, &["-{", "-v", "1"]).unwrap_err();
    assert_matches!(e, Error::CommentUnbalanced { problem: CommentProblem::LeftOpen(1), .. });
}

/// A response file may not be popped with a bracketed comment still open
#[test]
fn comment_left_open_in_response_file() {
    let (mut reg, ..) = base_registry();
    let at_ref = format!("@{}", fixture("open_comment.txt"));
    let e = parser().parse(&mut reg, &[at_ref.as_str()]).unwrap_err();
    assert_matches!(e, Error::CommentUnbalanced { problem: CommentProblem::LeftOpen(1), .. });
}

/// With the feature disabled, `-{` is just an unclaimed token
#[test]
fn bracketed_comments_disabled() {
    let (mut reg, ..) = base_registry();
    let mut p = parser();
    p.settings().set_bracketed_comments(false);
    let e = p.parse(&mut reg, &["-{"]).unwrap_err();
    assert_matches!(e, Error::UnknownFlag { token, .. } => assert_eq!(token, "-{"));
}

/// Response-file references inside a comment run are not expanded
#[test]
fn reference_inside_comment_ignored() {
    let (mut reg, v, ..) = base_registry();
    parser()
        .parse(&mut reg, &["-{", "@no/such/file", "}-", "-v", "1"])
        .unwrap();
    assert_eq!(reg.scalar::<i32>(v), Some(1));
}
