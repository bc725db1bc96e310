// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Error types
//!
//! Every way a parse can fail is a distinct variant of [`Error`], carrying structured fields
//! rather than pre-baked strings. The `Display` implementations render the chain-of-context
//! messages shown to users (e.g. `option "-xyz": token "abc": not parseable as float`).
//!
//! Registry validation problems are described by [`RegistryFlaw`](../options/enum.RegistryFlaw.html),
//! collected in the `RegistryInvalid` variant.
//!
//! [`Error`]: enum.Error.html

use std::fmt;
use std::io;
use thiserror::Error;
use crate::options::RegistryFlaw;

/// Where in an input source something was found
///
/// `line` and `column` are one-based and only meaningful for character-stream sources (response
/// files and default strings); for the command line, `line` numbers the argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLocation {
    /// Description of the source, e.g. `response file "params.txt"`
    pub source: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for InputLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, line {}, column {}", self.source, self.line, self.column)
    }
}

/// Tokenizer failure kinds
///
/// Both can only occur at end of input: mid-input every character has a defined transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizerFailure {
    #[error("{0}: unterminated quote")]
    UnterminatedQuote(InputLocation),
    #[error("{0}: dangling escape at end of input")]
    DanglingEscape(InputLocation),
}

/// Input acquisition failure kinds
#[derive(Debug, Error)]
pub enum InputFailure {
    #[error("response file \"{name}\": {err}")]
    CannotOpen {
        name: String,
        #[source]
        err: io::Error,
    },
    #[error("response file \"{0}\" references itself, directly or through another file")]
    RecursiveResponseFile(String),
    #[error("standard input (\"@-\") was already consumed by an earlier reference")]
    StdinConsumed,
    #[error("response file nesting exceeds the maximum depth of {0}")]
    StackDepthExceeded(usize),
    #[error("\"--help\" is only honoured on the command line, not in {0}")]
    HelpInResponseFile(String),
    #[error("response file references are not allowed inside a default string")]
    ResponseFileInDefault,
}

/// What ended a flagged option's parameter run prematurely
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    EndOfInput,
    NextFlagSeen,
    VariadicStopSeen,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Stop::EndOfInput => "hit end of input",
            Stop::NextFlagSeen => "hit the next flag",
            Stop::VariadicStopSeen => "hit the \"--\" stop",
        };
        f.write_str(s)
    }
}

/// Whether a bracketed comment was unbalanced by a stray close or by a source ending (or being
/// popped) with comments still open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentProblem {
    StrayClose,
    LeftOpen(usize),
}

impl fmt::Display for CommentProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommentProblem::StrayClose => f.write_str("\"}-\" without a matching \"-{\""),
            CommentProblem::LeftOpen(n) => write!(f, "{} \"-{{\" comment(s) left open", n),
        }
    }
}

/// The parse-level error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid option registry: {}", fmt_flaws(.0))]
    RegistryInvalid(Vec<RegistryFlaw>),
    #[error(transparent)]
    Tokenizer(#[from] TokenizerFailure),
    #[error(transparent)]
    Input(#[from] InputFailure),
    #[error("{location}: {problem}")]
    CommentUnbalanced {
        location: InputLocation,
        problem: CommentProblem,
    },
    #[error("option \"{option}\": wanted at least {need} parameter(s), got {got} ({stopped})")]
    MissingParameters {
        option: String,
        need: usize,
        got: usize,
        stopped: Stop,
    },
    #[error("option \"{0}\" is required but was not given")]
    MissingRequiredOption(String),
    #[error("unknown flag \"{token}\"{}", fmt_suggestion(.suggestion))]
    UnknownFlag {
        token: String,
        suggestion: Option<String>,
    },
    #[error("unexpected extra argument \"{0}\"")]
    UnexpectedArgument(String),
    #[error("option \"{option}\": token \"{token}\": not parseable as {want}")]
    ParseTypeMismatch {
        option: String,
        token: String,
        want: &'static str,
    },
    #[error("option \"{option}\": token \"{token}\": not recognised by enum \"{enum_name}\"")]
    EnumMismatch {
        option: String,
        token: String,
        enum_name: String,
    },
    #[error("option \"{option}\": token \"{token}\": expected exactly one character")]
    CharLength { option: String, token: String },
    #[error("option \"{option}\": token \"{token}\": {message}")]
    CallbackFailure {
        option: String,
        token: String,
        message: String,
    },
    #[error("option \"{option}\": default value: {source}")]
    DefaultParseFailure {
        option: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps `self` as having originated from default tokenization/parsing of `option`
    pub(crate) fn into_default_failure(self, option: &str) -> Self {
        Error::DefaultParseFailure {
            option: option.to_owned(),
            source: Box::new(self),
        }
    }
}

fn fmt_flaws(flaws: &[RegistryFlaw]) -> String {
    let mut s = String::new();
    for (i, flaw) in flaws.iter().enumerate() {
        if i > 0 {
            s.push_str("; ");
        }
        s.push_str(&flaw.to_string());
    }
    s
}

fn fmt_suggestion(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean \"{}\"?", s),
        None => String::new(),
    }
}
