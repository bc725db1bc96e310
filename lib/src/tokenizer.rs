// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The tokenizer
//!
//! A deterministic finite automaton fed one character per step. It understands single and double
//! quoting, backslash escapes (inside and outside double quotes, including escaped-newline line
//! continuation), and `#` line comments. Bytes pass through verbatim; no character-set conversion
//! is performed.
//!
//! The automaton itself knows nothing about sources, response files or option flags; the
//! [input processor](../acquire/index.html) drives it against the top of the input stack and
//! interprets the tokens it produces.

use crate::arguments::Arg;

/// DFA states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between tokens; whitespace is skipped here
    Start,
    /// Accumulating an unquoted token
    Inside,
    /// Within `'…'`; everything is appended verbatim
    SingleQuote,
    /// Within `"…"`
    DoubleQuote,
    /// Just saw `\` outside double quotes
    EscapeInside,
    /// Just saw `\` inside double quotes
    EscapeInDquote,
    /// Within a `#` comment; skipped until newline
    Comment,
}

/// Outcome of feeding one character to the automaton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// Still working; feed the next character
    More,
    /// A complete token is now in the arg
    Behold,
    /// The source ran dry without completing a token; a caller holding further sources should
    /// pop and ask again
    TryAgain,
}

/// Failure kinds; both arise only at end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Problem {
    UnterminatedQuote,
    DanglingEscape,
}

/// The tokenizer automaton
///
/// `step` is a pure transition function over the held state; the current token accumulates in the
/// caller's [`Arg`](../arguments/struct.Arg.html).
#[derive(Debug)]
pub(crate) struct Tokenizer {
    state: State,
}

impl Tokenizer {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Start,
        }
    }

    /// Advance the automaton by one character (`None` = end of the current source)
    ///
    /// On `Behold` the state is reset so the same automaton can carry on with the next token.
    pub(crate) fn step(&mut self, c: Option<char>, arg: &mut Arg) -> Result<Step, Problem> {
        let c = match c {
            Some(c) => c,
            None => {
                return match self.state {
                    State::Start | State::Comment => {
                        self.state = State::Start;
                        Ok(Step::TryAgain)
                    }
                    State::Inside => {
                        self.state = State::Start;
                        Ok(Step::Behold)
                    }
                    State::SingleQuote | State::DoubleQuote => Err(Problem::UnterminatedQuote),
                    State::EscapeInside | State::EscapeInDquote => Err(Problem::DanglingEscape),
                };
            }
        };

        match self.state {
            State::Start => match c {
                _ if c.is_whitespace() => {}
                '\'' => self.state = State::SingleQuote,
                '"' => self.state = State::DoubleQuote,
                '\\' => self.state = State::EscapeInside,
                '#' => self.state = State::Comment,
                _ => {
                    arg.push(c);
                    self.state = State::Inside;
                }
            },
            State::Inside => match c {
                _ if c.is_whitespace() => {
                    self.state = State::Start;
                    return Ok(Step::Behold);
                }
                '\'' => self.state = State::SingleQuote,
                '"' => self.state = State::DoubleQuote,
                '\\' => self.state = State::EscapeInside,
                // `#` mid-token is an ordinary character
                _ => arg.push(c),
            },
            State::SingleQuote => match c {
                '\'' => self.state = State::Inside,
                _ => arg.push(c),
            },
            State::DoubleQuote => match c {
                '"' => self.state = State::Inside,
                '\\' => self.state = State::EscapeInDquote,
                _ => arg.push(c),
            },
            State::EscapeInside => {
                // An escaped newline is a line continuation, consumed silently
                if c != '\n' {
                    arg.push(c);
                }
                self.state = State::Inside;
            }
            State::EscapeInDquote => {
                match c {
                    '\n' => {}
                    '$' | '\'' | '"' | '\\' => arg.push(c),
                    _ => {
                        // The backslash was not an escape here; keep it
                        arg.push('\\');
                        arg.push(c);
                    }
                }
                self.state = State::DoubleQuote;
            }
            State::Comment => {
                if c == '\n' {
                    self.state = State::Start;
                }
            }
        }
        Ok(Step::More)
    }
}
