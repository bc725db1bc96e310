// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The input processor
//!
//! A loop around the [tokenizer](../tokenizer/index.html) that recognises the three meta-token
//! forms — `@file` response-file references, `--help`, and the `-{` / `}-` bracketed-comment
//! sentinels — pushing and popping the input stack as needed, and delivering every other token
//! into the output [`ArgVec`](../arguments/struct.ArgVec.html) tagged with the source it came
//! from.
//!
//! The processor works strictly one character at a time with no look-ahead across sources: a
//! token never spans two inputs, because end of input inside a token completes the token.

use log::{debug, trace};
use crate::arguments::{Arg, ArgVec, Source};
use crate::errors::{CommentProblem, Error, InputFailure, TokenizerFailure};
use crate::input::{Input, InputStack};
use crate::parser::Settings;
use crate::tokenizer::{Problem, Step, Tokenizer};

/// How an acquisition run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acquired {
    /// Every source ran dry; the output holds all surviving tokens
    Done,
    /// `--help` was seen on the command line; the output has been cleared
    HelpRequested,
}

/// Drive the tokenizer over the input stack until it is exhausted
///
/// `allow_help` is false when tokenizing default strings, where `--help` is an ordinary token.
pub(crate) fn acquire(
    stack: &mut InputStack,
    out: &mut ArgVec,
    settings: &Settings,
    allow_help: bool,
) -> Result<Acquired, Error> {
    let mut tok = Tokenizer::new();
    loop {
        let source = match stack.top_mut() {
            None => {
                debug!("acquisition done, {} raw token(s)", out.len());
                return Ok(Acquired::Done);
            }
            Some(top) => top.source(),
        };

        // Drive the automaton against the top input until it reports something
        let mut arg = Arg::new(source);
        let step = {
            let top = stack.top_mut().unwrap();
            loop {
                let c = top.next_char();
                match tok.step(c, &mut arg) {
                    Ok(Step::More) => continue,
                    Ok(step) => break Ok(step),
                    Err(problem) => break Err(problem),
                }
            }
        };

        let step = match step {
            Ok(step) => step,
            Err(problem) => {
                let location = stack.top_mut().unwrap().location();
                return Err(match problem {
                    Problem::UnterminatedQuote => {
                        Error::from(TokenizerFailure::UnterminatedQuote(location))
                    }
                    Problem::DanglingEscape => {
                        Error::from(TokenizerFailure::DanglingEscape(location))
                    }
                });
            }
        };

        match step {
            Step::TryAgain => {
                // This source is done; it may not leave bracketed comments open
                let top = stack.top_mut().unwrap();
                if top.comment_depth() > 0 {
                    return Err(Error::CommentUnbalanced {
                        location: top.location(),
                        problem: CommentProblem::LeftOpen(top.comment_depth()),
                    });
                }
                let _ = stack.pop();
            }
            Step::Behold => {
                let text = arg.text();

                // Bracketed comments first: while one is open everything else is dropped
                if settings.bracketed_comments {
                    let top = stack.top_mut().unwrap();
                    if text == "-{" {
                        top.open_comment();
                        continue;
                    }
                    if text == "}-" {
                        if !top.close_comment() {
                            return Err(Error::CommentUnbalanced {
                                location: top.location(),
                                problem: CommentProblem::StrayClose,
                            });
                        }
                        continue;
                    }
                    if top.comment_depth() > 0 {
                        trace!("token \"{}\" dropped inside bracketed comment", text);
                        continue;
                    }
                }

                // Response-file reference
                if settings.response_files && text.starts_with('@') {
                    if arg.source() == Source::Default {
                        return Err(InputFailure::ResponseFileInDefault.into());
                    }
                    let name = text[1..].to_owned();
                    stack.push_response_file(&name)?;
                    continue;
                }

                // Help request
                if allow_help && settings.respect_help && text == "--help" {
                    match arg.source() {
                        Source::CommandLine => {
                            debug!("--help seen, acquisition abandoned");
                            out.clear();
                            return Ok(Acquired::HelpRequested);
                        }
                        _ => {
                            let described = stack.top_mut().unwrap().location().source;
                            return Err(InputFailure::HelpInResponseFile(described).into());
                        }
                    }
                }

                trace!("token \"{}\" ({})", text, arg.source());
                out.push(arg);
            }
            Step::More => unreachable!(),
        }
    }
}

/// Tokenize an option's default string
///
/// Same grammar as a response file, with help interpretation disabled; `@` references are
/// rejected by `acquire` for default sources.
pub(crate) fn acquire_default(text: &str, settings: &Settings) -> Result<ArgVec, Error> {
    let mut stack = InputStack::new(Input::from_default(text));
    let mut out = ArgVec::new();
    let _ = acquire(&mut stack, &mut out, settings, false)?;
    Ok(out)
}
