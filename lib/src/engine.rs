// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The binding engine
//!
//! Allocates each acquired token to exactly one declared option, in three passes over the main
//! token vector:
//!
//! 1. the flagged extractor moves each flag's trailing parameter tokens into that option's
//!    private vector;
//! 2. the unflagged extractor distributes what remains among the unflagged options, front group
//!    first, then back group, with the (at most one) variadic unflagged option claiming the
//!    middle;
//! 3. the default processor tokenizes the default string of every option left untouched.
//!
//! Extraction is not commutative: a flag seen twice wins with its later invocation, and
//! unflagged claims happen in registry order from the front and reverse registry order from the
//! back.

use log::{debug, trace};
use crate::acquire::acquire_default;
use crate::arguments::{ArgVec, Source};
use crate::errors::{Error, Stop};
use crate::matching::{match_flag, FlagMatch};
use crate::options::{OptKind, Registry};
use crate::parser::Settings;

#[cfg(feature = "suggestions")]
fn suggestion_for(reg: &Registry, token: &str) -> Option<String> {
    reg.suggest(token)
}

#[cfg(not(feature = "suggestions"))]
fn suggestion_for(_reg: &Registry, _token: &str) -> Option<String> {
    None
}

/// The flagged extractor
///
/// Walks the vector left to right; at each position, a token naming a flag is removed and up to
/// `max` of the following tokens are moved into that option's private vector. The index is not
/// advanced after an extraction, so the next iteration examines whatever shifted in.
pub(crate) fn extract_flagged(reg: &mut Registry, main: &mut ArgVec) -> Result<(), Error> {
    let mut i = 0;
    while i < main.len() {
        let token = main.get(i).map(|a| a.text().to_owned()).unwrap_or_default();
        match match_flag(&token, reg) {
            FlagMatch::NotAFlag => {
                i += 1;
            }
            FlagMatch::VariadicStop => {
                // Only the parameter-count loop below may consume a `--`
                return Err(Error::UnknownFlag {
                    token,
                    suggestion: None,
                });
            }
            FlagMatch::Opt(index) => {
                let flag_source = main.remove(i).source();
                let (min, max, kind, label) = {
                    let opt = reg.opt(index);
                    (opt.min(), opt.max(), opt.kind(), opt.label())
                };

                // Count forward from the flag's position, up to `max` tokens
                let mut count = 0;
                let stopped = loop {
                    if let Some(max) = max {
                        if count >= max {
                            break None;
                        }
                    }
                    let next = match main.get(i + count) {
                        None => break Some(Stop::EndOfInput),
                        Some(arg) => arg.text(),
                    };
                    if kind == OptKind::Variadic && next == "--" {
                        break Some(Stop::VariadicStopSeen);
                    }
                    if let FlagMatch::Opt(_) = match_flag(next, reg) {
                        break Some(Stop::NextFlagSeen);
                    }
                    count += 1;
                };

                if count < min {
                    return Err(Error::MissingParameters {
                        option: label,
                        need: min,
                        got: count,
                        stopped: stopped.unwrap_or(Stop::EndOfInput),
                    });
                }

                let mut taken = ArgVec::new();
                for _ in 0..count {
                    taken.push(main.remove(i));
                }
                if kind == OptKind::Variadic && stopped == Some(Stop::VariadicStopSeen) {
                    let _ = main.remove(i);
                }
                debug!("flag \"{}\" took {} parameter token(s)", label, count);
                reg.opt_mut(index).set_tokens(taken, flag_source);
                // No index advance; examine whatever shifted in next
            }
        }
    }

    // Every parametric flagged option without a default must have been invoked
    for index in 0..reg.len() {
        let opt = reg.opt(index);
        if opt.is_flagged()
            && opt.kind() != OptKind::Flag
            && opt.default().is_none()
            && opt.source() == Source::Unknown
        {
            return Err(Error::MissingRequiredOption(opt.label()));
        }
    }
    Ok(())
}

/// The unflagged extractor
///
/// Fixed-arity unflagged options preceding the variadic one claim from the front of the
/// remaining vector; those following it claim from the back; the variadic option then claims the
/// middle. Anything left over is unexpected.
pub(crate) fn extract_unflagged(reg: &mut Registry, main: &mut ArgVec) -> Result<(), Error> {
    let unflagged: Vec<usize> = (0..reg.len())
        .filter(|&i| !reg.opt(i).is_flagged())
        .collect();
    let variadic_at = unflagged
        .iter()
        .position(|&i| reg.opt(i).kind() == OptKind::Variadic);
    let front_end = variadic_at.unwrap_or(unflagged.len());

    // Front group, registry order
    for &index in &unflagged[..front_end] {
        claim(reg, main, index, Claim::Front)?;
    }

    // Back group, reverse registry order
    if let Some(v) = variadic_at {
        for &index in unflagged[v + 1..].iter().rev() {
            claim(reg, main, index, Claim::Back)?;
        }

        // The variadic option claims what survives, up to its maximum
        let index = unflagged[v];
        let (min, max, label) = {
            let opt = reg.opt(index);
            (opt.min(), opt.max(), opt.label())
        };
        let available = main.len();
        if available < min {
            if reg.opt(index).default().is_none() {
                return Err(Error::MissingParameters {
                    option: label,
                    need: min,
                    got: available,
                    stopped: Stop::EndOfInput,
                });
            }
        } else {
            let take = match max {
                Some(max) => available.min(max),
                None => available,
            };
            let mut taken = ArgVec::new();
            for _ in 0..take {
                taken.push(main.remove(0));
            }
            if let Some(source) = taken.last_source() {
                debug!("unflagged \"{}\" took {} token(s)", label, take);
                reg.opt_mut(index).set_tokens(taken, source);
            }
        }
    }

    // Anything still here is unexpected
    if let Some(arg) = main.get(0) {
        let token = arg.text().to_owned();
        return Err(match token.starts_with('-') {
            true => Error::UnknownFlag {
                suggestion: suggestion_for(reg, &token),
                token,
            },
            false => Error::UnexpectedArgument(token),
        });
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Claim {
    Front,
    Back,
}

/// Claim `min` tokens for one fixed-arity unflagged option, from the chosen end
///
/// With too few tokens left, an option holding a default is simply left unfilled for the default
/// processor; one without fails.
fn claim(reg: &mut Registry, main: &mut ArgVec, index: usize, end: Claim) -> Result<(), Error> {
    let (min, label) = {
        let opt = reg.opt(index);
        (opt.min(), opt.label())
    };
    if main.len() < min {
        match reg.opt(index).default().is_some() {
            true => return Ok(()),
            false => {
                return Err(Error::MissingParameters {
                    option: label,
                    need: min,
                    got: main.len(),
                    stopped: Stop::EndOfInput,
                });
            }
        }
    }
    let from = match end {
        Claim::Front => 0,
        Claim::Back => main.len() - min,
    };
    let mut taken = ArgVec::new();
    for _ in 0..min {
        taken.push(main.remove(from));
    }
    if let Some(source) = taken.last_source() {
        trace!("unflagged \"{}\" took {} token(s)", label, min);
        reg.opt_mut(index).set_tokens(taken, source);
    }
    Ok(())
}

/// The default processor
///
/// Options untouched by both extractors get their source set to *default* and, unless they are
/// stand-alone flags, their default string tokenized into their private vector through the same
/// acquisition loop used for everything else (help interpretation disabled).
pub(crate) fn process_defaults(reg: &mut Registry, settings: &Settings) -> Result<(), Error> {
    for index in 0..reg.len() {
        if reg.opt(index).source() != Source::Unknown {
            continue;
        }
        reg.opt_mut(index).set_source(Source::Default);
        if reg.opt(index).kind() == OptKind::Flag {
            continue;
        }

        let (min, max, label, default) = {
            let opt = reg.opt(index);
            (
                opt.min(),
                opt.max(),
                opt.label(),
                opt.default().map(str::to_owned),
            )
        };
        let default = match default {
            Some(d) => d,
            // A variadic option with a zero minimum may simply end up empty
            None if min == 0 => continue,
            None => return Err(Error::MissingRequiredOption(label)),
        };

        let toks =
            acquire_default(&default, settings).map_err(|e| e.into_default_failure(&label))?;
        if toks.len() < min {
            let err = Error::MissingParameters {
                option: label.clone(),
                need: min,
                got: toks.len(),
                stopped: Stop::EndOfInput,
            };
            return Err(err.into_default_failure(&label));
        }
        if let Some(max) = max {
            if toks.len() > max {
                let surplus = toks.get(max).map(|a| a.text().to_owned()).unwrap_or_default();
                return Err(Error::UnexpectedArgument(surplus).into_default_failure(&label));
            }
        }
        debug!("option \"{}\" defaulted with {} token(s)", label, toks.len());
        let opt = reg.opt_mut(index);
        opt.set_tokens(toks, Source::Default);
    }
    Ok(())
}
