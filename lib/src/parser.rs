// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! The parser & parser settings
//!
//! A [`Parser`] wraps the [`Settings`] controlling acquisition, binding and help-text generation,
//! and provides the parse methods that consume an argument vector against a
//! [`Registry`](../options/struct.Registry.html).
//!
//! Parsing runs in fixed stages: registry validation, token acquisition (argv, response files),
//! flagged extraction, unflagged extraction, default processing and value setting. A parse either
//! completes (the registry then holds the typed values), fails with a located error, or
//! recognises `--help` and returns early with [`Outcome::HelpRequested`].
//!
//! The parser is single-threaded and non-reentrant within one invocation; the registry must not
//! be touched by anything else while a parse runs.
//!
//! [`Parser`]: struct.Parser.html
//! [`Settings`]: struct.Settings.html
//! [`Outcome`]: enum.Outcome.html

use std::io::Write;
use log::debug;
use crate::acquire::{acquire, Acquired};
use crate::arguments::ArgVec;
use crate::engine::{extract_flagged, extract_unflagged, process_defaults};
use crate::errors::Error;
use crate::input::{Input, InputStack};
use crate::options::{OptKind, Registry};
use crate::usage::{write_glossary, write_usage};
use crate::values::set_values;

/// Settings for parser
///
/// Construct with `Settings::default()` and adjust with the chainable setter methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Detail level used by the convenience wrapper's output
    pub verbosity: u32,
    /// Whether `@file` tokens splice in response files
    pub response_files: bool,
    /// Whether a command-line `--help` aborts parsing with a help request
    pub respect_help: bool,
    /// Whether stand-alone `-{` and `}-` tokens delimit commented-out runs
    pub bracketed_comments: bool,
    /// Whether an empty argument vector is acceptable to the convenience wrapper
    pub no_args_is_no_problem: bool,
    /// Whether the convenience wrapper omits usage and glossary text when dying
    pub die_less_verbose: bool,
    /// Omit the type annotation for single-valued enum options
    pub elide_single_enum_type: bool,
    /// Omit the type annotation for single-valued other-typed options
    pub elide_single_other_type: bool,
    /// Omit the default clause for single-valued other-typed options
    pub elide_single_other_default: bool,
    /// Omit the default clause for single-valued float options with non-finite defaults
    pub elide_single_non_existent_float_default: bool,
    /// Omit the default clause for multi-valued float options with non-finite defaults
    pub elide_multiple_non_existent_float_default: bool,
    /// Omit the default clause for single-valued string options with empty defaults
    pub elide_single_empty_string_default: bool,
    /// Omit the default clause for multi-valued string options with empty defaults
    pub elide_multiple_empty_string_default: bool,
    /// Pluralize other-type names ending in `y` as `ies` in glossary text
    pub pluralize_other_y: bool,
    /// Column count used when wrapping usage and glossary text
    pub columns: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            verbosity: 0,
            response_files: true,
            respect_help: false,
            bracketed_comments: true,
            no_args_is_no_problem: false,
            die_less_verbose: false,
            elide_single_enum_type: false,
            elide_single_other_type: false,
            elide_single_other_default: false,
            elide_single_non_existent_float_default: false,
            elide_multiple_non_existent_float_default: false,
            elide_single_empty_string_default: false,
            elide_multiple_empty_string_default: false,
            pluralize_other_y: false,
            columns: 79,
        }
    }
}

/// Minimum column count accepted from a terminal query
const COLUMNS_FLOOR: usize = 40;

impl Settings {
    /// Set verbosity
    #[inline(always)]
    pub fn set_verbosity(&mut self, level: u32) -> &mut Self {
        self.verbosity = level;
        self
    }

    /// Control response-file expansion (enabled by default)
    #[inline(always)]
    pub fn set_response_files(&mut self, enable: bool) -> &mut Self {
        self.response_files = enable;
        self
    }

    /// Control whether a command-line `--help` is honoured
    #[inline(always)]
    pub fn set_respect_help(&mut self, enable: bool) -> &mut Self {
        self.respect_help = enable;
        self
    }

    /// Control bracketed-comment recognition (enabled by default)
    #[inline(always)]
    pub fn set_bracketed_comments(&mut self, enable: bool) -> &mut Self {
        self.bracketed_comments = enable;
        self
    }

    /// Control whether the convenience wrapper accepts an empty argument vector
    #[inline(always)]
    pub fn set_no_args_is_no_problem(&mut self, enable: bool) -> &mut Self {
        self.no_args_is_no_problem = enable;
        self
    }

    /// Control whether the convenience wrapper omits help text when dying
    #[inline(always)]
    pub fn set_die_less_verbose(&mut self, enable: bool) -> &mut Self {
        self.die_less_verbose = enable;
        self
    }

    /// Set the wrap column count directly
    #[inline(always)]
    pub fn set_columns(&mut self, columns: usize) -> &mut Self {
        self.columns = columns;
        self
    }

    /// Learn the wrap column count from the controlling terminal, if there is one
    ///
    /// Falls back to the current value when no terminal is attached, and floors detected widths
    /// at a sane minimum. Deliberately a method rather than something done globally; callers that
    /// do not want terminal-dependent output simply never call it.
    pub fn detect_columns(&mut self) -> &mut Self {
        if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
            self.columns = (w as usize).max(COLUMNS_FLOOR);
        }
        self
    }
}

/// How a successful parse ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The registry now holds typed values for every option
    Complete,
    /// `--help` was seen; no values were written
    HelpRequested,
}

/// The parser
///
/// Holds the settings used for parsing, and provides methods for parsing a given argument vector
/// against a [`Registry`](../options/struct.Registry.html).
#[derive(Debug, Clone, Default)]
pub struct Parser {
    /// Settings
    pub settings: Settings,
}

impl Parser {
    /// Create a new parser with default settings
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a new parser with the given settings
    pub fn with_settings(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get a mutable reference to settings
    #[inline(always)]
    pub fn settings(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Parse the provided argument vector against the registry
    ///
    /// `args` should **not** include the program-name argument. On success the registry holds the
    /// typed values, retrieved with its accessor methods; on failure any partially parsed values
    /// have already been released and the registry reads as unset.
    pub fn parse<A: AsRef<str>>(
        &self,
        reg: &mut Registry,
        args: &[A],
    ) -> Result<Outcome, Error> {
        reg.validate(&self.settings).map_err(Error::RegistryInvalid)?;
        reg.reset_parse_state();

        let argv: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        debug!("parsing {} argument(s)", argv.len());

        let mut main = ArgVec::new();
        let mut stack = InputStack::new(Input::from_argv(&argv));
        if let Acquired::HelpRequested = acquire(&mut stack, &mut main, &self.settings, true)? {
            return Ok(Outcome::HelpRequested);
        }

        extract_flagged(reg, &mut main)?;
        extract_unflagged(reg, &mut main)?;
        process_defaults(reg, &self.settings)?;
        set_values(reg, &self.settings)?;
        Ok(Outcome::Complete)
    }

    /// Parse, and on any problem print diagnostics and terminate the process
    ///
    /// On success, returns normally with the values in the registry. On `--help`, prints the
    /// usage line and glossary to standard output and exits with status 0. On a parse or
    /// validation error, prints the error (plus, unless `die_less_verbose` is set, the usage line
    /// and glossary) to standard error and exits with status 1. An empty argument vector is
    /// treated as a request for usage text unless `no_args_is_no_problem` is set.
    pub fn parse_or_exit<A: AsRef<str>>(&self, reg: &mut Registry, args: &[A], prog_name: &str) {
        if args.is_empty() && !self.settings.no_args_is_no_problem && wants_input(reg) {
            let mut err = std::io::stderr();
            let _ = write_usage(&mut err, reg, prog_name, &self.settings);
            let _ = write_glossary(&mut err, reg, &self.settings);
            std::process::exit(1);
        }
        match self.parse(reg, args) {
            Ok(Outcome::Complete) => {}
            Ok(Outcome::HelpRequested) => {
                let mut out = std::io::stdout();
                let _ = write_usage(&mut out, reg, prog_name, &self.settings);
                let _ = write_glossary(&mut out, reg, &self.settings);
                let _ = out.flush();
                std::process::exit(0);
            }
            Err(e) => {
                let mut err = std::io::stderr();
                let _ = writeln!(err, "{}: {}", prog_name, e);
                if !self.settings.die_less_verbose {
                    let _ = write_usage(&mut err, reg, prog_name, &self.settings);
                    let _ = write_glossary(&mut err, reg, &self.settings);
                }
                std::process::exit(1);
            }
        }
    }
}

/// Whether the registry has any option that cannot be satisfied without input
fn wants_input(reg: &Registry) -> bool {
    reg.iter().any(|opt| {
        opt.kind() != OptKind::Flag && opt.default().is_none() && opt.min() > 0
    })
}
