// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Item matching components
//!
//! This module contains components to do with identifying which declared option, if any, a given
//! token names.

use crate::options::Registry;

/// Result of matching a token against the registry's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagMatch {
    /// The token names the option at this index
    Opt(usize),
    /// The stand-alone variadic-stop sentinel `--`
    VariadicStop,
    /// Not a declared flag
    NotAFlag,
}

/// Identify which option (if any) `token` names
///
/// Registry order decides ties, though a valid registry has no duplicate flags.
pub(crate) fn match_flag(token: &str, reg: &Registry) -> FlagMatch {
    if token == "--" {
        return FlagMatch::VariadicStop;
    }
    for (index, opt) in reg.iter().enumerate() {
        if let Some(flag) = opt.flag() {
            if flag.matches(token) {
                return FlagMatch::Opt(index);
            }
        }
    }
    FlagMatch::NotAFlag
}
