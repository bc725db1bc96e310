// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Usage and glossary text generation
//!
//! Produces a single-line (word-wrapped) usage string naming every option in registry order, and
//! a glossary of one paragraph per option: its identifier, its info text, a parenthesised
//! type/arity annotation and a `default:` clause, the latter two subject to the elision settings.
//!
//! All output is wrapped to [`Settings::columns`](../parser/struct.Settings.html); the column
//! count can be learned from the controlling terminal with
//! [`Settings::detect_columns`](../parser/struct.Settings.html#method.detect_columns).

use std::io::{self, Write};
use crate::options::{Opt, OptKind, Registry, ValueType};
use crate::parser::Settings;

/// Indent applied to glossary paragraph bodies
const GLOSSARY_INDENT: &str = "          ";

/// Write the one-line usage summary, wrapped to the configured column count
///
/// Flagged options that are stand-alone flags or carry a default are wrapped in `[ ]`, as are
/// unflagged options that input can legitimately omit.
pub fn write_usage<W: Write>(
    w: &mut W,
    reg: &Registry,
    prog_name: &str,
    settings: &Settings,
) -> io::Result<()> {
    let mut line = String::from(prog_name);
    for opt in reg.iter() {
        line.push(' ');
        line.push_str(&usage_piece(opt));
    }

    let hang = " ".repeat((prog_name.len() + 1).min(settings.columns / 2));
    let wrap = textwrap::Options::new(settings.columns).subsequent_indent(&hang);
    for l in textwrap::wrap(&line, &wrap) {
        writeln!(w, "{}", l)?;
    }
    Ok(())
}

/// Write the option glossary, one wrapped paragraph per option in registry order
pub fn write_glossary<W: Write>(w: &mut W, reg: &Registry, settings: &Settings) -> io::Result<()> {
    for opt in reg.iter() {
        writeln!(w, "  {}", identifier(opt))?;
        let body = glossary_body(opt, settings);
        if body.is_empty() {
            continue;
        }
        let wrap = textwrap::Options::new(settings.columns)
            .initial_indent(GLOSSARY_INDENT)
            .subsequent_indent(GLOSSARY_INDENT);
        for l in textwrap::wrap(&body, &wrap) {
            writeln!(w, "{}", l)?;
        }
    }
    Ok(())
}

fn usage_piece(opt: &Opt) -> String {
    let placeholder = opt.name().unwrap_or("value");
    let inner = match (opt.flag(), opt.kind()) {
        (Some(flag), OptKind::Flag) => flag.dashed(),
        (Some(flag), OptKind::Variadic) => format!("{} <{}> ...", flag.dashed(), placeholder),
        (Some(flag), _) => format!("{} <{}>", flag.dashed(), placeholder),
        (None, OptKind::Variadic) => format!("<{}> ...", placeholder),
        (None, _) => format!("<{}>", placeholder),
    };
    let omittable = match opt.kind() {
        OptKind::Flag => true,
        _ => opt.default().is_some() || opt.min() == 0,
    };
    match omittable {
        true => format!("[{}]", inner),
        false => inner,
    }
}

fn identifier(opt: &Opt) -> String {
    let placeholder = opt.name().unwrap_or("value");
    match (opt.flag(), opt.kind()) {
        (Some(flag), OptKind::Flag) => flag.display(),
        (Some(flag), OptKind::Variadic) => format!("{} <{}> ...", flag.display(), placeholder),
        (Some(flag), _) => format!("{} <{}>", flag.display(), placeholder),
        (None, OptKind::Variadic) => format!("<{}> ...", placeholder),
        (None, _) => format!("<{}>", placeholder),
    }
}

fn glossary_body(opt: &Opt, settings: &Settings) -> String {
    let mut body = String::from(opt.info());

    if let Some(arity) = arity_clause(opt, settings) {
        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(&arity);
    }

    if let Some(default) = default_clause(opt, settings) {
        if !body.is_empty() {
            body.push_str("; ");
        }
        body.push_str(&default);
    }

    body
}

/// The parenthesised type/arity annotation, unless elided
fn arity_clause(opt: &Opt, settings: &Settings) -> Option<String> {
    if opt.kind() == OptKind::Flag {
        return None;
    }

    let single = matches!(opt.kind(), OptKind::Single | OptKind::OptionalSingle);
    let type_name = match opt.value_type() {
        ValueType::Enum => {
            if single && settings.elide_single_enum_type {
                return None;
            }
            let def = opt.enum_def()?;
            let labels: Vec<&str> = def.labels().collect();
            return Some(match opt.kind() {
                OptKind::Single => format!("(1 {}: {})", def.name(), labels.join(", ")),
                OptKind::OptionalSingle => format!("(optional {}: {})", def.name(), labels.join(", ")),
                _ => format!(
                    "({}: {})",
                    counted(def.name(), opt, settings),
                    labels.join(", ")
                ),
            });
        }
        ValueType::Other => {
            if single && settings.elide_single_other_type {
                return None;
            }
            // The callback names the type here
            return Some(match opt.kind() {
                OptKind::Single => format!("(1 {})", other_name(opt)),
                OptKind::OptionalSingle => format!("(optional {})", other_name(opt)),
                _ => format!("({})", counted(&other_name(opt), opt, settings)),
            });
        }
        vt => vt.name(),
    };

    Some(match opt.kind() {
        OptKind::Single => format!("(1 {})", type_name),
        OptKind::OptionalSingle => format!("(optional {})", type_name),
        _ => format!("({})", counted(type_name, opt, settings)),
    })
}

fn other_name(opt: &Opt) -> String {
    // Validation guarantees a callback is present for other-typed options
    match opt.other() {
        Some(other) => other.type_name().to_owned(),
        None => "other".to_owned(),
    }
}

/// "2 ints", "1 or more sizes", "any number of strings"
fn counted(type_name: &str, opt: &Opt, settings: &Settings) -> String {
    let plural = pluralize(type_name, settings.pluralize_other_y);
    match (opt.min(), opt.max()) {
        (min, Some(max)) if min == max => format!("{} {}", min, plural),
        (0, None) => format!("any number of {}", plural),
        (min, None) => format!("{} or more {}", min, plural),
        (min, Some(max)) => format!("{} to {} {}", min, max, plural),
    }
}

fn pluralize(name: &str, clever_y: bool) -> String {
    if clever_y && name.len() > 1 && name.ends_with('y') {
        let stem = &name[..name.len() - 1];
        let before = stem.chars().last().unwrap_or('y');
        if !"aeiou".contains(before) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", name)
}

/// The `default: "…"` clause, unless elided
fn default_clause(opt: &Opt, settings: &Settings) -> Option<String> {
    let default = opt.default()?;
    let single = matches!(opt.kind(), OptKind::Single | OptKind::OptionalSingle);

    match opt.value_type() {
        ValueType::String => {
            let empty = default.trim().is_empty();
            if empty && single && settings.elide_single_empty_string_default {
                return None;
            }
            if empty && !single && settings.elide_multiple_empty_string_default {
                return None;
            }
        }
        ValueType::Float | ValueType::Double => {
            if all_non_finite(default) {
                if single && settings.elide_single_non_existent_float_default {
                    return None;
                }
                if !single && settings.elide_multiple_non_existent_float_default {
                    return None;
                }
            }
        }
        ValueType::Other => {
            if single && settings.elide_single_other_default {
                return None;
            }
        }
        _ => {}
    }

    Some(format!("default: \"{}\"", default))
}

/// Whether every whitespace-separated piece of the default reads as a non-finite float
fn all_non_finite(default: &str) -> bool {
    let mut any = false;
    for piece in default.split_whitespace() {
        match piece.parse::<f64>() {
            Ok(v) if !v.is_finite() => any = true,
            _ => return false,
        }
    }
    any
}
