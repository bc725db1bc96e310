// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Usage and glossary generation

mod common;

use std::any::Any;
use hest::options::Registry;
use hest::parser::Settings;
use hest::usage::{write_glossary, write_usage};
use hest::values::{EnumDef, OtherType};

struct Berry;

impl OtherType for Berry {
    fn type_name(&self) -> &str {
        "berry"
    }

    fn parse(&self, token: &str) -> Result<Box<dyn Any>, String> {
        Ok(Box::new(token.to_owned()))
    }
}

fn showcase() -> Registry {
    let mut reg = Registry::new();
    reg.add_flag("q,quiet", "say nothing at all").unwrap();
    reg.add_single::<i32>(Some("v"), "level", Some("0"), "verbosity level, higher means chattier")
        .unwrap();
    reg.add_multi::<u32>(Some("s,size"), "sx sy", 2, None, "output size in pixels, horizontal then vertical")
        .unwrap();
    reg.add_variadic::<f64>(Some("k"), "kernel", 1, None, None, "kernel weights, as many as needed")
        .unwrap();
    reg.add_single_string(None, "input", None, "input file to read, described at some length so that the paragraph has to wrap")
        .unwrap();
    reg.add_variadic_string(None, "outputs", 0, None, None, "remaining output files")
        .unwrap();
    reg
}

fn usage_of(reg: &Registry, settings: &Settings) -> String {
    let mut buf = Vec::new();
    write_usage(&mut buf, reg, "showcase", settings).unwrap();
    String::from_utf8(buf).unwrap()
}

fn glossary_of(reg: &Registry, settings: &Settings) -> String {
    let mut buf = Vec::new();
    write_glossary(&mut buf, reg, settings).unwrap();
    String::from_utf8(buf).unwrap()
}

/// The usage line names every option in registry order, bracketing the omittable ones
#[test]
fn usage_shape() {
    let usage = usage_of(&showcase(), &Settings::default());
    let flat = usage.replace('\n', " ");
    assert!(flat.starts_with("showcase "));
    assert!(flat.contains("[-q]"), "{}", flat);
    assert!(flat.contains("[-v <level>]"), "{}", flat);
    assert!(flat.contains("-s <sx sy>"), "{}", flat);
    assert!(!flat.contains("[-s"), "{}", flat);
    assert!(flat.contains("-k <kernel> ..."), "{}", flat);
    assert!(flat.contains("<input>"), "{}", flat);
    assert!(flat.contains("[<outputs> ...]"), "{}", flat);
    // Registry order is preserved
    let q = flat.find("[-q]").unwrap();
    let i = flat.find("<input>").unwrap();
    assert!(q < i);
}

/// Wrapped output respects the configured column count
#[test]
fn wrap_width_bound() {
    for columns in &[40usize, 60, 100] {
        let mut settings = Settings::default();
        settings.set_columns(*columns);
        for line in usage_of(&showcase(), &settings).lines() {
            assert!(line.chars().count() <= columns + 1, "{:?} at {}", line, columns);
        }
        for line in glossary_of(&showcase(), &settings).lines() {
            assert!(line.chars().count() <= columns + 1, "{:?} at {}", line, columns);
        }
    }
}

/// Glossary paragraphs carry the info text, a type/arity annotation and the default clause
#[test]
fn glossary_content() {
    let glossary = glossary_of(&showcase(), &Settings::default());
    assert!(glossary.contains("-q, --quiet"), "{}", glossary);
    assert!(glossary.contains("say nothing at all"), "{}", glossary);
    assert!(glossary.contains("(1 int)"), "{}", glossary);
    assert!(glossary.contains("default: \"0\""), "{}", glossary);
    assert!(glossary.contains("(2 uints)"), "{}", glossary);
    assert!(glossary.contains("(1 or more doubles)"), "{}", glossary);
    assert!(glossary.contains("(any number of strings)"), "{}", glossary);
}

/// Enum glossary entries list the possible labels; the single-enum type can be elided
#[test]
fn enum_glossary() {
    let mut reg = Registry::new();
    reg.add_single_enum(
        Some("c"),
        "colour",
        Some("red"),
        "pen colour",
        EnumDef::new("colour", &[("red", 1), ("green", 2), ("blue", 3)]),
    )
    .unwrap();

    let glossary = glossary_of(&reg, &Settings::default());
    assert!(glossary.contains("(1 colour: red, green, blue)"), "{}", glossary);

    let mut elided = Settings::default();
    elided.elide_single_enum_type = true;
    let glossary = glossary_of(&reg, &elided);
    assert!(!glossary.contains("colour:"), "{}", glossary);
    assert!(glossary.contains("default: \"red\""), "{}", glossary);
}

/// Non-finite float defaults and empty string defaults can be elided
#[test]
fn default_elisions() {
    let mut reg = Registry::new();
    reg.add_single::<f64>(Some("f"), "f", Some("nan"), "possibly non-existent").unwrap();
    reg.add_single_string(Some("w"), "who", Some(""), "a name").unwrap();

    let plain = glossary_of(&reg, &Settings::default());
    assert!(plain.contains("default: \"nan\""), "{}", plain);

    let mut elided = Settings::default();
    elided.elide_single_non_existent_float_default = true;
    elided.elide_single_empty_string_default = true;
    let glossary = glossary_of(&reg, &elided);
    assert!(!glossary.contains("default: \"nan\""), "{}", glossary);
    assert!(!glossary.contains("default: \"\""), "{}", glossary);
}

/// Other-type names pluralize, with the `y` to `ies` rule when configured
#[test]
fn other_pluralization() {
    let mut reg = Registry::new();
    reg.add_variadic_other(Some("b"), "berries", 2, None, None, "some berries", Box::new(Berry))
        .unwrap();

    let plain = glossary_of(&reg, &Settings::default());
    assert!(plain.contains("(2 or more berrys)"), "{}", plain);

    let mut clever = Settings::default();
    clever.pluralize_other_y = true;
    let glossary = glossary_of(&reg, &clever);
    assert!(glossary.contains("(2 or more berries)"), "{}", glossary);
}

/// The other-type annotation and default can be elided for single-valued options
#[test]
fn other_elisions() {
    let mut reg = Registry::new();
    reg.add_single_other(Some("b"), "berry", Some("x"), "one berry", Box::new(Berry))
        .unwrap();

    let plain = glossary_of(&reg, &Settings::default());
    assert!(plain.contains("(1 berry)"), "{}", plain);
    assert!(plain.contains("default: \"x\""), "{}", plain);

    let mut elided = Settings::default();
    elided.elide_single_other_type = true;
    elided.elide_single_other_default = true;
    let glossary = glossary_of(&reg, &elided);
    assert!(!glossary.contains("(1 berry)"), "{}", glossary);
    assert!(!glossary.contains("default:"), "{}", glossary);
}
