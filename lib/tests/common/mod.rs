// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Shared stuff

use hest::options::Registry;
use hest::parser::Parser;

/// Path of a test fixture, anchored at the package root via `CARGO_MANIFEST_DIR` so that test
/// code does not depend on the working directory. (`@` references *inside* fixture files stay
/// relative, as they would be in real use, and resolve against the test runner's working
/// directory, which is the package root.)
#[allow(dead_code)]
pub fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// A parser with default settings
#[allow(dead_code)]
pub fn parser() -> Parser {
    Parser::new()
}

/// A parser that honours `--help`
#[allow(dead_code)]
pub fn parser_with_help() -> Parser {
    let mut p = Parser::new();
    p.settings().set_respect_help(true);
    p
}

/// The base registry used by several suites: `-v` int (default 0), `-s` 2x int (default
/// "16 16"), and a `-q` flag. Returns the registry and the three option indices.
#[allow(dead_code)]
pub fn base_registry() -> (Registry, usize, usize, usize) {
    let mut reg = Registry::new();
    let v = reg
        .add_single::<i32>(Some("v"), "level", Some("0"), "verbosity level")
        .unwrap();
    let s = reg
        .add_multi::<i32>(Some("s"), "sx sy", 2, Some("16 16"), "size")
        .unwrap();
    let q = reg.add_flag("q", "be quiet").unwrap();
    (reg, v, s, q)
}
