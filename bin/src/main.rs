//! Test program for the `hest` library
//!
//! This test program takes user supplied command args, parses them with the library against an
//! example registry exercising every option kind, and outputs a description of the typed values
//! and their provenance.
//!
//! Try, for instance:
//!
//! ```text
//! hest-playground in.txt 1 2 3 -s 100 200 -q --format png
//! hest-playground --help
//! hest-playground @params.txt
//! ```

// Copyright 2026 The hest developers
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

use std::any::Any;
use hest::options::Registry;
use hest::parser::Parser;
use hest::values::{EnumDef, OtherType};

/// An example user-extensible value type: a `lo:hi` integer range
#[derive(Debug, PartialEq, Eq)]
struct Range {
    lo: i64,
    hi: i64,
}

struct RangeParser;

impl OtherType for RangeParser {
    fn type_name(&self) -> &str {
        "range"
    }

    fn parse(&self, token: &str) -> Result<Box<dyn Any>, String> {
        let mut pieces = token.splitn(2, ':');
        let lo = pieces.next().unwrap_or("");
        let hi = pieces.next().ok_or_else(|| "expected \"lo:hi\"".to_owned())?;
        let lo: i64 = lo.parse().map_err(|_| format!("bad low bound \"{}\"", lo))?;
        let hi: i64 = hi.parse().map_err(|_| format!("bad high bound \"{}\"", hi))?;
        match lo <= hi {
            true => Ok(Box::new(Range { lo, hi })),
            false => Err("low bound exceeds high bound".to_owned()),
        }
    }
}

fn main() {
    env_logger::init();

    let mut reg = Registry::new();
    let quiet = reg.add_flag("q,quiet", "say nothing at all").unwrap();
    let verbose = reg
        .add_optional::<i32>("v,verbose", "level", "0", "verbosity level; bare -v flips it")
        .unwrap();
    let size = reg
        .add_multi::<u32>(Some("s,size"), "sx sy", 2, Some("16 16"), "output size")
        .unwrap();
    let gamma = reg
        .add_single::<f64>(Some("g,gamma"), "gamma", Some("nan"), "gamma correction")
        .unwrap();
    let sep = reg
        .add_single_char(Some("c"), "sep", Some(","), "field separator")
        .unwrap();
    let format = reg
        .add_single_enum(
            Some("f,format"),
            "format",
            Some("png"),
            "output format",
            EnumDef::new("format", &[("png", 0), ("ppm", 1), ("txt", 2)]),
        )
        .unwrap();
    let window = reg
        .add_single_other(
            Some("w,window"),
            "lo:hi",
            Some("0:100"),
            "value window",
            Box::new(RangeParser),
        )
        .unwrap();
    let input = reg
        .add_single_string(None, "input", None, "input file")
        .unwrap();
    let rest = reg
        .add_variadic::<f64>(None, "rest", 0, None, None, "trailing values")
        .unwrap();

    let mut parser = Parser::new();
    parser
        .settings()
        .set_respect_help(true)
        .set_verbosity(1)
        .detect_columns();

    let args: Vec<String> = std::env::args().skip(1).collect();
    parser.parse_or_exit(&mut reg, &args, "hest-playground");

    println!("[ parsed values ]");
    println!("quiet   = {:?} ({})", reg.flag_seen(quiet), reg.source(quiet));
    println!("verbose = {:?} ({})", reg.scalar::<i32>(verbose), reg.source(verbose));
    println!("size    = {:?} ({})", reg.scalars::<u32>(size), reg.source(size));
    println!("gamma   = {:?} ({})", reg.scalar::<f64>(gamma), reg.source(gamma));
    println!("sep     = {:?} ({})", reg.chars(sep), reg.source(sep));
    println!("format  = {:?} ({})", reg.enums(format), reg.source(format));
    let windows: Vec<&Range> = reg
        .others(window)
        .iter()
        .filter_map(|v| v.downcast_ref::<Range>())
        .collect();
    println!("window  = {:?} ({})", windows, reg.source(window));
    println!("input   = {:?} ({})", reg.string(input), reg.source(input));
    println!(
        "rest    = {:?} (count {}, {})",
        reg.scalars::<f64>(rest),
        reg.parsed_count(rest),
        reg.source(rest)
    );
}
