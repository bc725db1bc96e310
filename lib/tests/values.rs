// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Typed value setting: per-type parsing, ownership and release semantics

mod common;

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use assert_matches::assert_matches;
use hest::errors::Error;
use hest::options::Registry;
use hest::values::{EnumDef, OtherType};
use common::parser;

/// Booleans parse through the truth-word table, case-insensitively
#[test]
fn bool_words() {
    let mut reg = Registry::new();
    let b = reg
        .add_variadic::<bool>(Some("b"), "flags", 1, None, None, "some booleans")
        .unwrap();
    parser()
        .parse(&mut reg, &["-b", "yes", "Off", "TRUE", "0"])
        .unwrap();
    assert_eq!(reg.scalars::<bool>(b), &[true, false, true, false]);

    let mut reg = Registry::new();
    reg.add_single::<bool>(Some("b"), "flag", None, "a boolean").unwrap();
    let e = parser().parse(&mut reg, &["-b", "maybe"]).unwrap_err();
    assert_matches!(e, Error::ParseTypeMismatch { want: "bool", token, .. } => {
        assert_eq!(token, "maybe");
    });
}

/// Integer overflow is a parse failure, not a wrap
#[test]
fn integer_overflow() {
    let mut reg = Registry::new();
    reg.add_single::<i16>(Some("n"), "n", None, "a small number").unwrap();
    let e = parser().parse(&mut reg, &["-n", "40000"]).unwrap_err();
    assert_matches!(e, Error::ParseTypeMismatch { want: "short", .. });
}

/// Floats admit infinities and NaN
#[test]
fn float_specials() {
    let mut reg = Registry::new();
    let f = reg
        .add_multi::<f32>(Some("f"), "a b c", 3, None, "three floats")
        .unwrap();
    parser().parse(&mut reg, &["-f", "inf", "-inf", "nan"]).unwrap();
    let vals = reg.scalars::<f32>(f);
    assert_eq!(vals[0], f32::INFINITY);
    assert_eq!(vals[1], f32::NEG_INFINITY);
    assert!(vals[2].is_nan());
}

/// A char token must be exactly one character
#[test]
fn char_length() {
    let mut reg = Registry::new();
    let c = reg.add_single_char(Some("c"), "sep", None, "separator").unwrap();
    parser().parse(&mut reg, &["-c", ";"]).unwrap();
    assert_eq!(reg.chars(c), &[';']);

    let mut reg = Registry::new();
    reg.add_single_char(Some("c"), "sep", None, "separator").unwrap();
    let e = parser().parse(&mut reg, &["-c", "ab"]).unwrap_err();
    assert_matches!(e, Error::CharLength { token, .. } => assert_eq!(token, "ab"));
}

fn colour() -> EnumDef {
    EnumDef::new("colour", &[("red", 1), ("green", 2), ("blue", 3)])
}

/// Enum lookups map labels to their declared values; misses name the enum
#[test]
fn enum_lookup() {
    let mut reg = Registry::new();
    let c = reg
        .add_variadic_enum(Some("c"), "colours", 1, None, None, "some colours", colour())
        .unwrap();
    parser().parse(&mut reg, &["-c", "blue", "red"]).unwrap();
    assert_eq!(reg.enums(c), &[3, 1]);

    let mut reg = Registry::new();
    reg.add_single_enum(Some("c"), "colour", None, "a colour", colour())
        .unwrap();
    let e = parser().parse(&mut reg, &["-c", "mauve"]).unwrap_err();
    assert_matches!(e, Error::EnumMismatch { token, enum_name, .. } => {
        assert_eq!(token, "mauve");
        assert_eq!(enum_name, "colour");
    });
}

/// A counter-based probe type for observing other-value teardown
struct Probe {
    drops: Arc<AtomicUsize>,
    value: u32,
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

struct ProbeParser {
    drops: Arc<AtomicUsize>,
}

impl OtherType for ProbeParser {
    fn type_name(&self) -> &str {
        "probe"
    }

    fn parse(&self, token: &str) -> Result<Box<dyn Any>, String> {
        let value: u32 = token
            .parse()
            .map_err(|_| format!("\"{}\" is not a probe", token))?;
        Ok(Box::new(Probe {
            drops: Arc::clone(&self.drops),
            value,
        }))
    }
}

/// Other-typed values are owned by the registry and downcastable
#[test]
fn other_parse_and_downcast() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut reg = Registry::new();
    let p = reg
        .add_variadic_other(
            Some("p"),
            "probes",
            1,
            None,
            None,
            "some probes",
            Box::new(ProbeParser { drops: Arc::clone(&drops) }),
        )
        .unwrap();
    parser().parse(&mut reg, &["-p", "10", "20"]).unwrap();
    let values: Vec<u32> = reg
        .others(p)
        .iter()
        .filter_map(|v| v.downcast_ref::<Probe>())
        .map(|p| p.value)
        .collect();
    assert_eq!(values, &[10, 20]);
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    reg.release_parsed_values();
    assert_eq!(drops.load(Ordering::SeqCst), 2);
    assert!(reg.others(p).is_empty());
}

/// A failing callback surfaces its message; values parsed before it are dropped
#[test]
fn other_callback_failure() {
    let drops = Arc::new(AtomicUsize::new(0));
    let mut reg = Registry::new();
    reg.add_variadic_other(
        Some("p"),
        "probes",
        1,
        None,
        None,
        "some probes",
        Box::new(ProbeParser { drops: Arc::clone(&drops) }),
    )
    .unwrap();
    let e = parser().parse(&mut reg, &["-p", "10", "bogus"]).unwrap_err();
    assert_matches!(e, Error::CallbackFailure { token, message, .. } => {
        assert_eq!(token, "bogus");
        assert_eq!(message, "\"bogus\" is not a probe");
    });
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

/// Dropping the registry releases other-typed values too
#[test]
fn drop_releases() {
    let drops = Arc::new(AtomicUsize::new(0));
    {
        let mut reg = Registry::new();
        reg.add_single_other(
            Some("p"),
            "probe",
            None,
            "a probe",
            Box::new(ProbeParser { drops: Arc::clone(&drops) }),
        )
        .unwrap();
        parser().parse(&mut reg, &["-p", "10"]).unwrap();
        assert_eq!(drops.load(Ordering::SeqCst), 0);
    }
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

/// A failed parse releases everything already parsed; the registry reads as unset
#[test]
fn failure_releases_earlier_values() {
    let mut reg = Registry::new();
    let w = reg
        .add_single_string(Some("w"), "who", None, "a name")
        .unwrap();
    let n = reg.add_single::<i32>(Some("n"), "n", None, "a number").unwrap();
    let e = parser().parse(&mut reg, &["-w", "hello", "-n", "zzz"]).unwrap_err();
    assert_matches!(e, Error::ParseTypeMismatch { .. });
    assert!(reg.strings(w).is_empty());
    assert!(!reg.opt(w).values().is_set());
    assert!(!reg.opt(n).values().is_set());
    // Releasing again is harmless
    reg.release_parsed_values();
}

/// Values parse in token order into their slots
#[test]
fn value_order() {
    let mut reg = Registry::new();
    let s = reg
        .add_multi::<u64>(Some("s"), "a b c", 3, None, "three values")
        .unwrap();
    parser().parse(&mut reg, &["-s", "3", "1", "2"]).unwrap();
    assert_eq!(reg.scalars::<u64>(s), &[3, 1, 2]);
}
