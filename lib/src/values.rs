// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Typed value components
//!
//! Once the extractors have distributed tokens to each option's private
//! [`ArgVec`](../arguments/struct.ArgVec.html), the value setter in this module parses them into
//! typed storage according to the option's declared type and shape.
//!
//! The ten scalar primitive types implement the [`Scalar`] trait (parse-from-token plus the
//! inversion used by bare invocations of optional-single-parameter options). Strings, single
//! characters, named enumerations ([`EnumDef`]) and the user-extensible [`OtherType`] round out
//! the fourteen supported types.
//!
//! Parsed results are owned by the registry in a [`Values`] sum per option; releasing them (or
//! dropping the registry) drops every owned allocation, other-type payloads included, in reverse
//! order.
//!
//! [`Scalar`]: trait.Scalar.html
//! [`EnumDef`]: struct.EnumDef.html
//! [`OtherType`]: trait.OtherType.html
//! [`Values`]: enum.Values.html

use std::any::Any;
use std::fmt;
use log::trace;
use crate::acquire::acquire_default;
use crate::arguments::ArgVec;
use crate::errors::{Error, Stop};
use crate::options::{Opt, OptKind, Registry, ValueType};
use crate::parser::Settings;

/// A user-extensible value type
///
/// Implementations parse one token into an owned value; dropping the returned box is the
/// "destroy" half of the contract, so a type needing teardown simply implements `Drop`.
pub trait OtherType {
    /// Name used in glossary type annotations, e.g. `"range"`
    fn type_name(&self) -> &str;

    /// Parse one token into an owned value
    ///
    /// A returned `Err` message is surfaced to the user verbatim, prefixed with the option and
    /// token context.
    fn parse(&self, token: &str) -> Result<Box<dyn Any>, String>;
}

/// A named enumeration: string labels mapping to integer values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    name: String,
    entries: Vec<(String, i32)>,
}

impl EnumDef {
    pub fn new(name: &str, entries: &[(&str, i32)]) -> Self {
        Self {
            name: name.to_owned(),
            entries: entries.iter().map(|(s, v)| ((*s).to_owned(), *v)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look a label up, yielding its value
    pub fn lookup(&self, token: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|(label, _)| label == token)
            .map(|(_, v)| *v)
    }

    /// The declared labels, in declaration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

/// A scalar primitive value type
///
/// Implemented for `bool` and the nine numeric primitives. `parse_token` is locale-independent;
/// `inverted` is the mapping applied when an optional-single-parameter option is invoked bare
/// (booleans negate; numerics map zero to one and non-zero to zero).
pub trait Scalar: Copy + 'static {
    /// The corresponding registry type tag
    const VTYPE: ValueType;

    fn parse_token(token: &str) -> Option<Self>;

    fn inverted(self) -> Self;

    #[doc(hidden)]
    fn wrap(values: Vec<Self>) -> Values;

    #[doc(hidden)]
    fn slice(values: &Values) -> Option<&[Self]>;
}

macro_rules! impl_scalar {
    ( $t:ty, $vtype:ident, $variant:ident ) => {
        impl Scalar for $t {
            const VTYPE: ValueType = ValueType::$vtype;

            #[inline]
            fn parse_token(token: &str) -> Option<Self> {
                token.parse::<$t>().ok()
            }

            #[inline]
            fn inverted(self) -> Self {
                match self == (0 as $t) {
                    true => 1 as $t,
                    false => 0 as $t,
                }
            }

            fn wrap(values: Vec<Self>) -> Values {
                Values::$variant(values)
            }

            fn slice(values: &Values) -> Option<&[Self]> {
                match values {
                    Values::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

impl_scalar!(i16, Short, Shorts);
impl_scalar!(u16, UShort, UShorts);
impl_scalar!(i32, Int, Ints);
impl_scalar!(u32, UInt, UInts);
impl_scalar!(i64, Long, Longs);
impl_scalar!(u64, ULong, ULongs);
impl_scalar!(usize, Size, Sizes);
impl_scalar!(f32, Float, Floats);
impl_scalar!(f64, Double, Doubles);

impl Scalar for bool {
    const VTYPE: ValueType = ValueType::Bool;

    fn parse_token(token: &str) -> Option<Self> {
        parse_bool(token)
    }

    #[inline]
    fn inverted(self) -> Self {
        !self
    }

    fn wrap(values: Vec<Self>) -> Values {
        Values::Bools(values)
    }

    fn slice(values: &Values) -> Option<&[Self]> {
        match values {
            Values::Bools(v) => Some(v),
            _ => None,
        }
    }
}

/// The boolean truth-word table (case-insensitive)
pub(crate) fn parse_bool(token: &str) -> Option<bool> {
    const TRUE_WORDS: &[&str] = &["true", "yes", "on", "1"];
    const FALSE_WORDS: &[&str] = &["false", "no", "off", "0"];
    if TRUE_WORDS.iter().any(|w| token.eq_ignore_ascii_case(w)) {
        return Some(true);
    }
    if FALSE_WORDS.iter().any(|w| token.eq_ignore_ascii_case(w)) {
        return Some(false);
    }
    None
}

/// Parsed results for one option
///
/// `Unset` until a parse succeeds (and again after release). Stand-alone flags store whether the
/// flag was seen; every parametric shape stores a `Vec` in parameter order.
pub enum Values {
    Unset,
    Flag(bool),
    Bools(Vec<bool>),
    Shorts(Vec<i16>),
    UShorts(Vec<u16>),
    Ints(Vec<i32>),
    UInts(Vec<u32>),
    Longs(Vec<i64>),
    ULongs(Vec<u64>),
    Sizes(Vec<usize>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    Chars(Vec<char>),
    Strings(Vec<String>),
    Enums(Vec<i32>),
    Others(Vec<Box<dyn Any>>),
}

impl Default for Values {
    fn default() -> Self {
        Values::Unset
    }
}

impl Values {
    pub fn is_set(&self) -> bool {
        !matches!(self, Values::Unset)
    }

    /// Number of parsed parameter values (zero for `Unset` and for stand-alone flags)
    pub fn count(&self) -> usize {
        match self {
            Values::Unset | Values::Flag(_) => 0,
            Values::Bools(v) => v.len(),
            Values::Shorts(v) => v.len(),
            Values::UShorts(v) => v.len(),
            Values::Ints(v) => v.len(),
            Values::UInts(v) => v.len(),
            Values::Longs(v) => v.len(),
            Values::ULongs(v) => v.len(),
            Values::Sizes(v) => v.len(),
            Values::Floats(v) => v.len(),
            Values::Doubles(v) => v.len(),
            Values::Chars(v) => v.len(),
            Values::Strings(v) => v.len(),
            Values::Enums(v) => v.len(),
            Values::Others(v) => v.len(),
        }
    }

    /// Drop everything held, in reverse insertion order, leaving `Unset`
    pub(crate) fn release(&mut self) {
        if let Values::Others(v) = self {
            while v.pop().is_some() {}
        }
        *self = Values::Unset;
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Values::Unset => f.write_str("Unset"),
            Values::Flag(b) => write!(f, "Flag({})", b),
            Values::Bools(v) => write!(f, "Bools({:?})", v),
            Values::Shorts(v) => write!(f, "Shorts({:?})", v),
            Values::UShorts(v) => write!(f, "UShorts({:?})", v),
            Values::Ints(v) => write!(f, "Ints({:?})", v),
            Values::UInts(v) => write!(f, "UInts({:?})", v),
            Values::Longs(v) => write!(f, "Longs({:?})", v),
            Values::ULongs(v) => write!(f, "ULongs({:?})", v),
            Values::Sizes(v) => write!(f, "Sizes({:?})", v),
            Values::Floats(v) => write!(f, "Floats({:?})", v),
            Values::Doubles(v) => write!(f, "Doubles({:?})", v),
            Values::Chars(v) => write!(f, "Chars({:?})", v),
            Values::Strings(v) => write!(f, "Strings({:?})", v),
            Values::Enums(v) => write!(f, "Enums({:?})", v),
            Values::Others(v) => write!(f, "Others(<{} value(s)>)", v.len()),
        }
    }
}

/// The value-setting pass: parse every option's private tokens into its typed storage
///
/// On any failure, everything parsed so far is released before the error is returned, so the
/// registry is left safely releasable. Failures for options whose tokens came from a default are
/// wrapped as default-parse failures.
pub(crate) fn set_values(reg: &mut Registry, settings: &Settings) -> Result<(), Error> {
    for index in 0..reg.len() {
        let built = build_values(reg.opt(index), settings);
        match built {
            Ok(values) => {
                trace!("option {} values set: {:?}", index, values);
                *reg.values_mut(index) = values;
            }
            Err(e) => {
                let opt = reg.opt(index);
                let wrapped = match opt.source().is_user() || matches!(e, Error::DefaultParseFailure { .. }) {
                    true => e,
                    false => e.into_default_failure(&opt.label()),
                };
                reg.release_parsed_values();
                return Err(wrapped);
            }
        }
    }
    Ok(())
}

fn build_values(opt: &Opt, settings: &Settings) -> Result<Values, Error> {
    let label = opt.label();
    match opt.kind() {
        OptKind::Flag => Ok(Values::Flag(opt.source().is_user())),
        OptKind::OptionalSingle if opt.tokens().is_empty() && opt.source().is_user() => {
            // Invoked bare: the default supplies the value, numerically inverted. The default
            // must tokenize to exactly one token, the same bound the default processor enforces
            // for an uninvoked option.
            let default = match opt.default() {
                Some(d) => d,
                None => return Err(Error::MissingRequiredOption(label)),
            };
            let toks = acquire_default(default, settings)
                .map_err(|e| e.into_default_failure(&label))?;
            if toks.len() > 1 {
                let surplus = toks.get(1).map(|a| a.text().to_owned()).unwrap_or_default();
                return Err(Error::UnexpectedArgument(surplus).into_default_failure(&label));
            }
            let token = match toks.get(0) {
                Some(arg) => arg.text().to_owned(),
                None => {
                    let err = Error::MissingParameters {
                        option: label.clone(),
                        need: 1,
                        got: 0,
                        stopped: Stop::EndOfInput,
                    };
                    return Err(err.into_default_failure(&label));
                }
            };
            parse_inverted(opt.value_type(), &label, &token)
                .map_err(|e| e.into_default_failure(&label))
        }
        _ => parse_tokens(opt, &label),
    }
}

fn parse_tokens(opt: &Opt, label: &str) -> Result<Values, Error> {
    let toks = opt.tokens();
    match opt.value_type() {
        ValueType::Bool => parse_scalar_vec::<bool>(label, toks),
        ValueType::Short => parse_scalar_vec::<i16>(label, toks),
        ValueType::UShort => parse_scalar_vec::<u16>(label, toks),
        ValueType::Int => parse_scalar_vec::<i32>(label, toks),
        ValueType::UInt => parse_scalar_vec::<u32>(label, toks),
        ValueType::Long => parse_scalar_vec::<i64>(label, toks),
        ValueType::ULong => parse_scalar_vec::<u64>(label, toks),
        ValueType::Size => parse_scalar_vec::<usize>(label, toks),
        ValueType::Float => parse_scalar_vec::<f32>(label, toks),
        ValueType::Double => parse_scalar_vec::<f64>(label, toks),
        ValueType::Char => {
            let mut v = Vec::with_capacity(toks.len());
            for t in toks {
                let mut chars = t.text().chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => v.push(c),
                    _ => {
                        return Err(Error::CharLength {
                            option: label.to_owned(),
                            token: t.text().to_owned(),
                        });
                    }
                }
            }
            Ok(Values::Chars(v))
        }
        ValueType::String => Ok(Values::Strings(
            toks.iter().map(|t| t.text().to_owned()).collect(),
        )),
        ValueType::Enum => {
            let def = match opt.enum_def() {
                Some(d) => d,
                None => return Err(Error::MissingRequiredOption(label.to_owned())),
            };
            let mut v = Vec::with_capacity(toks.len());
            for t in toks {
                match def.lookup(t.text()) {
                    Some(value) => v.push(value),
                    None => {
                        return Err(Error::EnumMismatch {
                            option: label.to_owned(),
                            token: t.text().to_owned(),
                            enum_name: def.name().to_owned(),
                        });
                    }
                }
            }
            Ok(Values::Enums(v))
        }
        ValueType::Other => {
            let cb = match opt.other() {
                Some(cb) => cb,
                None => return Err(Error::MissingRequiredOption(label.to_owned())),
            };
            let mut v: Vec<Box<dyn Any>> = Vec::with_capacity(toks.len());
            for t in toks {
                match cb.parse(t.text()) {
                    Ok(value) => v.push(value),
                    Err(message) => {
                        // Values already in `v` are dropped here, newest first
                        while v.pop().is_some() {}
                        return Err(Error::CallbackFailure {
                            option: label.to_owned(),
                            token: t.text().to_owned(),
                            message,
                        });
                    }
                }
            }
            Ok(Values::Others(v))
        }
    }
}

fn parse_scalar_vec<T: Scalar>(label: &str, toks: &ArgVec) -> Result<Values, Error> {
    let mut v = Vec::with_capacity(toks.len());
    for t in toks {
        match T::parse_token(t.text()) {
            Some(value) => v.push(value),
            None => {
                return Err(Error::ParseTypeMismatch {
                    option: label.to_owned(),
                    token: t.text().to_owned(),
                    want: T::VTYPE.name(),
                });
            }
        }
    }
    Ok(T::wrap(v))
}

/// Parse a single default token and invert it (bare invocation of an optional parameter)
fn parse_inverted(vtype: ValueType, label: &str, token: &str) -> Result<Values, Error> {
    fn one<T: Scalar>(label: &str, token: &str) -> Result<Values, Error> {
        match T::parse_token(token) {
            Some(v) => Ok(T::wrap(vec![v.inverted()])),
            None => Err(Error::ParseTypeMismatch {
                option: label.to_owned(),
                token: token.to_owned(),
                want: T::VTYPE.name(),
            }),
        }
    }
    match vtype {
        ValueType::Bool => one::<bool>(label, token),
        ValueType::Short => one::<i16>(label, token),
        ValueType::UShort => one::<u16>(label, token),
        ValueType::Int => one::<i32>(label, token),
        ValueType::UInt => one::<u32>(label, token),
        ValueType::Long => one::<i64>(label, token),
        ValueType::ULong => one::<u64>(label, token),
        ValueType::Size => one::<usize>(label, token),
        ValueType::Float => one::<f32>(label, token),
        ValueType::Double => one::<f64>(label, token),
        // Validation restricts optional-single-parameter options to scalar types
        _ => Err(Error::ParseTypeMismatch {
            option: label.to_owned(),
            token: token.to_owned(),
            want: vtype.name(),
        }),
    }
}
