// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Option description components
//!
//! This module contains components to do with describing the *options* "available" within a given
//! program, i.e. those that an argument list will be parsed against: the fourteen value types,
//! the five option shapes derived from a parameter-count range, the flag identifier form, the
//! [`OptSpec`] declaration builder, and the [`Registry`] the parser works against.
//!
//! After a successful parse the registry also holds each option's typed values, retrieved with
//! the typed accessor methods ([`scalars`], [`strings`], [`flag_seen`], …) and released with
//! [`release_parsed_values`].
//!
//! Note, registries must pass [`validate`] before parsing; the parser checks this itself and
//! reports the collected flaws.
//!
//! [`OptSpec`]: struct.OptSpec.html
//! [`Registry`]: struct.Registry.html
//! [`scalars`]: struct.Registry.html#method.scalars
//! [`strings`]: struct.Registry.html#method.strings
//! [`flag_seen`]: struct.Registry.html#method.flag_seen
//! [`release_parsed_values`]: struct.Registry.html#method.release_parsed_values
//! [`validate`]: struct.Registry.html#method.validate

use std::any::Any;
use std::fmt;
use thiserror::Error;
use crate::arguments::{ArgVec, Source};
use crate::parser::Settings;
use crate::values::{EnumDef, OtherType, Scalar, Values};

/// Longest accepted flag part
pub(crate) const MAX_FLAG_LEN: usize = 64;

/// The value types an option can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Size,
    Float,
    Double,
    Char,
    String,
    Enum,
    Other,
}

impl ValueType {
    /// The name used in diagnostics and glossary text
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Short => "short",
            ValueType::UShort => "ushort",
            ValueType::Int => "int",
            ValueType::UInt => "uint",
            ValueType::Long => "long",
            ValueType::ULong => "ulong",
            ValueType::Size => "size",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::Char => "char",
            ValueType::String => "string",
            ValueType::Enum => "enum",
            ValueType::Other => "other",
        }
    }

    /// The scalar types eligible for optional-single-parameter options
    pub(crate) fn is_scalar(self) -> bool {
        !matches!(
            self,
            ValueType::Char | ValueType::String | ValueType::Enum | ValueType::Other
        )
    }
}

/// Shape of an option, derived from its parameter-count range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptKind {
    /// min = max = 0: a stand-alone flag
    Flag,
    /// min = max = 1: a single fixed parameter
    Single,
    /// min = max ≥ 2: multiple fixed parameters
    Multiple,
    /// min = 0, max = 1: a single optional parameter
    OptionalSingle,
    /// min < max (max ≥ 2, possibly unbounded): variadic parameters
    Variadic,
}

pub(crate) fn derive_kind(min: usize, max: Option<usize>) -> Option<OptKind> {
    match (min, max) {
        (0, Some(0)) => Some(OptKind::Flag),
        (1, Some(1)) => Some(OptKind::Single),
        (0, Some(1)) => Some(OptKind::OptionalSingle),
        (m, Some(x)) if m == x => Some(OptKind::Multiple),
        (m, Some(x)) if m < x => Some(OptKind::Variadic),
        (_, None) => Some(OptKind::Variadic),
        _ => None,
    }
}

/// A flag identifier
///
/// Declared as either a single form (`"verbose"`, matched by `-verbose`) or a `,`-separated
/// short/long pair (`"v,verbose"`, matched by `-v`, `--verbose` or `-verbose`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    short: String,
    long: Option<String>,
}

impl Flag {
    pub(crate) fn from_decl(decl: &str) -> Self {
        match decl.find(',') {
            Some(i) => Self {
                short: decl[..i].to_owned(),
                long: Some(decl[i + 1..].to_owned()),
            },
            None => Self {
                short: decl.to_owned(),
                long: None,
            },
        }
    }

    pub fn short(&self) -> &str {
        &self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Does `token` name this flag?
    pub(crate) fn matches(&self, token: &str) -> bool {
        if let Some(rest) = strip_prefix(token, "--") {
            return self.long.as_deref() == Some(rest);
        }
        if let Some(rest) = strip_prefix(token, "-") {
            if rest == self.short {
                return true;
            }
            return self.long.as_deref() == Some(rest);
        }
        false
    }

    /// The shortest dashed rendering, for diagnostics (`-v`)
    pub(crate) fn dashed(&self) -> String {
        format!("-{}", self.short)
    }

    /// Full rendering for glossary text (`-v, --verbose`)
    pub(crate) fn display(&self) -> String {
        match &self.long {
            Some(long) => format!("-{}, --{}", self.short, long),
            None => format!("-{}", self.short),
        }
    }

    fn parts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.short.as_str()).chain(self.long.as_deref())
    }
}

// `str::strip_prefix` in miniature; the dashed prefix must leave something behind
fn strip_prefix<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    match token.starts_with(prefix) && token.len() > prefix.len() {
        true => Some(&token[prefix.len()..]),
        false => None,
    }
}

/// Declaration of one option, to be added to a [`Registry`](struct.Registry.html)
///
/// The shape (kind) is derived from the `(min, max)` range given at construction; `max` of
/// `None` means unbounded. The typed `add_*` helper methods on the registry construct these for
/// the common cases.
pub struct OptSpec {
    vtype: ValueType,
    min: usize,
    max: Option<usize>,
    flag: Option<String>,
    name: Option<String>,
    default: Option<String>,
    info: String,
    enum_def: Option<EnumDef>,
    other: Option<Box<dyn OtherType>>,
}

impl OptSpec {
    pub fn new(vtype: ValueType, min: usize, max: Option<usize>) -> Self {
        Self {
            vtype,
            min,
            max,
            flag: None,
            name: None,
            default: None,
            info: String::new(),
            enum_def: None,
            other: None,
        }
    }

    /// The flag declaration: a single form or a `short,long` pair
    pub fn flag(mut self, decl: &str) -> Self {
        self.flag = Some(decl.to_owned());
        self
    }

    /// The parameter placeholder name used in usage and glossary text
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    /// The default string, tokenized with the same grammar as a response file
    pub fn default(mut self, default: &str) -> Self {
        self.default = Some(default.to_owned());
        self
    }

    /// Descriptive glossary text
    pub fn info(mut self, info: &str) -> Self {
        self.info = info.to_owned();
        self
    }

    /// The enumeration definition (required iff the type is `Enum`)
    pub fn enum_def(mut self, def: EnumDef) -> Self {
        self.enum_def = Some(def);
        self
    }

    /// The parse callback (required iff the type is `Other`)
    pub fn other(mut self, other: Box<dyn OtherType>) -> Self {
        self.other = Some(other);
        self
    }
}

/// One declared option
///
/// Holds the declaration, and after a parse also the private token vector, the provenance of the
/// tokens that filled it, and the typed values parsed from them.
pub struct Opt {
    flag: Option<Flag>,
    name: Option<String>,
    vtype: ValueType,
    kind: OptKind,
    min: usize,
    max: Option<usize>,
    default: Option<String>,
    info: String,
    enum_def: Option<EnumDef>,
    other: Option<Box<dyn OtherType>>,
    // parse-time state
    tokens: ArgVec,
    source: Source,
    values: Values,
}

impl Opt {
    pub fn flag(&self) -> Option<&Flag> {
        self.flag.as_ref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value_type(&self) -> ValueType {
        self.vtype
    }

    pub fn kind(&self) -> OptKind {
        self.kind
    }

    pub fn min(&self) -> usize {
        self.min
    }

    /// `None` means unbounded
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn enum_def(&self) -> Option<&EnumDef> {
        self.enum_def.as_ref()
    }

    pub(crate) fn other(&self) -> Option<&dyn OtherType> {
        self.other.as_deref()
    }

    /// Provenance of the most recent contribution to this option
    pub fn source(&self) -> Source {
        self.source
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub(crate) fn tokens(&self) -> &ArgVec {
        &self.tokens
    }

    pub(crate) fn set_tokens(&mut self, tokens: ArgVec, source: Source) {
        // A repeated flag invocation discards the earlier tokens here
        self.tokens = tokens;
        self.source = source;
    }

    pub(crate) fn set_source(&mut self, source: Source) {
        self.source = source;
    }

    pub(crate) fn is_flagged(&self) -> bool {
        self.flag.is_some()
    }

    /// How the option is named in diagnostics
    pub(crate) fn label(&self) -> String {
        match (&self.flag, &self.name) {
            (Some(flag), _) => flag.dashed(),
            (None, Some(name)) => name.clone(),
            (None, None) => "(unnamed)".to_owned(),
        }
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Opt")
            .field("flag", &self.flag)
            .field("name", &self.name)
            .field("vtype", &self.vtype)
            .field("kind", &self.kind)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("default", &self.default)
            .field("other", &self.other.as_ref().map(|o| o.type_name().to_owned()))
            .field("source", &self.source)
            .field("values", &self.values)
            .finish()
    }
}

/// Description of a validation issue within a [`Registry`](struct.Registry.html)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryFlaw {
    #[error("option {index}: maximum parameter count {max} is less than minimum {min}")]
    ContradictoryCounts { index: usize, min: usize, max: usize },
    #[error("option {index}: parametric option needs a parameter name")]
    MissingName { index: usize },
    #[error("option {index}: a default value is required here")]
    MissingDefault { index: usize },
    #[error("option {index}: a stand-alone flag cannot take a default")]
    FlagWithDefault { index: usize },
    #[error("option {index}: a stand-alone flag cannot have a parameter name")]
    FlagWithName { index: usize },
    #[error("option {index}: a stand-alone flag needs a flag identifier")]
    FlagKindUnflagged { index: usize },
    #[error("option {index}: an optional single parameter must be flagged")]
    OptionalUnflagged { index: usize },
    #[error("option {index}: an optional single parameter must be a scalar type, not {ty}")]
    OptionalNeedsScalar { index: usize, ty: &'static str },
    #[error("option {index}: flag part is empty")]
    FlagEmptyPart { index: usize },
    #[error("option {index}: flag \"{flag}\" contains forbidden character {ch:?}")]
    FlagForbiddenChar {
        index: usize,
        flag: String,
        ch: char,
    },
    #[error("option {index}: flag \"{flag}\" exceeds {max} characters")]
    FlagTooLong {
        index: usize,
        flag: String,
        max: usize,
    },
    #[error("option {index}: long flag \"help\" clashes with --help handling")]
    FlagIsHelp { index: usize },
    #[error("flag \"{flag}\" is declared by both option {first} and option {second}")]
    FlagDuplicated {
        flag: String,
        first: usize,
        second: usize,
    },
    #[error("options {first} and {second} are both unflagged and variadic; at most one may be")]
    MultipleUnflaggedVariadic { first: usize, second: usize },
    #[error("option {index}: enum type without an enum definition")]
    MissingEnumDef { index: usize },
    #[error("option {index}: enum definition given but type is {ty}")]
    UnexpectedEnumDef { index: usize, ty: &'static str },
    #[error("option {index}: other type without a parse callback")]
    MissingCallback { index: usize },
    #[error("option {index}: parse callback given but type is {ty}")]
    UnexpectedCallback { index: usize, ty: &'static str },
}

/// The option registry
///
/// A growable collection of option descriptors, filled by the typed `add_*` methods (each
/// returning the new option's index, used later for value retrieval and provenance queries).
#[derive(Debug, Default)]
pub struct Registry {
    opts: Vec<Opt>,
}

impl Registry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Create with capacity for an expected number of options
    pub fn with_capacity(count_est: usize) -> Self {
        Self {
            opts: Vec::with_capacity(count_est),
        }
    }

    pub fn len(&self) -> usize {
        self.opts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    /// The option at `index`; panics if out of bounds
    pub fn opt(&self, index: usize) -> &Opt {
        &self.opts[index]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opt> {
        self.opts.iter()
    }

    pub(crate) fn opt_mut(&mut self, index: usize) -> &mut Opt {
        &mut self.opts[index]
    }

    pub(crate) fn values_mut(&mut self, index: usize) -> &mut Values {
        &mut self.opts[index].values
    }

    /// Add an option from a full declaration
    ///
    /// Only the min/max contradiction is rejected here (the kind cannot be derived from it);
    /// everything else is caught by [`validate`](#method.validate).
    pub fn add(&mut self, spec: OptSpec) -> Result<usize, RegistryFlaw> {
        let index = self.opts.len();
        let kind = match derive_kind(spec.min, spec.max) {
            Some(kind) => kind,
            None => {
                return Err(RegistryFlaw::ContradictoryCounts {
                    index,
                    min: spec.min,
                    max: spec.max.unwrap_or(0),
                });
            }
        };
        self.opts.push(Opt {
            flag: spec.flag.as_deref().map(Flag::from_decl),
            name: spec.name,
            vtype: spec.vtype,
            kind,
            min: spec.min,
            max: spec.max,
            default: spec.default,
            info: spec.info,
            enum_def: spec.enum_def,
            other: spec.other,
            tokens: ArgVec::new(),
            source: Source::Unknown,
            values: Values::Unset,
        });
        Ok(index)
    }

    /// Add a stand-alone flag
    pub fn add_flag(&mut self, flag: &str, info: &str) -> Result<usize, RegistryFlaw> {
        self.add(OptSpec::new(ValueType::Bool, 0, Some(0)).flag(flag).info(info))
    }

    /// Add a single fixed scalar parameter; `flag` of `None` declares it unflagged
    pub fn add_single<T: Scalar>(
        &mut self,
        flag: Option<&str>,
        name: &str,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(OptSpec::new(T::VTYPE, 1, Some(1)), flag, name, default, info))
    }

    /// Add `count` fixed scalar parameters
    pub fn add_multi<T: Scalar>(
        &mut self,
        flag: Option<&str>,
        name: &str,
        count: usize,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(OptSpec::new(T::VTYPE, count, Some(count)), flag, name, default, info))
    }

    /// Add a single optional scalar parameter (flagged, with a mandatory default)
    pub fn add_optional<T: Scalar>(
        &mut self,
        flag: &str,
        name: &str,
        default: &str,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(
            OptSpec::new(T::VTYPE, 0, Some(1))
                .flag(flag)
                .name(name)
                .default(default)
                .info(info),
        )
    }

    /// Add a variadic scalar parameter run; `max` of `None` is unbounded
    pub fn add_variadic<T: Scalar>(
        &mut self,
        flag: Option<&str>,
        name: &str,
        min: usize,
        max: Option<usize>,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(OptSpec::new(T::VTYPE, min, max), flag, name, default, info))
    }

    pub fn add_single_string(
        &mut self,
        flag: Option<&str>,
        name: &str,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(OptSpec::new(ValueType::String, 1, Some(1)), flag, name, default, info))
    }

    pub fn add_multi_string(
        &mut self,
        flag: Option<&str>,
        name: &str,
        count: usize,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(
            OptSpec::new(ValueType::String, count, Some(count)),
            flag,
            name,
            default,
            info,
        ))
    }

    pub fn add_variadic_string(
        &mut self,
        flag: Option<&str>,
        name: &str,
        min: usize,
        max: Option<usize>,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(OptSpec::new(ValueType::String, min, max), flag, name, default, info))
    }

    pub fn add_single_char(
        &mut self,
        flag: Option<&str>,
        name: &str,
        default: Option<&str>,
        info: &str,
    ) -> Result<usize, RegistryFlaw> {
        self.add(spec_with(OptSpec::new(ValueType::Char, 1, Some(1)), flag, name, default, info))
    }

    pub fn add_single_enum(
        &mut self,
        flag: Option<&str>,
        name: &str,
        default: Option<&str>,
        info: &str,
        def: EnumDef,
    ) -> Result<usize, RegistryFlaw> {
        self.add(
            spec_with(OptSpec::new(ValueType::Enum, 1, Some(1)), flag, name, default, info)
                .enum_def(def),
        )
    }

    pub fn add_variadic_enum(
        &mut self,
        flag: Option<&str>,
        name: &str,
        min: usize,
        max: Option<usize>,
        default: Option<&str>,
        info: &str,
        def: EnumDef,
    ) -> Result<usize, RegistryFlaw> {
        self.add(
            spec_with(OptSpec::new(ValueType::Enum, min, max), flag, name, default, info)
                .enum_def(def),
        )
    }

    pub fn add_single_other(
        &mut self,
        flag: Option<&str>,
        name: &str,
        default: Option<&str>,
        info: &str,
        other: Box<dyn OtherType>,
    ) -> Result<usize, RegistryFlaw> {
        self.add(
            spec_with(OptSpec::new(ValueType::Other, 1, Some(1)), flag, name, default, info)
                .other(other),
        )
    }

    pub fn add_variadic_other(
        &mut self,
        flag: Option<&str>,
        name: &str,
        min: usize,
        max: Option<usize>,
        default: Option<&str>,
        info: &str,
        other: Box<dyn OtherType>,
    ) -> Result<usize, RegistryFlaw> {
        self.add(
            spec_with(OptSpec::new(ValueType::Other, min, max), flag, name, default, info)
                .other(other),
        )
    }

    /// Checks validity of the registry
    ///
    /// Returns `true` if valid. See also the [`validate`](#method.validate) method.
    #[inline]
    pub fn is_valid(&self, settings: &Settings) -> bool {
        validation::validate_registry(self, settings, false).is_ok()
    }

    /// Checks validity of the registry, returning details of any problems
    ///
    /// Some rules depend on parser settings (flags may not contain `{`/`}` when bracketed
    /// comments are enabled; no long flag may be `help` when `--help` is respected), hence the
    /// `settings` parameter.
    #[inline]
    pub fn validate(&self, settings: &Settings) -> Result<(), Vec<RegistryFlaw>> {
        validation::validate_registry(self, settings, true)
    }

    /// Provenance of the option at `index`
    pub fn source(&self, index: usize) -> Source {
        self.opts.get(index).map(|o| o.source).unwrap_or(Source::Unknown)
    }

    /// Number of values actually parsed for the option at `index`
    ///
    /// For a variadic option this is the observed count.
    pub fn parsed_count(&self, index: usize) -> usize {
        self.opts.get(index).map(|o| o.values.count()).unwrap_or(0)
    }

    /// Whether the stand-alone flag at `index` was seen on the command line or in a response file
    pub fn flag_seen(&self, index: usize) -> bool {
        match self.opts.get(index).map(|o| &o.values) {
            Some(Values::Flag(seen)) => *seen,
            _ => false,
        }
    }

    /// The parsed scalar values of the option at `index` (empty if unset or of another type)
    pub fn scalars<T: Scalar>(&self, index: usize) -> &[T] {
        self.opts
            .get(index)
            .and_then(|o| T::slice(&o.values))
            .unwrap_or(&[])
    }

    /// The first parsed scalar value of the option at `index`
    pub fn scalar<T: Scalar>(&self, index: usize) -> Option<T> {
        self.scalars::<T>(index).first().copied()
    }

    pub fn strings(&self, index: usize) -> &[String] {
        match self.opts.get(index).map(|o| &o.values) {
            Some(Values::Strings(v)) => v,
            _ => &[],
        }
    }

    pub fn string(&self, index: usize) -> Option<&str> {
        self.strings(index).first().map(|s| s.as_str())
    }

    pub fn chars(&self, index: usize) -> &[char] {
        match self.opts.get(index).map(|o| &o.values) {
            Some(Values::Chars(v)) => v,
            _ => &[],
        }
    }

    /// The parsed enum values (as the integers from the enum definition)
    pub fn enums(&self, index: usize) -> &[i32] {
        match self.opts.get(index).map(|o| &o.values) {
            Some(Values::Enums(v)) => v,
            _ => &[],
        }
    }

    /// The parsed other-type values; downcast with `Any::downcast_ref`
    pub fn others(&self, index: usize) -> &[Box<dyn Any>] {
        match self.opts.get(index).map(|o| &o.values) {
            Some(Values::Others(v)) => v,
            _ => &[],
        }
    }

    /// Release every parsed value, walking options in reverse registration order
    ///
    /// Safe to call after a failed parse; afterwards every option reads as unset.
    pub fn release_parsed_values(&mut self) {
        for opt in self.opts.iter_mut().rev() {
            opt.values.release();
        }
    }

    /// Clear all parse-time state ahead of a fresh parse
    pub(crate) fn reset_parse_state(&mut self) {
        for opt in self.opts.iter_mut() {
            opt.tokens.clear();
            opt.source = Source::Unknown;
            opt.values.release();
        }
    }

    /// Find the best matching declared flag for an unknown token
    ///
    /// This is intended to be used when an unknown flag is encountered, to give users a hint when
    /// displaying the error to them. I.e.:
    ///
    /// > "Error: unknown flag '-x', did you mean '-y'?"
    ///
    /// Specifically, this uses the `jaro_winkler` algorithm from the `strsim` crate; it filters
    /// out any flags with a metric calculated as less than `0.8`, and returns the dashed form of
    /// the flag with the highest metric.
    #[cfg(feature = "suggestions")]
    pub fn suggest(&self, unknown: &str) -> Option<String> {
        let stripped = unknown.trim_start_matches('-');
        let mut best: Option<(f64, String)> = None;
        for opt in &self.opts {
            let flag = match &opt.flag {
                Some(flag) => flag,
                None => continue,
            };
            for (part, dashes) in std::iter::once((flag.short.as_str(), "-"))
                .chain(flag.long.as_deref().map(|l| (l, "--")))
            {
                let metric = strsim::jaro_winkler(stripped, part);
                if metric >= 0.8 && best.as_ref().map_or(true, |(b, _)| metric > *b) {
                    best = Some((metric, format!("{}{}", dashes, part)));
                }
            }
        }
        best.map(|(_, flag)| flag)
    }
}

fn spec_with(
    spec: OptSpec,
    flag: Option<&str>,
    name: &str,
    default: Option<&str>,
    info: &str,
) -> OptSpec {
    let mut spec = spec.name(name).info(info);
    if let Some(flag) = flag {
        spec = spec.flag(flag);
    }
    if let Some(default) = default {
        spec = spec.default(default);
    }
    spec
}

/// Registry validation
pub(crate) mod validation {
    use super::{OptKind, Registry, RegistryFlaw, ValueType, MAX_FLAG_LEN};
    use crate::parser::Settings;

    /// Checks validity of the registry, optionally returning details of any problems
    ///
    /// If `detail` is `false`, it returns early on encountering a problem (with an empty `Vec`),
    /// useful for quick `is_valid` checks. Otherwise it builds up and provides a complete list of
    /// flaws.
    #[must_use]
    pub fn validate_registry(
        reg: &Registry,
        settings: &Settings,
        detail: bool,
    ) -> Result<(), Vec<RegistryFlaw>> {
        let mut flaws: Vec<RegistryFlaw> = Vec::new();

        for (index, opt) in reg.iter().enumerate() {
            for flaw in option_flaws(index, opt, settings) {
                match detail {
                    true => flaws.push(flaw),
                    false => return Err(flaws),
                }
            }
        }

        let mut found = false;
        find_duplicate_flags(reg, &mut flaws, detail, &mut found);
        if !detail && found {
            return Err(flaws);
        }
        find_surplus_variadics(reg, &mut flaws, detail, &mut found);
        if !detail && found {
            return Err(flaws);
        }

        match flaws.is_empty() {
            true => Ok(()),
            false => Err(flaws),
        }
    }

    fn option_flaws(index: usize, opt: &super::Opt, settings: &Settings) -> Vec<RegistryFlaw> {
        let mut flaws = Vec::new();

        match opt.kind {
            OptKind::Flag => {
                if opt.flag.is_none() {
                    flaws.push(RegistryFlaw::FlagKindUnflagged { index });
                }
                if opt.default.is_some() {
                    flaws.push(RegistryFlaw::FlagWithDefault { index });
                }
                if opt.name.is_some() {
                    flaws.push(RegistryFlaw::FlagWithName { index });
                }
            }
            OptKind::OptionalSingle => {
                if opt.flag.is_none() {
                    flaws.push(RegistryFlaw::OptionalUnflagged { index });
                }
                if opt.default.is_none() {
                    flaws.push(RegistryFlaw::MissingDefault { index });
                }
                if !opt.vtype.is_scalar() {
                    flaws.push(RegistryFlaw::OptionalNeedsScalar {
                        index,
                        ty: opt.vtype.name(),
                    });
                }
                if opt.name.is_none() {
                    flaws.push(RegistryFlaw::MissingName { index });
                }
            }
            OptKind::Single | OptKind::Multiple | OptKind::Variadic => {
                if opt.name.is_none() {
                    flaws.push(RegistryFlaw::MissingName { index });
                }
            }
        }

        if let Some(flag) = &opt.flag {
            for part in flag.parts() {
                if part.is_empty() {
                    flaws.push(RegistryFlaw::FlagEmptyPart { index });
                    continue;
                }
                if part.len() > MAX_FLAG_LEN {
                    flaws.push(RegistryFlaw::FlagTooLong {
                        index,
                        flag: part.to_owned(),
                        max: MAX_FLAG_LEN,
                    });
                }
                if let Some(ch) = forbidden_char(part, settings) {
                    flaws.push(RegistryFlaw::FlagForbiddenChar {
                        index,
                        flag: part.to_owned(),
                        ch,
                    });
                }
            }
            if settings.respect_help && flag.long() == Some("help") {
                flaws.push(RegistryFlaw::FlagIsHelp { index });
            }
        }

        match opt.vtype {
            ValueType::Enum => {
                if opt.enum_def.is_none() {
                    flaws.push(RegistryFlaw::MissingEnumDef { index });
                }
            }
            _ => {
                if opt.enum_def.is_some() {
                    flaws.push(RegistryFlaw::UnexpectedEnumDef {
                        index,
                        ty: opt.vtype.name(),
                    });
                }
            }
        }
        match opt.vtype {
            ValueType::Other => {
                if opt.other.is_none() {
                    flaws.push(RegistryFlaw::MissingCallback { index });
                }
            }
            _ => {
                if opt.other.is_some() {
                    flaws.push(RegistryFlaw::UnexpectedCallback {
                        index,
                        ty: opt.vtype.name(),
                    });
                }
            }
        }

        flaws
    }

    fn forbidden_char(part: &str, settings: &Settings) -> Option<char> {
        for c in part.chars() {
            if c.is_whitespace() || c == '-' {
                return Some(c);
            }
            if settings.bracketed_comments && (c == '{' || c == '}') {
                return Some(c);
            }
        }
        None
    }

    fn find_duplicate_flags(
        reg: &Registry,
        flaws: &mut Vec<RegistryFlaw>,
        detail: bool,
        found: &mut bool,
    ) {
        for (i, a) in reg.iter().enumerate() {
            let fa = match &a.flag {
                Some(flag) => flag,
                None => continue,
            };
            for (j, b) in reg.iter().enumerate().skip(i + 1) {
                let fb = match &b.flag {
                    Some(flag) => flag,
                    None => continue,
                };
                let clash = fa
                    .parts()
                    .find(|pa| fb.parts().any(|pb| pb == *pa))
                    .map(str::to_owned);
                if let Some(flag) = clash {
                    match detail {
                        true => flaws.push(RegistryFlaw::FlagDuplicated {
                            flag,
                            first: i,
                            second: j,
                        }),
                        false => {
                            *found = true;
                            return;
                        }
                    }
                }
            }
        }
    }

    fn find_surplus_variadics(
        reg: &Registry,
        flaws: &mut Vec<RegistryFlaw>,
        detail: bool,
        found: &mut bool,
    ) {
        let mut first: Option<usize> = None;
        for (index, opt) in reg.iter().enumerate() {
            if opt.flag.is_some() || opt.kind != OptKind::Variadic {
                continue;
            }
            match first {
                None => first = Some(index),
                Some(f) => match detail {
                    true => flaws.push(RegistryFlaw::MultipleUnflaggedVariadic {
                        first: f,
                        second: index,
                    }),
                    false => {
                        *found = true;
                        return;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_kind, Flag, OptKind};

    /// Check kind derivation over the five shapes
    #[test]
    fn kinds() {
        assert_eq!(derive_kind(0, Some(0)), Some(OptKind::Flag));
        assert_eq!(derive_kind(1, Some(1)), Some(OptKind::Single));
        assert_eq!(derive_kind(3, Some(3)), Some(OptKind::Multiple));
        assert_eq!(derive_kind(0, Some(1)), Some(OptKind::OptionalSingle));
        assert_eq!(derive_kind(1, Some(4)), Some(OptKind::Variadic));
        assert_eq!(derive_kind(0, None), Some(OptKind::Variadic));
        assert_eq!(derive_kind(5, None), Some(OptKind::Variadic));
        assert_eq!(derive_kind(2, Some(1)), None);
    }

    /// A pair flag answers to `-short`, `--long` and `-long`
    #[test]
    fn pair_flag_matching() {
        let flag = Flag::from_decl("t,tag");
        assert!(flag.matches("-t"));
        assert!(flag.matches("--tag"));
        assert!(flag.matches("-tag"));
        assert!(!flag.matches("--t"));
        assert!(!flag.matches("-x"));
        assert!(!flag.matches("tag"));
        assert!(!flag.matches("--"));
    }

    /// A single-form flag answers to the single-dash form only
    #[test]
    fn single_flag_matching() {
        let flag = Flag::from_decl("help");
        assert!(flag.matches("-help"));
        assert!(!flag.matches("--help"));
        assert!(!flag.matches("help"));
    }
}
