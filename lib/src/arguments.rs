// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Token components
//!
//! The tokenizer turns raw characters into [`Arg`]s — finished tokens, each tagged with the
//! [`Source`] it came from. The [`ArgVec`] is the ordered sequence the rest of the parser works
//! over: the input processor fills one with raw tokens, the extractors move tokens from it into
//! each option's private `ArgVec`, and the value setter consumes those.
//!
//! Insertion order is meaningful and preserved throughout.
//!
//! [`Arg`]: struct.Arg.html
//! [`ArgVec`]: struct.ArgVec.html
//! [`Source`]: enum.Source.html

use std::fmt;

/// Provenance of a token (and, by transfer, of an option's parsed value)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// No token has contributed yet
    Unknown,
    /// Came directly from the program's argument vector
    CommandLine,
    /// Came from an `@file` response file (or standard input via `@-`)
    ResponseFile,
    /// Came from the option's declared default string
    Default,
}

impl Default for Source {
    fn default() -> Self {
        Source::Unknown
    }
}

impl Source {
    /// Whether the source is user-supplied (command line or response file)
    #[inline]
    pub fn is_user(self) -> bool {
        match self {
            Source::CommandLine | Source::ResponseFile => true,
            Source::Unknown | Source::Default => false,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Source::Unknown => "unknown",
            Source::CommandLine => "command line",
            Source::ResponseFile => "response file",
            Source::Default => "default",
        };
        f.write_str(s)
    }
}

/// One finished token
///
/// A growable piece of text built up by the tokenizer one character at a time, plus the
/// provenance tag of the source it was read from. Construction yields empty text; note that an
/// empty token is a legitimate token (e.g. `''` on a response-file line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    text: String,
    source: Source,
}

impl Arg {
    /// Create a new, empty token attributed to `source`
    pub(crate) fn new(source: Source) -> Self {
        Self {
            text: String::new(),
            source,
        }
    }

    /// Create a finished token directly (mostly useful in tests)
    pub fn from_text(text: &str, source: Source) -> Self {
        Self {
            text: text.to_owned(),
            source,
        }
    }

    /// Append one character
    #[inline]
    pub(crate) fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// The token text
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token's provenance
    #[inline]
    pub fn source(&self) -> Source {
        self.source
    }

    /// Consume the token, keeping only its text
    #[inline]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Ordered sequence of tokens
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgVec {
    args: Vec<Arg>,
}

impl ArgVec {
    /// Create a new, empty sequence
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Append a token at the end
    #[inline]
    pub fn push(&mut self, arg: Arg) {
        self.args.push(arg);
    }

    /// Remove and return the token at `index`, shifting later tokens down
    ///
    /// The caller takes ownership of the removed token. Panics if `index` is out of bounds.
    #[inline]
    pub fn remove(&mut self, index: usize) -> Arg {
        self.args.remove(index)
    }

    /// The token at `index`, if any
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Arg> {
        self.args.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Drop all tokens
    #[inline]
    pub fn clear(&mut self) {
        self.args.clear();
    }

    /// Iterate the tokens in order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Arg> {
        self.args.iter()
    }

    /// The provenance of the last token, if any
    pub fn last_source(&self) -> Option<Source> {
        self.args.last().map(|a| a.source())
    }
}

impl<'a> IntoIterator for &'a ArgVec {
    type Item = &'a Arg;
    type IntoIter = std::slice::Iter<'a, Arg>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}
