// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! A declarative command-line option parser.
//!
//! Licensed under the MIT license or the Apache license, Version 2.0, at your option.
//!
//! A program describes the options it accepts in a [registry](options/struct.Registry.html) —
//! flagged or unflagged, fixed-arity or variadic, across fourteen value types — then hands a
//! [parser](parser/struct.Parser.html) its argument vector. Tokens are acquired through a
//! quoting/escaping/comment-aware tokenizer from the command line, from `@file` response files
//! and from per-option default strings, bound to options, and parsed into typed values held by
//! the registry, or the parse fails with a precisely located
//! [diagnostic](errors/enum.Error.html). [Usage and glossary text](usage/index.html) is generated
//! from the same declarations.
//!
//! # Example
//!
//! ```rust
//! use hest::options::Registry;
//! use hest::parser::Parser;
//!
//! let mut reg = Registry::new();
//! let v = reg.add_single::<i32>(Some("v"), "level", Some("0"), "verbosity level").unwrap();
//! let q = reg.add_flag("q,quiet", "say nothing at all").unwrap();
//!
//! let parser = Parser::new();
//! parser.parse(&mut reg, &["-v", "3"]).unwrap();
//! assert_eq!(reg.scalar::<i32>(v), Some(3));
//! assert!(!reg.flag_seen(q));
//! ```

#![deny(bare_trait_objects)]

pub mod arguments;
pub mod errors;
pub mod options;
pub mod parser;
pub mod usage;
pub mod values;

mod acquire;
mod engine;
mod input;
mod matching;
mod tokenizer;
