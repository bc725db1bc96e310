// Copyright 2026 The hest developers
//
// This file is part of the `hest` command-line option parsing library.
//
// Licensed under the MIT license or the Apache license (version 2.0), at your option. You may not
// copy, modify, or distribute this file except in compliance with said license. You can find copies
// of these licenses either in the LICENSE-MIT and LICENSE-APACHE files, or alternatively at
// <http://opensource.org/licenses/MIT> and <http://www.apache.org/licenses/LICENSE-2.0>
// respectively.

//! Character sources and the input stack
//!
//! The tokenizer pulls characters from one [`Input`] at a time: the argument vector, an open
//! response file, or an option's default string. Inputs are arranged on an [`InputStack`]: an
//! `@file` reference pushes a new input, exhaustion pops it, and tokenization resumes with the
//! next character of whatever is then on top. The stack has a hard depth bound so response files
//! cannot recurse without limit, and a latch so standard input (`@-`) is read at most once per
//! parse.

use std::fs;
use std::io::Read;
use log::{debug, trace};
use crate::arguments::Source;
use crate::errors::{InputFailure, InputLocation};

/// Hard bound on input nesting (argument vector plus open response files)
pub(crate) const MAX_DEPTH: usize = 10;

/// One source of characters feeding the tokenizer
#[derive(Debug)]
pub(crate) struct Input<'a> {
    kind: Kind<'a>,
    /// Open `-{` … `}-` comment levels within this source (nesting permitted)
    comment_depth: usize,
    line: usize,
    column: usize,
}

#[derive(Debug)]
enum Kind<'a> {
    /// Cursor over the borrowed argument vector. A `'\n'` is yielded between consecutive
    /// elements so that tokens and `#` comments never span elements.
    Argv {
        args: &'a [&'a str],
        cursor: usize,
        offset: usize,
    },
    /// A response file (or standard input), decoded at open; the cursor is kept for error
    /// locations only.
    File { name: String, text: String, pos: usize },
    /// An option's default string
    Default { text: &'a str, pos: usize },
}

impl<'a> Input<'a> {
    pub(crate) fn from_argv(args: &'a [&'a str]) -> Self {
        Self {
            kind: Kind::Argv {
                args,
                cursor: 0,
                offset: 0,
            },
            comment_depth: 0,
            line: 1,
            column: 0,
        }
    }

    /// Open a response file by name; `-` means standard input
    pub(crate) fn from_file(name: &str) -> Result<Self, InputFailure> {
        let text = match name {
            "-" => {
                let mut buf = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buf)
                    .map_err(|err| InputFailure::CannotOpen {
                        name: name.to_owned(),
                        err,
                    })?;
                String::from_utf8_lossy(&buf).into_owned()
            }
            _ => {
                let bytes = fs::read(name).map_err(|err| InputFailure::CannotOpen {
                    name: name.to_owned(),
                    err,
                })?;
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };
        Ok(Self {
            kind: Kind::File {
                name: name.to_owned(),
                text,
                pos: 0,
            },
            comment_depth: 0,
            line: 1,
            column: 0,
        })
    }

    pub(crate) fn from_default(text: &'a str) -> Self {
        Self {
            kind: Kind::Default { text, pos: 0 },
            comment_depth: 0,
            line: 1,
            column: 0,
        }
    }

    /// The provenance tag for tokens produced from this input
    pub(crate) fn source(&self) -> Source {
        match self.kind {
            Kind::Argv { .. } => Source::CommandLine,
            Kind::File { .. } => Source::ResponseFile,
            Kind::Default { .. } => Source::Default,
        }
    }

    /// The response-file name, if this input is one (used for the cycle check)
    pub(crate) fn file_name(&self) -> Option<&str> {
        match &self.kind {
            Kind::File { name, .. } => Some(name),
            _ => None,
        }
    }

    pub(crate) fn comment_depth(&self) -> usize {
        self.comment_depth
    }

    pub(crate) fn open_comment(&mut self) {
        self.comment_depth += 1;
    }

    /// Close one comment level; returns `false` on underflow
    pub(crate) fn close_comment(&mut self) -> bool {
        match self.comment_depth {
            0 => false,
            _ => {
                self.comment_depth -= 1;
                true
            }
        }
    }

    /// Where the cursor currently is, for diagnostics
    pub(crate) fn location(&self) -> InputLocation {
        let source = match &self.kind {
            Kind::Argv { cursor, .. } => {
                return InputLocation {
                    source: "command line".to_owned(),
                    line: *cursor + 1,
                    column: self.column,
                };
            }
            Kind::File { name, .. } => format!("response file \"{}\"", name),
            Kind::Default { .. } => "default string".to_owned(),
        };
        InputLocation {
            source,
            line: self.line,
            column: self.column,
        }
    }

    /// The next character of this source, or `None` once it is exhausted
    pub(crate) fn next_char(&mut self) -> Option<char> {
        let c = match &mut self.kind {
            Kind::Argv {
                args,
                cursor,
                offset,
            } => {
                if *cursor >= args.len() {
                    return None;
                }
                let elem = args[*cursor];
                match elem[*offset..].chars().next() {
                    Some(c) => {
                        *offset += c.len_utf8();
                        c
                    }
                    None => {
                        *cursor += 1;
                        *offset = 0;
                        '\n'
                    }
                }
            }
            Kind::File { text, pos, .. } => {
                let c = text[*pos..].chars().next()?;
                *pos += c.len_utf8();
                c
            }
            Kind::Default { text, pos } => {
                let c = text[*pos..].chars().next()?;
                *pos += c.len_utf8();
                c
            }
        };
        match c {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            _ => {
                self.column += 1;
            }
        }
        Some(c)
    }
}

/// LIFO of inputs, bounded depth
#[derive(Debug)]
pub(crate) struct InputStack<'a> {
    stack: Vec<Input<'a>>,
    /// Set once `@-` has been consumed; standard input cannot be read twice
    stdin_read: bool,
}

impl<'a> InputStack<'a> {
    pub(crate) fn new(base: Input<'a>) -> Self {
        Self {
            stack: vec![base],
            stdin_read: false,
        }
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Input<'a>> {
        self.stack.last_mut()
    }

    pub(crate) fn pop(&mut self) -> Option<Input<'a>> {
        let popped = self.stack.pop();
        if let Some(ref input) = popped {
            trace!("input popped: {}", input.location().source);
        }
        popped
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Open `name` and push it as a new response-file input
    ///
    /// Rejects names already open on the stack, depth exhaustion, and a second read of standard
    /// input.
    pub(crate) fn push_response_file(&mut self, name: &str) -> Result<(), InputFailure> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(InputFailure::StackDepthExceeded(MAX_DEPTH));
        }
        if self.stack.iter().any(|i| i.file_name() == Some(name)) {
            return Err(InputFailure::RecursiveResponseFile(name.to_owned()));
        }
        if name == "-" {
            if self.stdin_read {
                return Err(InputFailure::StdinConsumed);
            }
            self.stdin_read = true;
        }
        let input = Input::from_file(name)?;
        debug!("response file \"{}\" pushed (depth now {})", name, self.stack.len() + 1);
        self.stack.push(input);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Input, InputStack, MAX_DEPTH};
    use crate::arguments::Source;
    use crate::errors::InputFailure;

    /// Check the argv cursor yields a newline between elements and after the last one
    #[test]
    fn argv_element_separation() {
        let args = ["ab", "c"];
        let mut input = Input::from_argv(&args);
        let mut got = String::new();
        while let Some(c) = input.next_char() {
            got.push(c);
        }
        assert_eq!(got, "ab\nc\n");
        assert_eq!(input.source(), Source::CommandLine);
    }

    /// Check default-string inputs tag their tokens as defaults
    #[test]
    fn default_source_tag() {
        let input = Input::from_default("16 16");
        assert_eq!(input.source(), Source::Default);
    }

    /// Check the depth bound is enforced before any open is attempted
    #[test]
    fn depth_bound() {
        let args: [&str; 0] = [];
        let mut stack = InputStack::new(Input::from_argv(&args));
        // Fill with default inputs up to the limit; the names do not matter, no opens occur.
        for _ in 1..MAX_DEPTH {
            stack.stack.push(Input::from_default(""));
        }
        match stack.push_response_file("whatever") {
            Err(InputFailure::StackDepthExceeded(d)) => assert_eq!(d, MAX_DEPTH),
            other => panic!("expected depth failure, got {:?}", other),
        }
    }
}
