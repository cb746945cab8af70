// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Table-driven, POSIX-style command-line option scanning.
//!
//! If you want lots of extra features, you should consider the excellent
//! [`clap`](https://crates.io/crates/clap) crate instead.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Command-line syntax](#command-line-syntax)
//! * [Errors and exit codes](#errors-and-exit-codes)
//! * [Settings](#settings)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! You declare a table of options up front: each option has an optional
//! short name (`-o`), an optional long name (`--output-file`), a
//! description and is either a _flag_ (no argument) or a _valued_ option
//! (exactly one argument, with an optional default).
//!
//! The parser walks the command-line in order, records the value of every
//! option it meets and stops at the first argument that is not an option.
//! That argument and everything after it are returned untouched as the
//! "positional" arguments.
//!
//! # Quickstart
//!
//! ```rust
//! use optscan::{Opt, Options, Outcome, Parser, Result};
//!
//! fn main() -> Result<()> {
//!     let mut options = Options::new();
//!
//!     options.add(Opt::flag().short('v').long("verbose").help("enable verbose output"));
//!     options.add(
//!         Opt::valued("filename")
//!             .short('o')
//!             .long("output-file")
//!             .help("set the output file")
//!             .default_value("-"),
//!     );
//!
//!     let mut parser = Parser::new("Example program", options)?;
//!
//!     let outcome = parser.parse_with_args(vec!["prog", "-v", "--output-file=out.txt", "in.txt"])?;
//!
//!     if let Outcome::Parsed(matches) = outcome {
//!         assert!(matches.flag("verbose"));
//!         assert_eq!(matches.text('o'), Some("out.txt"));
//!         assert_eq!(matches.positional(), &["in.txt".to_string()]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Most programs don't want to deal with help requests and bad command-lines
//! themselves. [Parser::parse_or_exit()] prints the appropriate message and
//! usage statement to stderr and exits the process, so it only returns
//! when there is something for the program to do:
//!
//! ```rust,no_run
//! # use optscan::{Opt, Options, Parser, Result};
//! # fn main() -> Result<()> {
//! # let mut options = Options::new();
//! # options.add(Opt::flag().short('v'));
//! let mut parser = Parser::new("Example program", options)?;
//!
//! let matches = parser.parse_or_exit();
//!
//! if matches.flag('v') {
//!     println!("verbose mode");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Command-line syntax
//!
//! | Form                  | Meaning                                    |
//! |-----------------------|--------------------------------------------|
//! | `-v`                  | Set flag `v`.                              |
//! | `-o file`             | Set `o` to `file`.                         |
//! | `-ofile`              | Set `o` to `file`.                         |
//! | `--verbose`           | Set flag `verbose`.                        |
//! | `--output-file=file`  | Set `output-file` to `file`.               |
//! | `--output-file file`  | Set `output-file` to `file`.               |
//! | `-h`, `--help`        | Request the usage statement.               |
//! | `--`                  | Error, unless [Settings::end_of_options()] is set: then end of options. |
//! | `file`                | First positional argument: stop scanning.  |
//!
//! Notes:
//!
//! - The argument after a valued option is always consumed as its value,
//!   even if it starts with a dash (as `getopt(3)` does).
//! - If an option is specified more than once, the last value wins.
//! - Options are not permuted: anything that looks like an option after
//!   the first positional argument is itself positional.
//! - Option bundling (`-vq`) is not supported.
//!
//! # Errors and exit codes
//!
//! Problems with the option table ([Error::NoOptions],
//! [Error::DuplicateShortOpt], ...) are programming errors and are
//! reported by [Parser::new()].
//!
//! Problems with the command-line ([Error::UnknownOpt],
//! [Error::MissingOptArg], ...) are reported by the parse functions. When
//! using [Parser::parse_or_exit()] or [Parser::report()], these are shown as:
//!
//! ```text
//! Error: unrecognised option '--bogus'.
//!
//! Usage: prog [options] args
//! ...
//! ```
//!
//! and the exit status is [EXIT_FAILURE]. A help request exits with
//! [EXIT_SUCCESS].
//!
//! # Settings
//!
//! The [Settings] type controls the few behaviours which reasonable programs
//! disagree on: the short help character, whether `-vx` is an error, whether
//! `--name value` is accepted and whether `--` ends the options.
//!
//! # Limitations
//!
//! - No option bundling.
//! - No options with optional arguments.
//! - No repeated options collecting several values.
//! - No subcommands.

mod args;
mod error;
mod parser;
mod usage;

pub use error::{Error, Result};

pub use args::{Kind, Opt, OptId, Options, Value, HELP_LONG_OPT};
pub use parser::{Matches, Outcome, Parser, Settings, EXIT_FAILURE, EXIT_SUCCESS};
