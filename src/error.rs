// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// The error type.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    //------------------------------
    // Incorrect API usage errors (programmer error)
    //------------------------------
    /// An empty option table means nothing can be parsed.
    #[error("no options registered")]
    NoOptions,

    /// An option with neither a short nor a long name can never match.
    #[error("option {0} has neither a short nor a long name")]
    UnnamedOpt(usize),

    /// Short option name that cannot be typed as `-<name>`.
    #[error("invalid short option name {0:?}")]
    InvalidShortOpt(char),

    /// Two options claim the same short name.
    #[error("duplicate short option '-{0}'")]
    DuplicateShortOpt(char),

    /// Two options claim the same long name.
    #[error("duplicate long option '--{0}'")]
    DuplicateLongOpt(String),

    /// The long name `help` is always handled by the parser.
    #[error("long option name 'help' is reserved")]
    ReservedLongOpt,

    /// The argument vector did not even contain the program name.
    #[error("empty argument vector (no program name)")]
    NoProgramName,

    //------------------------------
    // Runtime errors (user error)
    //------------------------------
    /// A lone dash was specified.
    #[error("syntax error at '{0}'")]
    SyntaxError(String),

    /// User specified an unknown option.
    #[error("unrecognised option '{0}'")]
    UnknownOpt(String),

    /// A flag was given a value, either packed after a short name
    /// (`-vx`) or inline after a long name (`--verbose=x`).
    #[error("extraneous argument '{value}' for option '{option}'")]
    ExtraneousArg {
        /// The option as typed (`-v` or `--verbose`).
        option: String,
        /// The unexpected value.
        value: String,
    },

    /// Short option argument was not specified.
    #[error("missing argument '{value_name}' for option '{option}'")]
    MissingOptArg {
        /// The option as typed.
        option: String,
        /// Name of the expected value.
        value_name: String,
    },

    /// Long option argument was not specified.
    #[error("please specify a {value_name} for option '{option}'")]
    MissingLongOptArg {
        /// The option as typed.
        option: String,
        /// Name of the expected value.
        value_name: String,
    },

    //------------------------------
    // Output errors
    //------------------------------
    /// Failed to write the usage statement.
    #[error("failed to write usage: {0}")]
    Io(String),
}

impl Error {
    /// Returns `true` if the error was caused by the command-line the user
    /// typed (and so should be followed by a usage statement), or `false` if
    /// the program itself misused the API.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::SyntaxError(_)
                | Error::UnknownOpt(_)
                | Error::ExtraneousArg { .. }
                | Error::MissingOptArg { .. }
                | Error::MissingLongOptArg { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

/// Convenience type that allows a function to be defined as returning a
/// [Result], but which only requires the success type to be specified,
/// defaulting the error type to this crates `Error` type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
