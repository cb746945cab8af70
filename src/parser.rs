// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;
use std::io::{self, Write};
use std::process;

use tracing::{debug, warn};

use crate::args::{Kind, OptId, Options, Value, HELP_LONG_OPT, OPT_PREFIX, VALUE_SEPARATOR};
use crate::error::{Error, Result};
use crate::usage::Usage;

/// Special argument that is silently consumed and used to denote the end of
/// all options; all arguments that follow are considered to be positional
/// arguments (even if they start with `-`!)
///
/// See: `getopt(3)`.
const END_OF_OPTIONS: &str = "--";
const LONG_OPT_PREFIX: &str = END_OF_OPTIONS;

const DEFAULT_ARGS_LABEL: &str = "args";
const DEFAULT_HELP_CHAR: char = 'h';

/// Exit status used when help was requested.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status used for all parse failures.
pub const EXIT_FAILURE: i32 = 1;

/// Settings used to control the parsers behaviour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Short option name that requests the usage statement
    /// (`--help` is always available).
    help_char: Option<char>,

    /// If set, characters packed after a short flag (`-vx`) are
    /// ignored rather than being an error.
    ignore_flag_suffix: bool,

    /// If set, a valued long option only accepts `--name=value`.
    long_values_need_equals: bool,

    /// If set, `--` marks the end of all options rather than being
    /// an (unknown) long option.
    end_of_options: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            help_char: Some(DEFAULT_HELP_CHAR),
            ignore_flag_suffix: false,
            long_values_need_equals: false,
            end_of_options: false,
        }
    }
}

impl Settings {
    /// Create a new settings object.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Use `c` rather than `h` as the short help option, freeing up `-h`
    /// for one of your own options.
    pub fn help_char(self, c: char) -> Self {
        Settings {
            help_char: Some(c),
            ..self
        }
    }

    /// Disable the short help option entirely. `--help` still works.
    pub fn no_help_char(self) -> Self {
        Settings {
            help_char: None,
            ..self
        }
    }

    /// By default, a short flag followed by more characters in the same
    /// argument is an error:
    ///
    /// ```bash
    /// $ prog -vx
    /// Error: extraneous argument 'x' for option '-v'.
    /// ```
    ///
    /// With this setting, the trailing characters are silently dropped and
    /// the flag is set.
    pub fn ignore_flag_suffix(self) -> Self {
        Settings {
            ignore_flag_suffix: true,
            ..self
        }
    }

    /// By default, a valued long option takes its value either inline
    /// (`--output-file=foo`) or from the next argument
    /// (`--output-file foo`).
    ///
    /// With this setting only the inline form is accepted.
    pub fn long_values_need_equals(self) -> Self {
        Settings {
            long_values_need_equals: true,
            ..self
        }
    }

    /// By default `--` is a long option with an empty name and so is
    /// reported as an unrecognised option. With this setting, `--` ends
    /// option processing like `getopt(3)`: it is consumed and every
    /// argument after it is positional.
    pub fn end_of_options(self) -> Self {
        Settings {
            end_of_options: true,
            ..self
        }
    }
}

/// Result of scanning the command-line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// All options were handled.
    Parsed(Matches),
    /// The user asked for the usage statement (`-h` or `--help`).
    HelpRequested,
}

/// Snapshot of the option values after a successful parse.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matches {
    program: String,
    options: Options,
    values: Vec<Value>,
    positional: Vec<String>,
}

impl Matches {
    /// Name the program was invoked as (first element of the argument vector).
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the value of an option, or [None] if no such option
    /// was registered.
    pub fn value<T: Into<OptId>>(&self, id: T) -> Option<&Value> {
        self.options
            .position(&id.into())
            .and_then(|i| self.values.get(i))
    }

    /// Returns `true` if the flag is set.
    ///
    /// Unknown options and valued options are never "set".
    pub fn flag<T: Into<OptId>>(&self, id: T) -> bool {
        self.value(id).and_then(Value::as_flag).unwrap_or(false)
    }

    /// Returns the text of a valued option.
    pub fn text<T: Into<OptId>>(&self, id: T) -> Option<&str> {
        self.value(id).and_then(Value::as_text)
    }

    /// All option values, in registration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Arguments from the first non-option argument onwards.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Consume the matches, returning the positional arguments.
    pub fn into_positional(self) -> Vec<String> {
        self.positional
    }
}

/// How many arguments an option consumed beyond its own.
enum Step {
    Taken(usize),
    Help,
}

/// The main object used to represent the program's options.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parser {
    intro: String,
    args_label: String,
    settings: Settings,
    options: Options,
    program: Option<String>,
}

impl Parser {
    /// Create a parser for the specified options.
    ///
    /// `intro` is shown in the usage statement above the list of options.
    ///
    /// # Errors
    ///
    /// Fails if the option table is empty or contains conflicting or
    /// unusable options (see [Error]).
    pub fn new(intro: &str, options: Options) -> Result<Self> {
        options.validate()?;

        Ok(Parser {
            intro: intro.into(),
            args_label: DEFAULT_ARGS_LABEL.into(),
            settings: Settings::default(),
            options,
            program: None,
        })
    }

    /// Specify the name used for positional arguments in the
    /// usage statement (default "args").
    pub fn args_label(self, args_label: &str) -> Self {
        Parser {
            args_label: args_label.into(),
            ..self
        }
    }

    /// Specify any settings for the parser.
    pub fn settings(self, settings: Settings) -> Self {
        Parser { settings, ..self }
    }

    /// Use `c` as the short help option.
    ///
    /// # Note
    ///
    /// This is an alternative to calling the `settings()` method.
    pub fn help_char(self, c: char) -> Self {
        let settings = self.settings.help_char(c);

        Parser { settings, ..self }
    }

    /// Returns the registered options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the program name recorded by the last parse.
    pub fn program(&self) -> Option<&str> {
        self.program.as_deref()
    }

    /// Parse a full argument vector, including the program name as the
    /// first element.
    ///
    /// Parsing stops at the first argument that does not start with a dash;
    /// that argument and all following ones are returned as
    /// [Matches::positional()].
    pub fn parse_with_args<I, S>(&mut self, cli_args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cli_args = cli_args.into_iter().map(Into::<String>::into);

        let program = cli_args.next().ok_or(Error::NoProgramName)?;
        self.program = Some(program.clone());

        let args: Vec<String> = cli_args.collect();

        if let Some(c) = self.settings.help_char {
            if self.options.find_short(c).is_some() {
                warn!(option = %c, "short option is shadowed by the help option");
            }
        }

        let mut values = self.options.initial_values();
        let mut next = 0;

        let tail_start = loop {
            let arg = match args.get(next) {
                Some(arg) => arg,
                None => break next,
            };

            if !arg.starts_with(OPT_PREFIX) {
                break next;
            }

            next += 1;

            if arg.len() == OPT_PREFIX.len_utf8() {
                return Err(Error::SyntaxError(arg.clone()));
            }

            if arg == END_OF_OPTIONS && self.settings.end_of_options {
                debug!("end of options");
                break next;
            }

            let step = match arg.strip_prefix(LONG_OPT_PREFIX) {
                Some(body) => self.handle_long(body, &args[next..], &mut values)?,
                None => self.handle_short(arg, &args[next..], &mut values)?,
            };

            match step {
                Step::Taken(n) => next += n,
                Step::Help => return Ok(Outcome::HelpRequested),
            }
        };

        debug!(positional = args.len() - tail_start, "option scan complete");

        Ok(Outcome::Parsed(Matches {
            program,
            options: self.options.clone(),
            values,
            positional: args[tail_start..].to_vec(),
        }))
    }

    /// Simplest interface to the parser: parse the program's own
    /// command-line.
    pub fn parse(&mut self) -> Result<Outcome> {
        self.parse_with_args(env::args())
    }

    /// Parse the program's command-line, exiting the process if help was
    /// requested or the command-line is invalid.
    ///
    /// Diagnostics and the usage statement are written to stderr.
    pub fn parse_or_exit(&mut self) -> Matches {
        let result = self.parse();

        match self.report(result, &mut io::stderr()) {
            Ok(matches) => matches,
            Err(exit_code) => process::exit(exit_code),
        }
    }

    /// Decide what to do with a parse result.
    ///
    /// On success, the matches are returned. Otherwise, the appropriate
    /// diagnostic and usage statement are written to `writer` and the exit
    /// status the program should terminate with is returned.
    pub fn report<W: Write>(
        &self,
        result: Result<Outcome>,
        writer: &mut W,
    ) -> std::result::Result<Matches, i32> {
        let error = match result {
            Ok(Outcome::Parsed(matches)) => return Ok(matches),
            Ok(Outcome::HelpRequested) => return Err(self.emit_usage(writer, EXIT_SUCCESS)),
            Err(e) => e,
        };

        if error.is_user_error() {
            if writeln!(writer, "Error: {}.", error).is_err() {
                return Err(EXIT_FAILURE);
            }

            return Err(self.emit_usage(writer, EXIT_FAILURE));
        }

        // The exit status is the same whether or not the write succeeds.
        let _ = writeln!(writer, "{}: {}", self.usage_view().program_name(), error);

        Err(EXIT_FAILURE)
    }

    /// Write the usage statement.
    pub fn write_usage<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "{}", self.usage_view())?;

        Ok(())
    }

    /// Write the usage statement to stderr and exit the process.
    pub fn usage(&self, exit_code: i32) -> ! {
        let exit_code = self.emit_usage(&mut io::stderr(), exit_code);

        process::exit(exit_code)
    }

    fn emit_usage<W: Write>(&self, writer: &mut W, exit_code: i32) -> i32 {
        match self.write_usage(writer) {
            Ok(()) => exit_code,
            Err(_) => EXIT_FAILURE,
        }
    }

    fn usage_view(&self) -> Usage<'_> {
        Usage {
            program: self.program.as_deref(),
            intro: &self.intro,
            args_label: &self.args_label,
            help_char: self.settings.help_char,
            options: &self.options,
        }
    }

    /// Handle `-x`, `-xrest`, or `-x value`.
    fn handle_short(&self, arg: &str, rest: &[String], values: &mut [Value]) -> Result<Step> {
        let mut chars = arg[OPT_PREFIX.len_utf8()..].chars();

        let name = chars
            .next()
            .ok_or_else(|| Error::SyntaxError(arg.into()))?;
        let suffix = chars.as_str();

        if self.settings.help_char == Some(name) {
            return Ok(Step::Help);
        }

        let option = format!("{}{}", OPT_PREFIX, name);

        let index = self
            .options
            .find_short(name)
            .ok_or_else(|| Error::UnknownOpt(option.clone()))?;

        match self.options.get(index).map(|opt| opt.kind()) {
            Some(Kind::Valued { value_name, .. }) => {
                let (value, taken) = if !suffix.is_empty() {
                    (suffix, 0)
                } else if let Some(next) = rest.first() {
                    (next.as_str(), 1)
                } else {
                    return Err(Error::MissingOptArg {
                        option,
                        value_name: value_name.clone(),
                    });
                };

                debug!(option = %option, value, "option value");
                values[index] = Value::Text(Some(value.into()));

                Ok(Step::Taken(taken))
            }
            _ => {
                if !suffix.is_empty() && !self.settings.ignore_flag_suffix {
                    return Err(Error::ExtraneousArg {
                        option,
                        value: suffix.into(),
                    });
                }

                debug!(option = %option, "flag set");
                values[index] = Value::Flag(true);

                Ok(Step::Taken(0))
            }
        }
    }

    /// Handle `--name`, `--name=value` or `--name value`
    /// (`body` is the argument without the leading dashes).
    fn handle_long(&self, body: &str, rest: &[String], values: &mut [Value]) -> Result<Step> {
        let (name, inline) = match body.split_once(VALUE_SEPARATOR) {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        if name == HELP_LONG_OPT {
            return Ok(Step::Help);
        }

        let option = format!("{}{}", LONG_OPT_PREFIX, name);

        let index = self
            .options
            .find_long(name)
            .ok_or_else(|| Error::UnknownOpt(option.clone()))?;

        match (self.options.get(index).map(|opt| opt.kind()), inline) {
            (Some(Kind::Valued { value_name, .. }), inline) => {
                let (value, taken) = match (inline, rest.first()) {
                    (Some(value), _) => (value, 0),
                    (None, Some(next)) if !self.settings.long_values_need_equals => {
                        (next.as_str(), 1)
                    }
                    _ => {
                        return Err(Error::MissingLongOptArg {
                            option,
                            value_name: value_name.clone(),
                        })
                    }
                };

                debug!(option = %option, value, "option value");
                values[index] = Value::Text(Some(value.into()));

                Ok(Step::Taken(taken))
            }
            (_, Some(value)) => Err(Error::ExtraneousArg {
                option,
                value: value.into(),
            }),
            (_, None) => {
                debug!(option = %option, "flag set");
                values[index] = Value::Flag(true);

                Ok(Step::Taken(0))
            }
        }
    }
}
