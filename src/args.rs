// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::HashSet;

use tracing::warn;

use crate::error::{Error, Result};

pub(crate) const OPT_PREFIX: char = '-';
pub(crate) const VALUE_SEPARATOR: char = '=';

/// Long option name that is always handled by the parser itself.
pub const HELP_LONG_OPT: &str = "help";

/// The two kinds of option. The kind is fixed when the [Opt] is created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// Stand-alone option that takes no argument.
    Flag {
        /// Value before parsing (normally `false`).
        default: bool,
    },
    /// Option that requires exactly one argument.
    Valued {
        /// Name of the argument, shown upper-cased in the usage statement.
        value_name: String,
        /// Value before parsing.
        default: Option<String>,
    },
}

impl Kind {
    /// Returns `true` for flags.
    pub fn is_flag(&self) -> bool {
        matches!(self, Kind::Flag { .. })
    }

    fn initial_value(&self) -> Value {
        match self {
            Kind::Flag { default } => Value::Flag(*default),
            Kind::Valued { default, .. } => Value::Text(default.clone()),
        }
    }
}

/// Value recorded for an option.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// Value of a [Kind::Flag] option.
    Flag(bool),
    /// Value of a [Kind::Valued] option ([None] if no default was
    /// declared and the option was not specified).
    Text(Option<String>),
}

impl Value {
    /// Returns the flag state, or [None] for valued options.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(set) => Some(*set),
            Value::Text(_) => None,
        }
    }

    /// Returns the text value, or [None] for flags and unset options.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => value.as_deref(),
            Value::Flag(_) => None,
        }
    }
}

/// Identifies an option in an [Options] table.
///
/// Conversions exist so lookups can be written as `'v'`, `"verbose"` or
/// the option's position in the table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OptId {
    /// By short name.
    Short(char),
    /// By long name (without the leading dashes).
    Long(String),
    /// By position in the table.
    Index(usize),
}

impl From<char> for OptId {
    fn from(c: char) -> Self {
        OptId::Short(c)
    }
}

impl From<&str> for OptId {
    fn from(name: &str) -> Self {
        OptId::Long(name.into())
    }
}

impl From<usize> for OptId {
    fn from(index: usize) -> Self {
        OptId::Index(index)
    }
}

/// A single option descriptor.
///
/// Create one with [Opt::flag()] or [Opt::valued()] and then name it:
///
/// ```rust
/// use optscan::Opt;
///
/// let verbose = Opt::flag().short('v').long("verbose").help("enable verbose output");
/// let output = Opt::valued("filename")
///     .short('o')
///     .long("output-file")
///     .help("set the output file")
///     .default_value("-");
///
/// assert!(verbose.kind().is_flag());
/// assert!(!output.kind().is_flag());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Opt {
    help: String,
    short: Option<char>,
    long: Option<String>,
    kind: Kind,
}

impl Opt {
    fn new(kind: Kind) -> Self {
        Opt {
            help: String::new(),
            short: None,
            long: None,
            kind,
        }
    }

    /// Create a flag option (initially `false`).
    pub fn flag() -> Self {
        Opt::new(Kind::Flag { default: false })
    }

    /// Create an option requiring an argument called `value_name`.
    pub fn valued(value_name: &str) -> Self {
        Opt::new(Kind::Valued {
            value_name: value_name.into(),
            default: None,
        })
    }

    /// Specify the short (single character) name.
    pub fn short(self, short: char) -> Self {
        Opt {
            short: Some(short),
            ..self
        }
    }

    /// Specify the long name (without the leading `--`).
    pub fn long(self, long: &str) -> Self {
        Opt {
            long: Some(long.into()),
            ..self
        }
    }

    /// Specify the description shown in the usage statement.
    pub fn help(self, help: &str) -> Self {
        Opt {
            help: help.into(),
            ..self
        }
    }

    /// Make a flag start out set.
    ///
    /// Such a flag can never be cleared from the command-line so the parser
    /// warns about it. Has no effect on valued options.
    pub fn enabled(mut self) -> Self {
        if let Kind::Flag { default } = &mut self.kind {
            *default = true;
        }

        self
    }

    /// Specify the default value of a valued option.
    /// Has no effect on flags.
    pub fn default_value(mut self, value: &str) -> Self {
        if let Kind::Valued { default, .. } = &mut self.kind {
            *default = Some(value.into());
        }

        self
    }

    /// Returns the short name.
    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    /// Returns the long name.
    pub fn long_name(&self) -> Option<&str> {
        self.long.as_deref()
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.help
    }

    /// Returns the kind of option.
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Returns the value name of a valued option.
    pub fn value_name(&self) -> Option<&str> {
        match &self.kind {
            Kind::Valued { value_name, .. } => Some(value_name),
            Kind::Flag { .. } => None,
        }
    }
}

/// Ordered table of options.
///
/// The order in which options are added is the order they are listed
/// in the usage statement.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Options {
    entries: Vec<Opt>,
}

impl Options {
    /// Create a new, empty option table.
    pub fn new() -> Self {
        Options::default()
    }

    /// Register an option, returning its position in the table.
    pub fn add(&mut self, opt: Opt) -> usize {
        self.entries.push(opt);

        self.entries.len() - 1
    }

    /// Returns the number of registered options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no options have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the option at `index`.
    pub fn get(&self, index: usize) -> Option<&Opt> {
        self.entries.get(index)
    }

    /// Returns an iterator over the options in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Opt> {
        self.entries.iter()
    }

    /// Returns the position of the option identified by `id`.
    pub fn position(&self, id: &OptId) -> Option<usize> {
        match id {
            OptId::Short(c) => self.find_short(*c),
            OptId::Long(name) => self.find_long(name),
            OptId::Index(i) if *i < self.entries.len() => Some(*i),
            OptId::Index(_) => None,
        }
    }

    pub(crate) fn find_short(&self, c: char) -> Option<usize> {
        self.entries.iter().position(|opt| opt.short == Some(c))
    }

    pub(crate) fn find_long(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|opt| opt.long.as_deref() == Some(name))
    }

    /// Fresh copies of every option's default.
    pub(crate) fn initial_values(&self) -> Vec<Value> {
        self.entries.iter().map(|opt| opt.kind.initial_value()).collect()
    }

    /// Check the table is usable, warning about questionable (but legal)
    /// declarations.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::NoOptions);
        }

        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();

        for (i, opt) in self.entries.iter().enumerate() {
            if opt.short.is_none() && opt.long.is_none() {
                return Err(Error::UnnamedOpt(i));
            }

            if let Some(c) = opt.short {
                if c == OPT_PREFIX || c == VALUE_SEPARATOR || c.is_whitespace() {
                    return Err(Error::InvalidShortOpt(c));
                }

                if !shorts.insert(c) {
                    return Err(Error::DuplicateShortOpt(c));
                }
            }

            if let Some(name) = opt.long.as_deref() {
                if name == HELP_LONG_OPT {
                    return Err(Error::ReservedLongOpt);
                }

                if !longs.insert(name) {
                    return Err(Error::DuplicateLongOpt(name.into()));
                }
            }

            if let Kind::Flag { default: true } = opt.kind {
                warn!(option = i, "flag option has a non-false default");
            }
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = &'a Opt;
    type IntoIter = std::slice::Iter<'a, Opt>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::capture_logs;

    #[test]
    fn test_opt() {
        let flag = Opt::flag();

        let expected_flag = Opt {
            help: "".into(),
            short: None,
            long: None,
            kind: Kind::Flag { default: false },
        };

        assert_eq!(flag, expected_flag);

        //--------------------

        let valued = Opt::valued("filename");

        assert_eq!(valued.value_name(), Some("filename"));
        assert_eq!(
            valued.kind(),
            &Kind::Valued {
                value_name: "filename".into(),
                default: None
            }
        );

        //--------------------

        let named = Opt::flag().short('v').long("verbose").help("be chatty");

        assert_eq!(named.short_name(), Some('v'));
        assert_eq!(named.long_name(), Some("verbose"));
        assert_eq!(named.description(), "be chatty");
        assert_eq!(named.value_name(), None);

        //--------------------

        let enabled = Opt::flag().enabled();
        assert_eq!(enabled.kind(), &Kind::Flag { default: true });

        // Kind-specific modifiers never change the kind.
        let valued_enabled = Opt::valued("x").enabled();
        assert!(!valued_enabled.kind().is_flag());

        let flag_default = Opt::flag().default_value("foo");
        assert_eq!(flag_default.kind(), &Kind::Flag { default: false });

        let with_default = Opt::valued("x").default_value("-");
        assert_eq!(
            with_default.kind(),
            &Kind::Valued {
                value_name: "x".into(),
                default: Some("-".into())
            }
        );
    }

    #[test]
    fn test_value() {
        assert_eq!(Value::Flag(true).as_flag(), Some(true));
        assert_eq!(Value::Flag(false).as_text(), None);
        assert_eq!(Value::Text(Some("a".into())).as_text(), Some("a"));
        assert_eq!(Value::Text(Some("a".into())).as_flag(), None);
        assert_eq!(Value::Text(None).as_text(), None);
    }

    #[test]
    fn test_options() {
        let mut options = Options::new();

        assert!(options.is_empty());
        assert_eq!(options, Options::default());
        assert_eq!(options.position(&'v'.into()), None);

        let v = options.add(Opt::flag().short('v').long("verbose"));
        let o = options.add(Opt::valued("file").short('o'));
        let n = options.add(Opt::flag().long("no-colors"));

        assert_eq!((v, o, n), (0, 1, 2));
        assert_eq!(options.len(), 3);

        assert_eq!(options.position(&'v'.into()), Some(v));
        assert_eq!(options.position(&"verbose".into()), Some(v));
        assert_eq!(options.position(&'o'.into()), Some(o));
        assert_eq!(options.position(&"no-colors".into()), Some(n));
        assert_eq!(options.position(&2usize.into()), Some(n));
        assert_eq!(options.position(&3usize.into()), None);
        assert_eq!(options.position(&'x'.into()), None);
        assert_eq!(options.position(&"output".into()), None);

        let names: Vec<Option<char>> = options.iter().map(|o| o.short_name()).collect();
        assert_eq!(names, vec![Some('v'), Some('o'), None]);
    }

    #[test]
    fn test_initial_values_are_copies() {
        let mut options = Options::new();
        options.add(Opt::flag().short('v'));
        options.add(Opt::valued("file").short('o').default_value("-"));
        options.add(Opt::valued("file").short('i'));

        let mut values = options.initial_values();

        assert_eq!(
            values,
            vec![
                Value::Flag(false),
                Value::Text(Some("-".into())),
                Value::Text(None)
            ]
        );

        values[1] = Value::Text(Some("changed".into()));

        // The declared default is untouched.
        assert_eq!(options.initial_values()[1], Value::Text(Some("-".into())));
    }

    #[test]
    fn test_validate() {
        #[derive(Debug)]
        struct TestData {
            opts: Vec<Opt>,
            result: Result<()>,
        }

        let tests = &[
            TestData {
                opts: vec![],
                result: Err(Error::NoOptions),
            },
            TestData {
                opts: vec![Opt::flag().short('v')],
                result: Ok(()),
            },
            TestData {
                // Legal, but warns.
                opts: vec![Opt::flag().short('v').enabled()],
                result: Ok(()),
            },
            TestData {
                opts: vec![Opt::flag().short('v'), Opt::flag().help("nameless")],
                result: Err(Error::UnnamedOpt(1)),
            },
            TestData {
                opts: vec![Opt::flag().short('-')],
                result: Err(Error::InvalidShortOpt('-')),
            },
            TestData {
                opts: vec![Opt::flag().short('=')],
                result: Err(Error::InvalidShortOpt('=')),
            },
            TestData {
                opts: vec![Opt::flag().short(' ')],
                result: Err(Error::InvalidShortOpt(' ')),
            },
            TestData {
                opts: vec![Opt::flag().short('v'), Opt::valued("x").short('v')],
                result: Err(Error::DuplicateShortOpt('v')),
            },
            TestData {
                opts: vec![
                    Opt::flag().long("verbose"),
                    Opt::flag().short('V').long("verbose"),
                ],
                result: Err(Error::DuplicateLongOpt("verbose".into())),
            },
            TestData {
                opts: vec![Opt::flag().long("help")],
                result: Err(Error::ReservedLongOpt),
            },
            TestData {
                // Short help is only reserved at parse time
                // (see Settings::help_char).
                opts: vec![Opt::flag().short('h')],
                result: Ok(()),
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let msg = format!("test[{}]: {:?}", i, d);

            let mut options = Options::new();
            for opt in d.opts.clone() {
                options.add(opt);
            }

            let result = options.validate();

            assert_eq!(result, d.result, "{}", msg);
        }
    }

    #[test]
    fn test_validate_warns_on_enabled_flag() {
        const WARNING: &str = "flag option has a non-false default";

        let mut options = Options::new();
        options.add(Opt::flag().short('v').enabled());

        let logs = capture_logs(|| assert_eq!(options.validate(), Ok(())));
        assert!(logs.contains(WARNING), "logs: {:?}", logs);
        assert!(logs.contains("WARN"), "logs: {:?}", logs);

        let mut options = Options::new();
        options.add(Opt::flag().short('v'));

        let logs = capture_logs(|| assert_eq!(options.validate(), Ok(())));
        assert!(!logs.contains(WARNING), "logs: {:?}", logs);
    }
}
