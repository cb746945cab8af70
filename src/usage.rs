// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::fmt;

use crate::args::{Options, HELP_LONG_OPT, OPT_PREFIX};

/// Used when the usage statement is shown before any parse.
const DEFAULT_PROGRAM_NAME: &str = "program";

const HELP_DESCRIPTION: &str = "display this help";

/// Width of the column holding the option names.
const LABEL_WIDTH: usize = 30;

/// Everything needed to render a usage statement.
pub(crate) struct Usage<'a> {
    pub(crate) program: Option<&'a str>,
    pub(crate) intro: &'a str,
    pub(crate) args_label: &'a str,
    pub(crate) help_char: Option<char>,
    pub(crate) options: &'a Options,
}

impl<'a> Usage<'a> {
    pub(crate) fn program_name(&self) -> &str {
        self.program.unwrap_or(DEFAULT_PROGRAM_NAME)
    }
}

/// Build the name column for an option, for example
/// `  -o, --output-file=FILENAME`.
fn label(short: Option<char>, long: Option<&str>, value_name: Option<&str>) -> String {
    let mut label = match short {
        Some(c) => format!("  {}{}", OPT_PREFIX, c),
        None => "    ".into(),
    };

    label.push(if short.is_some() && long.is_some() {
        ','
    } else {
        ' '
    });

    if let Some(name) = long {
        label.push_str(&format!(" {}{}{}", OPT_PREFIX, OPT_PREFIX, name));

        if value_name.is_some() {
            label.push('=');
        }
    }

    if let Some(value_name) = value_name {
        label.push_str(&value_name.to_uppercase());
    }

    label
}

fn write_option(
    f: &mut fmt::Formatter,
    short: Option<char>,
    long: Option<&str>,
    value_name: Option<&str>,
    description: &str,
) -> fmt::Result {
    let label = label(short, long, value_name);

    if label.chars().count() < LABEL_WIDTH {
        writeln!(f, "{:<width$}{}", label, description, width = LABEL_WIDTH)
    } else {
        // Too long to align: put the description on its own line.
        writeln!(f, "{}", label)?;
        writeln!(f, "{:<width$}{}", "", description, width = LABEL_WIDTH)
    }
}

impl<'a> fmt::Display for Usage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        write!(f, "Usage: {} [options]", self.program_name())?;

        if !self.args_label.is_empty() {
            write!(f, " {}", self.args_label)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.intro)?;
        writeln!(f, "Options:")?;

        write_option(
            f,
            self.help_char,
            Some(HELP_LONG_OPT),
            None,
            HELP_DESCRIPTION,
        )?;

        for opt in self.options {
            write_option(
                f,
                opt.short_name(),
                opt.long_name(),
                opt.value_name(),
                opt.description(),
            )?;
        }

        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::args::Opt;
    use crate::parser::Parser;
    use crate::tests::BufWriter;
    use regex::Regex;

    #[test]
    fn test_label() {
        #[derive(Debug)]
        struct TestData<'a> {
            short: Option<char>,
            long: Option<&'a str>,
            value_name: Option<&'a str>,
            label: &'a str,
        }

        let tests = &[
            TestData {
                short: Some('v'),
                long: Some("verbose"),
                value_name: None,
                label: "  -v, --verbose",
            },
            TestData {
                short: Some('o'),
                long: Some("output-file"),
                value_name: Some("filename"),
                label: "  -o, --output-file=FILENAME",
            },
            TestData {
                short: None,
                long: Some("no-colors"),
                value_name: None,
                label: "      --no-colors",
            },
            TestData {
                short: Some('l'),
                long: None,
                value_name: Some("level"),
                label: "  -l LEVEL",
            },
            TestData {
                short: Some('q'),
                long: None,
                value_name: None,
                label: "  -q ",
            },
        ];

        for (i, d) in tests.iter().enumerate() {
            let value = label(d.short, d.long, d.value_name);

            let msg = format!("test[{}]: {:?}, value: {:?}", i, d, value);

            assert_eq!(value, d.label, "{}", msg);
        }
    }

    #[test]
    fn test_write_usage() {
        let mut options = Options::new();

        options.add(
            Opt::flag()
                .short('v')
                .long("verbose")
                .help("enable verbose output"),
        );
        options.add(
            Opt::valued("filename")
                .short('o')
                .long("output-file")
                .help("set the output file")
                .default_value("-"),
        );
        options.add(
            Opt::flag()
                .long("no-colors")
                .help("disable colored output in console"),
        );

        let mut parser = Parser::new("Example program", options).unwrap();
        let mut writer = BufWriter::new();

        let result = parser.write_usage(&mut writer);
        assert!(result.is_ok());

        let expected = concat!(
            "\n",
            "Usage: program [options] args\n",
            "Example program\n",
            "Options:\n",
            "  -h, --help                  display this help\n",
            "  -v, --verbose               enable verbose output\n",
            "  -o, --output-file=FILENAME  set the output file\n",
            "      --no-colors             disable colored output in console\n",
            "\n",
        );

        assert_eq!(writer.to_string(), expected);

        //--------------------
        // After a parse, the real program name is shown.

        let _ = parser.parse_with_args(vec!["/usr/bin/frob"]);

        let mut writer = BufWriter::new();
        let result = parser.write_usage(&mut writer);
        assert!(result.is_ok());

        let re = Regex::new(r"(?m)^Usage: /usr/bin/frob \[options\] args$").unwrap();
        assert!(re.is_match(&writer.to_string()));
    }

    #[test]
    fn test_write_usage_settings() {
        let mut options = Options::new();

        options.add(
            Opt::valued("hostname")
                .short('h')
                .long("remote-host-address")
                .help("host to connect to"),
        );

        let parser = Parser::new("", options)
            .unwrap()
            .args_label("files...")
            .help_char('?');

        let mut writer = BufWriter::new();
        let result = parser.write_usage(&mut writer);
        assert!(result.is_ok());

        let value = writer.to_string();

        let usage_re = Regex::new(r"(?m)^Usage: program \[options\] files\.\.\.$").unwrap();
        assert!(usage_re.is_match(&value), "{:?}", value);

        let help_re = Regex::new(r"(?m)^  -\?, --help {18}display this help$").unwrap();
        assert!(help_re.is_match(&value), "{:?}", value);

        // Labels wider than the column push the description to the next line.
        let long_re =
            Regex::new(r"(?m)^  -h, --remote-host-address=HOSTNAME\n {30}host to connect to$")
                .unwrap();
        assert!(long_re.is_match(&value), "{:?}", value);

        //--------------------

        let parser = parser.settings(crate::Settings::new().no_help_char());

        let mut writer = BufWriter::new();
        let result = parser.write_usage(&mut writer);
        assert!(result.is_ok());

        let re = Regex::new(r"(?m)^      --help {18}display this help$").unwrap();
        assert!(re.is_match(&writer.to_string()));
    }

    #[test]
    fn test_write_usage_empty_args_label() {
        let mut options = Options::new();
        options.add(Opt::flag().short('v'));

        let parser = Parser::new("", options).unwrap().args_label("");

        let mut writer = BufWriter::new();
        let result = parser.write_usage(&mut writer);
        assert!(result.is_ok());

        let value = writer.to_string();

        let re = Regex::new(r"(?m)^Usage: program \[options\]$").unwrap();
        assert!(re.is_match(&value), "{:?}", value);
    }
}
