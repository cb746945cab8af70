// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example that handles the parse outcome itself rather than letting the
/// parser exit, and which only accepts `--name=value` for long options.
///
/// ```bash
/// $ cargo run --example long-options -- --level=3 --dry-run
/// $ cargo run --example long-options -- --level 3
/// ```
use std::process;

use optscan::{Error, Opt, Options, Outcome, Parser, Settings, EXIT_SUCCESS};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut options = Options::new();

    options.add(
        Opt::valued("level")
            .long("level")
            .help("compression level (1-9)")
            .default_value("6"),
    );
    options.add(Opt::flag().short('n').long("dry-run").help("do nothing"));

    let mut parser = match Parser::new("Compress some files.", options) {
        Ok(parser) => parser
            .args_label("file...")
            .settings(Settings::new().long_values_need_equals()),
        Err(e) => {
            eprintln!("ERROR: bad option table: {}", e);
            process::exit(1);
        }
    };

    let matches = match parser.parse() {
        Ok(Outcome::Parsed(matches)) => matches,
        Ok(Outcome::HelpRequested) => parser.usage(EXIT_SUCCESS),
        Err(Error::MissingLongOptArg { option, .. }) => {
            eprintln!("ERROR: use '{}=<value>'", option);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let level: u32 = match matches.text("level").unwrap_or("6").parse() {
        Ok(level) if (1..=9).contains(&level) => level,
        _ => {
            eprintln!("ERROR: level must be between 1 and 9");
            process::exit(1);
        }
    };

    for file in matches.positional() {
        if matches.flag("dry-run") {
            println!("would compress {} at level {}", file, level);
        } else {
            println!("compressing {} at level {}", file, level);
        }
    }
}
