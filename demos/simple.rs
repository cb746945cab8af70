// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A simple example showing flags, a valued option and positional arguments.
///
/// Try:
///
/// ```bash
/// $ cargo run --example simple -- -v -o out.txt one two
/// $ cargo run --example simple -- --output-file=out.txt --no-colors one -v
/// $ cargo run --example simple -- --help
/// ```
use optscan::{Opt, Options, Parser, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut options = Options::new();

    let verbose = options.add(
        Opt::flag()
            .short('v')
            .long("verbose")
            .help("enable verbose output"),
    );

    let output = options.add(
        Opt::valued("filename")
            .short('o')
            .long("output-file")
            .help("set the output file")
            .default_value("-"),
    );

    let no_colors = options.add(
        Opt::flag()
            .long("no-colors")
            .help("disable colored output in console"),
    );

    let mut parser = Parser::new("Example program", options)?;

    // Only returns if the command-line is valid and help wasn't requested.
    let matches = parser.parse_or_exit();

    let positional = matches.positional();

    println!(
        "Remaining {} args: '{}'",
        positional.len(),
        positional.join(" ")
    );
    println!("output-file: '{}'", matches.text(output).unwrap_or_default());
    println!(
        "verbose = {}",
        if matches.flag(verbose) { "yes" } else { "no" }
    );
    println!(
        "colors = {}",
        if matches.flag(no_colors) { "no" } else { "yes" }
    );

    Ok(())
}
