// Copyright (c) 2021 James O. D. Hunt.
//
// SPDX-License-Identifier: Apache-2.0
//

/// An example that frees up `-h` for its own use by moving help to `-?`.
///
/// ```bash
/// $ cargo run --example custom-help -- -h example.com -p 8080
/// $ cargo run --example custom-help -- -?
/// ```
use optscan::{Opt, Options, Parser, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut options = Options::new();

    options.add(
        Opt::valued("host")
            .short('h')
            .long("host")
            .help("server to connect to")
            .default_value("localhost"),
    );
    options.add(
        Opt::valued("port")
            .short('p')
            .long("port")
            .help("port to connect to")
            .default_value("80"),
    );

    // No positional arguments.
    let mut parser = Parser::new("Connect to a server.", options)?
        .args_label("")
        .help_char('?');

    let matches = parser.parse_or_exit();

    println!(
        "connecting to {}:{}",
        matches.text("host").unwrap_or_default(),
        matches.text("port").unwrap_or_default()
    );

    Ok(())
}
