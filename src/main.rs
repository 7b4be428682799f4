// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use tallybook::{cli, commands, logging, store};

/// True when the flag was given at any level of the subcommand chain.
fn global_flag(m: &clap::ArgMatches, id: &str) -> bool {
    if m.get_flag(id) {
        return true;
    }
    match m.subcommand() {
        Some((_, sub)) => global_flag(sub, id),
        None => false,
    }
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init_tracing(global_flag(&matches, "verbose"));

    let store = store::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data directory initialized at {}", store.root().display());
        }
        Some(("user", sub)) => commands::users::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(&store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
