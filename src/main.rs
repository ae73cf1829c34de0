//! Codraft test harness
//!
//! Renders Codraft HTML templates from declarative YAML scenarios and checks
//! the rendered output for expected text.

use clap::Parser;
use codraft_harness::commands::Args;
use codraft_harness::{cli, common::logging};

fn main() {
    let args = Args::parse();

    // Initialize logging
    logging::init_cli(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.list {
        cli::list(&args)
    } else {
        cli::run(&args).map(|summary| summary.success())
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
