//! aerodb-paginate CLI entry point
//!
//! Installs the logger, delegates to `cli::run`, prints errors to stderr
//! and exits non-zero on failure.

use aerodb_paginate::cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = cli::run() {
        eprintln!("{}: {}", e.code(), e);
        std::process::exit(1);
    }
}
