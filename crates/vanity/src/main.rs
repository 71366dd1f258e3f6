// crates/vanity/src/main.rs
//
// vanity: static vanity index generator.
//
// Generates a listing for an entire vanity domain whose code is hosted under
// a single GitHub user:
//
//     go list vanity.example.com/... | vanity -replace vanity.example.com=github.com/actual-user -o .

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::env;
use std::io;
use std::process::exit;

use get_vcs_root::FsDetector;
use load_package::GoEnv;
use vanity::cli::{build_cli, normalize_go_flags};
use vanity::input::package_identifiers;
use vanity::logging::init_tracing;
use vanity::{run, Config, Services};

fn main() {
    let matches = build_cli().get_matches_from(normalize_go_flags(env::args_os()));

    if let Err(err) = try_main(&matches) {
        eprintln!("{:#}", err);
        exit(1);
    }
}

fn try_main(matches: &ArgMatches) -> Result<()> {
    let go_env = GoEnv::from_env().context("cannot determine the working directory")?;
    let config = Config::from_matches(matches, go_env)?;
    init_tracing(config.verbose);

    // Packages are either read as arguments or one line at a time from stdin.
    let identifiers = package_identifiers(config.packages.clone(), io::stdin().lock());

    let services = Services {
        loader: &config.go_env,
        detector: &FsDetector,
    };
    run(&config, &services, identifiers, io::stdout().lock())?;
    Ok(())
}
