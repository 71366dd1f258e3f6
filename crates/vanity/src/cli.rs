// crates/vanity/src/cli.rs

use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;

/// Long flags that may also be spelled with a single dash, as the `go` tools do.
const SINGLE_DASH_LONG_FLAGS: [&str; 4] = ["replace", "output", "verbose", "help"];

pub fn build_cli() -> Command {
    Command::new("vanity")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates static HTML pages with go-import and go-source meta tags")
        .override_usage("vanity [options] [packages]")
        .arg(
            Arg::new("replace")
                .long("replace")
                .short('r')
                .num_args(1)
                .action(ArgAction::Set)
                .overrides_with("replace")
                .value_name("OLD=NEW,...")
                .help("a comma-separated list of canonical=noncanonical pairs of package paths"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .num_args(1)
                .action(ArgAction::Set)
                .overrides_with("output")
                .value_name("DIR")
                .help("base directory where HTML files should be created (default: standard output)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("packages")
                .num_args(0..)
                .value_name("PACKAGE")
                .help("package import paths; read one per line from standard input when absent"),
        )
}

/// Rewrites `-replace x` and `-replace=x` style arguments into `--replace`.
///
/// Everything after a bare `--` is left alone.
pub fn normalize_go_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut past_separator = false;
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || past_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    past_separator = true;
                    arg
                }
                Some(s) if is_single_dash_long_flag(s) => OsString::from(format!("-{}", s)),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long_flag(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split('=').next().unwrap_or_default();
    SINGLE_DASH_LONG_FLAGS.contains(&name)
}
