// crates/vanity/src/config.rs

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use load_package::GoEnv;
use replace_import_paths::Replacer;

/// Runtime configuration composed once from the command line and environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Rewrites repository root import paths into hosting paths.
    pub replacer: Replacer,
    /// Base directory for `index.html` files; `None` streams to stdout.
    pub output_dir: Option<PathBuf>,
    /// Package identifiers given as arguments (empty == read stdin).
    pub packages: Vec<String>,
    pub go_env: GoEnv,
    pub verbose: bool,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches, go_env: GoEnv) -> Result<Self> {
        let replacer = match matches.get_one::<String>("replace") {
            Some(spec) => Replacer::parse(spec).context("invalid -replace value")?,
            None => Replacer::identity(),
        };

        let output_dir = matches
            .get_one::<String>("output")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);

        let packages = matches
            .get_many::<String>("packages")
            .unwrap_or_default()
            .cloned()
            .collect();

        Ok(Self {
            replacer,
            output_dir,
            packages,
            go_env,
            verbose: matches.get_flag("verbose"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;

    fn go_env() -> GoEnv {
        GoEnv::new(None, vec![PathBuf::from("/gopath")], PathBuf::from("/"))
    }

    fn config(args: &[&str]) -> Result<Config> {
        let matches = build_cli().try_get_matches_from(args).unwrap();
        Config::from_matches(&matches, go_env())
    }

    #[test]
    fn defaults_to_identity_and_stdout() {
        let config = config(&["vanity"]).unwrap();
        assert!(config.replacer.is_identity());
        assert!(config.output_dir.is_none());
        assert!(config.packages.is_empty());
        assert!(!config.verbose);
    }

    #[test]
    fn empty_output_means_stdout() {
        let config = config(&["vanity", "-o", ""]).unwrap();
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn collects_options() {
        let config = config(&["vanity", "--replace", "a=b", "-o", "site", "-v", "x/y"]).unwrap();
        assert_eq!(config.replacer.replace("a/c"), "b/c");
        assert_eq!(config.output_dir, Some(PathBuf::from("site")));
        assert_eq!(config.packages, vec!["x/y".to_string()]);
        assert!(config.verbose);
    }

    #[test]
    fn malformed_replace_is_an_error() {
        let err = config(&["vanity", "--replace", "oops"]).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("invalid -replace value"));
        assert!(msg.contains("\"oops\""));
    }

    #[test]
    fn last_replace_wins() {
        let config = config(&["vanity", "--replace", "oops", "--replace", "a=b"]).unwrap();
        assert_eq!(config.replacer.to_string(), "a=b");
    }
}
