// crates/vanity/src/input.rs

use std::io::{self, BufRead};

/// Package identifiers come from the arguments when any were given, otherwise
/// one per line from `stdin`. Blank lines are passed through as-is.
pub fn package_identifiers<'a, R>(
    args: Vec<String>,
    stdin: R,
) -> Box<dyn Iterator<Item = io::Result<String>> + 'a>
where
    R: BufRead + 'a,
{
    if args.is_empty() {
        Box::new(stdin.lines())
    } else {
        Box::new(args.into_iter().map(Ok))
    }
}
