//! # tweet-sift CLI
//!
//! Command-line interface for the archive filter.
//!
//! ## Usage
//! ```bash
//! tweet-sift ~/Downloads/tweets.zip --home-account 14235 --since 2015-01-01
//! tweet-sift tweets.zip --threshold 5 --exclude-tag '#nowplaying' --format json
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            cli::report_error(&error);
            ExitCode::FAILURE
        }
    }
}
