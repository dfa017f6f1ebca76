// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The `sleigh` command line interface.
//!
//! Reads a toy allocation instance from a file (or stdin when no path is
//! given), runs the planner, and prints exactly one line: the maximum
//! number of children that can receive a wished-for toy, or `-1` when the
//! instance is malformed or infeasible. Diagnostics go to stderr through
//! `tracing` and never touch the answer line.

use clap::{arg, Command};
use sleigh_model::{loading::InstanceLoader, model::Model};
use sleigh_solver::planner::Planner;
use std::{path::PathBuf, time::Duration};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("sleigh")
        .about("Plans toy deliveries: maximizes the number of children served")
        .arg(
            arg!([INSTANCE] "Path to an instance file; reads stdin when omitted")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            arg!(--"time-limit-ms" <MILLIS> "Solving budget forwarded to the engine")
                .required(false)
                .value_parser(clap::value_parser!(u64)),
        )
}

fn load(path: Option<&PathBuf>) -> Option<Model> {
    let loaded = match path {
        Some(path) => InstanceLoader::new().from_path(path),
        None => InstanceLoader::new().from_reader(std::io::stdin().lock()),
    };

    match loaded {
        Ok(model) => Some(model),
        Err(err) => {
            tracing::error!(%err, "failed to load instance");
            None
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let path = matches.get_one::<PathBuf>("INSTANCE");
    let time_limit = matches
        .get_one::<u64>("time-limit-ms")
        .map(|&ms| Duration::from_millis(ms));

    let Some(model) = load(path) else {
        println!("-1");
        return;
    };
    tracing::debug!(%model, "instance loaded");

    let mut builder = Planner::builder();
    if let Some(limit) = time_limit {
        builder = builder.with_time_limit(limit);
    }
    let planner = builder.build();

    let outcome = planner.plan(&model);
    tracing::debug!(statistics = %outcome.statistics(), "planning finished");

    println!("{}", outcome.value());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_time_limit() {
        let matches = cli()
            .try_get_matches_from(["sleigh", "--time-limit-ms", "500"])
            .unwrap();
        assert_eq!(matches.get_one::<u64>("time-limit-ms"), Some(&500));
    }

    #[test]
    fn test_cli_rejects_time_limit_without_value() {
        assert!(cli()
            .try_get_matches_from(["sleigh", "--time-limit-ms"])
            .is_err());
    }

    #[test]
    fn test_cli_runs_without_arguments() {
        let matches = cli().try_get_matches_from(["sleigh"]).unwrap();
        assert!(matches.get_one::<PathBuf>("INSTANCE").is_none());
        assert!(matches.get_one::<u64>("time-limit-ms").is_none());
    }
}
