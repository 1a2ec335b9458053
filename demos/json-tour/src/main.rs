//! JSON Tour Example
//!
//! Reads an instance in the `{"n", "dist", "xCord", "yCord"}` format, where
//! `n` counts the customers and node 0 is the depot, solves it to optimality
//! and prints the summary. The console feature streams the iteration table
//! while the solver runs.
//!
//! ```text
//! cargo run -p json-tour -- demos/json-tour/instance.json
//! ```

use std::process::ExitCode;

use tourforge::prelude::*;

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/instance.json").to_string());

    match solve_file(&path) {
        Ok(solution) => {
            println!("{}", solution.summary());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}: {}", path, err);
            ExitCode::FAILURE
        }
    }
}
