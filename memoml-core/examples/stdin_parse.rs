//! Example: Parse MemoML from stdin and print the tree as JSON.
//!
//! Run with: cargo run --example stdin_parse < ../samples/service.memoml

use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut input = Vec::new();
    if let Err(e) = std::io::stdin().read_to_end(&mut input) {
        eprintln!("failed to read stdin: {}", e);
        return ExitCode::FAILURE;
    }

    let code = match memoml_core::parse_bytes(&input) {
        Ok(root) => match serde_json::to_string_pretty(&root) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("failed to serialize tree: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    };
    code
}
