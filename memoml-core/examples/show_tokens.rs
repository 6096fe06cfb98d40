//! Example: Print the token stream for a MemoML snippet.
//!
//! Run with: cargo run --example show_tokens

use memoml_core::Scanner;

fn main() {
    let inputs = [
        ("# only a comment\n", "comment"),
        ("flag;", "default value"),
        ("ratio .75; offset -2;", "numbers"),
        ("outer { inner \"x\"; }", "nested scope"),
        ("broken \"unterminated", "lexical error"),
    ];

    for (input, desc) in inputs {
        println!("=== {} ===", desc);
        println!("Input: {:?}", input);
        let result = Scanner::new(input).scan(|token| {
            println!("  {:>3}  {}", token.line().unwrap_or(0), token);
            Ok(())
        });
        if let Err(e) = result {
            println!("  error: {}", e);
        }
        println!();
    }
}
