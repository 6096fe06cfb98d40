//! Test harness for running tests with stochastic variations

use crate::common::{ExpectedToken, Gen, TestCase};
use memoml_core::{parse, Error, Scanner, Token, TokenKind};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Variant name of an error, as written in fixtures
pub fn error_name(err: &Error) -> &'static str {
    match err {
        Error::InvalidInput { .. } => "InvalidInput",
        Error::UnterminatedString { .. } => "UnterminatedString",
        Error::UnexpectedCharacter { .. } => "UnexpectedCharacter",
        Error::MalformedNumber { .. } => "MalformedNumber",
        Error::UnexpectedToken { .. } => "UnexpectedToken",
        Error::TooDeep { .. } => "TooDeep",
        Error::IncompleteDocument { .. } => "IncompleteDocument",
    }
}

/// Format token for comparison (simplified, no locations)
pub fn format_token(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Identifier | TokenKind::Number => {
            format!("{} {:?}", token.kind, token.lexeme.unwrap_or(""))
        }
        TokenKind::String => {
            let text = token.value.as_ref().and_then(|v| v.as_str()).unwrap_or("");
            format!("{} {:?}", token.kind, text)
        }
        _ => token.kind.name().to_string(),
    }
}

/// Format expected token for comparison
fn format_expected(token: &ExpectedToken) -> String {
    match token {
        ExpectedToken::Bare(kind) => kind.clone(),
        ExpectedToken::WithText(kind, text) => format!("{} {:?}", kind, text),
    }
}

/// Scan input, returning formatted tokens or the formatted scan error
fn collect_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let result = Scanner::new(input).scan(|token| {
        tokens.push(format_token(&token));
        Ok(())
    });
    if let Err(err) = result {
        tokens.push(format!("Error {}", error_name(&err)));
    }
    tokens
}

/// Check the parse outcome (tree or error) against the case
fn check_outcome(case: &TestCase, input: &str, exact: bool, errors: &mut Vec<String>) {
    // Token-only cases need not be complete documents.
    if case.tree.is_none() && case.error.is_none() {
        return;
    }
    match (parse(input), &case.error) {
        (Err(err), Some(expected)) => {
            if error_name(&err) != expected {
                errors.push(format!("Expected error {}, got {:?}", expected, err));
            }
        }
        (Err(err), None) => errors.push(format!("Unexpected error: {}", err)),
        (Ok(_), Some(expected)) => errors.push(format!("Expected error {}, parse succeeded", expected)),
        (Ok(root), None) => {
            let Some(expected) = &case.tree else {
                return;
            };
            let actual = match serde_json::to_value(&root) {
                Ok(value) => value,
                Err(e) => {
                    errors.push(format!("Tree did not serialize: {}", e));
                    return;
                }
            };
            if exact {
                if &actual != expected {
                    errors.push(format!("Tree mismatch:\n  expected {}\n  actual   {}", expected, actual));
                }
            } else if !children_in_order(&actual, expected) {
                errors.push(format!("Expected children missing from {}", actual));
            }
        }
    }
}

/// Check that every expected root child appears among the actual root
/// children, in order.
fn children_in_order(actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
    let empty = Vec::new();
    let actual = actual["children"].as_array().unwrap_or(&empty);
    let expected = expected["children"].as_array().unwrap_or(&empty);
    let mut remaining = actual.iter();
    expected.iter().all(|e| remaining.any(|a| a == e))
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    let input = case.memoml.clone();
    let actual = collect_tokens(&input);
    let expected: Vec<String> = case.tokens.iter().map(format_expected).collect();

    let mut errors = Vec::new();

    if !expected.is_empty() {
        if actual.len() != expected.len() {
            errors.push(format!(
                "Token count mismatch: expected {}, got {}",
                expected.len(),
                actual.len()
            ));
        }
        for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
            if act != exp {
                errors.push(format!("Token {}: expected '{}', got '{}'", i, exp, act));
            }
        }
    }

    check_outcome(case, &input, true, &mut errors);

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual,
        seed: 0,
        errors,
    }
}

/// Replace each whitespace run outside strings and comments with random
/// whitespace.
fn vary_whitespace(input: &str, gen: &mut Gen) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    let mut in_string = false;
    let mut in_comment = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_comment {
            out.push(c);
            in_comment = c != '\n';
            continue;
        }
        match c {
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            '#' if !in_string => {
                in_comment = true;
                out.push(c);
            }
            ' ' | '\t' if !in_string => {
                while matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                }
                out.push_str(&gen.whitespace());
            }
            _ => out.push(c),
        }
    }
    out
}

/// Run test with stochastic variations
///
/// Applies independent variations:
/// - 40% chance of generated entries above
/// - Whitespace runs replaced with random whitespace and comments
/// - 40% chance of generated entries below (valid cases only)
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = String::new();

    if gen.chance(0.4) {
        let count = 1 + gen.geometric(0.5);
        input.push_str(&gen.document(count, 2));
    }

    input.push_str(&vary_whitespace(&case.memoml, gen));

    // Text after an error case could repair it (e.g. close a string).
    if case.error.is_none() && gen.chance(0.4) {
        input.push('\n');
        let count = 1 + gen.geometric(0.5);
        input.push_str(&gen.document(count, 2));
    }

    let actual = collect_tokens(&input);
    let expected: Vec<String> = case.tokens.iter().map(format_expected).collect();

    // Expected tokens must appear in order (subsequence match) because the
    // wrapping context adds tokens of its own.
    let mut errors = Vec::new();
    let mut exp_idx = 0;
    for act in &actual {
        if exp_idx < expected.len() && act == &expected[exp_idx] {
            exp_idx += 1;
        }
    }
    if exp_idx < expected.len() {
        errors.push(format!(
            "Missing expected tokens starting at index {}: {:?}",
            exp_idx,
            &expected[exp_idx..]
        ));
    }

    check_outcome(case, &input, false, &mut errors);

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual,
        seed: gen.seed,
        errors,
    }
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set MEMOML_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", self.input);
        eprintln!("\nExpected tokens:");
        for (i, e) in self.expected.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nActual tokens:");
        for (i, e) in self.actual.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
