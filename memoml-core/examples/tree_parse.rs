//! Example: Parse MemoML with a step trace, then navigate the tree.
//!
//! Run with: cargo run --example tree_parse

use memoml_core::{parse_traced, Node};

fn main() {
    let input = r#"# service configuration
name "billing";
debug;
listen 8080;
listen 8443;
database "postgres" {
    host "db.internal";
    pool { min 2; max 16; }
    replica null;
}
"#;

    let (root, steps) = match parse_traced(input) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("parse failed: {}", e);
            return;
        }
    };

    println!("=== Parser Steps ===\n");
    for step in &steps {
        println!("  {:>3}  {:<5}  {}", step.token.line().unwrap_or(0), step.state, step.token);
    }
    println!();

    println!("=== Document Tree ===\n");
    print_node(&root, 0);

    println!("\n=== Lookups ===\n");
    let ports: Vec<f64> = root.get_all("listen").filter_map(Node::value_number).collect();
    println!("listen: {:?}", ports);
    if let Some(pool) = root.get("database").and_then(|db| db.get("pool")) {
        println!("pool.max: {:?}", pool.get("max").and_then(Node::value_number));
    }
    println!("total entries: {}", root.descendant_count());
}

fn print_node(node: &Node<'_>, depth: usize) {
    let indent = "  ".repeat(depth);
    match &node.value {
        Some(value) => println!("{}{} = {}", indent, node.key, value),
        None => println!("{}{}", indent, node.key),
    }
    for child in node.children() {
        print_node(child, depth + 1);
    }
}
