//! Demonstration of qrgate validators and path diagrams
//!
//! Run with: cargo run --example validator_demo

use qrgate::diagram::describe;
use qrgate::models::{example_invalid_payload, example_valid_payload};
use qrgate::{Strategy, ValidatorSet};

fn main() {
    println!("=== qrgate Validator Demo ===\n");

    let set = ValidatorSet::new();
    let samples = [
        example_valid_payload(),
        example_invalid_payload(),
        "ticket:550e8400-e29b-41d4-a716-446655440000:1.2:20240101T1200Z:id=1".to_string(),
        "WIFI:S:MyNet;T:WPA2;P:secret123;;".to_string(),
        "WIFI:S:Cafe;;".to_string(),
        "WIFI:T:WPA;P:x;;".to_string(),
        "WIFI:S:MyNet;T:WPA;P:secret".to_string(),
    ];

    for (idx, text) in samples.iter().enumerate() {
        println!("📍 Sample {}: {}", idx + 1, text);
        println!("{}", "-".repeat(40));

        for strategy in [Strategy::Dfa, Strategy::Nfa] {
            let (schema, result) = set.validate(text, strategy);
            let verdict = if result.is_valid() { "ACCEPT" } else { "REJECT" };

            println!("[{strategy}] schema={schema} -> {verdict}");
            println!("  path: {}", result.path().join(" → "));
            for message in result.messages() {
                println!("  error: {message}");
            }
            if let Some(data) = result.extracted_data() {
                match serde_json::to_string_pretty(data) {
                    Ok(json) => println!("  extracted_data: {json}"),
                    Err(e) => println!("  extracted_data unavailable: {e}"),
                }
            }
            println!("  dot: {}", describe(result.path(), schema, strategy));
        }
        println!();
    }
}
