//! Integration tests for the shamir-solver CLI

use std::fs;
use std::process::Command;

const SOLVER: &str = env!("CARGO_BIN_EXE_shamir-solver");

fn extract_json(output: &str) -> Option<String> {
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('{') && trimmed.ends_with('}') {
            return Some(trimmed.to_string());
        }
    }
    None
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(SOLVER)
        .args(args)
        .output()
        .expect("Failed to run shamir-solver")
}

/// Solve with inline data flags the share off the polynomial
#[test]
fn test_solve_inline_data() {
    // f(x) = 10 + 3x: shares 2 and 5 tampered
    let data = r#"{"n":5,"k":2,"shares":[{"id":1,"value":"13"},{"id":2,"value":"17"},{"id":3,"value":"sum(10,9)"},{"id":4,"value":"multiply(2,11)"},{"id":5,"value":"1"}]}"#;
    let output = run(&["solve", "--data", data]);
    assert!(
        output.status.success(),
        "solve failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("WRONG SHARES DETECTED: Share 2, Share 5"));

    let json = extract_json(&stdout).expect("No JSON in solve output");
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["secret"], "10");
    assert_eq!(report["wrongShares"], serde_json::json!([2, 5]));
    assert_eq!(report["totalCombinations"], 10);
    assert_eq!(report["validCombinations"], 3);
    assert_eq!(report["exemplarShares"], serde_json::json!([1, 3]));
}

/// Solve reads input from a file
#[test]
fn test_solve_from_file() {
    let path = std::env::temp_dir().join(format!("shamir_solver_{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{"n":3,"k":2,"shares":[{"id":1,"value":"5"},{"id":2,"value":"7"},{"id":3,"value":"9"}]}"#,
    )
    .unwrap();

    let output = run(&["solve", "--file", path.to_str().unwrap()]);
    let _ = fs::remove_file(&path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&extract_json(&stdout).unwrap()).unwrap();
    assert_eq!(report["secret"], "3");
    assert_eq!(report["wrongShares"], serde_json::json!([]));
    assert_eq!(report["validPercentage"], 100.0);
}

/// Decode handles the base-encoded point format
#[test]
fn test_decode_encoded_points() {
    let data = r#"{"keys":{"n":4,"k":3},"1":{"base":"10","value":"4"},"2":{"base":"2","value":"111"},"3":{"base":"10","value":"12"},"6":{"base":"4","value":"213"}}"#;
    let output = run(&["decode", "--data", data]);
    assert!(
        output.status.success(),
        "decode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&extract_json(&stdout).unwrap()).unwrap();
    assert_eq!(report["secret"], "3");
    assert_eq!(report["type"], "decode");
}

/// Eval prints the expression value last
#[test]
fn test_eval_expression() {
    let output = run(&["eval", "--expr", "lcm(48, 18)"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().last(), Some("144"));
}

/// Unknown expressions fail with the offending text
#[test]
fn test_eval_rejects_unknown_expression() {
    let output = run(&["eval", "--expr", "foo(1,2)"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown expression format: foo(1,2)"));
}

/// The example input is accepted by solve
#[test]
fn test_example_round_trip() {
    let example = run(&["example"]);
    assert!(example.status.success());
    let input = String::from_utf8_lossy(&example.stdout).to_string();
    serde_json::from_str::<serde_json::Value>(&input).expect("example is not JSON");

    let output = run(&["solve", "--data", &input]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: serde_json::Value = serde_json::from_str(&extract_json(&stdout).unwrap()).unwrap();
    assert_eq!(report["totalCombinations"], 10);
}

/// Solve without input is an error
#[test]
fn test_solve_requires_input() {
    let output = run(&["solve"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--file or --data"));
}
