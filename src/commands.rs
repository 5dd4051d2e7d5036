//! Command Layer
//!
//! Each command comes in two flavours, mirroring the CLI/WASM split:
//! - `*_core` returns a [`CommandResult`] (walkthrough text + JSON result)
//! - the plain function prints it for the terminal

use crate::errors::SolverError;
use crate::expression::Expression;
use crate::input::{detect_format, parse_encoded_points, parse_request, InputFormat};
use crate::reconstruct::{reconstruct_secret, ReconstructionResult};
use crate::CommandResult;
use anyhow::Result;
use serde::{Deserialize, Serialize};

const RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

/// Sample input shown by the UI and the `example` command.
pub const EXAMPLE_INPUT: &str = r#"{
  "n": 5,
  "k": 3,
  "shares": [
    {"id": 1, "value": "sum(123456789012345, 987654321098765)"},
    {"id": 2, "value": "multiply(12345, 67890)"},
    {"id": 3, "value": "lcm(48, 18)"},
    {"id": 4, "value": "hcf(48, 18)"},
    {"id": 5, "value": "divide(1000000, 7)"}
  ]
}"#;

/// JSON result of a reconstruction, in the shape the web UI renders.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReconstructionReport {
    /// Winning secret as a decimal string
    pub secret: String,
    /// Ids of shares never vouched for by a winning combination
    pub wrong_shares: Vec<u64>,
    pub total_combinations: usize,
    /// Combinations that produced the winning secret
    pub valid_combinations: usize,
    pub valid_percentage: f64,
    pub exemplar_shares: Vec<u64>,
    #[serde(rename = "type")]
    pub event_type: String,
}

impl From<&ReconstructionResult> for ReconstructionReport {
    fn from(result: &ReconstructionResult) -> Self {
        Self {
            secret: result.secret.to_string(),
            wrong_shares: result.corrupted_share_ids.clone(),
            total_combinations: result.total_combinations,
            valid_combinations: result.winning_combinations,
            valid_percentage: percentage(result.winning_combinations, result.total_combinations),
            exemplar_shares: result.exemplar_share_ids.clone(),
            event_type: "reconstruction".to_string(),
        }
    }
}

/// JSON result of solving a base-encoded point set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecodeReport {
    /// Exact integer constant term from the first k points
    pub secret: String,
    /// Consensus run over all points in the prime field
    pub consensus: ReconstructionReport,
    #[serde(rename = "type")]
    pub event_type: String,
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

fn push_verdict(out: &mut String, result: &ReconstructionResult) {
    out.push_str(&format!("✅ Secret found: {}\n", result.secret));
    out.push_str(&format!(
        "   Appears in {} out of {} combinations ({:.1}%)\n",
        result.winning_combinations,
        result.total_combinations,
        percentage(result.winning_combinations, result.total_combinations)
    ));
    out.push_str(&format!(
        "   First agreeing shares: {:?}\n\n",
        result.exemplar_share_ids
    ));

    if result.corrupted_share_ids.is_empty() {
        out.push_str("✅ NO WRONG SHARES DETECTED\n");
    } else {
        let listed: Vec<String> = result
            .corrupted_share_ids
            .iter()
            .map(|id| format!("Share {}", id))
            .collect();
        out.push_str(&format!("⚠️  WRONG SHARES DETECTED: {}\n", listed.join(", ")));
    }
}

/// Reconstruct the secret from a share list and print the walkthrough.
pub fn solve(data: &str) -> Result<()> {
    let cmd_result = solve_core(data)?;

    println!("{}", cmd_result.output);
    print!("{}", RULE);
    println!("📋 Result JSON:");
    println!("{}\n", cmd_result.result);

    Ok(())
}

/// Core function for reconstruction (returns structured output).
///
/// Base-encoded point sets are detected and routed to [`solve_encoded_core`].
pub fn solve_core(data: &str) -> Result<CommandResult> {
    if detect_format(data)? == InputFormat::EncodedPoints {
        return solve_encoded_core(data);
    }

    let request = parse_request(data)?;
    let result = reconstruct_secret(&request)?;

    let mut out = String::new();
    out.push_str("Shamir's Secret Sharing - Reconstruct & Detect Wrong Shares\n\n");
    out.push_str(RULE);

    out.push_str("📊 Configuration:\n");
    out.push_str(&format!("   N (total shares): {}\n", request.n));
    out.push_str(&format!("   K (minimum required): {}\n", request.k));
    out.push_str(&format!("   Polynomial degree: {}\n\n", request.k - 1));

    out.push_str("🔢 Evaluating shares:\n");
    for (share, evaluated) in request.shares.iter().zip(&result.shares) {
        let value = evaluated.value.to_string();
        if share.raw_value.trim() == value {
            out.push_str(&format!("   Share {}: {}\n", share.id, value));
        } else {
            out.push_str(&format!("   Share {}: {} = {}\n", share.id, share.raw_value, value));
        }
    }
    out.push('\n');

    out.push_str(&format!(
        "🔍 Testing {} combinations of {} shares...\n",
        result.total_combinations, request.k
    ));
    if result.skipped_combinations > 0 {
        out.push_str(&format!(
            "   Skipped {} combinations with repeated x-coordinates\n",
            result.skipped_combinations
        ));
    }
    out.push_str(&format!(
        "   {} distinct candidate secrets\n\n",
        result.distinct_candidates
    ));

    out.push_str("🧠 How detection works:\n");
    out.push_str("   1. Every k-subset is interpolated at x = 0 (mod 2^127 - 1)\n");
    out.push_str("   2. The most frequent result is taken as the secret\n");
    out.push_str("   3. Shares that never appear in an agreeing subset are flagged\n\n");

    push_verdict(&mut out, &result);

    let report = ReconstructionReport::from(&result);
    let result_json = serde_json::to_string(&report)?;

    Ok(CommandResult {
        output: out,
        result: result_json,
    })
}

/// Solve a base-encoded point set and print the walkthrough.
pub fn solve_encoded(data: &str) -> Result<()> {
    let cmd_result = solve_encoded_core(data)?;

    println!("{}", cmd_result.output);
    print!("{}", RULE);
    println!("📋 Result JSON:");
    println!("{}\n", cmd_result.result);

    Ok(())
}

/// Core function for base-encoded point sets.
///
/// Reports the exact integer constant term through the first k points, plus
/// a consensus run over every point to flag inconsistent ones.
pub fn solve_encoded_core(data: &str) -> Result<CommandResult> {
    let set = parse_encoded_points(data)?;

    let mut out = String::new();
    out.push_str("Polynomial Constant Term - Base-Encoded Points\n\n");
    out.push_str(RULE);

    out.push_str("📊 Configuration:\n");
    out.push_str(&format!("   n (total roots): {}\n", set.n));
    out.push_str(&format!("   k (minimum required): {}\n", set.k));
    out.push_str(&format!(
        "   Polynomial degree (m): {}\n\n",
        set.k.saturating_sub(1)
    ));

    out.push_str("🔢 Decoding points:\n");
    for point in &set.points {
        out.push_str(&format!(
            "   x={}, base={}, encoded='{}' -> y={}\n",
            point.x, point.base, point.encoded, point.y
        ));
    }
    out.push('\n');

    let secret = set.integer_secret()?;
    let selected: Vec<u64> = set.points.iter().take(set.k).map(|p| p.x).collect();
    out.push_str(&format!(
        "🧮 Exact Lagrange interpolation over x = {:?}\n",
        selected
    ));
    out.push_str(&format!("   Secret (c): {}\n\n", secret));

    let result = reconstruct_secret(&set.to_request())?;
    out.push_str(&format!(
        "🔍 Cross-checking all {} combinations (mod 2^127 - 1)...\n",
        result.total_combinations
    ));
    push_verdict(&mut out, &result);

    let report = DecodeReport {
        secret: secret.to_string(),
        consensus: ReconstructionReport::from(&result),
        event_type: "decode".to_string(),
    };
    let result_json = serde_json::to_string(&report)?;

    Ok(CommandResult {
        output: out,
        result: result_json,
    })
}

/// Evaluate a single share expression and print it.
pub fn evaluate(expr: &str) -> Result<()> {
    let cmd_result = evaluate_core(expr)?;
    println!("{}", cmd_result.output);
    println!("{}", cmd_result.result);
    Ok(())
}

/// Core function for expression evaluation; `result` is the decimal value.
pub fn evaluate_core(expr: &str) -> Result<CommandResult> {
    let parsed = Expression::parse(expr)?;
    let value = parsed.evaluate()?;

    let mut out = String::new();
    out.push_str(&format!("Expression: {}\n", expr.trim()));
    out.push_str(&format!("Parsed as:  {}\n", parsed));

    Ok(CommandResult {
        output: out,
        result: value.to_string(),
    })
}

/// Sample input for the `solve` command.
pub fn example_input() -> &'static str {
    EXAMPLE_INPUT
}

/// Render an error the way the UI shows it.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<SolverError>() {
        Some(SolverError::NoConsensus) => format!("Unable to reconstruct: {}", err),
        Some(_) | None => format!("Error: {}", err),
    }
}
