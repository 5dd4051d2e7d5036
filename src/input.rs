//! Input Ingestion
//!
//! Turns raw JSON into structured requests for the reconstruction engine.
//! Two layouts are understood:
//!
//! **Share list** (the web UI format):
//! ```json
//! { "n": 5, "k": 3, "shares": [ {"id": 1, "value": "sum(2,3)"}, ... ] }
//! ```
//! `keys` is accepted in place of `shares`, `key` in place of `id`, and a
//! missing id defaults to the 1-based position.
//!
//! **Base-encoded points**:
//! ```json
//! { "keys": {"n": 4, "k": 3}, "1": {"base": "10", "value": "4"}, "2": {"base": "2", "value": "111"} }
//! ```
//! Each non-`keys` entry is a point whose object key is x and whose value is
//! written in the given base (2-36).

use crate::crypto::lagrange::interpolate_over_integers;
use crate::crypto::Point;
use crate::errors::{SolverError, SolverResult};
use crate::reconstruct::{ReconstructionRequest, Share};
use anyhow::{anyhow, bail, Context, Result};
use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Which layout a JSON document uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    ShareList,
    EncodedPoints,
}

/// Guess the layout: an object `keys` entry holding `n`/`k` means base-encoded points.
pub fn detect_format(data: &str) -> Result<InputFormat> {
    let value: Value = serde_json::from_str(data).context("Input is not valid JSON")?;
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("Input must be a JSON object"))?;

    match object.get("keys") {
        Some(Value::Object(_)) if !object.contains_key("n") => Ok(InputFormat::EncodedPoints),
        _ => Ok(InputFormat::ShareList),
    }
}

#[derive(Deserialize, Debug)]
struct RawShare {
    #[serde(default, alias = "key")]
    id: Option<Value>,
    value: Value,
}

#[derive(Deserialize, Debug)]
struct RawRequest {
    n: usize,
    k: usize,
    #[serde(default)]
    shares: Option<Vec<RawShare>>,
    #[serde(default)]
    keys: Option<Vec<RawShare>>,
}

/// Parse the share-list layout into a [`ReconstructionRequest`].
///
/// Checks performed here, before any share is evaluated:
/// - the share array is present (`shares` or `keys`)
/// - its length equals `n`
/// - ids are pairwise distinct
pub fn parse_request(data: &str) -> Result<ReconstructionRequest> {
    let raw: RawRequest =
        serde_json::from_str(data).context("Expected {\"n\", \"k\", \"shares\": [...]}")?;

    if raw.shares.is_some() && raw.keys.is_some() {
        warn!("both \"shares\" and \"keys\" given; using \"shares\"");
    }

    let raw_shares = raw
        .shares
        .or(raw.keys)
        .ok_or_else(|| anyhow!("Invalid input: missing \"shares\" array"))?;

    if raw_shares.len() != raw.n {
        return Err(SolverError::InvalidShareCount {
            expected: raw.n,
            actual: raw_shares.len(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    let mut shares = Vec::with_capacity(raw_shares.len());

    for (index, raw_share) in raw_shares.into_iter().enumerate() {
        let id = match raw_share.id {
            Some(raw_id) => share_id(&raw_id)?,
            None => index as u64 + 1,
        };
        if !seen.insert(id) {
            return Err(SolverError::DuplicateShareId(id).into());
        }

        let value = match raw_share.value {
            Value::String(s) => s,
            Value::Number(num) => num.to_string(),
            other => bail!("Share {} has a non-text value: {}", id, other),
        };

        shares.push(Share::new(id, value));
    }

    Ok(ReconstructionRequest {
        n: raw.n,
        k: raw.k,
        shares,
    })
}

/// A point from the base-encoded layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPoint {
    pub x: u64,
    pub base: u32,
    pub encoded: String,
    pub y: BigInt,
}

/// A decoded base-encoded point set, sorted by x.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPointSet {
    pub n: usize,
    pub k: usize,
    pub points: Vec<EncodedPoint>,
}

impl EncodedPointSet {
    /// Hand the decoded points to the consensus engine as literal shares.
    pub fn to_request(&self) -> ReconstructionRequest {
        ReconstructionRequest {
            n: self.n,
            k: self.k,
            shares: self
                .points
                .iter()
                .map(|p| Share::new(p.x, p.y.to_string()))
                .collect(),
        }
    }

    /// Exact integer secret from the first k points (lowest x).
    pub fn integer_secret(&self) -> SolverResult<BigInt> {
        if self.points.len() < self.k {
            return Err(SolverError::InsufficientPoints {
                needed: self.k,
                available: self.points.len(),
            });
        }

        let selected: Vec<Point> = self
            .points
            .iter()
            .take(self.k)
            .map(|p| Point::new(p.x, p.y.clone()))
            .collect();

        interpolate_over_integers(&selected)
    }
}

#[derive(Deserialize, Debug)]
struct RawKeys {
    n: usize,
    k: usize,
}

/// Parse the base-encoded layout.
pub fn parse_encoded_points(data: &str) -> Result<EncodedPointSet> {
    let value: Value = serde_json::from_str(data).context("Input is not valid JSON")?;
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("Input must be a JSON object"))?;

    let keys_value = object
        .get("keys")
        .ok_or_else(|| anyhow!("Missing \"keys\": {{\"n\", \"k\"}}"))?;
    let keys: RawKeys =
        serde_json::from_value(keys_value.clone()).context("Invalid \"keys\" entry")?;

    let mut points = Vec::new();
    for (key, entry) in object {
        if key == "keys" {
            continue;
        }

        let x: u64 = key
            .parse()
            .with_context(|| format!("Point key '{}' is not a non-negative integer", key))?;
        let base = json_u32(entry.get("base")).with_context(|| format!("Point {}: bad base", x))?;
        let encoded = entry
            .get("value")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("Point {}: missing string \"value\"", x))?
            .to_string();
        let y = decode_from_base(&encoded, base)?;

        points.push(EncodedPoint {
            x,
            base,
            encoded,
            y,
        });
    }

    points.sort_by_key(|p| p.x);

    if points.len() != keys.n {
        return Err(SolverError::InvalidShareCount {
            expected: keys.n,
            actual: points.len(),
        }
        .into());
    }

    Ok(EncodedPointSet {
        n: keys.n,
        k: keys.k,
        points,
    })
}

/// Base given either as `"16"` or `16`.
/// Share ids may be written as numbers or as numeric strings.
fn share_id(value: &Value) -> Result<u64> {
    match value {
        Value::Number(num) => num
            .as_u64()
            .ok_or_else(|| anyhow!("Share id {} is not a non-negative integer", num)),
        Value::String(s) => s
            .trim()
            .parse()
            .with_context(|| format!("Share id \"{}\" is not a non-negative integer", s)),
        other => bail!("Share id must be a number, got {}", other),
    }
}

fn json_u32(value: Option<&Value>) -> Result<u32> {
    match value {
        Some(Value::String(s)) => Ok(s.trim().parse()?),
        Some(Value::Number(num)) => num
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| anyhow!("{} is out of range", num)),
        _ => bail!("missing"),
    }
}

/// Decode digits `0-9a-zA-Z` written in `base` (2..=36). Letters are case-insensitive.
pub fn decode_from_base(value: &str, base: u32) -> SolverResult<BigInt> {
    if !(2..=36).contains(&base) {
        return Err(SolverError::InvalidBase(base));
    }

    let radix = BigInt::from(base);
    let mut result = BigInt::from(0);

    for c in value.chars() {
        let digit = c
            .to_digit(36)
            .filter(|&d| d < base)
            .ok_or(SolverError::InvalidDigit { digit: c, base })?;
        result = result * &radix + digit;
    }

    Ok(result)
}
