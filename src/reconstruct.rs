//! Secret Reconstruction with Corrupted-Share Detection
//!
//! Given n shares of a k-of-n Shamir sharing, some of which may have been
//! tampered with, this module recovers the secret and names the bad shares.
//!
//! ## Procedure
//!
//! 1. Every share's textual value is evaluated into an integer (y-coordinate)
//! 2. All C(n,k) subsets of k shares are enumerated
//! 3. Each subset is interpolated at x = 0 over GF(2^127 - 1), giving a candidate
//! 4. Candidates are tallied; the most frequent one wins (first seen on ties)
//! 5. Every subset that reproduced the winner vouches for its members; shares
//!    nobody vouched for are reported as corrupted
//!
//! Subsets that cannot be interpolated (two shares with the same x) are
//! skipped: they neither vote nor vouch.
//!
//! Detection is a coverage argument, not a proof. It holds when fewer than
//! n - k + 1 shares are corrupted and genuine k-subsets agree on the secret.

use crate::combinations::{binomial, Combinations};
use crate::crypto::{Point, PrimeField};
use crate::errors::{SolverError, SolverResult};
use crate::expression::evaluate_expression;
use num_bigint::BigInt;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, info_span, trace};

/// One participant's share as received: an id (x-coordinate) and a textual value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    pub id: u64,
    pub raw_value: String,
}

impl Share {
    pub fn new(id: u64, raw_value: impl Into<String>) -> Self {
        Self {
            id,
            raw_value: raw_value.into(),
        }
    }
}

/// A share whose value has been evaluated to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedShare {
    pub id: u64,
    pub value: BigInt,
}

impl EvaluatedShare {
    pub fn evaluate(share: &Share) -> SolverResult<Self> {
        let value = evaluate_expression(&share.raw_value)?;
        debug!(id = share.id, raw = %share.raw_value, value = %value, "evaluated share");
        Ok(Self {
            id: share.id,
            value,
        })
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.id, self.value.clone())
    }
}

/// Input to the engine. The caller is expected to have normalized raw input
/// (see [`crate::input`]); the declared counts are still re-checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionRequest {
    /// Total number of shares
    pub n: usize,
    /// Threshold (minimum shares needed)
    pub k: usize,
    pub shares: Vec<Share>,
}

/// Outcome of a reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionResult {
    /// Winning secret, in `[0, P)`
    pub secret: BigInt,
    /// Ids never vouched for by a winning subset, in input order
    pub corrupted_share_ids: Vec<u64>,
    /// C(n, k)
    pub total_combinations: usize,
    /// Number of subsets that produced the winning secret
    pub winning_combinations: usize,
    /// Ids of the first subset that produced the winning secret
    pub exemplar_share_ids: Vec<u64>,
    /// Number of distinct candidate secrets seen
    pub distinct_candidates: usize,
    /// Subsets skipped because they could not be interpolated
    pub skipped_combinations: usize,
    /// The evaluated shares, in input order
    pub shares: Vec<EvaluatedShare>,
}

/// A candidate secret with its vote count.
#[derive(Debug, Clone)]
struct Candidate {
    secret: BigInt,
    count: usize,
    first_seen: usize,
    exemplar: Vec<usize>,
}

/// Ordered association from candidate value to its tally. Candidates are kept
/// in first-seen order so ties resolve without relying on hash order.
#[derive(Debug, Default)]
struct Tally {
    slots: HashMap<BigInt, usize>,
    candidates: Vec<Candidate>,
}

impl Tally {
    /// Count one vote; returns the candidate's slot.
    fn record(&mut self, secret: BigInt, combo_index: usize, combo: &[usize]) -> usize {
        if let Some(&slot) = self.slots.get(&secret) {
            self.candidates[slot].count += 1;
            return slot;
        }

        let slot = self.candidates.len();
        self.slots.insert(secret.clone(), slot);
        self.candidates.push(Candidate {
            secret,
            count: 1,
            first_seen: combo_index,
            exemplar: combo.to_vec(),
        });
        slot
    }

    /// Highest count wins; among equal counts the earliest first_seen wins.
    fn winner(&self) -> Option<(usize, &Candidate)> {
        self.candidates
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, &Candidate)>, (slot, c)| match best {
                Some((_, b))
                    if b.count > c.count || (b.count == c.count && b.first_seen <= c.first_seen) =>
                {
                    best
                }
                _ => Some((slot, c)),
            })
    }
}

/// The consensus reconstruction engine.
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    field: PrimeField,
}

impl Reconstructor {
    /// Engine over the default field GF(2^127 - 1).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(field: PrimeField) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    /// Reconstruct the secret and detect corrupted shares.
    ///
    /// Cost is C(n,k) interpolations of O(k²) field operations each. The
    /// work is done synchronously; callers that need responsiveness should
    /// run it on a separate thread and discard the result to cancel.
    ///
    /// # Errors
    /// - [`SolverError::InvalidShareCount`] / [`SolverError::InvalidThreshold`]
    ///   before anything is evaluated
    /// - any evaluation error from the first share that fails to evaluate
    /// - [`SolverError::NoConsensus`] when no subset could be interpolated
    pub fn reconstruct(
        &self,
        request: &ReconstructionRequest,
    ) -> SolverResult<ReconstructionResult> {
        let span = info_span!("reconstruct", n = request.n, k = request.k);
        let _enter = span.enter();

        if request.shares.len() != request.n {
            return Err(SolverError::InvalidShareCount {
                expected: request.n,
                actual: request.shares.len(),
            });
        }
        if request.k == 0 || request.k > request.n {
            return Err(SolverError::InvalidThreshold {
                k: request.k,
                n: request.n,
            });
        }

        let shares = request
            .shares
            .iter()
            .map(EvaluatedShare::evaluate)
            .collect::<SolverResult<Vec<_>>>()?;

        self.reconstruct_evaluated(shares, request.k)
    }

    /// Same as [`Reconstructor::reconstruct`] for shares that are already integers.
    pub fn reconstruct_evaluated(
        &self,
        shares: Vec<EvaluatedShare>,
        k: usize,
    ) -> SolverResult<ReconstructionResult> {
        let n = shares.len();
        if k == 0 || k > n {
            return Err(SolverError::InvalidThreshold { k, n });
        }

        match binomial(n, k) {
            Some(expected) => info!(expected, "enumerating combinations"),
            None => info!("enumerating combinations (count exceeds u64)"),
        }

        let points: Vec<Point> = shares.iter().map(EvaluatedShare::to_point).collect();

        // First pass: interpolate every subset once and remember its candidate slot
        let mut tally = Tally::default();
        let mut outcomes: Vec<Option<usize>> = Vec::new();

        for (combo_index, combo) in Combinations::new(n, k).enumerate() {
            let subset: Vec<Point> = combo.iter().map(|&i| points[i].clone()).collect();
            let ids: Vec<u64> = combo.iter().map(|&i| shares[i].id).collect();

            let slot = match self.field.interpolate_at_zero(&subset) {
                Ok(secret) => {
                    trace!(?ids, secret = %secret, "combination interpolated");
                    Some(tally.record(secret, combo_index, &combo))
                }
                Err(e) => {
                    debug!(?ids, error = %e, "combination skipped");
                    None
                }
            };
            outcomes.push(slot);
        }

        let total_combinations = outcomes.len();
        let skipped_combinations = outcomes.iter().filter(|slot| slot.is_none()).count();

        let (winning_slot, winner) = tally.winner().ok_or(SolverError::NoConsensus)?;

        // Second pass: replay the same enumeration; winning subsets vouch for their members
        let mut vouched: HashSet<u64> = HashSet::new();
        for (combo, slot) in Combinations::new(n, k).zip(&outcomes) {
            if *slot == Some(winning_slot) {
                vouched.extend(combo.iter().map(|&i| shares[i].id));
            }
        }

        let corrupted_share_ids: Vec<u64> = shares
            .iter()
            .map(|s| s.id)
            .filter(|id| !vouched.contains(id))
            .collect();

        info!(
            secret = %winner.secret,
            votes = winner.count,
            total = total_combinations,
            corrupted = ?corrupted_share_ids,
            "reconstruction complete"
        );

        Ok(ReconstructionResult {
            secret: winner.secret.clone(),
            corrupted_share_ids,
            total_combinations,
            winning_combinations: winner.count,
            exemplar_share_ids: winner.exemplar.iter().map(|&i| shares[i].id).collect(),
            distinct_candidates: tally.candidates.len(),
            skipped_combinations,
            shares,
        })
    }
}

/// Reconstruct over the default field.
pub fn reconstruct_secret(request: &ReconstructionRequest) -> SolverResult<ReconstructionResult> {
    Reconstructor::new().reconstruct(request)
}
