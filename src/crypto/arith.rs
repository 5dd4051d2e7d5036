//! Modular Arithmetic Kernel
//!
//! GCD, LCM and the modular multiplicative inverse over arbitrary-precision
//! integers. Everything here is exact: operands are `num_bigint::BigInt`, so
//! share values of 20-40 decimal digits never overflow.

use crate::errors::{SolverError, SolverResult};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Greatest common divisor via the Euclidean algorithm.
///
/// Defined for any pair of integers. The result is non-negative and is zero
/// only when both inputs are zero.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let remainder = &a % &b;
        a = std::mem::replace(&mut b, remainder);
    }

    a.abs()
}

/// Least common multiple, `|a * b| / gcd(a, b)`.
///
/// Fails with [`SolverError::DivisionByZero`] when both inputs are zero.
pub fn lcm(a: &BigInt, b: &BigInt) -> SolverResult<BigInt> {
    let divisor = gcd(a, b);
    if divisor.is_zero() {
        return Err(SolverError::DivisionByZero);
    }
    Ok((a * b).abs() / divisor)
}

/// Canonical residue of `a` in `[0, m)`, including for negative `a`.
///
/// `m` must be positive.
pub fn normalize(a: &BigInt, m: &BigInt) -> BigInt {
    a.mod_floor(m)
}

/// Modular multiplicative inverse via the extended Euclidean algorithm.
///
/// Returns the unique `x` in `[0, m)` with `a * x ≡ 1 (mod m)`. The input is
/// canonicalized first, so negative `a` is accepted.
///
/// # Errors
/// [`SolverError::NoModularInverse`] when `gcd(a, m) != 1` or `m` is not positive.
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> SolverResult<BigInt> {
    if !m.is_positive() {
        return Err(SolverError::NoModularInverse);
    }

    let (mut old_r, mut r) = (normalize(a, m), m.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    // old_r is gcd(a, m) here
    if !old_r.is_one() {
        return Err(SolverError::NoModularInverse);
    }

    Ok(normalize(&old_s, m))
}
