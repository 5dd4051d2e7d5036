//! Lagrange Interpolation
//!
//! Recovers the constant term of the polynomial through a set of points.
//! The working variant runs over the prime field P = 2^127 - 1 and is what the
//! reconstruction engine calls once per share combination. An exact variant
//! over the integers is kept for base-encoded point sets, whose secrets are
//! plain integers rather than field elements.
//!
//! λ_i(x) = Π_{j≠i} (x - x_j) / (x_i - x_j)
//! f(x)   = Σ_i y_i · λ_i(x)

use crate::crypto::arith::{gcd, mod_inverse, normalize};
use crate::errors::{SolverError, SolverResult};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// A sample on the secret polynomial: x is the share id, y is the share value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: BigInt,
    pub y: BigInt,
}

impl Point {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// Arithmetic modulo a prime.
///
/// Every nonzero residue is invertible, so division is done exclusively via
/// [`mod_inverse`]. Intermediate products are reduced immediately to keep
/// operands below the modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigInt,
}

impl Default for PrimeField {
    /// The Mersenne prime 2^127 - 1.
    fn default() -> Self {
        Self::new(BigInt::from(i128::MAX))
    }
}

impl PrimeField {
    pub fn new(modulus: BigInt) -> Self {
        Self { modulus }
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Canonical representative in `[0, P)`.
    pub fn reduce(&self, a: &BigInt) -> BigInt {
        normalize(a, &self.modulus)
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a * b))
    }

    fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.reduce(&(a - b))
    }

    /// Compute the Lagrange coefficient of `points[index]` at `target_x`.
    ///
    /// # Errors
    /// - [`SolverError::PointIndexOutOfRange`] when `index >= points.len()`
    /// - [`SolverError::NoModularInverse`] when another point shares the same
    ///   x-coordinate (mod P), which makes the denominator zero
    pub fn lagrange_coefficient_at(
        &self,
        index: usize,
        points: &[Point],
        target_x: &BigInt,
    ) -> SolverResult<BigInt> {
        let x_i = &points
            .get(index)
            .ok_or(SolverError::PointIndexOutOfRange {
                index,
                len: points.len(),
            })?
            .x;
        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();

        for (j, other) in points.iter().enumerate() {
            if j == index {
                continue;
            }

            // numerator *= (x - x_j)
            numerator = self.mul(&numerator, &self.sub(target_x, &other.x));
            // denominator *= (x_i - x_j)
            denominator = self.mul(&denominator, &self.sub(x_i, &other.x));
        }

        let denominator_inv = mod_inverse(&denominator, &self.modulus)?;
        Ok(self.mul(&numerator, &denominator_inv))
    }

    /// Evaluate the interpolating polynomial of `points` at `target_x`.
    pub fn interpolate_at(&self, points: &[Point], target_x: &BigInt) -> SolverResult<BigInt> {
        if points.is_empty() {
            return Err(SolverError::EmptyPointSet);
        }

        let mut result = BigInt::zero();
        for (i, point) in points.iter().enumerate() {
            let lambda = self.lagrange_coefficient_at(i, points, target_x)?;
            let term = self.mul(&self.reduce(&point.y), &lambda);
            result = self.reduce(&(result + term));
        }

        Ok(result)
    }

    /// Recover the constant term (the secret) of the polynomial through `points`.
    ///
    /// O(k²) field operations for k points.
    pub fn interpolate_at_zero(&self, points: &[Point]) -> SolverResult<BigInt> {
        self.interpolate_at(points, &BigInt::zero())
    }
}

/// Exact Lagrange interpolation at x = 0 over the integers.
///
/// Terms are accumulated as a reduced fraction, so no precision is lost. The
/// polynomial is expected to have an integer constant term.
///
/// # Errors
/// - [`SolverError::EmptyPointSet`] for no points
/// - [`SolverError::DivisionByZero`] when two points share an x-coordinate
/// - [`SolverError::NonIntegralSecret`] when the constant term is fractional
pub fn interpolate_over_integers(points: &[Point]) -> SolverResult<BigInt> {
    if points.is_empty() {
        return Err(SolverError::EmptyPointSet);
    }

    let mut acc_num = BigInt::zero();
    let mut acc_den = BigInt::one();

    for (i, point) in points.iter().enumerate() {
        let mut numerator = point.y.clone();
        let mut denominator = BigInt::one();

        for (j, other) in points.iter().enumerate() {
            if i != j {
                // For x = 0: (0 - x_j) / (x_i - x_j)
                numerator *= -&other.x;
                denominator *= &point.x - &other.x;
            }
        }

        if denominator.is_zero() {
            return Err(SolverError::DivisionByZero);
        }

        acc_num = &acc_num * &denominator + &numerator * &acc_den;
        acc_den *= denominator;

        let common = gcd(&acc_num, &acc_den);
        if !common.is_zero() && !common.is_one() {
            acc_num /= &common;
            acc_den /= &common;
        }
    }

    if acc_den.is_negative() {
        acc_num = -acc_num;
        acc_den = -acc_den;
    }

    if !acc_den.is_one() {
        return Err(SolverError::NonIntegralSecret {
            numerator: acc_num.to_string(),
            denominator: acc_den.to_string(),
        });
    }

    Ok(acc_num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Evaluate c_0 + c_1 x + ... at x over the integers.
    fn evaluate_poly(coeffs: &[BigInt], x: &BigInt) -> BigInt {
        coeffs
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, c| acc * x + c)
    }

    fn points_on(coeffs: &[BigInt], xs: &[u64]) -> Vec<Point> {
        xs.iter()
            .map(|&x| {
                let x = BigInt::from(x);
                let y = evaluate_poly(coeffs, &x);
                Point { x, y }
            })
            .collect()
    }

    #[test]
    fn test_recovers_constant_term() {
        // f(x) = 3 + 2x + x^2
        let coeffs: Vec<BigInt> = [3, 2, 1].iter().map(|&c| BigInt::from(c)).collect();
        let points = points_on(&coeffs, &[1, 2, 3]);

        let field = PrimeField::default();
        assert_eq!(field.interpolate_at_zero(&points).unwrap(), BigInt::from(3));
        assert_eq!(
            field.interpolate_at(&points, &BigInt::from(4)).unwrap(),
            BigInt::from(27)
        );
    }

    #[test]
    fn test_coefficients_sum_to_one() {
        let field = PrimeField::default();
        let points = vec![Point::new(1, 0), Point::new(2, 0), Point::new(5, 0)];

        let mut sum = BigInt::zero();
        for i in 0..points.len() {
            sum += field
                .lagrange_coefficient_at(i, &points, &BigInt::zero())
                .unwrap();
        }
        assert_eq!(field.reduce(&sum), BigInt::one());
    }

    #[test]
    fn test_coefficient_index_out_of_range() {
        let field = PrimeField::default();
        let points = vec![Point::new(1, 0), Point::new(2, 0)];
        assert_eq!(
            field.lagrange_coefficient_at(2, &points, &BigInt::zero()),
            Err(SolverError::PointIndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            field.lagrange_coefficient_at(0, &[], &BigInt::zero()),
            Err(SolverError::PointIndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_small_field() {
        // f(x) = 5 + 3x over GF(7): f(1) = 1, f(2) = 4
        let field = PrimeField::new(BigInt::from(7));
        let points = vec![Point::new(1, 1), Point::new(2, 4)];
        assert_eq!(field.interpolate_at_zero(&points).unwrap(), BigInt::from(5));
    }

    #[test]
    fn test_single_point_is_constant() {
        let field = PrimeField::default();
        let points = vec![Point::new(9, 42)];
        assert_eq!(field.interpolate_at_zero(&points).unwrap(), BigInt::from(42));
    }

    #[test]
    fn test_duplicate_x_has_no_inverse() {
        let field = PrimeField::default();
        let points = vec![Point::new(1, 5), Point::new(1, 6), Point::new(2, 7)];
        assert_eq!(
            field.interpolate_at_zero(&points),
            Err(SolverError::NoModularInverse)
        );
    }

    #[test]
    fn test_empty_point_set() {
        let field = PrimeField::default();
        assert_eq!(field.interpolate_at_zero(&[]), Err(SolverError::EmptyPointSet));
        assert_eq!(interpolate_over_integers(&[]), Err(SolverError::EmptyPointSet));
    }

    #[test]
    fn test_values_above_modulus_are_reduced() {
        let field = PrimeField::default();
        let p = field.modulus().clone();
        // constant polynomial y = P + 11 ≡ 11
        let points = vec![Point::new(1, &p + 11), Point::new(2, &p + 11)];
        assert_eq!(field.interpolate_at_zero(&points).unwrap(), BigInt::from(11));
    }

    #[test]
    fn test_integer_interpolation() {
        // (1,4), (2,7), (3,12) lie on x^2 + 3
        let points = vec![Point::new(1, 4), Point::new(2, 7), Point::new(3, 12)];
        assert_eq!(interpolate_over_integers(&points).unwrap(), BigInt::from(3));

        // large coefficients survive without a modulus
        let big = BigInt::parse_bytes(b"123456789012345678901234567890123456789012", 10).unwrap();
        let coeffs = vec![big.clone(), BigInt::from(17), BigInt::from(-4)];
        let points = points_on(&coeffs, &[2, 5, 9]);
        assert_eq!(interpolate_over_integers(&points).unwrap(), big);
    }

    #[test]
    fn test_integer_interpolation_rejects_fraction() {
        // line through (1,1) and (3,2) has intercept 1/2
        let points = vec![Point::new(1, 1), Point::new(3, 2)];
        assert_eq!(
            interpolate_over_integers(&points),
            Err(SolverError::NonIntegralSecret {
                numerator: "1".to_string(),
                denominator: "2".to_string(),
            })
        );
    }

    #[test]
    fn test_integer_interpolation_duplicate_x() {
        let points = vec![Point::new(2, 1), Point::new(2, 3)];
        assert_eq!(
            interpolate_over_integers(&points),
            Err(SolverError::DivisionByZero)
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip_independent_of_order(
            (coeffs, xs) in prop::collection::vec(any::<u64>(), 1..7).prop_flat_map(|coeffs| {
                let k = coeffs.len() as u64;
                (Just(coeffs), Just((1..=k).collect::<Vec<u64>>()).prop_shuffle())
            })
        ) {
            let coeffs: Vec<BigInt> = coeffs.into_iter().map(BigInt::from).collect();
            let points = points_on(&coeffs, &xs);

            let field = PrimeField::default();
            prop_assert_eq!(field.interpolate_at_zero(&points).unwrap(), coeffs[0].clone());
            prop_assert_eq!(interpolate_over_integers(&points).unwrap(), coeffs[0].clone());
        }
    }
}
