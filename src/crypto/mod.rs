//! Field Arithmetic Primitives
//!
//! This module provides the numeric building blocks for secret reconstruction:
//!
//! - **arith**: GCD, LCM and the modular inverse over arbitrary-precision integers
//! - **lagrange**: Lagrange interpolation over the prime field and over the integers

pub mod arith;
pub mod lagrange;

pub use lagrange::{PrimeField, Point};
