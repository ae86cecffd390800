use zeroize::Zeroize;

use crate::N;

/// An element of the ring `R_q = Z_q[X]/(X^256 + 1)`: 256 signed 32-bit
/// coefficients in degree order.
///
/// The same representation serves both the coefficient ("normal") domain and
/// the NTT domain; which domain an instance is in is a convention tracked by
/// the caller, exactly as in the reference implementation. Coefficient bounds
/// depend on the operation that produced the value and are documented per
/// operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Zeroize)]
pub struct Poly(pub [i32; N]);

impl Poly {
    /// The zero polynomial.
    pub const ZERO: Self = Self([0i32; N]);
}

impl Default for Poly {
    fn default() -> Self { Self::ZERO }
}
