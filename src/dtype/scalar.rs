//! Scalar traits mapping Rust types to DType
//!
//! `Scalar` is implemented for every element type the pipeline can be
//! instantiated with (f32, f64, Complex64, Complex128). `RealScalar` is the
//! sub-trait for the real field those scalars are built over; eigenvalues,
//! norms, and convergence thresholds always live in the real field.

use super::complex::{Complex64, Complex128};
use super::DType;
use bytemuck::{Pod, Zeroable};
use num_traits::Float;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Trait for types that can be elements of a tiled matrix
///
/// This trait connects Rust's type system to teigr's runtime dtype system
/// and carries exactly the operations the reduction kernels need: ring
/// arithmetic, conjugation, and projection onto the real field.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe byte-level views (bytemuck), used by the
///   communicator seam
/// - `Add + Sub + Mul + Div + Neg` - Field arithmetic (Output = Self)
///
/// For real types conjugation is the identity and `real`/`abs_val` coincide
/// with the value and its absolute value. For complex types, `conj` negates
/// the imaginary part and `abs_val` is the modulus.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// The real field this scalar is built over
    type Real: RealScalar;

    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Additive identity
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Complex conjugate (identity for real types)
    fn conj(self) -> Self;

    /// Real part
    fn real(self) -> Self::Real;

    /// Modulus: |x| (absolute value for real types)
    fn abs_val(self) -> Self::Real;

    /// Squared modulus: |x|²
    fn abs_sq(self) -> Self::Real;

    /// Embed a real value (imaginary part zero for complex types)
    fn from_real(r: Self::Real) -> Self;

    /// Multiply by a real scalar
    fn scale(self, r: Self::Real) -> Self;
}

/// Trait for the real scalar types (f32, f64)
///
/// `Float` supplies sqrt, hypot, epsilon, copysign, and ordering; the
/// conversions to and from f64 are used by tests and tolerance plumbing.
pub trait RealScalar: Scalar<Real = Self> + Float + PartialOrd {
    /// Convert to f64
    fn to_f64(self) -> f64;

    /// Convert from f64
    fn from_f64(v: f64) -> Self;
}

impl Scalar for f64 {
    type Real = f64;

    const DTYPE: DType = DType::F64;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn real(self) -> f64 {
        self
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self * self
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn scale(self, r: f64) -> Self {
        self * r
    }
}

impl RealScalar for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

impl Scalar for f32 {
    type Real = f32;

    const DTYPE: DType = DType::F32;

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn conj(self) -> Self {
        self
    }

    #[inline]
    fn real(self) -> f32 {
        self
    }

    #[inline]
    fn abs_val(self) -> f32 {
        self.abs()
    }

    #[inline]
    fn abs_sq(self) -> f32 {
        self * self
    }

    #[inline]
    fn from_real(r: f32) -> Self {
        r
    }

    #[inline]
    fn scale(self, r: f32) -> Self {
        self * r
    }
}

impl RealScalar for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Scalar for Complex64 {
    type Real = f32;

    const DTYPE: DType = DType::Complex64;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn conj(self) -> Self {
        Complex64::conj(self)
    }

    #[inline]
    fn real(self) -> f32 {
        self.re
    }

    #[inline]
    fn abs_val(self) -> f32 {
        self.magnitude()
    }

    #[inline]
    fn abs_sq(self) -> f32 {
        self.magnitude_squared()
    }

    #[inline]
    fn from_real(r: f32) -> Self {
        Self::new(r, 0.0)
    }

    #[inline]
    fn scale(self, r: f32) -> Self {
        Self::new(self.re * r, self.im * r)
    }
}

impl Scalar for Complex128 {
    type Real = f64;

    const DTYPE: DType = DType::Complex128;

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn conj(self) -> Self {
        Complex128::conj(self)
    }

    #[inline]
    fn real(self) -> f64 {
        self.re
    }

    #[inline]
    fn abs_val(self) -> f64 {
        self.magnitude()
    }

    #[inline]
    fn abs_sq(self) -> f64 {
        self.magnitude_squared()
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Self::new(r, 0.0)
    }

    #[inline]
    fn scale(self, r: f64) -> Self {
        Self::new(self.re * r, self.im * r)
    }
}
