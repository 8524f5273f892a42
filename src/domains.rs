//! Defines the algebraic traits the elimination engine is generic over.
//!
//! The core trait is [Ring], which has two binary operations, addition and
//! multiplication. Each ring has an associated element type, that should not
//! be confused with the ring type itself. For example:
//! - The ring of integers [Z](type@integer::Z) has elements of type
//!   [Integer](integer::Integer).
//! - The field of rational numbers [Q](type@rational::Q) has elements of type
//!   [Rational](rational::Rational).
//! - The ring of Gaussian integers [ZI](type@gaussian::ZI) has elements of
//!   type [GaussianInteger](gaussian::GaussianInteger).
//! - The ring of univariate polynomials
//!   [UnivariatePolynomialRing](univariate::UnivariatePolynomialRing) has
//!   elements of type
//!   [UnivariatePolynomial](univariate::UnivariatePolynomial).
//!
//! In general, the ring elements do not implement operations such as addition
//! or multiplication, but rather the ring itself does. All matrix structures
//! in this crate are generic over the ring type.
//!
//! An extension of the ring trait is the [EuclideanDomain] trait, which adds
//! division with remainder, gcds, and the degree and normalization notions
//! that drive pivot selection during elimination. Another extension is the
//! [Field] trait, which adds the ability to divide and invert elements.

pub mod gaussian;
pub mod integer;
pub mod rational;
pub mod univariate;

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use integer::Integer;

use crate::printer::{PrintState, RingPrinter};

/// A ring is a set with two binary operations, addition and multiplication.
///
/// Operations are methods of the ring, not of its elements: an element on its
/// own may not carry enough context (compare a bare coefficient vector with
/// the polynomial ring it lives in). All operations take elements by
/// reference and return owned results.
pub trait Ring: Clone + PartialEq + Eq + Hash + Debug + Display {
    /// The element of the ring. For example, the elements of the ring of
    /// integers [Z](type@integer::Z) are [Integer].
    type Element: Clone + PartialEq + Eq + Hash + Debug;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element);
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element);
    /// Compute `a += b * c`.
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    /// Compute `a -= b * c`.
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element);
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    /// Return the nth element by computing `n * 1`.
    fn nth(&self, n: Integer) -> Self::Element;
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element;
    fn is_zero(a: &Self::Element) -> bool;
    fn is_one(&self, a: &Self::Element) -> bool;

    /// Return the result of dividing `a` by `b`, if possible and if the
    /// result is unique. For example, in [Z](type@integer::Z), `4/2` is
    /// possible but `3/2` is not.
    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element>;

    /// Draw a random element whose representation is constrained by `range`
    /// (for example the value itself for integers, or the coefficients for
    /// compound elements).
    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element;

    /// Format a ring element in the surrounding [PrintState].
    fn format<W: fmt::Write>(
        &self,
        element: &Self::Element,
        state: PrintState,
        f: &mut W,
    ) -> fmt::Result;

    /// Create a new printer for the given ring element that can be used in a
    /// [format!] macro.
    fn printer<'a>(&'a self, element: &'a Self::Element) -> RingPrinter<'a, Self> {
        RingPrinter::new(self, element)
    }
}

/// A Euclidean domain is a ring that supports division with remainder,
/// quotients and gcds, together with a degree function that strictly
/// decreases under the remainder.
///
/// The degree and normalization methods are what the elimination engine uses
/// to select pivots and to canonicalize unit ambiguity (positive pivots over
/// the integers, monic pivots over polynomial rings).
pub trait EuclideanDomain: Ring {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element);
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// The Euclidean degree of `a`: a non-negative measure satisfying
    /// `degree(rem(a, b)) < degree(b)` for any nonzero `b`. The degree of
    /// zero is defined as zero.
    ///
    /// The result is an exact [Integer] rather than a machine word:
    /// saturation could make two distinct large pivot candidates compare
    /// equal and stall the elimination loop.
    fn degree(&self, a: &Self::Element) -> Integer;

    /// Whether `a` is in canonical form with respect to unit multiples
    /// (non-negative for integers, monic for polynomials). Zero is
    /// normalized.
    fn is_normalized(&self, a: &Self::Element) -> bool {
        self.is_one(&self.normalizing_unit(a))
    }

    /// The unit `u` such that `a * u` is normalized.
    fn normalizing_unit(&self, a: &Self::Element) -> Self::Element;

    /// The extended Euclidean algorithm: returns `(g, s, t)` with
    /// `g = s*a + t*b` and `g` a normalized gcd of `a` and `b`.
    fn extended_gcd(
        &self,
        a: &Self::Element,
        b: &Self::Element,
    ) -> (Self::Element, Self::Element, Self::Element) {
        let (mut r0, mut r1) = (a.clone(), b.clone());
        let (mut s0, mut s1) = (self.one(), self.zero());
        let (mut t0, mut t1) = (self.zero(), self.one());

        while !Self::is_zero(&r1) {
            let (q, r) = self.quot_rem(&r0, &r1);
            r0 = std::mem::replace(&mut r1, r);

            let s = self.sub(&s0, &self.mul(&q, &s1));
            s0 = std::mem::replace(&mut s1, s);
            let t = self.sub(&t0, &self.mul(&q, &t1));
            t0 = std::mem::replace(&mut t1, t);
        }

        let u = self.normalizing_unit(&r0);
        if !self.is_one(&u) {
            self.mul_assign(&mut r0, &u);
            self.mul_assign(&mut s0, &u);
            self.mul_assign(&mut t0, &u);
        }

        (r0, s0, t0)
    }
}

/// A field is a ring in which every nonzero element is invertible.
pub trait Field: EuclideanDomain {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element);
    /// The multiplicative inverse of `a`. Panics when `a` is zero.
    fn inv(&self, a: &Self::Element) -> Self::Element;
}

#[cfg(test)]
mod test {
    use super::integer::{Integer, Z};
    use super::EuclideanDomain;

    #[test]
    fn extended_gcd_bezout() {
        for (a, b) in [(12, 18), (-12, 18), (0, 5), (5, 0), (17, 4), (-9, -6)] {
            let a = Integer::from(a);
            let b = Integer::from(b);
            let (g, s, t) = Z.extended_gcd(&a, &b);
            assert_eq!(g, &(&s * &a) + &(&t * &b), "bezout failed for {a}, {b}");
            assert!(g >= Integer::zero());
        }
    }

    #[test]
    fn extended_gcd_of_zeros() {
        let (g, _, _) = Z.extended_gcd(&Integer::zero(), &Integer::zero());
        assert!(g.is_zero());
    }
}
