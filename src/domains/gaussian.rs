//! The ring of Gaussian integers `Z[i]`.
//!
//! Division with remainder rounds the exact quotient in `Q(i)` to the nearest
//! lattice point, which bounds the remainder norm by half the divisor norm,
//! so `Z[i]` is Euclidean with the field norm `re^2 + im^2` as degree.

use std::fmt::{self, Display, Formatter};

use super::integer::Integer;
use super::{EuclideanDomain, Ring};
use crate::printer::PrintState;

/// The ring of Gaussian integers.
pub type ZI = GaussianIntegerRing;
/// The ring of Gaussian integers.
pub const ZI: GaussianIntegerRing = GaussianIntegerRing::new();

/// The ring of Gaussian integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GaussianIntegerRing;

impl GaussianIntegerRing {
    pub const fn new() -> GaussianIntegerRing {
        GaussianIntegerRing
    }
}

impl Display for GaussianIntegerRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Z[i]")
    }
}

/// A Gaussian integer `re + im*i`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GaussianInteger {
    pub re: Integer,
    pub im: Integer,
}

impl GaussianInteger {
    pub fn new(re: Integer, im: Integer) -> GaussianInteger {
        GaussianInteger { re, im }
    }

    pub fn zero() -> GaussianInteger {
        GaussianInteger::new(Integer::zero(), Integer::zero())
    }

    pub fn one() -> GaussianInteger {
        GaussianInteger::new(Integer::one(), Integer::zero())
    }

    /// The imaginary unit `i`.
    pub fn i() -> GaussianInteger {
        GaussianInteger::new(Integer::zero(), Integer::one())
    }

    pub fn conjugate(&self) -> GaussianInteger {
        GaussianInteger::new(self.re.clone(), -&self.im)
    }

    /// The field norm `re^2 + im^2`.
    pub fn norm(&self) -> Integer {
        &(&self.re * &self.re) + &(&self.im * &self.im)
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }
}

impl From<i64> for GaussianInteger {
    fn from(value: i64) -> GaussianInteger {
        GaussianInteger::new(Integer::from(value), Integer::zero())
    }
}

impl From<i32> for GaussianInteger {
    fn from(value: i32) -> GaussianInteger {
        GaussianInteger::new(Integer::from(value), Integer::zero())
    }
}

impl From<(i64, i64)> for GaussianInteger {
    fn from((re, im): (i64, i64)) -> GaussianInteger {
        GaussianInteger::new(Integer::from(re), Integer::from(im))
    }
}

impl Display for GaussianInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.im.is_zero() {
            return write!(f, "{}", self.re);
        }
        if self.re.is_zero() {
            return write!(f, "{}i", self.im);
        }
        if self.im.is_negative() {
            write!(f, "{}-{}i", self.re, self.im.abs())
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl fmt::Debug for GaussianInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Ring for GaussianIntegerRing {
    type Element = GaussianInteger;

    fn add(&self, a: &GaussianInteger, b: &GaussianInteger) -> GaussianInteger {
        GaussianInteger::new(&a.re + &b.re, &a.im + &b.im)
    }

    fn sub(&self, a: &GaussianInteger, b: &GaussianInteger) -> GaussianInteger {
        GaussianInteger::new(&a.re - &b.re, &a.im - &b.im)
    }

    fn mul(&self, a: &GaussianInteger, b: &GaussianInteger) -> GaussianInteger {
        GaussianInteger::new(
            &(&a.re * &b.re) - &(&a.im * &b.im),
            &(&a.re * &b.im) + &(&a.im * &b.re),
        )
    }

    fn add_assign(&self, a: &mut GaussianInteger, b: &GaussianInteger) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut GaussianInteger, b: &GaussianInteger) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut GaussianInteger, b: &GaussianInteger) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut GaussianInteger, b: &GaussianInteger, c: &GaussianInteger) {
        *a = self.add(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut GaussianInteger, b: &GaussianInteger, c: &GaussianInteger) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn neg(&self, a: &GaussianInteger) -> GaussianInteger {
        GaussianInteger::new(-&a.re, -&a.im)
    }

    fn zero(&self) -> GaussianInteger {
        GaussianInteger::zero()
    }

    fn one(&self) -> GaussianInteger {
        GaussianInteger::one()
    }

    fn nth(&self, n: Integer) -> GaussianInteger {
        GaussianInteger::new(n, Integer::zero())
    }

    fn pow(&self, b: &GaussianInteger, e: u64) -> GaussianInteger {
        // square and multiply
        let mut result = self.one();
        let mut base = b.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &base);
            }
            base = self.mul(&base, &base);
            e >>= 1;
        }
        result
    }

    fn is_zero(a: &GaussianInteger) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &GaussianInteger) -> bool {
        a.is_one()
    }

    fn try_div(&self, a: &GaussianInteger, b: &GaussianInteger) -> Option<GaussianInteger> {
        if b.is_zero() {
            return None;
        }
        let (q, r) = self.quot_rem(a, b);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> GaussianInteger {
        GaussianInteger::new(
            super::integer::Z.sample(rng, range),
            super::integer::Z.sample(rng, range),
        )
    }

    fn format<W: fmt::Write>(
        &self,
        element: &GaussianInteger,
        state: PrintState,
        f: &mut W,
    ) -> fmt::Result {
        let composite = !element.re.is_zero() && !element.im.is_zero();
        let negative = if element.re.is_zero() {
            element.im.is_negative()
        } else {
            element.re.is_negative()
        };
        if (state.in_product || state.in_sum) && (composite || negative) {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl EuclideanDomain for GaussianIntegerRing {
    fn rem(&self, a: &GaussianInteger, b: &GaussianInteger) -> GaussianInteger {
        self.quot_rem(a, b).1
    }

    fn quot_rem(&self, a: &GaussianInteger, b: &GaussianInteger) -> (GaussianInteger, GaussianInteger) {
        if b.is_zero() {
            panic!("gaussian integer division by zero: ({}) / ({})", a, b);
        }

        // round a * conj(b) / norm(b) to the nearest lattice point
        let n = b.norm();
        let p = self.mul(a, &b.conjugate());
        let q = GaussianInteger::new(p.re.div_round(&n), p.im.div_round(&n));
        let r = self.sub(a, &self.mul(&q, b));
        (q, r)
    }

    fn gcd(&self, a: &GaussianInteger, b: &GaussianInteger) -> GaussianInteger {
        let (mut r0, mut r1) = (a.clone(), b.clone());
        while !r1.is_zero() {
            let r = self.rem(&r0, &r1);
            r0 = std::mem::replace(&mut r1, r);
        }
        let u = self.normalizing_unit(&r0);
        self.mul(&r0, &u)
    }

    fn degree(&self, a: &GaussianInteger) -> Integer {
        a.norm()
    }

    fn is_normalized(&self, a: &GaussianInteger) -> bool {
        a.is_zero() || (!a.re.is_negative() && !a.re.is_zero() && !a.im.is_negative())
    }

    fn normalizing_unit(&self, a: &GaussianInteger) -> GaussianInteger {
        if a.is_zero() {
            return GaussianInteger::one();
        }
        // one of 1, i, -1, -i rotates a into the first quadrant
        let mut u = GaussianInteger::one();
        for _ in 0..4 {
            if self.is_normalized(&self.mul(a, &u)) {
                return u;
            }
            u = self.mul(&u, &GaussianInteger::i());
        }
        unreachable!("no normalizing unit for {}", a)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn remainder_norm_decreases() {
        let a = GaussianInteger::from((7, 3));
        let b = GaussianInteger::from((2, -1));
        let (q, r) = ZI.quot_rem(&a, &b);
        assert_eq!(ZI.add(&ZI.mul(&q, &b), &r), a);
        assert!(r.norm() < b.norm());
    }

    #[test]
    fn normalizing_unit_first_quadrant() {
        for v in [(3, 1), (-3, 1), (-3, -1), (3, -1), (0, 2), (-2, 0)] {
            let a = GaussianInteger::from(v);
            let u = ZI.normalizing_unit(&a);
            let n = ZI.mul(&a, &u);
            assert!(ZI.is_normalized(&n), "{} * {} = {} not normalized", a, u, n);
            assert_eq!(n.norm(), a.norm());
        }
    }

    #[test]
    fn gcd_is_normalized() {
        let a = GaussianInteger::from((4, 2));
        let b = GaussianInteger::from((2, 4));
        let g = ZI.gcd(&a, &b);
        assert!(ZI.is_normalized(&g));
        assert!(ZI.try_div(&a, &g).is_some());
        assert!(ZI.try_div(&b, &g).is_some());
    }
}
