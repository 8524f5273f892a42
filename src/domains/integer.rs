//! The ring of integers with a machine-word fast path.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Mul, Neg, Sub};

use rand::Rng;
use rug::{ops::Pow, Complete, Integer as MultiPrecisionInteger};

use super::{EuclideanDomain, Ring};
use crate::printer::PrintState;

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntegerRing;

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

impl Display for IntegerRing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Z")
    }
}

/// An arbitrary-precision integer that stores machine-sized values inline.
///
/// Invariant: `Large` is only used for values that do not fit in an `i64`,
/// so derived equality and hashing are consistent.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Integer {
    Natural(i64),
    Large(MultiPrecisionInteger),
}

impl Integer {
    pub const fn zero() -> Integer {
        Integer::Natural(0)
    }

    pub const fn one() -> Integer {
        Integer::Natural(1)
    }

    /// Construct from a multi-precision integer, demoting to the inline
    /// representation when the value fits.
    pub fn from_large(n: MultiPrecisionInteger) -> Integer {
        if let Some(v) = n.to_i64() {
            Integer::Natural(v)
        } else {
            Integer::Large(n)
        }
    }

    pub fn to_large(&self) -> MultiPrecisionInteger {
        match self {
            Integer::Natural(n) => MultiPrecisionInteger::from(*n),
            Integer::Large(n) => n.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Integer::Natural(0))
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Integer::Natural(1))
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Integer::Natural(n) => *n < 0,
            Integer::Large(n) => *n < 0,
        }
    }

    pub fn abs(&self) -> Integer {
        match self {
            Integer::Natural(n) => match n.checked_abs() {
                Some(v) => Integer::Natural(v),
                None => Integer::Large(MultiPrecisionInteger::from(*n).abs()),
            },
            Integer::Large(n) => Integer::from_large(n.clone().abs()),
        }
    }

    pub fn gcd(&self, b: &Integer) -> Integer {
        match (self, b) {
            (Integer::Natural(a), Integer::Natural(b)) => {
                let (mut x, mut y) = (a.unsigned_abs(), b.unsigned_abs());
                while y != 0 {
                    (x, y) = (y, x % y);
                }
                if x <= i64::MAX as u64 {
                    Integer::Natural(x as i64)
                } else {
                    Integer::Large(MultiPrecisionInteger::from(x))
                }
            }
            _ => Integer::from_large(self.to_large().gcd(&b.to_large())),
        }
    }

    /// Euclidean division: the remainder satisfies `0 <= r < |b|`.
    pub fn quot_rem(&self, b: &Integer) -> (Integer, Integer) {
        if b.is_zero() {
            panic!("integer division by zero: {} / {}", self, b);
        }

        match (self, b) {
            (Integer::Natural(a), Integer::Natural(b)) => {
                match (a.checked_div_euclid(*b), a.checked_rem_euclid(*b)) {
                    (Some(q), Some(r)) => (Integer::Natural(q), Integer::Natural(r)),
                    // i64::MIN / -1 overflows
                    _ => {
                        let (q, r) = MultiPrecisionInteger::from(*a)
                            .div_rem_euc(MultiPrecisionInteger::from(*b));
                        (Integer::from_large(q), Integer::from_large(r))
                    }
                }
            }
            _ => {
                let (q, r) = self.to_large().div_rem_euc(b.to_large());
                (Integer::from_large(q), Integer::from_large(r))
            }
        }
    }

    /// The nearest integer to `self / b` (ties keep the Euclidean quotient),
    /// so the remainder magnitude is at most `|b| / 2`.
    pub fn div_round(&self, b: &Integer) -> Integer {
        let (q, r) = self.quot_rem(b);
        if &r + &r > b.abs() {
            if b.is_negative() {
                &q - &Integer::one()
            } else {
                &q + &Integer::one()
            }
        } else {
            q
        }
    }

    pub fn pow(&self, e: u64) -> Integer {
        let e = u32::try_from(e).expect("exponent does not fit in u32");
        match self {
            Integer::Natural(n) => match n.checked_pow(e) {
                Some(v) => Integer::Natural(v),
                None => Integer::from_large(MultiPrecisionInteger::from(*n).pow(e)),
            },
            Integer::Large(n) => Integer::from_large(n.pow(e).complete()),
        }
    }
}

macro_rules! from_with_cast {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                #[inline]
                fn from(value: $t) -> Integer {
                    Integer::Natural(value as i64)
                }
            }
        )*
    };
}

from_with_cast!(i8, i16, i32, i64, u8, u16, u32);

impl From<MultiPrecisionInteger> for Integer {
    fn from(value: MultiPrecisionInteger) -> Integer {
        Integer::from_large(value)
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Integer::Natural(a), Integer::Natural(b)) => a.cmp(b),
            (Integer::Large(a), Integer::Large(b)) => a.cmp(b),
            // a large value never fits in an i64
            (Integer::Natural(_), Integer::Large(b)) => {
                if *b < 0 {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Integer::Large(a), Integer::Natural(_)) => {
                if *a < 0 {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        }
    }
}

impl<'a, 'b> Add<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn add(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(a), Integer::Natural(b)) => match a.checked_add(*b) {
                Some(v) => Integer::Natural(v),
                None => Integer::from_large(MultiPrecisionInteger::from(*a) + *b),
            },
            _ => Integer::from_large(self.to_large() + rhs.to_large()),
        }
    }
}

impl<'a, 'b> Sub<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn sub(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(a), Integer::Natural(b)) => match a.checked_sub(*b) {
                Some(v) => Integer::Natural(v),
                None => Integer::from_large(MultiPrecisionInteger::from(*a) - *b),
            },
            _ => Integer::from_large(self.to_large() - rhs.to_large()),
        }
    }
}

impl<'a, 'b> Mul<&'b Integer> for &'a Integer {
    type Output = Integer;

    fn mul(self, rhs: &'b Integer) -> Integer {
        match (self, rhs) {
            (Integer::Natural(a), Integer::Natural(b)) => match a.checked_mul(*b) {
                Some(v) => Integer::Natural(v),
                None => Integer::from_large(MultiPrecisionInteger::from(*a) * *b),
            },
            _ => Integer::from_large(self.to_large() * rhs.to_large()),
        }
    }
}

impl<'a> Neg for &'a Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        match self {
            Integer::Natural(n) => match n.checked_neg() {
                Some(v) => Integer::Natural(v),
                None => Integer::from_large(-MultiPrecisionInteger::from(*n)),
            },
            Integer::Large(n) => Integer::from_large((-n).complete()),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Natural(n) => n.fmt(f),
            Integer::Large(n) => n.fmt(f),
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    fn add(&self, a: &Integer, b: &Integer) -> Integer {
        a + b
    }

    fn sub(&self, a: &Integer, b: &Integer) -> Integer {
        a - b
    }

    fn mul(&self, a: &Integer, b: &Integer) -> Integer {
        a * b
    }

    fn add_assign(&self, a: &mut Integer, b: &Integer) {
        *a = &*a + b;
    }

    fn sub_assign(&self, a: &mut Integer, b: &Integer) {
        *a = &*a - b;
    }

    fn mul_assign(&self, a: &mut Integer, b: &Integer) {
        *a = &*a * b;
    }

    fn add_mul_assign(&self, a: &mut Integer, b: &Integer, c: &Integer) {
        *a = &*a + &(b * c);
    }

    fn sub_mul_assign(&self, a: &mut Integer, b: &Integer, c: &Integer) {
        *a = &*a - &(b * c);
    }

    fn neg(&self, a: &Integer) -> Integer {
        -a
    }

    fn zero(&self) -> Integer {
        Integer::zero()
    }

    fn one(&self) -> Integer {
        Integer::one()
    }

    fn nth(&self, n: Integer) -> Integer {
        n
    }

    fn pow(&self, b: &Integer, e: u64) -> Integer {
        b.pow(e)
    }

    fn is_zero(a: &Integer) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Integer) -> bool {
        a.is_one()
    }

    fn try_div(&self, a: &Integer, b: &Integer) -> Option<Integer> {
        if b.is_zero() {
            return None;
        }
        let (q, r) = a.quot_rem(b);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Integer {
        Integer::Natural(rng.gen_range(range.0..=range.1))
    }

    fn format<W: fmt::Write>(&self, element: &Integer, state: PrintState, f: &mut W) -> fmt::Result {
        if (state.in_product || state.in_sum) && element.is_negative() {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl EuclideanDomain for IntegerRing {
    fn rem(&self, a: &Integer, b: &Integer) -> Integer {
        a.quot_rem(b).1
    }

    fn quot_rem(&self, a: &Integer, b: &Integer) -> (Integer, Integer) {
        a.quot_rem(b)
    }

    fn gcd(&self, a: &Integer, b: &Integer) -> Integer {
        a.gcd(b)
    }

    fn degree(&self, a: &Integer) -> Integer {
        a.abs()
    }

    fn is_normalized(&self, a: &Integer) -> bool {
        !a.is_negative()
    }

    fn normalizing_unit(&self, a: &Integer) -> Integer {
        if a.is_negative() {
            Integer::Natural(-1)
        } else {
            Integer::one()
        }
    }
}
