//! Univariate polynomial rings over a field.
//!
//! Polynomials are stored as dense coefficient vectors with no trailing
//! zeros. Over a field the ring is Euclidean through long division, with the
//! polynomial degree as Euclidean degree and the inverse leading coefficient
//! as normalizing unit (normalized means monic).

use std::fmt::{self, Display, Formatter};

use rand::Rng;

use super::integer::Integer;
use super::{EuclideanDomain, Field, Ring};
use crate::printer::PrintState;

/// The ring of univariate polynomials with coefficients in `F`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UnivariatePolynomialRing<F: Field> {
    coeff_field: F,
}

impl<F: Field> UnivariatePolynomialRing<F> {
    pub const fn new(coeff_field: F) -> UnivariatePolynomialRing<F> {
        UnivariatePolynomialRing { coeff_field }
    }

    pub fn coefficient_field(&self) -> &F {
        &self.coeff_field
    }

    /// Create a polynomial from coefficients in order of increasing degree.
    pub fn polynomial(&self, coefficients: Vec<F::Element>) -> UnivariatePolynomial<F> {
        let mut p = UnivariatePolynomial {
            coefficients,
            field: self.coeff_field.clone(),
        };
        p.truncate();
        p
    }

    /// The monomial `c * x^exponent`.
    pub fn monomial(&self, c: F::Element, exponent: usize) -> UnivariatePolynomial<F> {
        if F::is_zero(&c) {
            return self.zero();
        }
        let mut coefficients = vec![self.coeff_field.zero(); exponent + 1];
        coefficients[exponent] = c;
        UnivariatePolynomial {
            coefficients,
            field: self.coeff_field.clone(),
        }
    }
}

impl<F: Field> Display for UnivariatePolynomialRing<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}[x]", self.coeff_field)
    }
}

/// A dense univariate polynomial; the coefficient of `x^k` is
/// `coefficients[k]` and the vector carries no trailing zeros.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct UnivariatePolynomial<F: Field> {
    coefficients: Vec<F::Element>,
    field: F,
}

impl<F: Field> UnivariatePolynomial<F> {
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// The degree, with the zero polynomial mapped to 0.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[F::Element] {
        &self.coefficients
    }

    /// The leading coefficient, or zero for the zero polynomial.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    fn truncate(&mut self) {
        while let Some(c) = self.coefficients.last() {
            if F::is_zero(c) {
                self.coefficients.pop();
            } else {
                break;
            }
        }
    }
}

impl<F: Field> Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate().rev() {
            if F::is_zero(c) {
                continue;
            }
            if !first {
                f.write_str(" + ")?;
            }
            first = false;

            if e == 0 {
                self.field.format(c, PrintState::in_sum(), f)?;
            } else {
                if !self.field.is_one(c) {
                    self.field.format(c, PrintState::in_product(), f)?;
                    f.write_str("*")?;
                }
                if e == 1 {
                    f.write_str("x")?;
                } else {
                    write!(f, "x^{}", e)?;
                }
            }
        }
        Ok(())
    }
}

impl<F: Field> Ring for UnivariatePolynomialRing<F> {
    type Element = UnivariatePolynomial<F>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let (long, short) = if a.coefficients.len() >= b.coefficients.len() {
            (a, b)
        } else {
            (b, a)
        };
        let mut coefficients = long.coefficients.clone();
        for (c, s) in coefficients.iter_mut().zip(&short.coefficients) {
            self.coeff_field.add_assign(c, s);
        }
        self.polynomial(coefficients)
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.add(a, &self.neg(b))
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a.is_zero() || b.is_zero() {
            return self.zero();
        }
        let mut coefficients =
            vec![self.coeff_field.zero(); a.coefficients.len() + b.coefficients.len() - 1];
        for (i, x) in a.coefficients.iter().enumerate() {
            for (j, y) in b.coefficients.iter().enumerate() {
                self.coeff_field.add_mul_assign(&mut coefficients[i + j], x, y);
            }
        }
        self.polynomial(coefficients)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        UnivariatePolynomial {
            coefficients: a
                .coefficients
                .iter()
                .map(|c| self.coeff_field.neg(c))
                .collect(),
            field: self.coeff_field.clone(),
        }
    }

    fn zero(&self) -> Self::Element {
        UnivariatePolynomial {
            coefficients: vec![],
            field: self.coeff_field.clone(),
        }
    }

    fn one(&self) -> Self::Element {
        self.monomial(self.coeff_field.one(), 0)
    }

    fn nth(&self, n: Integer) -> Self::Element {
        self.monomial(self.coeff_field.nth(n), 0)
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
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

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.coefficients.len() == 1 && self.coeff_field.is_one(&a.coefficients[0])
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
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

    fn sample(&self, rng: &mut impl rand::RngCore, range: (i64, i64)) -> Self::Element {
        let degree = rng.gen_range(0..=3);
        let coefficients = (0..=degree)
            .map(|_| self.coeff_field.sample(rng, range))
            .collect();
        self.polynomial(coefficients)
    }

    fn format<W: fmt::Write>(
        &self,
        element: &Self::Element,
        state: PrintState,
        f: &mut W,
    ) -> fmt::Result {
        let composite = element.coefficients.iter().filter(|c| !F::is_zero(c)).count() > 1;
        if (state.in_product || state.in_sum) && composite {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl<F: Field> EuclideanDomain for UnivariatePolynomialRing<F> {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.quot_rem(a, b).1
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        if b.is_zero() {
            panic!("polynomial division by zero: ({}) / ({})", a, b);
        }
        if a.coefficients.len() < b.coefficients.len() {
            return (self.zero(), a.clone());
        }

        let lead_inv = self.coeff_field.inv(&b.lcoeff());
        let mut rem = a.coefficients.clone();
        let mut quot =
            vec![self.coeff_field.zero(); a.coefficients.len() - b.coefficients.len() + 1];

        for k in (0..quot.len()).rev() {
            let top = rem[k + b.coefficients.len() - 1].clone();
            if F::is_zero(&top) {
                continue;
            }
            let c = self.coeff_field.mul(&top, &lead_inv);
            for (i, bc) in b.coefficients.iter().enumerate() {
                self.coeff_field.sub_mul_assign(&mut rem[k + i], &c, bc);
            }
            quot[k] = c;
        }

        (self.polynomial(quot), self.polynomial(rem))
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let (mut r0, mut r1) = (a.clone(), b.clone());
        while !r1.is_zero() {
            let r = self.rem(&r0, &r1);
            r0 = std::mem::replace(&mut r1, r);
        }
        let u = self.normalizing_unit(&r0);
        self.mul(&r0, &u)
    }

    fn degree(&self, a: &Self::Element) -> Integer {
        Integer::from(a.degree() as i64)
    }

    fn is_normalized(&self, a: &Self::Element) -> bool {
        a.is_zero() || self.coeff_field.is_one(&a.lcoeff())
    }

    fn normalizing_unit(&self, a: &Self::Element) -> Self::Element {
        if a.is_zero() {
            self.one()
        } else {
            self.monomial(self.coeff_field.inv(&a.lcoeff()), 0)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domains::rational::{Rational, Q};

    fn qx() -> UnivariatePolynomialRing<Q> {
        UnivariatePolynomialRing::new(Q)
    }

    fn poly(coeffs: &[i64]) -> UnivariatePolynomial<Q> {
        qx().polynomial(coeffs.iter().map(|&c| Rational::from(c)).collect())
    }

    #[test]
    fn long_division() {
        // (x^3 - 2x + 1) / (x - 1) = x^2 + x - 1, remainder 0
        let a = poly(&[1, -2, 0, 1]);
        let b = poly(&[-1, 1]);
        let (q, r) = qx().quot_rem(&a, &b);
        assert_eq!(q, poly(&[-1, 1, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn division_with_remainder() {
        let a = poly(&[1, 0, 1]); // x^2 + 1
        let b = poly(&[1, 1]); // x + 1
        let (q, r) = qx().quot_rem(&a, &b);
        assert_eq!(qx().add(&qx().mul(&q, &b), &r), a);
        assert!(r.degree() < b.degree());
    }

    #[test]
    fn gcd_is_monic() {
        let ring = qx();
        // gcd(2(x+1)(x+2), 4(x+1)) ~ x + 1
        let a = ring.mul(&poly(&[2, 2]), &poly(&[2, 1]));
        let b = poly(&[4, 4]);
        assert_eq!(ring.gcd(&a, &b), poly(&[1, 1]));
    }

    #[test]
    fn display() {
        assert_eq!(poly(&[1, -2, 0, 1]).to_string(), "x^3 + (-2)*x + 1");
        assert_eq!(poly(&[]).to_string(), "0");
    }
}
