use crate::poly::ring::{Exponent, Ring};
use std::{
    cmp::Ordering,
    fmt::{Debug, Error, Formatter},
    ops::{Div, Mul, MulAssign},
    vec::Vec,
};

/// Exponent vector; position `i` is the power of the field's `i`-th variable.
///
/// The derived `Ord` is the plain lexicographic order of the vectors and is
/// only used to keep polynomial terms in a canonical storage order. Leading
/// terms are always chosen through a [`MonomialOrd`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Monomial(Vec<Exponent>);

impl Monomial {
    pub fn new(exponents: Vec<Exponent>) -> Self {
        Self(exponents)
    }

    /// The constant monomial over `num_of_vars` variables.
    pub fn one(num_of_vars: usize) -> Self {
        Self(vec![0; num_of_vars])
    }

    /// `x_index` over `num_of_vars` variables.
    pub fn var(index: usize, num_of_vars: usize) -> Self {
        let mut exponents = vec![0; num_of_vars];
        exponents[index] = 1;
        Self(exponents)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn exponents(&self) -> &[Exponent] {
        &self.0
    }

    pub fn degree(&self) -> u32 {
        self.0.iter().map(|&e| e as u32).sum()
    }

    pub fn is_constant(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Canonical representative under the ring's exponent rule.
    pub fn powered(mut self, ring: Ring) -> Self {
        self.0.iter_mut().for_each(|e| *e = ring.power(*e));
        self
    }

    pub fn divisible_by(&self, other: &Self) -> bool {
        debug_assert_eq!(self.len(), other.len());
        self.0.iter().zip(other.0.iter()).all(|(lhs, rhs)| lhs >= rhs)
    }

    /// Product of two monomials, `None` if an exponent leaves the
    /// [`Exponent`] range.
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        debug_assert_eq!(self.len(), other.len());
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.checked_add(*b))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    pub fn lcm(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| *a.max(b))
                .collect(),
        )
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| *a.min(b))
                .collect(),
        )
    }

    pub fn compare_lex_order(lhs: &Self, rhs: &Self) -> Ordering {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.0
            .iter()
            .zip(rhs.0.iter())
            .find_map(|(l, r)| {
                let ord = l.cmp(r);
                ord.is_ne().then_some(ord)
            })
            .unwrap_or(Ordering::Equal)
    }

    pub fn compare_deg_rev_lex_order(lhs: &Self, rhs: &Self) -> Ordering {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.degree().cmp(&rhs.degree()).then_with(|| {
            lhs.0
                .iter()
                .rev()
                .zip(rhs.0.iter().rev())
                .find_map(|(l, r)| {
                    let ord = r.cmp(l);
                    ord.is_ne().then_some(ord)
                })
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// A total order on monomials compatible with multiplication.
pub trait MonomialOrd: Clone + Copy + Debug + Default + Send + Sync {
    fn compare(&self, lhs: &Monomial, rhs: &Monomial) -> Ordering;
}

/// Pure lexicographic order ("plex"): the first differing exponent decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LexOrder;

/// Graded reverse lexicographic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DegRevLexOrder;

impl MonomialOrd for LexOrder {
    fn compare(&self, lhs: &Monomial, rhs: &Monomial) -> Ordering {
        Monomial::compare_lex_order(lhs, rhs)
    }
}

impl MonomialOrd for DegRevLexOrder {
    fn compare(&self, lhs: &Monomial, rhs: &Monomial) -> Ordering {
        Monomial::compare_deg_rev_lex_order(lhs, rhs)
    }
}

impl Debug for Monomial {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.is_constant() {
            return write!(f, "1");
        }
        let mut first = true;
        for (var, exp) in self.0.iter().enumerate() {
            if *exp == 0 {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            match exp.cmp(&1) {
                Ordering::Equal => write!(f, "x_{}", var)?,
                _ => write!(f, "x_{}^{}", var, exp)?,
            }
        }
        Ok(())
    }
}

impl<'a> MulAssign<&'a Monomial> for Monomial {
    fn mul_assign(&mut self, other: &'a Monomial) {
        debug_assert_eq!(self.len(), other.len());
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(lhs, rhs)| *lhs += rhs);
    }
}

impl<'a> Mul<&'a Monomial> for Monomial {
    type Output = Self;

    fn mul(self, other: &'a Monomial) -> Self::Output {
        let mut result = self;
        result.mul_assign(other);
        result
    }
}

impl<'a, 'b> Mul<&'a Monomial> for &'b Monomial {
    type Output = Monomial;

    fn mul(self, other: &'a Monomial) -> Self::Output {
        let mut result = self.clone();
        result.mul_assign(other);
        result
    }
}

impl<'a> Div<&'a Monomial> for Monomial {
    type Output = Option<Self>;

    fn div(self, other: &'a Monomial) -> Self::Output {
        (&self).div(other)
    }
}

impl<'a, 'b> Div<&'a Monomial> for &'b Monomial {
    type Output = Option<Monomial>;

    fn div(self, other: &'a Monomial) -> Self::Output {
        self.divisible_by(other).then(|| {
            Monomial(
                self.0
                    .iter()
                    .zip(other.0.iter())
                    .map(|(lhs, rhs)| lhs - rhs)
                    .collect(),
            )
        })
    }
}
