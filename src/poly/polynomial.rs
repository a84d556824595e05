use crate::{
    division::{self, Division},
    error::{Error, Result},
    poly::{
        monomial::{Monomial, MonomialOrd},
        ring::{Coefficient, Ring},
        term::Term,
    },
};
use derivative::Derivative;
use num_traits::Zero;
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
    vec::Vec,
};

/// Stores a sparse multivariate polynomial in coefficient form.
///
/// Terms are kept in canonical order (ascending exponent vectors) with
/// distinct monomials and no zero coefficients, so structural equality is
/// polynomial equality. The ring and the variable count are context and do
/// not take part in comparisons.
#[derive(Derivative)]
#[derivative(Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    #[derivative(PartialEq = "ignore")]
    #[derivative(Hash = "ignore")]
    pub(crate) ring: Ring,
    #[derivative(PartialEq = "ignore")]
    #[derivative(Hash = "ignore")]
    pub(crate) num_of_vars: usize,
    pub(crate) terms: Vec<Term>,
}

/// Sorts, combines like terms and drops zero coefficients.
fn canonicalize(ring: Ring, mut terms: Vec<Term>) -> Result<Vec<Term>> {
    terms.sort_unstable_by(|a, b| a.monomial().cmp(b.monomial()));
    let mut terms_dedup: Vec<Term> = Vec::with_capacity(terms.len());
    for term in terms {
        if let Some(prev) = terms_dedup.last_mut() {
            if prev.monomial() == term.monomial() {
                let coefficient = ring.add(prev.coefficient(), term.coefficient())?;
                *prev = Term::from_monomial(ring, coefficient, term.monomial().clone())?;
                if prev.is_zero() {
                    terms_dedup.pop();
                }
                continue;
            }
        }
        if !term.is_zero() {
            terms_dedup.push(term);
        }
    }
    Ok(terms_dedup)
}

/// Operator impls have no error channel; overflow panics there the way it
/// does for the primitive integers.
fn or_panic(result: Result<Polynomial>) -> Polynomial {
    result.unwrap_or_else(|err| panic!("polynomial arithmetic failed: {}", err))
}

impl Polynomial {
    /// Builds a polynomial from arbitrary terms, renormalizing them under
    /// `ring`. Every term must have exactly `num_of_vars` exponents.
    pub fn new(ring: Ring, num_of_vars: usize, terms: Vec<Term>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(terms.len());
        for term in terms {
            if term.num_of_vars() != num_of_vars {
                return Err(Error::MalformedField(format!(
                    "term {:?} has {} exponents, field has {} variables",
                    term,
                    term.num_of_vars(),
                    num_of_vars
                )));
            }
            let (coefficient, monomial) = term.into_parts();
            normalized.push(Term::from_monomial(ring, coefficient, monomial)?);
        }
        Ok(Self {
            ring,
            num_of_vars,
            terms: canonicalize(ring, normalized)?,
        })
    }

    pub fn zero(ring: Ring, num_of_vars: usize) -> Self {
        Self {
            ring,
            num_of_vars,
            terms: Vec::new(),
        }
    }

    pub fn from_term(ring: Ring, term: Term) -> Result<Self> {
        let num_of_vars = term.num_of_vars();
        Self::new(ring, num_of_vars, vec![term])
    }

    pub fn constant(ring: Ring, value: Coefficient, num_of_vars: usize) -> Result<Self> {
        Self::from_term(ring, Term::constant(ring, value, num_of_vars)?)
    }

    pub fn ring(&self) -> Ring {
        self.ring
    }

    pub fn num_of_vars(&self) -> usize {
        self.num_of_vars
    }

    pub fn terms(&self) -> &[Term] {
        self.terms.as_slice()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The empty term list is the additive identity.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// A non-zero polynomial without variables.
    pub fn is_constant(&self) -> bool {
        self.terms.len() == 1 && self.terms[0].is_constant()
    }

    pub fn degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|t| t.monomial().degree())
            .max()
            .unwrap_or(0)
    }

    /// The term with the greatest monomial under `order`, `None` for zero.
    pub fn leading_term<O: MonomialOrd>(&self, order: &O) -> Option<&Term> {
        self.terms
            .iter()
            .max_by(|a, b| order.compare(a.monomial(), b.monomial()))
    }

    pub fn leading_monomial<O: MonomialOrd>(&self, order: &O) -> Option<&Monomial> {
        self.leading_term(order).map(Term::monomial)
    }

    pub fn leading_coefficient<O: MonomialOrd>(&self, order: &O) -> Option<&Coefficient> {
        self.leading_term(order).map(Term::coefficient)
    }

    /// Terms sorted from the leading term down, the order a printer shows.
    pub fn sorted_terms<O: MonomialOrd>(&self, order: &O) -> Vec<&Term> {
        let mut terms: Vec<&Term> = self.terms.iter().collect();
        terms.sort_by(|a, b| order.compare(b.monomial(), a.monomial()));
        terms
    }

    /// Scales the polynomial so that its leading coefficient is the ring's
    /// one. The zero polynomial is returned unchanged.
    pub fn make_monic<O: MonomialOrd>(&self, order: &O) -> Result<Self> {
        let Some(lc) = self.leading_coefficient(order).copied() else {
            return Ok(self.clone());
        };
        let terms = self
            .terms
            .iter()
            .map(|t| {
                Term::from_monomial(
                    self.ring,
                    self.ring.divide(t.coefficient(), &lc)?,
                    t.monomial().clone(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ring: self.ring,
            num_of_vars: self.num_of_vars,
            terms: canonicalize(self.ring, terms)?,
        })
    }

    pub fn is_monic<O: MonomialOrd>(&self, order: &O) -> bool {
        self.leading_coefficient(order)
            .map_or(false, |lc| self.ring.is_one(lc))
    }

    /// `(L / LT(f)) * f - (L / LT(g)) * g` with `L` the LCM of both leading
    /// terms, so that the leading terms cancel.
    pub fn s_polynomial<O: MonomialOrd>(&self, other: &Self, order: &O) -> Result<Self> {
        let lt_self = self
            .leading_term(order)
            .ok_or(Error::ZeroPolynomial("s-polynomial"))?;
        let lt_other = other
            .leading_term(order)
            .ok_or(Error::ZeroPolynomial("s-polynomial"))?;

        let lcm = lt_self.lcm(lt_other, self.ring)?;
        let t_self = lcm.divide(lt_self, self.ring)?;
        let t_other = lcm.divide(lt_other, self.ring)?;

        self.checked_mul_term(&t_self)?
            .checked_sub(&other.checked_mul_term(&t_other)?)
    }

    /// Divides by `divisors` with the first-match policy; see
    /// [`division::divide`].
    pub fn div_mod_polys<O: MonomialOrd>(&self, divisors: &[Self], order: &O) -> Result<(Vec<Self>, Self)> {
        let Division {
            quotients,
            remainder,
        } = division::divide(self, divisors, order)?;
        Ok((quotients, remainder))
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.merge(other, false)
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.merge(other, true)
    }

    pub fn checked_neg(&self) -> Result<Self> {
        Ok(Self {
            ring: self.ring,
            num_of_vars: self.num_of_vars,
            terms: self
                .terms
                .iter()
                .map(|t| t.negate(self.ring))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn checked_mul_term(&self, term: &Term) -> Result<Self> {
        let terms = self
            .terms
            .iter()
            .map(|t| t.multiply(term, self.ring))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ring: self.ring,
            num_of_vars: self.num_of_vars,
            terms: canonicalize(self.ring, terms)?,
        })
    }

    pub fn checked_mul(&self, other: &Self) -> Result<Self> {
        let ring = self.ring;
        let products = self
            .terms
            .iter()
            .flat_map(|a| other.terms.iter().map(move |b| a.multiply(b, ring)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            ring,
            num_of_vars: self.num_of_vars.max(other.num_of_vars),
            terms: canonicalize(ring, products)?,
        })
    }

    fn merge(&self, other: &Self, subtract: bool) -> Result<Self> {
        debug_assert!(self.is_zero() || other.is_zero() || self.num_of_vars == other.num_of_vars);
        let ring = self.ring;
        let (mut i, ii) = (0, self.terms.len());
        let (mut j, jj) = (0, other.terms.len());
        let mut terms = Vec::with_capacity(ii + jj);

        loop {
            let which = match (
                i.lt(&ii).then(|| &self.terms[i]),
                j.lt(&jj).then(|| &other.terms[j]),
            ) {
                (Some(cur), Some(other)) => Some(cur.monomial().cmp(other.monomial())),
                (Some(_), None) => Some(Ordering::Less),
                (None, Some(_)) => Some(Ordering::Greater),
                (None, None) => None,
            };

            match which {
                Some(Ordering::Less) => {
                    terms.push(self.terms[i].clone());
                    i += 1;
                },
                Some(Ordering::Equal) => {
                    let (cur, other) = (&self.terms[i], &other.terms[j]);
                    let coefficient = if subtract {
                        ring.subtract(cur.coefficient(), other.coefficient())?
                    } else {
                        ring.add(cur.coefficient(), other.coefficient())?
                    };
                    if !coefficient.is_zero() {
                        terms.push(Term::from_monomial(ring, coefficient, cur.monomial().clone())?);
                    }
                    i += 1;
                    j += 1;
                },
                Some(Ordering::Greater) => {
                    let other = &other.terms[j];
                    terms.push(if subtract { other.negate(ring)? } else { other.clone() });
                    j += 1;
                },
                None => break,
            };
        }

        Ok(Self {
            ring,
            num_of_vars: self.num_of_vars.max(other.num_of_vars),
            terms,
        })
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().rev().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:?}", term)?;
        }
        Ok(())
    }
}

impl Neg for Polynomial {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        -&self
    }
}

impl<'a> Neg for &'a Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        or_panic(self.checked_neg())
    }
}

impl<'a> AddAssign<&'a Polynomial> for Polynomial {
    fn add_assign(&mut self, other: &'a Polynomial) {
        *self = or_panic(self.merge(other, false));
    }
}

impl<'a> Add<&'a Polynomial> for Polynomial {
    type Output = Self;

    fn add(self, rhs: &'a Polynomial) -> Self::Output {
        or_panic(self.merge(rhs, false))
    }
}

impl<'a, 'b> Add<&'a Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &'a Polynomial) -> Self::Output {
        or_panic(self.merge(rhs, false))
    }
}

impl<'a> SubAssign<&'a Polynomial> for Polynomial {
    fn sub_assign(&mut self, other: &'a Polynomial) {
        *self = or_panic(self.merge(other, true));
    }
}

impl<'a> Sub<&'a Polynomial> for Polynomial {
    type Output = Self;

    fn sub(self, rhs: &'a Polynomial) -> Self::Output {
        or_panic(self.merge(rhs, true))
    }
}

impl<'a, 'b> Sub<&'a Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &'a Polynomial) -> Self::Output {
        or_panic(self.merge(rhs, true))
    }
}

impl<'a, 'b> Mul<&'a Term> for &'b Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Term) -> Self::Output {
        or_panic(self.checked_mul_term(rhs))
    }
}

impl<'a> Mul<&'a Term> for Polynomial {
    type Output = Self;

    fn mul(self, rhs: &'a Term) -> Self::Output {
        &self * rhs
    }
}

impl<'a, 'b> Mul<&'a Polynomial> for &'b Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &'a Polynomial) -> Self::Output {
        or_panic(self.checked_mul(rhs))
    }
}

impl<'a> Mul<&'a Polynomial> for Polynomial {
    type Output = Self;

    fn mul(self, rhs: &'a Polynomial) -> Self::Output {
        &self * rhs
    }
}

#[cfg(test)]
#[allow(clippy::all)]
mod tests {
    use super::*;
    use crate::poly::{
        monomial::{DegRevLexOrder, LexOrder},
        ring::Exponent,
    };
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn test_rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn poly(ring: Ring, n: usize, terms: &[(i32, &[Exponent])]) -> Polynomial {
        Polynomial::new(
            ring,
            n,
            terms
                .iter()
                .map(|(c, e)| Term::from_integer(ring, *c, e.to_vec()))
                .collect(),
        )
        .unwrap()
    }

    fn rand_monomial<R: Rng>(l: usize, d: Exponent, rng: &mut R) -> Vec<Exponent> {
        (0..l)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    rng.gen_range(1..(d + 1))
                } else {
                    0
                }
            })
            .collect()
    }

    /// Generate random `l`-variate polynomial of maximum individual degree `d`
    fn rand_poly<R: Rng>(ring: Ring, l: usize, d: Exponent, max_terms: usize, rng: &mut R) -> Polynomial {
        let num_terms = rng.gen_range(1..max_terms);
        let mut random_terms = vec![Term::from_integer(ring, rng.gen_range(-100..100), vec![0; l])];
        for _ in 1..num_terms {
            let coeff = rng.gen_range(-100..100);
            random_terms.push(Term::from_integer(ring, coeff, rand_monomial(l, d, rng)));
        }
        Polynomial::new(ring, l, random_terms).unwrap()
    }

    #[test]
    fn add_polynomials() {
        let rng = &mut test_rng();
        for ring in [Ring::Integers, Ring::IntegersMod2] {
            for var_count in 1..8 {
                for _ in 0..20 {
                    let p1 = rand_poly(ring, var_count, 10, 100, rng);
                    let p2 = rand_poly(ring, var_count, 10, 100, rng);
                    let res1 = p1.to_owned() + &p2;
                    let res2 = p2.to_owned() + &p1;
                    assert_eq!(res1, res2);
                    assert!((res2 - &res1).is_zero());
                }
            }
        }
    }

    #[test]
    fn sub_polynomials() {
        let rng = &mut test_rng();
        for ring in [Ring::Integers, Ring::IntegersMod2] {
            for var_count in 1..8 {
                for _ in 0..20 {
                    let p1 = rand_poly(ring, var_count, 10, 100, rng);
                    let p2 = rand_poly(ring, var_count, 10, 100, rng);
                    let res1 = p1.to_owned() - &p2;
                    let res2 = p2.to_owned() - &p1;
                    assert_eq!(res1, -res2);
                    assert_eq!(res1.to_owned() + &p2, p1);
                }
            }
        }
    }

    #[test]
    fn mul_term() {
        let rng = &mut test_rng();
        for var_count in 1..8 {
            for _ in 0..20 {
                let ring = Ring::Integers;
                let p = rand_poly(ring, var_count, 10, 100, rng);
                let t = Term::from_integer(ring, rng.gen_range(1..50), rand_monomial(var_count, 10, rng));
                let res1 = &p * &t;
                let res2 = p
                    .terms
                    .iter()
                    .map(|tt| Polynomial::from_term(ring, tt.to_owned()).unwrap() * &t)
                    .fold(Polynomial::zero(ring, var_count), |a, b| a + &b);
                assert_eq!(res1, res2);
            }
        }
    }

    #[test]
    fn mul_distributes_over_add() {
        let rng = &mut test_rng();
        for ring in [Ring::Integers, Ring::IntegersMod2] {
            for var_count in 1..5 {
                for _ in 0..10 {
                    let p1 = rand_poly(ring, var_count, 3, 10, rng);
                    let p2 = rand_poly(ring, var_count, 3, 10, rng);
                    let p3 = rand_poly(ring, var_count, 3, 10, rng);
                    let lhs = &(&p1 + &p2) * &p3;
                    let rhs = &(&p1 * &p3) + &(&p2 * &p3);
                    assert_eq!(lhs, rhs);
                }
            }
        }
    }

    #[test]
    fn new_combines_like_terms() {
        let ring = Ring::Integers;
        let p = poly(ring, 2, &[(2, &[1, 0]), (3, &[0, 1]), (-2, &[1, 0]), (0, &[1, 1])]);
        assert_eq!(p, poly(ring, 2, &[(3, &[0, 1])]));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn new_rejects_wrong_length() {
        let ring = Ring::Integers;
        let result = Polynomial::new(ring, 2, vec![Term::from_integer(ring, 1, vec![1, 0, 0])]);
        assert!(matches!(result, Err(Error::MalformedField(_))));
    }

    #[test]
    fn mod2_square_is_idempotent() {
        let ring = Ring::IntegersMod2;
        // (x + y)^2 = x + 2xy + y = x + y
        let p = poly(ring, 2, &[(1, &[1, 0]), (1, &[0, 1])]);
        assert_eq!(&p * &p, p);
        // x^2 - x collapses to zero
        assert!(poly(ring, 1, &[(1, &[2]), (-1, &[1])]).is_zero());
    }

    #[test]
    fn leading_terms_follow_order() {
        let ring = Ring::Integers;
        let p = poly(ring, 2, &[(1, &[1, 0]), (5, &[0, 3])]);
        assert_eq!(p.leading_monomial(&LexOrder).unwrap().exponents(), &[1, 0]);
        assert_eq!(
            p.leading_monomial(&DegRevLexOrder).unwrap().exponents(),
            &[0, 3]
        );
        assert_eq!(
            p.leading_coefficient(&DegRevLexOrder),
            Some(&Coefficient::from_integer(5))
        );
        assert!(Polynomial::zero(ring, 2).leading_term(&LexOrder).is_none());
    }

    #[test]
    fn make_monic() {
        let ring = Ring::Integers;
        let p = poly(ring, 2, &[(4, &[2, 0]), (2, &[0, 1]), (-3, &[0, 0])]);
        let monic = p.make_monic(&LexOrder).unwrap();
        assert!(monic.is_monic(&LexOrder));
        assert_eq!(
            monic.terms(),
            Polynomial::new(
                ring,
                2,
                vec![
                    Term::new(ring, Coefficient::new(-3, 4), vec![0, 0]).unwrap(),
                    Term::new(ring, Coefficient::new(1, 2), vec![0, 1]).unwrap(),
                    Term::from_integer(ring, 1, vec![2, 0]),
                ]
            )
            .unwrap()
            .terms()
        );
        let zero = Polynomial::zero(ring, 2);
        assert_eq!(zero.make_monic(&LexOrder).unwrap(), zero);
    }

    #[test]
    fn s_polynomial() {
        let ring = Ring::Integers;
        let f = poly(ring, 2, &[(1, &[2, 0]), (-1, &[0, 1])]);
        let g = poly(ring, 2, &[(1, &[1, 1]), (-1, &[0, 0])]);
        // y*(x^2 - y) - x*(x*y - 1) = x - y^2
        let s = f.s_polynomial(&g, &LexOrder).unwrap();
        assert_eq!(s, poly(ring, 2, &[(1, &[1, 0]), (-1, &[0, 2])]));

        let zero = Polynomial::zero(ring, 2);
        assert_eq!(
            f.s_polynomial(&zero, &LexOrder),
            Err(Error::ZeroPolynomial("s-polynomial"))
        );
    }

    #[test]
    fn s_polynomial_scales_by_coefficient_lcm() {
        let ring = Ring::Integers;
        let f = poly(ring, 2, &[(2, &[1, 0]), (1, &[0, 0])]);
        let g = poly(ring, 2, &[(3, &[0, 1]), (1, &[0, 0])]);
        // lcm = 6xy: 3y*(2x + 1) - 2x*(3y + 1) = 3y - 2x
        let s = f.s_polynomial(&g, &LexOrder).unwrap();
        assert_eq!(s, poly(ring, 2, &[(-2, &[1, 0]), (3, &[0, 1])]));
    }

    #[test]
    fn equality_ignores_context() {
        assert_eq!(Polynomial::zero(Ring::Integers, 3), Polynomial::zero(Ring::Integers, 0));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let ring = Ring::Integers;
        let big = Polynomial::new(
            ring,
            1,
            vec![Term::new(ring, Coefficient::from_integer(i64::MAX), vec![1]).unwrap()],
        )
        .unwrap();
        let two = poly(ring, 1, &[(2, &[1])]);
        assert_eq!(
            big.checked_add(&two),
            Err(Error::Overflow {
                ring,
                operation: "addition"
            })
        );
        assert!(matches!(big.checked_mul(&two), Err(Error::Overflow { .. })));
        assert!(matches!(
            big.checked_neg().unwrap().checked_sub(&two),
            Err(Error::Overflow { .. })
        ));
        // combining like terms is checked too
        let like_terms = vec![Term::from_integer(ring, 1, vec![1]), big.terms()[0].clone()];
        assert!(matches!(
            Polynomial::new(ring, 1, like_terms),
            Err(Error::Overflow { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "coefficient overflow")]
    fn add_operator_panics_on_overflow() {
        let ring = Ring::Integers;
        let big = Polynomial::from_term(
            ring,
            Term::new(ring, Coefficient::from_integer(i64::MAX), vec![1]).unwrap(),
        )
        .unwrap();
        let _ = &big + &poly(ring, 1, &[(2, &[1])]);
    }
}
