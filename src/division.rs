use crate::{
    error::{Error, Result},
    poly::{monomial::MonomialOrd, polynomial::Polynomial},
};
use std::iter;

/// Result of dividing a polynomial by an ordered list of divisors:
/// `dividend = sum(quotients[i] * divisors[i]) + remainder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub quotients: Vec<Polynomial>,
    pub remainder: Polynomial,
}

fn check_divisors(dividend: &Polynomial, divisors: &[Polynomial]) -> Result<()> {
    if divisors.is_empty() {
        return Err(Error::InvalidDivisor("empty divisor list".to_owned()));
    }
    for (i, divisor) in divisors.iter().enumerate() {
        if divisor.is_zero() {
            return Err(Error::InvalidDivisor(format!("divisor {} is zero", i)));
        }
        if !dividend.is_zero() && divisor.num_of_vars() != dividend.num_of_vars() {
            return Err(Error::MalformedField(format!(
                "divisor {} has {} variables, dividend has {}",
                i,
                divisor.num_of_vars(),
                dividend.num_of_vars()
            )));
        }
    }
    Ok(())
}

/// Multivariate division of `dividend` by `divisors` under `order`.
///
/// The leading term of the working polynomial is divided by the leading term
/// of the first divisor, in list order, that divides it; the scan restarts
/// from the first divisor after every step. A leading term no divisor
/// divides is moved to the remainder. Reordering the divisors changes the
/// quotients and, unless the divisors form a Gröbner basis, the remainder.
pub fn divide<O: MonomialOrd>(dividend: &Polynomial, divisors: &[Polynomial], order: &O) -> Result<Division> {
    check_divisors(dividend, divisors)?;

    let ring = dividend.ring();
    let num_of_vars = dividend.num_of_vars();
    let mut quotients: Vec<Polynomial> = iter::repeat(Polynomial::zero(ring, num_of_vars))
        .take(divisors.len())
        .collect();
    let mut remainder = Polynomial::zero(ring, num_of_vars);
    let mut s = dividend.clone();

    while let Some(lt_s) = s.leading_term(order).cloned() {
        let mut division_occurred = false;

        for (i, divisor) in divisors.iter().enumerate() {
            let lt_divisor = divisor
                .leading_term(order)
                .ok_or(Error::ZeroPolynomial("division"))?;

            if lt_s.divisible_by(lt_divisor) {
                let q = lt_s.divide(lt_divisor, ring)?;
                s = s.checked_sub(&divisor.checked_mul_term(&q)?)?;
                quotients[i] = quotients[i].checked_add(&Polynomial::from_term(ring, q)?)?;
                division_occurred = true;
                break;
            }
        }

        if !division_occurred {
            let lt = Polynomial::from_term(ring, lt_s)?;
            remainder = remainder.checked_add(&lt)?;
            s = s.checked_sub(&lt)?;
        }
    }

    Ok(Division {
        quotients,
        remainder,
    })
}

/// Remainder of `dividend` modulo `divisors`; an empty divisor list leaves
/// the dividend unchanged.
pub fn reduce<O: MonomialOrd>(dividend: &Polynomial, divisors: &[Polynomial], order: &O) -> Result<Polynomial> {
    if divisors.is_empty() {
        return Ok(dividend.clone());
    }
    Ok(divide(dividend, divisors, order)?.remainder)
}
