//! Text rendering of terms and polynomials against a [`Field`].
//!
//! ```text
//! x*y+y
//! x^2*y-3*y^2
//! 1/2*x-z
//! ```

use crate::{
    error::{Error, Result},
    poly::{field::Field, monomial::MonomialOrd, polynomial::Polynomial, term::Term},
};
use num_traits::{One, Signed};
use std::cmp::Ordering;

fn term_to_string(term: &Term, field: &Field) -> String {
    let coefficient = term.coefficient();
    if term.is_constant() {
        return coefficient.to_string();
    }

    let sign = if coefficient.abs().is_one() {
        if coefficient.is_negative() {
            "-".to_owned()
        } else {
            String::new()
        }
    } else {
        format!("{}*", coefficient)
    };

    let factors: Vec<String> = term
        .monomial()
        .exponents()
        .iter()
        .enumerate()
        .filter_map(|(v, &e)| {
            let name = field.name(v)?;
            match e.cmp(&1) {
                Ordering::Less => None,
                Ordering::Equal => Some(name.to_owned()),
                Ordering::Greater => Some(format!("{}^{}", name, e)),
            }
        })
        .collect();

    sign + &factors.join("*")
}

/// Renders `polynomial` leading term first under `order`, e.g. `x^2*y-3*y^2`.
pub fn polynomial_to_string<O: MonomialOrd>(
    polynomial: &Polynomial,
    field: &Field,
    order: &O,
) -> Result<String> {
    if !polynomial.is_zero() && polynomial.num_of_vars() != field.len() {
        return Err(Error::MalformedField(format!(
            "polynomial over {} variables printed with a field of {}",
            polynomial.num_of_vars(),
            field.len()
        )));
    }
    if polynomial.is_zero() {
        return Ok("0".to_owned());
    }

    let mut out = String::new();
    for (i, term) in polynomial.sorted_terms(order).into_iter().enumerate() {
        if i > 0 && term.coefficient().is_positive() {
            out.push('+');
        }
        out.push_str(&term_to_string(term, field));
    }
    Ok(out)
}

/// One polynomial per line.
pub fn ideal_to_string<O: MonomialOrd>(
    polynomials: &[Polynomial],
    field: &Field,
    order: &O,
) -> Result<String> {
    Ok(polynomials
        .iter()
        .map(|poly| polynomial_to_string(poly, field, order))
        .collect::<Result<Vec<_>>>()?
        .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::{
        monomial::LexOrder,
        ring::{Coefficient, Ring},
    };

    fn field() -> Field {
        Field::new(["x", "y", "z"]).unwrap()
    }

    fn poly(ring: Ring, terms: Vec<Term>) -> Polynomial {
        Polynomial::new(ring, 3, terms).unwrap()
    }

    #[test]
    fn prints_signs_and_exponents() {
        let ring = Ring::Integers;
        let p = poly(
            ring,
            vec![
                Term::from_integer(ring, -3, vec![0, 2, 0]),
                Term::from_integer(ring, 1, vec![2, 1, 0]),
            ],
        );
        assert_eq!(polynomial_to_string(&p, &field(), &LexOrder).unwrap(), "x^2*y-3*y^2");

        let p = poly(
            ring,
            vec![
                Term::from_integer(ring, 1, vec![1, 1, 0]),
                Term::from_integer(ring, 1, vec![0, 1, 0]),
            ],
        );
        assert_eq!(polynomial_to_string(&p, &field(), &LexOrder).unwrap(), "x*y+y");
    }

    #[test]
    fn prints_constants_and_fractions() {
        let ring = Ring::Integers;
        let p = poly(
            ring,
            vec![
                Term::new(ring, Coefficient::new(1, 2), vec![1, 0, 0]).unwrap(),
                Term::from_integer(ring, -1, vec![0, 0, 1]),
                Term::from_integer(ring, -7, vec![0, 0, 0]),
            ],
        );
        assert_eq!(polynomial_to_string(&p, &field(), &LexOrder).unwrap(), "1/2*x-z-7");
        let zero = Polynomial::zero(ring, 3);
        assert_eq!(polynomial_to_string(&zero, &field(), &LexOrder).unwrap(), "0");
    }

    #[test]
    fn rejects_mismatched_field() {
        let ring = Ring::Integers;
        let p = Polynomial::new(ring, 2, vec![Term::from_integer(ring, 1, vec![1, 0])]).unwrap();
        assert!(matches!(
            polynomial_to_string(&p, &field(), &LexOrder),
            Err(Error::MalformedField(_))
        ));
    }

    #[test]
    fn ideal_lines() {
        let ring = Ring::IntegersMod2;
        let ideal = vec![
            poly(
                ring,
                vec![
                    Term::from_integer(ring, 1, vec![0, 1, 0]),
                    Term::from_integer(ring, 1, vec![0, 0, 0]),
                ],
            ),
            poly(ring, vec![Term::from_integer(ring, 1, vec![1, 0, 1])]),
        ];
        assert_eq!(ideal_to_string(&ideal, &field(), &LexOrder).unwrap(), "y+1\nx*z");
    }
}
