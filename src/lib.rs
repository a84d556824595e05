#![allow(non_snake_case)]
#![allow(clippy::needless_return)]
#![allow(clippy::type_complexity)]
#![allow(clippy::needless_range_loop)]

pub mod division;
pub mod error;
pub mod groebner;
pub mod poly;
pub mod system;

pub use crate::{
    division::{divide, Division},
    error::{Error, Result},
    groebner::{is_groebner_basis, is_reduced_basis, run, run_many, run_with, GroebnerConfig},
    poly::{
        field::Field,
        monomial::{DegRevLexOrder, LexOrder, Monomial, MonomialOrd},
        polynomial::Polynomial,
        printer::{ideal_to_string, polynomial_to_string},
        ring::{Coefficient, Exponent, Ring},
        term::Term,
    },
    system::{solve_all, EquationSystem, OrderKind, Solution, SystemFile, TermSpec},
};


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const VARS: usize = 2;

    fn exponents() -> impl Strategy<Value = Vec<Exponent>> {
        prop::collection::vec(0..3u16, VARS)
    }

    fn term(ring: Ring) -> impl Strategy<Value = Term> {
        (-4..=4i32, exponents()).prop_map(move |(c, e)| Term::from_integer(ring, c, e))
    }

    fn polynomial(ring: Ring) -> impl Strategy<Value = Polynomial> {
        prop::collection::vec(term(ring), 0..5)
            .prop_map(move |terms| Polynomial::new(ring, VARS, terms).unwrap())
    }

    fn unit_polynomial() -> impl Strategy<Value = Polynomial> {
        let ring = Ring::Integers;
        prop::collection::vec((prop_oneof![Just(1i32), Just(-1i32)], exponents()), 1..4)
            .prop_map(move |terms| {
                let terms = terms
                    .into_iter()
                    .map(|(c, e)| Term::from_integer(ring, c, e))
                    .collect();
                Polynomial::new(ring, VARS, terms).unwrap()
            })
            .prop_filter("nonzero", |p| !p.is_zero())
    }

    proptest! {
        #[test]
        fn add_then_subtract(a in polynomial(Ring::Integers), b in polynomial(Ring::Integers)) {
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        #[test]
        fn mod2_self_sum_vanishes(a in polynomial(Ring::IntegersMod2)) {
            prop_assert!((&a + &a).is_zero());
            prop_assert_eq!(&a * &a, a);
        }

        #[test]
        fn term_divide_multiply(a in term(Ring::Integers), b in term(Ring::Integers)) {
            prop_assume!(!b.is_zero());
            let product = a.multiply(&b, Ring::Integers).unwrap();
            prop_assert_eq!(product.divide(&b, Ring::Integers).unwrap(), a);
        }

        #[test]
        fn division_recombines(
            f in polynomial(Ring::Integers),
            divisors in prop::collection::vec(unit_polynomial(), 1..3),
        ) {
            let division = divide(&f, &divisors, &LexOrder).unwrap();
            let recombined = division
                .quotients
                .iter()
                .zip(&divisors)
                .fold(division.remainder.clone(), |acc, (h, g)| acc + &(h * g));
            prop_assert_eq!(recombined, f);

            for term in division.remainder.terms() {
                for g in &divisors {
                    prop_assert!(!term.divisible_by(g.leading_term(&LexOrder).unwrap()));
                }
            }
        }
    }
}
