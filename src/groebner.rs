use crate::{
    division,
    error::{Error, Result},
    poly::{monomial::MonomialOrd, polynomial::Polynomial},
};
use hashbrown::HashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument, trace};

/// Caller-imposed bounds on the closure. The algorithm itself has no bound,
/// so production callers should set at least one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroebnerConfig {
    /// Maximum number of full pairwise passes.
    pub max_passes: Option<usize>,
    /// Maximum number of generators the growing list may reach.
    pub max_generators: Option<usize>,
}

impl GroebnerConfig {
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }

    pub fn with_max_generators(mut self, max_generators: usize) -> Self {
        self.max_generators = Some(max_generators);
        self
    }
}

fn leading_term_divides<O: MonomialOrd>(f: &Polynomial, g: &Polynomial, order: &O) -> bool {
    match (f.leading_term(order), g.leading_term(order)) {
        (Some(lt_f), Some(lt_g)) => lt_f.divisible_by(lt_g),
        _ => false,
    }
}

fn compare_leading_monomials<O: MonomialOrd>(f: &Polynomial, g: &Polynomial, order: &O) -> Ordering {
    match (f.leading_monomial(order), g.leading_monomial(order)) {
        (Some(a), Some(b)) => order.compare(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// Drops zero and duplicate generators and checks that all of them live over
/// the same variables.
fn prepare(F: &[Polynomial]) -> Result<Vec<Polynomial>> {
    let mut seen = HashSet::with_capacity(F.len());
    let mut ideal: Vec<Polynomial> = Vec::with_capacity(F.len());
    for f in F.iter().filter(|f| !f.is_zero()) {
        if let Some(first) = ideal.first() {
            if first.num_of_vars() != f.num_of_vars() {
                return Err(Error::MalformedField(format!(
                    "generators over {} and {} variables",
                    first.num_of_vars(),
                    f.num_of_vars()
                )));
            }
        }
        if seen.insert(f) {
            ideal.push(f.clone());
        }
    }
    Ok(ideal)
}

/// One full pass over every ordered pair `(i, j)`, `i != j`, of the growing
/// list. Remainders appended during the pass take part in later pairs and
/// serve as divisors right away.
fn closure_pass<O: MonomialOrd>(
    ideal: &[Polynomial],
    order: &O,
    config: &GroebnerConfig,
    passes: usize,
) -> Result<(Vec<Polynomial>, bool)> {
    let mut next = ideal.to_vec();
    let mut members: HashSet<Polynomial> = next.iter().cloned().collect();
    let mut added = false;

    let mut i = 0;
    while i < next.len() {
        let mut j = 0;
        while j < next.len() {
            if i != j {
                let s = next[i].s_polynomial(&next[j], order)?;
                let remainder = division::divide(&s, &next, order)?.remainder;
                if !remainder.is_zero() && !members.contains(&remainder) {
                    trace!(pass = passes, i, j, "new generator {:?}", remainder);
                    members.insert(remainder.clone());
                    next.push(remainder);
                    added = true;

                    if config.max_generators.map_or(false, |max| next.len() > max) {
                        return Err(Error::ResourceExhausted {
                            passes,
                            generators: next.len(),
                        });
                    }
                }
            }
            j += 1;
        }
        i += 1;
    }

    Ok((next, added))
}

/// Buchberger closure: repeats full pairwise passes until a pass adds no
/// new non-zero remainder. The result is a Gröbner basis, neither minimal
/// nor reduced.
pub fn groebner<O: MonomialOrd>(F: Vec<Polynomial>, order: &O, config: &GroebnerConfig) -> Result<Vec<Polynomial>> {
    let mut ideal = F;
    let mut passes = 0;
    loop {
        if config.max_passes.map_or(false, |max| passes >= max) {
            return Err(Error::ResourceExhausted {
                passes,
                generators: ideal.len(),
            });
        }
        passes += 1;
        debug!(pass = passes, generators = ideal.len(), "closure pass start");
        let (next, added) = closure_pass(&ideal, order, config, passes)?;
        ideal = next;
        if !added {
            debug!(passes, generators = ideal.len(), "closure reached fixed point");
            return Ok(ideal);
        }
    }
}

/// Makes every generator monic, then drops generators whose leading term is
/// divisible by the leading term of another surviving generator.
pub fn minimalize<O: MonomialOrd>(F: &[Polynomial], order: &O) -> Result<Vec<Polynomial>> {
    let mut list = F
        .iter()
        .map(|f| f.make_monic(order))
        .collect::<Result<Vec<_>>>()?;

    while let Some(j) = (0..list.len()).find(|&j| {
        (0..list.len()).any(|k| j != k && leading_term_divides(&list[j], &list[k], order))
    }) {
        list.remove(j);
    }

    debug!(generators = list.len(), "minimalized");
    Ok(list)
}

/// Replaces every generator by its remainder modulo all the others.
pub fn reduce<O: MonomialOrd>(F: &[Polynomial], order: &O) -> Result<Vec<Polynomial>> {
    let mut list = F.to_vec();
    for j in 0..list.len() {
        let others: Vec<Polynomial> = list
            .iter()
            .enumerate()
            .filter(|(k, _)| *k != j)
            .map(|(_, g)| g.clone())
            .collect();
        list[j] = division::reduce(&list[j], &others, order)?;
    }
    Ok(list)
}

/// Reduced Gröbner basis of `F`, sorted ascending by leading monomial.
pub fn run<O: MonomialOrd>(F: &[Polynomial], order: &O) -> Result<Vec<Polynomial>> {
    run_with(F, order, &GroebnerConfig::default())
}

#[instrument(level = "debug", skip_all, fields(generators = F.len()))]
pub fn run_with<O: MonomialOrd>(F: &[Polynomial], order: &O, config: &GroebnerConfig) -> Result<Vec<Polynomial>> {
    let ideal = prepare(F)?;
    if ideal.is_empty() {
        return Ok(ideal);
    }

    let ideal = groebner(ideal, order, config)?;
    let ideal = minimalize(&ideal, order)?;
    let mut ideal = reduce(&ideal, order)?;
    ideal.sort_by(|f, g| compare_leading_monomials(f, g, order));

    debug!(generators = ideal.len(), "reduced basis");
    Ok(ideal)
}

/// Solves independent systems in parallel; results keep the input order.
pub fn run_many<O: MonomialOrd>(
    systems: &[Vec<Polynomial>],
    order: &O,
    config: &GroebnerConfig,
) -> Vec<Result<Vec<Polynomial>>> {
    systems
        .par_iter()
        .map(|F| run_with(F, order, config))
        .collect()
}

/// Whether `f` lies in the ideal of the Gröbner basis `G`.
pub fn reduces_to_zero<O: MonomialOrd>(f: &Polynomial, G: &[Polynomial], order: &O) -> Result<bool> {
    Ok(division::reduce(f, G, order)?.is_zero())
}

/// Whether every S-polynomial of `ideal` reduces to zero modulo `ideal`.
pub fn is_groebner_basis<O: MonomialOrd>(ideal: &[Polynomial], order: &O) -> Result<bool> {
    let checks = ideal
        .par_iter()
        .enumerate()
        .map(|(i, f)| {
            ideal
                .iter()
                .enumerate()
                .filter(|(j, _)| i != *j)
                .try_fold(true, |all, (_, g)| {
                    if !all {
                        return Ok(false);
                    }
                    reduces_to_zero(&f.s_polynomial(g, order)?, ideal, order)
                })
        })
        .collect::<Result<Vec<bool>>>()?;
    Ok(checks.into_iter().all(|ok| ok))
}

/// Gröbner, monic, no leading term divides another, and no term of a
/// generator is divisible by the leading term of another generator.
pub fn is_reduced_basis<O: MonomialOrd>(ideal: &[Polynomial], order: &O) -> Result<bool> {
    if !is_groebner_basis(ideal, order)? {
        return Ok(false);
    }
    for (i, f) in ideal.iter().enumerate() {
        if !f.is_monic(order) {
            return Ok(false);
        }
        for (j, g) in ideal.iter().enumerate() {
            if i == j {
                continue;
            }
            let Some(lt_g) = g.leading_term(order) else {
                return Ok(false);
            };
            if f.terms().iter().any(|t| t.divisible_by(lt_g)) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}
