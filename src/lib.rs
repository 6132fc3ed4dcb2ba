//! `bestchar`: best-character coefficients for categorical taxonomic data.
//!
//! This crate is for the character-selection step of identification-key
//! construction: given one categorical character scored across a set of taxa
//! (each taxon admitting one or more states), it quantifies how well that
//! character discriminates among the taxa, so candidate characters can be
//! ranked by diagnostic power before a key is built.
//!
//! Design intent:
//! - Keep the data model small: a validated [`TaxonSet`] and a per-state
//!   [`StateTable`] of occupancy tallies are the only intermediate structures.
//! - Put all scoring policy here (log bases, pair weighting, degenerate-input
//!   handling); input capture and rendering belong to callers.
//!
//! ## Coefficient families
//!
//! Two independent families are computed from the same observations:
//!
//! 1. **Information coefficients** — entropy-style statistics over the
//!    per-state tallies, differing only in logarithm base:
//!    [`intkey_information`] (base 2, the convention used by the Intkey
//!    program of the DELTA suite), [`pankhurst_information`] (base `s`, the
//!    number of observed states), and [`normalized_information`] (base `t`,
//!    the number of taxa, which keeps the range comparable as taxa are
//!    eliminated during key construction).
//! 2. **Pairwise coefficients** — distance measures over all unordered taxon
//!    pairs: the separation coefficient (fraction of pairs sharing no state)
//!    and the average Jaccard distance (see [`pairwise`]).
//!
//! ## References (orientation)
//!
//! - Pankhurst (1991): *Practical Taxonomic Computing* — the base-`s`
//!   information statistic.
//! - Talent, Dickinson & Dickinson (2014, Biodiversity Informatics) — the
//!   normalized (base-`t`) information coefficient.
//! - Dallwitz, Paine & Zurcher: DELTA / Intkey — the base-2 convention.
//! - Jaccard (1908) — the similarity coefficient underlying the pairwise
//!   distance.
//!
//! ## Quick example
//!
//! ```rust
//! use bestchar::{score_character, TaxonSet};
//!
//! // Petal colour scored for four taxa.
//! let taxa = TaxonSet::new([
//!     vec!["red"],
//!     vec!["white", "red"],
//!     vec!["white"],
//!     vec!["white"],
//! ]).unwrap();
//!
//! let report = score_character(&taxa).unwrap();
//! assert_eq!(report.taxon_count, 4);
//! assert_eq!(report.state_count, 2);
//! assert_eq!(report.total_pairs, 6);
//! assert_eq!(report.separable_pairs, 2);
//! assert!((report.separation_coefficient - 2.0 / 6.0).abs() < 1e-12);
//! ```

#![forbid(unsafe_code)]

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, trace};

pub mod pairwise;
pub mod parse;

pub use pairwise::{pairwise_coefficients, PairwiseCoefficients};

/// Errors for character scoring.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BestCharError {
    #[error("taxon set is empty")]
    NoTaxa,

    #[error("taxon {index} has no states")]
    EmptyTaxon { index: usize },

    #[error("need at least {needed} taxa, got {got}")]
    InsufficientTaxa { needed: usize, got: usize },

    #[error("logarithm base undefined: {0}")]
    DegenerateBase(&'static str),
}

pub type Result<T> = core::result::Result<T, BestCharError>;

/// An ordered set of taxa, each an ordered, non-empty list of state labels
/// for the character under study.
///
/// Labels within a taxon are assumed distinct; the tally pass does not
/// deduplicate them. Input order is preserved (it fixes pairwise comparison
/// order, not any result value). Construction validates the whole set, so
/// every downstream computation is total over a `TaxonSet`.
///
/// # Examples
///
/// ```
/// use bestchar::TaxonSet;
///
/// let taxa = TaxonSet::new([vec!["red"], vec!["white", "red"]]).unwrap();
/// assert_eq!(taxa.len(), 2);
///
/// // A taxon with no states is rejected up front.
/// assert!(TaxonSet::new([vec!["red"], vec![]]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonSet {
    taxa: Vec<Vec<String>>,
}

impl TaxonSet {
    /// Build a validated taxon set.
    ///
    /// # Errors
    ///
    /// Returns [`BestCharError::NoTaxa`] if the input is empty, or
    /// [`BestCharError::EmptyTaxon`] (with the offending position) if any
    /// taxon has no states.
    pub fn new<I, T, S>(taxa: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let taxa: Vec<Vec<String>> = taxa
            .into_iter()
            .map(|t| t.into_iter().map(Into::into).collect())
            .collect();
        if taxa.is_empty() {
            return Err(BestCharError::NoTaxa);
        }
        if let Some(index) = taxa.iter().position(Vec::is_empty) {
            return Err(BestCharError::EmptyTaxon { index });
        }
        Ok(Self { taxa })
    }

    /// Number of taxa (`t`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    /// Always `false` for a constructed set; provided for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    /// Iterate over taxa in input order, each as its slice of state labels.
    pub fn iter(&self) -> impl Iterator<Item = &[String]> {
        self.taxa.iter().map(Vec::as_slice)
    }
}

/// Per-state occupancy tally.
///
/// `count` is `k`, the number of taxa admitting the state. `sigma` is
/// \(\sum_j 1/n_j\) over the admitting taxa, where \(n_j\) is the number of
/// states taxon \(j\) allows. Each term is at most 1, so `sigma <= count`,
/// with equality iff every admitting taxon is single-state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateTally {
    /// Number of taxa admitting this state (`k`).
    pub count: usize,
    /// Accumulated reciprocal-state-count weight (`σ`).
    pub sigma: f64,
}

/// Tallies for every distinct state observed across a [`TaxonSet`], in
/// first-appearance order, with the taxon count they were built from.
///
/// One pass over the taxa builds the table; lookup by label is O(1) average.
/// Summed over the whole table, `sigma` equals the taxon count exactly
/// (each taxon distributes a total weight of 1 across its own states).
///
/// # Examples
///
/// ```
/// use bestchar::{StateTable, TaxonSet};
///
/// let taxa = TaxonSet::new([vec!["red"], vec!["white", "red"]]).unwrap();
/// let table = StateTable::build(&taxa);
/// assert_eq!(table.distinct_states(), 2);
///
/// let red = table.get("red").unwrap();
/// assert_eq!(red.count, 2);
/// assert!((red.sigma - 1.5).abs() < 1e-12); // 1/1 + 1/2
/// ```
#[derive(Debug, Clone)]
pub struct StateTable {
    taxon_count: usize,
    labels: Vec<String>,
    tallies: Vec<StateTally>,
    index: HashMap<String, usize>,
}

impl StateTable {
    /// Tally every state across the taxon set.
    #[must_use]
    pub fn build(taxa: &TaxonSet) -> Self {
        let mut table = Self {
            taxon_count: taxa.len(),
            labels: Vec::new(),
            tallies: Vec::new(),
            index: HashMap::new(),
        };
        for states in taxa.iter() {
            let weight = 1.0 / states.len() as f64;
            for label in states {
                match table.index.get(label.as_str()) {
                    Some(&i) => {
                        let tally = &mut table.tallies[i];
                        tally.count += 1;
                        tally.sigma += weight;
                        trace!(
                            state = %label,
                            count = tally.count,
                            sigma = tally.sigma,
                            "tallied state"
                        );
                    }
                    None => {
                        table.index.insert(label.clone(), table.tallies.len());
                        table.labels.push(label.clone());
                        table.tallies.push(StateTally {
                            count: 1,
                            sigma: weight,
                        });
                        trace!(state = %label, sigma = weight, "new state");
                    }
                }
            }
        }
        debug!(
            taxa = table.taxon_count,
            states = table.tallies.len(),
            "built state table"
        );
        table
    }

    /// Number of taxa the table was built from (`t`).
    #[must_use]
    pub fn taxon_count(&self) -> usize {
        self.taxon_count
    }

    /// Number of distinct observed states (`s`).
    #[must_use]
    pub fn distinct_states(&self) -> usize {
        self.tallies.len()
    }

    /// Look up the tally for a state label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&StateTally> {
        self.index.get(label).map(|&i| &self.tallies[i])
    }

    /// Iterate over `(label, tally)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateTally)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.tallies.iter())
    }

    /// Total `sigma` across the table; equals the taxon count up to rounding.
    #[must_use]
    pub fn total_sigma(&self) -> f64 {
        self.tallies.iter().map(|t| t.sigma).sum()
    }
}

/// The shared accumulation behind the three information coefficients:
/// \(H = -\sum_i (\sigma_i / t) \log_b(k_i / t)\).
///
/// The weighting term is \(\sigma_i / t\), not \(\sigma_i / k_i\). The
/// literature sometimes states the statistic with a further division by
/// \(k_i\); the established key-building tools accumulate without it, and
/// this crate follows the accumulation. The two forms coincide when every
/// state is admitted by exactly one taxon.
fn information_sum(table: &StateTable, ln_base: f64) -> f64 {
    let t = table.taxon_count as f64;
    let mut h = 0.0;
    for tally in &table.tallies {
        let p = tally.count as f64 / t;
        h -= (tally.sigma / t) * (p.ln() / ln_base);
    }
    h
}

/// Intkey-style information coefficient (base-2 logarithms).
///
/// \[
/// H = -\sum_i \frac{\sigma_i}{t} \log_2\!\frac{k_i}{t}
/// \]
///
/// Defined for every valid table: each `k_i >= 1`, so the argument of the
/// logarithm is positive, and a state admitted by all taxa contributes zero.
/// For a single taxon every `p = 1` and the coefficient is identically 0.
///
/// # Examples
///
/// ```
/// use bestchar::{intkey_information, StateTable, TaxonSet};
///
/// // Two taxa, fully distinguished by one binary state: 1 bit.
/// let taxa = TaxonSet::new([vec!["a"], vec!["b"]]).unwrap();
/// let table = StateTable::build(&taxa);
/// assert!((intkey_information(&table) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn intkey_information(table: &StateTable) -> f64 {
    information_sum(table, core::f64::consts::LN_2)
}

/// Pankhurst's information coefficient (logarithms to base `s`, the number
/// of observed states).
///
/// Same accumulation as [`intkey_information`] with \(\log_s\) in place of
/// \(\log_2\), normalizing by how many states the character has.
///
/// # Errors
///
/// Returns [`BestCharError::DegenerateBase`] when only one state was
/// observed (`s = 1`; \(\log_1\) is undefined).
///
/// # Examples
///
/// ```
/// use bestchar::{pankhurst_information, StateTable, TaxonSet};
///
/// let taxa = TaxonSet::new([vec!["a"], vec!["b"]]).unwrap();
/// let table = StateTable::build(&taxa);
/// assert!((pankhurst_information(&table).unwrap() - 1.0).abs() < 1e-12);
///
/// // A single observed state has no base-s logarithm.
/// let constant = TaxonSet::new([vec!["a"], vec!["a"]]).unwrap();
/// assert!(pankhurst_information(&StateTable::build(&constant)).is_err());
/// ```
pub fn pankhurst_information(table: &StateTable) -> Result<f64> {
    let s = table.distinct_states();
    if s < 2 {
        return Err(BestCharError::DegenerateBase("single observed state"));
    }
    Ok(information_sum(table, (s as f64).ln()))
}

/// Normalized information coefficient (logarithms to base `t`, the number
/// of taxa).
///
/// Same accumulation as [`intkey_information`] with \(\log_t\), which keeps
/// the coefficient's range comparable as `t` shrinks while a key is being
/// built.
///
/// # Errors
///
/// Returns [`BestCharError::DegenerateBase`] for a single taxon (`t = 1`;
/// \(\log_1\) is undefined).
pub fn normalized_information(table: &StateTable) -> Result<f64> {
    let t = table.taxon_count;
    if t < 2 {
        return Err(BestCharError::DegenerateBase("single taxon"));
    }
    Ok(information_sum(table, (t as f64).ln()))
}

/// All five coefficients for one character, plus the input dimensions.
///
/// `pankhurst_h` and `normalized_h` are `None` when their logarithm base is
/// degenerate (one observed state and one taxon respectively), so callers
/// still receive every well-defined coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterReport {
    /// Number of taxa (`t`).
    pub taxon_count: usize,
    /// Number of distinct observed states (`s`).
    pub state_count: usize,
    /// Base-2 information coefficient.
    pub intkey_h: f64,
    /// Base-`s` information coefficient; `None` when `s = 1`.
    pub pankhurst_h: Option<f64>,
    /// Base-`t` information coefficient; `None` when `t = 1`.
    pub normalized_h: Option<f64>,
    /// Fraction of taxon pairs sharing no state.
    pub separation_coefficient: f64,
    /// One minus the mean pairwise Jaccard similarity.
    pub average_jaccard_distance: f64,
    /// Number of unordered taxon pairs, `t(t-1)/2`.
    pub total_pairs: usize,
    /// Pairs with an empty state intersection.
    pub separable_pairs: usize,
}

/// Score one character: tally the states, then compute both coefficient
/// families.
///
/// The information and pairwise families are independent; this runs them in
/// sequence over the same immutable input. The input is not consumed and can
/// be scored again with identical results.
///
/// # Errors
///
/// Returns [`BestCharError::InsufficientTaxa`] for fewer than 2 taxa (the
/// pairwise coefficients are undefined with zero pairs). Degenerate
/// logarithm bases do not fail the report; see [`CharacterReport`].
pub fn score_character(taxa: &TaxonSet) -> Result<CharacterReport> {
    if taxa.len() < 2 {
        return Err(BestCharError::InsufficientTaxa {
            needed: 2,
            got: taxa.len(),
        });
    }
    let table = StateTable::build(taxa);
    let pw = pairwise_coefficients(taxa)?;
    Ok(CharacterReport {
        taxon_count: table.taxon_count(),
        state_count: table.distinct_states(),
        intkey_h: intkey_information(&table),
        pankhurst_h: pankhurst_information(&table).ok(),
        normalized_h: normalized_information(&table).ok(),
        separation_coefficient: pw.separation_coefficient,
        average_jaccard_distance: pw.average_jaccard_distance,
        total_pairs: pw.total_pairs,
        separable_pairs: pw.separable_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn petal_colour() -> TaxonSet {
        TaxonSet::new([
            vec!["red"],
            vec!["white", "red"],
            vec!["white"],
            vec!["white"],
        ])
        .unwrap()
    }

    #[test]
    fn tallies_for_petal_colour() {
        let table = StateTable::build(&petal_colour());
        assert_eq!(table.taxon_count(), 4);
        assert_eq!(table.distinct_states(), 2);

        let red = table.get("red").unwrap();
        assert_eq!(red.count, 2);
        assert!((red.sigma - 1.5).abs() < 1e-12); // 1/1 + 1/2

        let white = table.get("white").unwrap();
        assert_eq!(white.count, 3);
        assert!((white.sigma - 2.5).abs() < 1e-12); // 1/2 + 1/1 + 1/1

        assert!(table.get("blue").is_none());

        // First-appearance order.
        let labels: Vec<_> = table.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["red", "white"]);
    }

    #[test]
    fn information_for_petal_colour() {
        let table = StateTable::build(&petal_colour());

        // red: k=2, σ=1.5; white: k=3, σ=2.5; t=4.
        let expected_bits = 0.375 * 1.0 + 0.625 * (4.0f64 / 3.0).log2();
        let h2 = intkey_information(&table);
        assert!((h2 - expected_bits).abs() < 1e-12);

        // s = 2, so the base-s coefficient coincides with base 2.
        let hs = pankhurst_information(&table).unwrap();
        assert!((hs - h2).abs() < 1e-12);

        // t = 4 = 2^2, so the base-t coefficient is exactly half.
        let ht = normalized_information(&table).unwrap();
        assert!((ht - h2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn constant_character_is_uninformative() {
        // One state across all taxa: the base-2 coefficient is 0 (p = 1 for
        // the only state), the base-s coefficient has no logarithm.
        let taxa = TaxonSet::new([vec!["a"], vec!["a"], vec!["a"]]).unwrap();
        let table = StateTable::build(&taxa);
        assert_eq!(table.distinct_states(), 1);
        assert!(intkey_information(&table).abs() < 1e-12);
        assert_eq!(
            pankhurst_information(&table),
            Err(BestCharError::DegenerateBase("single observed state"))
        );
        // Base t = 3 is fine; every term has log_3(1) = 0.
        assert!(normalized_information(&table).unwrap().abs() < 1e-12);
    }

    #[test]
    fn single_taxon_degenerates_base_t_only() {
        let taxa = TaxonSet::new([vec!["a", "b"]]).unwrap();
        let table = StateTable::build(&taxa);
        // Every p = 1, so the well-defined coefficients are 0.
        assert!(intkey_information(&table).abs() < 1e-12);
        assert!(pankhurst_information(&table).unwrap().abs() < 1e-12);
        assert_eq!(
            normalized_information(&table),
            Err(BestCharError::DegenerateBase("single taxon"))
        );
    }

    #[test]
    fn taxon_set_rejects_bad_input() {
        assert_eq!(
            TaxonSet::new(Vec::<Vec<String>>::new()),
            Err(BestCharError::NoTaxa)
        );
        assert_eq!(
            TaxonSet::new([vec!["a"], vec![]]),
            Err(BestCharError::EmptyTaxon { index: 1 })
        );
    }

    #[test]
    fn report_for_petal_colour() {
        let report = score_character(&petal_colour()).unwrap();
        assert_eq!(report.taxon_count, 4);
        assert_eq!(report.state_count, 2);
        assert_eq!(report.total_pairs, 6);
        // "red" is disjoint from each of the two pure-"white" taxa.
        assert_eq!(report.separable_pairs, 2);
        assert!((report.separation_coefficient - 2.0 / 6.0).abs() < 1e-12);
        // Pair similarities 1/2, 0, 0, 1/2, 1/2, 1 sum to 2.5.
        assert!((report.average_jaccard_distance - (1.0 - 2.5 / 6.0)).abs() < 1e-12);
        assert!(report.pankhurst_h.is_some());
        assert!(report.normalized_h.is_some());
    }

    #[test]
    fn report_flags_degenerate_bases_without_failing() {
        let taxa = TaxonSet::new([vec!["a"], vec!["a"]]).unwrap();
        let report = score_character(&taxa).unwrap();
        assert!(report.intkey_h.abs() < 1e-12);
        assert_eq!(report.pankhurst_h, None);
        assert!(report.normalized_h.is_some());
        assert!(report.separation_coefficient.abs() < 1e-12);
        assert!(report.average_jaccard_distance.abs() < 1e-12);
    }

    #[test]
    fn report_requires_two_taxa() {
        let taxa = TaxonSet::new([vec!["a", "b"]]).unwrap();
        assert_eq!(
            score_character(&taxa),
            Err(BestCharError::InsufficientTaxa { needed: 2, got: 1 })
        );
    }

    prop_compose! {
        /// A taxon drawn from a small shared label pool, deduplicated so the
        /// distinct-labels-within-a-taxon assumption holds.
        fn arb_taxon()(ids in prop::collection::vec(0usize..8, 1..5)) -> Vec<String> {
            let mut states: Vec<String> = ids.into_iter().map(|i| format!("s{i}")).collect();
            states.sort();
            states.dedup();
            states
        }
    }

    fn arb_taxa(min: usize) -> impl Strategy<Value = TaxonSet> {
        prop::collection::vec(arb_taxon(), min..12).prop_map(|taxa| TaxonSet::new(taxa).unwrap())
    }

    proptest! {
        #[test]
        fn total_sigma_equals_taxon_count(taxa in arb_taxa(1)) {
            // Each taxon spreads a total weight of exactly 1 over its states.
            let table = StateTable::build(&taxa);
            prop_assert!((table.total_sigma() - taxa.len() as f64).abs() < 1e-9);
        }

        #[test]
        fn sigma_never_exceeds_count(taxa in arb_taxa(1)) {
            let table = StateTable::build(&taxa);
            for (_, tally) in table.iter() {
                prop_assert!(tally.sigma <= tally.count as f64 + 1e-12);
                prop_assert!(tally.sigma > 0.0);
                prop_assert!(tally.count >= 1);
            }
        }

        #[test]
        fn counts_bounded_by_taxon_count(taxa in arb_taxa(1)) {
            let table = StateTable::build(&taxa);
            for (_, tally) in table.iter() {
                prop_assert!(tally.count <= taxa.len());
            }
        }

        #[test]
        fn information_coefficients_are_nonnegative(taxa in arb_taxa(2)) {
            // p <= 1 makes every log term non-positive and every σ positive.
            let table = StateTable::build(&taxa);
            prop_assert!(intkey_information(&table) >= -1e-12);
            if table.distinct_states() >= 2 {
                prop_assert!(pankhurst_information(&table).unwrap() >= -1e-12);
            }
            prop_assert!(normalized_information(&table).unwrap() >= -1e-12);
        }

        #[test]
        fn base_s_matches_base_2_for_binary_characters(taxa in arb_taxa(1)) {
            let table = StateTable::build(&taxa);
            if table.distinct_states() == 2 {
                let h2 = intkey_information(&table);
                let hs = pankhurst_information(&table).unwrap();
                prop_assert!((h2 - hs).abs() < 1e-9);
            }
        }

        #[test]
        fn scoring_is_idempotent(taxa in arb_taxa(2)) {
            let first = score_character(&taxa).unwrap();
            let second = score_character(&taxa).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
