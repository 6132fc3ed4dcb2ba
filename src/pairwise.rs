//! Pairwise-distance coefficients over taxon pairs.
//!
//! Both coefficients compare the state sets of every unordered pair of taxa:
//!
//! - **Separation coefficient** — the fraction of pairs that are *completely
//!   separable*: if any state is possible for both taxa, this character
//!   cannot distinguish them, so only pairs with an empty intersection count.
//! - **Average Jaccard distance** — one minus the mean pairwise Jaccard
//!   similarity \(|A \cap B| / |A \cup B|\) (Jaccard 1908).
//!
//! Pairs are visited by a double loop over indices `i < j` in input order;
//! each unordered pair is compared exactly once, the input is never mutated,
//! and every pair's contribution combines by commutative summation, so the
//! traversal order does not affect the results.

#![forbid(unsafe_code)]

use tracing::trace;

use crate::{BestCharError, Result, TaxonSet};

/// The two pairwise coefficients, with the pair counts behind them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseCoefficients {
    /// `separable_pairs / total_pairs`, in `[0, 1]`.
    pub separation_coefficient: f64,
    /// `1 - mean pairwise Jaccard similarity`, in `[0, 1]`.
    pub average_jaccard_distance: f64,
    /// `t * (t - 1) / 2`.
    pub total_pairs: usize,
    /// Pairs whose state sets are disjoint.
    pub separable_pairs: usize,
}

/// Number of labels present in both slices.
///
/// Labels within a taxon are assumed distinct, so counting membership of one
/// side in the other yields the set-intersection size.
fn intersection_size(a: &[String], b: &[String]) -> usize {
    a.iter()
        .filter(|label| b.iter().any(|other| other == *label))
        .count()
}

/// Compute the separation coefficient and average Jaccard distance.
///
/// For each pair, the union size comes from inclusion–exclusion
/// (`|A| + |B| - |A ∩ B|`), valid under the distinct-labels-within-a-taxon
/// assumption; it is at least 1 because taxa are non-empty, so the Jaccard
/// quotient is always defined. The separation coefficient is computed with
/// real-valued division — integer division here would silently floor to zero
/// whenever fewer than all pairs are separable.
///
/// # Errors
///
/// Returns [`BestCharError::InsufficientTaxa`] for fewer than 2 taxa (no
/// pairs exist).
///
/// # Examples
///
/// ```
/// use bestchar::{pairwise_coefficients, TaxonSet};
///
/// // Two disjoint single-state taxa: fully separable, maximally distant.
/// let taxa = TaxonSet::new([vec!["a"], vec!["b"]]).unwrap();
/// let pw = pairwise_coefficients(&taxa).unwrap();
/// assert_eq!(pw.total_pairs, 1);
/// assert_eq!(pw.separable_pairs, 1);
/// assert!((pw.separation_coefficient - 1.0).abs() < 1e-12);
/// assert!((pw.average_jaccard_distance - 1.0).abs() < 1e-12);
/// ```
pub fn pairwise_coefficients(taxa: &TaxonSet) -> Result<PairwiseCoefficients> {
    let t = taxa.len();
    if t < 2 {
        return Err(BestCharError::InsufficientTaxa { needed: 2, got: t });
    }
    let total_pairs = t * (t - 1) / 2;

    let all: Vec<&[String]> = taxa.iter().collect();
    let mut separable_pairs = 0usize;
    let mut jaccard_sum = 0.0f64;
    for (i, &a) in all.iter().enumerate() {
        for (offset, &b) in all[i + 1..].iter().enumerate() {
            let inter = intersection_size(a, b);
            let union = a.len() + b.len() - inter;
            let jaccard = inter as f64 / union as f64;
            jaccard_sum += jaccard;
            if inter == 0 {
                separable_pairs += 1;
            }
            trace!(
                first = i,
                second = i + 1 + offset,
                intersection = inter,
                union,
                jaccard,
                "compared pair"
            );
        }
    }

    Ok(PairwiseCoefficients {
        separation_coefficient: separable_pairs as f64 / total_pairs as f64,
        average_jaccard_distance: 1.0 - jaccard_sum / total_pairs as f64,
        total_pairs,
        separable_pairs,
    })
}
