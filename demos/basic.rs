use bestchar::{score_character, TaxonSet};

fn main() {
    // Petal colour scored for four taxa.
    let taxa = TaxonSet::new([
        vec!["red"],
        vec!["white", "red"],
        vec!["white"],
        vec!["white"],
    ])
    .unwrap();

    let report = score_character(&taxa).unwrap();

    assert!(report.intkey_h >= 0.0);
    assert!((0.0..=1.0).contains(&report.separation_coefficient));
    assert!((0.0..=1.0).contains(&report.average_jaccard_distance));

    println!(
        "t={} s={} H_intkey={:.4} separation={:.4} jaccard_dist={:.4}",
        report.taxon_count,
        report.state_count,
        report.intkey_h,
        report.separation_coefficient,
        report.average_jaccard_distance
    );
}
