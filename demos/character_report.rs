use std::io::Read;

use bestchar::parse::taxon_set_from_text;
use bestchar::score_character;

fn usage() -> ! {
    eprintln!(
        "Usage:\n  cargo run --example character_report -- <line1> <line2> ...\n  cargo run --example character_report < input.txt\n\n\
Each line is one taxon; separate alternative states with '/'.\n\
Spaces and tab characters are ignored. Example lines for petal colour:\n\
red  white/red  white  white"
    );
    std::process::exit(2);
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        usage();
    }

    let text = if args.is_empty() {
        let mut buf = String::new();
        if std::io::stdin().read_to_string(&mut buf).is_err() || buf.trim().is_empty() {
            usage();
        }
        buf
    } else {
        args.join("\n")
    };

    let taxa = match taxon_set_from_text(&text) {
        Ok(taxa) => taxa,
        Err(e) => {
            eprintln!("input error: {e}");
            std::process::exit(2);
        }
    };

    let report = match score_character(&taxa) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("cannot score: {e}");
            std::process::exit(2);
        }
    };

    println!("Number of taxa= {}", report.taxon_count);
    println!("Number of states= {}", report.state_count);
    println!();

    println!("Results to two decimal places:");
    println!("Intkey-style information coefficient={:.2}", report.intkey_h);
    match report.pankhurst_h {
        Some(h) => println!("Pankhurst's information coefficient={h:.2}"),
        None => println!("Pankhurst's information coefficient=undefined (single state)"),
    }
    match report.normalized_h {
        Some(h) => println!("Normalized information coefficient={h:.2}"),
        None => println!("Normalized information coefficient=undefined (single taxon)"),
    }
    println!();

    println!(
        "Separation coefficient={:.2}   ({} of {} pairs separable)",
        report.separation_coefficient, report.separable_pairs, report.total_pairs
    );
    println!(
        "Average pairwise Jaccard distance={:.2}",
        report.average_jaccard_distance
    );
}
