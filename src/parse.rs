//! Free-text input tokenization.
//!
//! The conventional input format for single-character observations is one
//! taxon per line, with `/` separating alternative states and spaces/tabs
//! carrying no meaning:
//!
//! ```text
//! red
//! white/red
//! white
//! white
//! ```
//!
//! This module turns such text into a [`TaxonSet`]; everything downstream
//! consumes only the structured form.

use crate::{BestCharError, Result, TaxonSet};

/// Parse one-taxon-per-line text into a [`TaxonSet`].
///
/// Spaces and tab characters are removed entirely (so `white / red` and
/// `white/red` are the same taxon). Lines left empty after stripping are
/// skipped. Empty tokens from doubled or trailing separators (`red//white`,
/// `red/`) are discarded.
///
/// # Errors
///
/// Returns [`BestCharError::EmptyTaxon`] if a non-blank line contains only
/// separators, or [`BestCharError::NoTaxa`] if no line yields a taxon.
///
/// # Examples
///
/// ```
/// use bestchar::parse::taxon_set_from_text;
///
/// let taxa = taxon_set_from_text("red\nwhite / red\n\nwhite\nwhite\n").unwrap();
/// assert_eq!(taxa.len(), 4);
/// assert_eq!(taxa.iter().nth(1).unwrap(), ["white", "red"]);
/// ```
pub fn taxon_set_from_text(input: &str) -> Result<TaxonSet> {
    let mut taxa: Vec<Vec<String>> = Vec::new();
    for line in input.lines() {
        let compact: String = line.chars().filter(|c| !matches!(c, ' ' | '\t')).collect();
        if compact.is_empty() {
            continue;
        }
        let states: Vec<String> = compact
            .split('/')
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();
        if states.is_empty() {
            // e.g. a line of nothing but slashes
            return Err(BestCharError::EmptyTaxon { index: taxa.len() });
        }
        taxa.push(states);
    }
    TaxonSet::new(taxa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_character;

    #[test]
    fn splits_on_slashes_and_strips_whitespace() {
        let taxa = taxon_set_from_text("red\n\twhite / red\nwhite\n  white  \n").unwrap();
        let parsed: Vec<_> = taxa.iter().collect();
        assert_eq!(parsed[0], ["red"]);
        assert_eq!(parsed[1], ["white", "red"]);
        assert_eq!(parsed[2], ["white"]);
        assert_eq!(parsed[3], ["white"]);
    }

    #[test]
    fn skips_blank_lines() {
        let taxa = taxon_set_from_text("\n\na\n   \n\t\nb\n\n").unwrap();
        assert_eq!(taxa.len(), 2);
    }

    #[test]
    fn drops_empty_tokens_from_doubled_separators() {
        let taxa = taxon_set_from_text("a//b\nc/\n").unwrap();
        let parsed: Vec<_> = taxa.iter().collect();
        assert_eq!(parsed[0], ["a", "b"]);
        assert_eq!(parsed[1], ["c"]);
    }

    #[test]
    fn rejects_separator_only_lines() {
        assert_eq!(
            taxon_set_from_text("a\n//\nb\n"),
            Err(BestCharError::EmptyTaxon { index: 1 })
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(taxon_set_from_text(""), Err(BestCharError::NoTaxa));
        assert_eq!(taxon_set_from_text("  \n\t\n"), Err(BestCharError::NoTaxa));
    }

    #[test]
    fn parsed_text_scores_like_structured_input() {
        let from_text = taxon_set_from_text("red\nwhite/red\nwhite\nwhite\n").unwrap();
        let structured = TaxonSet::new([
            vec!["red"],
            vec!["white", "red"],
            vec!["white"],
            vec!["white"],
        ])
        .unwrap();
        assert_eq!(
            score_character(&from_text).unwrap(),
            score_character(&structured).unwrap()
        );
    }
}
