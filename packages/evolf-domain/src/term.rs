use regex::Regex;
use unicode_normalization::UnicodeNormalization;

const IDENTIFIER_SAFE_PATTERN: &str = r"^[A-Za-z0-9_-]+$";
const CHEMICAL_NOTATION_PATTERN: &str = r"[()\[\]=#@+/\\:.,]";

/// NFKC-normalizes a search term, trims it, and collapses internal whitespace runs.
pub fn normalize_term(raw: &str) -> String {
	let normalized: String = raw.nfkc().collect();

	normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Letters, digits, dash, and underscore only. Such terms are likely record or cross-reference
/// identifiers.
pub fn is_identifier_safe(term: &str) -> bool {
	Regex::new(IDENTIFIER_SAFE_PATTERN).map(|re| re.is_match(term)).unwrap_or(false)
}

/// Contains punctuation used by SMILES, InChI, or IUPAC notation.
pub fn has_chemical_notation(term: &str) -> bool {
	Regex::new(CHEMICAL_NOTATION_PATTERN).map(|re| re.is_match(term)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_width_and_whitespace() {
		assert_eq!(normalize_term("  ＯＲ１Ａ１ \t receptor  "), "OR1A1 receptor");
		assert_eq!(normalize_term("   "), "");
	}

	#[test]
	fn classifies_identifier_terms() {
		assert!(is_identifier_safe("EvOlf_0001"));
		assert!(is_identifier_safe("CHEMBL25"));
		assert!(is_identifier_safe("OR1A1-like"));
		assert!(!is_identifier_safe("olfactory receptor"));
		assert!(!is_identifier_safe(""));
	}

	#[test]
	fn classifies_chemical_terms() {
		assert!(has_chemical_notation("CC(=O)Oc1ccccc1C(=O)O"));
		assert!(has_chemical_notation("InChI=1S/CH4/h1H4"));
		assert!(!has_chemical_notation("vanillin"));
	}
}
