//! The term dictionary: which phrases get masked, and how wide the mask is.

use serde::{Deserialize, Serialize};

/// One tracked term and the number of mask glyphs rendered while unresolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermSpec {
    /// Canonical display form of the term.
    pub term: String,
    /// Mask width in glyphs. Always >= 1 after construction.
    pub mask_width: usize,
}

impl TermSpec {
    /// Lowercase lookup key used everywhere the term is addressed.
    pub fn key(&self) -> String {
        self.term.to_lowercase()
    }
}

/// Static term table, fixed for the life of a document view.
///
/// Matching is case-insensitive; entries with a non-positive width are
/// clamped to 1 so a mask can never be invisible.
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    terms: Vec<TermSpec>,
}

// Built-in table for the classified archive corpus. Widths are block counts,
// not character counts.
lazy_static::lazy_static! {
    static ref BUILTIN_TERMS: Vec<(&'static str, i64)> = vec![
        ("Epstein", 8),
        ("Little St. James", 16),
        ("Great St. James", 15),
        ("blue-domed", 10),
        ("temple", 6),
        ("Southern Trust", 14),
        ("Zorro Ranch", 11),
        ("Alexander Acosta", 16),
        ("N908JE", 6),
        ("N212JE", 6),
    ];
}

impl TermDictionary {
    /// Build a dictionary from `(term, mask_width)` pairs.
    pub fn new<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut terms: Vec<TermSpec> = Vec::new();
        for (term, width) in specs {
            let term: String = term.into();
            if term.trim().is_empty() {
                continue;
            }
            let key = term.to_lowercase();
            if terms.iter().any(|t| t.key() == key) {
                continue;
            }
            terms.push(TermSpec {
                term,
                mask_width: width.max(1) as usize,
            });
        }
        Self { terms }
    }

    /// The dictionary shipped with the archive corpus.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TERMS.iter().map(|(t, w)| (*t, *w)))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TermSpec> {
        self.terms.iter()
    }

    /// Look up a spec by its lowercase key.
    pub fn get(&self, key: &str) -> Option<&TermSpec> {
        let key = key.to_lowercase();
        self.terms.iter().find(|t| t.key() == key)
    }

    /// Terms ordered longest first so a shorter term never matches inside a
    /// span already claimed by a longer one. Equal lengths tie-break on the
    /// key so scans stay deterministic.
    pub fn terms_longest_first(&self) -> Vec<&TermSpec> {
        let mut ordered: Vec<&TermSpec> = self.terms.iter().collect();
        ordered.sort_by(|a, b| {
            b.term
                .len()
                .cmp(&a.term.len())
                .then_with(|| a.key().cmp(&b.key()))
        });
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_clamped_to_one() {
        let dict = TermDictionary::new([("ghost", 0), ("shadow", -4)]);
        assert_eq!(dict.get("ghost").unwrap().mask_width, 1);
        assert_eq!(dict.get("shadow").unwrap().mask_width, 1);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = TermDictionary::new([("Epstein", 8)]);
        assert!(dict.get("EPSTEIN").is_some());
        assert!(dict.get("epstein").is_some());
        assert_eq!(dict.get("epstein").unwrap().term, "Epstein");
    }

    #[test]
    fn test_duplicate_keys_keep_first() {
        let dict = TermDictionary::new([("Temple", 6), ("temple", 9)]);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("temple").unwrap().mask_width, 6);
    }

    #[test]
    fn test_longest_first_ordering() {
        let dict = TermDictionary::new([("temple", 6), ("blue-domed", 10), ("ark", 3)]);
        let ordered: Vec<&str> = dict
            .terms_longest_first()
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        assert_eq!(ordered, vec!["blue-domed", "temple", "ark"]);
    }

    #[test]
    fn test_builtin_contains_corpus_terms() {
        let dict = TermDictionary::builtin();
        assert_eq!(dict.get("epstein").unwrap().mask_width, 8);
        assert_eq!(dict.get("little st. james").unwrap().mask_width, 16);
    }
}
