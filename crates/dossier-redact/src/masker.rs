use regex::Regex;
use serde::{Deserialize, Serialize};

use dossier_core::{AnnotationBoard, TermDictionary};

use crate::escape::escape_markup;

/// Glyph repeated `mask_width` times for an unresolved span.
pub const DEFAULT_MASK_GLYPH: char = '█';

/// How one redaction span renders right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedactionDisplay {
    /// No promoted guess: render `width` mask glyphs.
    Masked { width: usize },
    /// A guess has been voted up: render its text. Still addressable.
    ///
    /// The text is user-submitted and carried verbatim; renderers must
    /// escape it before emitting live markup.
    Revealed { text: String },
}

/// One piece of a masked document, in text order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Document text between redaction spans, verbatim.
    Text(String),
    /// An addressable redaction span.
    Redaction {
        /// Sequential id scoped to this render pass, in text order.
        occurrence: usize,
        /// Lowercase term key for data-model lookup.
        term: String,
        display: RedactionDisplay,
    },
}

/// Structured render of a document against a dictionary and board.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaskedDocument {
    pub segments: Vec<Segment>,
}

impl MaskedDocument {
    /// Occurrence id → term key, for the hosting view to wire up pointer
    /// events.
    pub fn click_targets(&self) -> Vec<(usize, &str)> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Redaction {
                    occurrence, term, ..
                } => Some((*occurrence, term.as_str())),
                Segment::Text(_) => None,
            })
            .collect()
    }

    pub fn redaction_count(&self) -> usize {
        self.click_targets().len()
    }

    /// Markup string form for string-consuming hosts.
    ///
    /// Everything spliced in is escaped: document text, term attributes, and
    /// revealed guess text.
    pub fn to_markup(&self, glyph: char) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(&escape_markup(text)),
                Segment::Redaction {
                    occurrence,
                    term,
                    display,
                } => {
                    let (class, body) = match display {
                        RedactionDisplay::Masked { width } => {
                            ("redaction masked", glyph.to_string().repeat(*width))
                        }
                        RedactionDisplay::Revealed { text } => {
                            ("redaction revealed", escape_markup(text))
                        }
                    };
                    out.push_str(&format!(
                        "<span class=\"{}\" data-occ=\"{}\" data-term=\"{}\">{}</span>",
                        class,
                        occurrence,
                        escape_markup(term),
                        body
                    ));
                }
            }
        }
        out
    }

    /// Plain-text form: masks as glyph runs, revealed guesses verbatim.
    pub fn to_plain_text(&self, glyph: char) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Redaction { display, .. } => match display {
                    RedactionDisplay::Masked { width } => {
                        out.push_str(&glyph.to_string().repeat(*width));
                    }
                    RedactionDisplay::Revealed { text } => out.push_str(text),
                },
            }
        }
        out
    }
}

/// Transform raw document text into addressable masked spans.
///
/// Every case-insensitive occurrence of a dictionary term becomes a
/// [`Segment::Redaction`]. Candidate matches are collected against the
/// original text only, longest term first; a candidate overlapping an
/// already-accepted span is dropped, so a term that is a substring of a
/// longer term never re-matches inside it.
pub fn mask_document(
    raw_text: &str,
    dictionary: &TermDictionary,
    board: &AnnotationBoard,
) -> MaskedDocument {
    if raw_text.is_empty() {
        return MaskedDocument::default();
    }

    // (start, end, term_key, mask_width), non-overlapping by construction.
    let mut accepted: Vec<(usize, usize, String, usize)> = Vec::new();

    for spec in dictionary.terms_longest_first() {
        let pattern = format!("(?i){}", regex::escape(&spec.term));
        let re = Regex::new(&pattern).expect("escaped term is a valid pattern");

        for m in re.find_iter(raw_text) {
            let overlaps = accepted
                .iter()
                .any(|(start, end, _, _)| m.start() < *end && *start < m.end());
            if !overlaps {
                accepted.push((m.start(), m.end(), spec.key(), spec.mask_width.max(1)));
            }
        }
    }

    accepted.sort_by_key(|(start, _, _, _)| *start);

    let mut segments = Vec::new();
    let mut cursor = 0;
    for (occurrence, (start, end, term, width)) in accepted.into_iter().enumerate() {
        if start > cursor {
            segments.push(Segment::Text(raw_text[cursor..start].to_string()));
        }

        let display = match board.top_guess(&term) {
            Some(guess) => RedactionDisplay::Revealed {
                text: guess.text.clone(),
            },
            None => RedactionDisplay::Masked { width },
        };
        segments.push(Segment::Redaction {
            occurrence,
            term,
            display,
        });
        cursor = end;
    }
    if cursor < raw_text.len() {
        segments.push(Segment::Text(raw_text[cursor..].to_string()));
    }

    MaskedDocument { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(terms: &[(&str, i64)]) -> (TermDictionary, AnnotationBoard) {
        let dict = TermDictionary::new(terms.iter().map(|(t, w)| (*t, *w)));
        let board = AnnotationBoard::from_dictionary(&dict);
        (dict, board)
    }

    #[test]
    fn test_empty_text_yields_empty_document() {
        let (dict, board) = setup(&[("Epstein", 8)]);
        let masked = mask_document("", &dict, &board);
        assert!(masked.segments.is_empty());
    }

    #[test]
    fn test_unvoted_terms_mask_at_exact_width() {
        let (dict, board) = setup(&[("Epstein", 8), ("Little St. James", 16)]);
        let masked = mask_document("Epstein flew to Little St. James", &dict, &board);

        assert_eq!(
            masked.to_plain_text('█'),
            format!("{} flew to {}", "█".repeat(8), "█".repeat(16))
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let (dict, board) = setup(&[("Epstein", 8)]);
        let masked = mask_document("EPSTEIN and epstein and Epstein", &dict, &board);
        assert_eq!(masked.redaction_count(), 3);
    }

    #[test]
    fn test_occurrence_ids_follow_text_order() {
        let (dict, board) = setup(&[("Epstein", 8), ("temple", 6)]);
        let masked = mask_document("temple before Epstein", &dict, &board);

        let targets = masked.click_targets();
        assert_eq!(targets, vec![(0, "temple"), (1, "epstein")]);
    }

    #[test]
    fn test_adjacent_terms_mask_independently() {
        let (dict, board) = setup(&[("temple", 6), ("blue-domed", 10)]);
        let masked = mask_document("the blue-domed temple", &dict, &board);

        assert_eq!(masked.redaction_count(), 2);
        assert_eq!(
            masked.to_plain_text('█'),
            format!("the {} {}", "█".repeat(10), "█".repeat(6))
        );
    }

    #[test]
    fn test_substring_term_never_rematches_inside_longer_span() {
        // "james" alone would match inside "Little St. James"; the longer
        // term claims the span first.
        let (dict, board) = setup(&[("Little St. James", 16), ("james", 5)]);
        let masked = mask_document("James landed on Little St. James", &dict, &board);

        let targets = masked.click_targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].1, "james");
        assert_eq!(targets[1].1, "little st. james");
    }

    #[test]
    fn test_promoted_guess_reveals_every_occurrence() {
        let (dict, mut board) = setup(&[("Epstein", 8)]);
        let id = board
            .submit_guess("epstein", "anon", "the senator", None)
            .unwrap()
            .unwrap();
        board.vote_guess("epstein", &id).unwrap();

        let masked = mask_document("Epstein met Epstein's pilot", &dict, &board);
        assert_eq!(
            masked.to_plain_text('█'),
            "the senator met the senator's pilot"
        );
        // Revealed spans stay addressable.
        assert_eq!(masked.redaction_count(), 2);
    }

    #[test]
    fn test_tie_break_prefers_earliest_submission() {
        let (dict, mut board) = setup(&[("Epstein", 8)]);
        let first = board
            .submit_guess("epstein", "anon", "the senator", None)
            .unwrap()
            .unwrap();
        let second = board
            .submit_guess("epstein", "anon", "the banker", None)
            .unwrap()
            .unwrap();
        board.vote_guess("epstein", &first).unwrap();
        board.vote_guess("epstein", &second).unwrap();

        let masked = mask_document("Epstein", &dict, &board);
        assert_eq!(masked.to_plain_text('█'), "the senator");
    }

    #[test]
    fn test_markup_escapes_guess_text() {
        let (dict, mut board) = setup(&[("Epstein", 8)]);
        let id = board
            .submit_guess("epstein", "anon", "<img src=x onerror=alert(1)>", None)
            .unwrap()
            .unwrap();
        board.vote_guess("epstein", &id).unwrap();

        let markup = mask_document("Epstein", &dict, &board).to_markup('█');
        assert!(!markup.contains("<img"));
        assert!(markup.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn test_markup_escapes_document_text() {
        let (dict, board) = setup(&[("Epstein", 8)]);
        let markup = mask_document("a <b> & Epstein", &dict, &board).to_markup('█');
        assert!(markup.starts_with("a &lt;b&gt; &amp; "));
        assert!(markup.contains("data-term=\"epstein\""));
        assert!(markup.contains(&"█".repeat(8)));
    }

    #[test]
    fn test_zero_width_spec_still_renders_one_glyph() {
        // Dictionary construction clamps, but the masker re-clamps too.
        let (dict, board) = setup(&[("ghost", 0)]);
        let masked = mask_document("a ghost walks", &dict, &board);
        assert_eq!(masked.to_plain_text('█'), "a █ walks");
    }

    #[test]
    fn test_text_between_spans_is_unchanged() {
        let (dict, board) = setup(&[("Epstein", 8), ("Little St. James", 16)]);
        let raw = "Epstein flew to Little St. James";
        let masked = mask_document(raw, &dict, &board);

        let rebuilt: String = masked
            .segments
            .iter()
            .map(|s| match s {
                Segment::Text(t) => t.clone(),
                Segment::Redaction { .. } => String::new(),
            })
            .collect();
        assert_eq!(rebuilt, " flew to ");
    }
}
