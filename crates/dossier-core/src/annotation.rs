//! Annotation data model: redaction entries, community guesses, replies.
//!
//! All state lives in memory for the life of one document view. Display
//! order of guesses is always recomputed (vote count descending, earliest
//! submission wins ties) and never cached.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::{Error, Result, TermDictionary};

/// A threaded comment attached to one guess. No voting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    pub text: String,
    pub author: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl Reply {
    fn new(author: &str, text: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            author: author.to_string(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// A community-submitted candidate replacement for a masked term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guess {
    pub id: String,
    pub text: String,
    pub justification: Option<String>,
    pub author: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// Only ever incremented. There is no unvote.
    pub vote_count: u32,
    /// Submission order within the entry. Tie-break for equal vote counts;
    /// independent of storage position (guesses are stored newest-first).
    pub seq: u64,
    /// Strict append order. Never re-sorted.
    pub replies: Vec<Reply>,
}

/// Per-term annotation state: the mask spec plus every guess made so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionEntry {
    pub term: String,
    pub mask_width: usize,
    /// Stored newest-first. Display order comes from [`sorted_guesses`].
    ///
    /// [`sorted_guesses`]: RedactionEntry::sorted_guesses
    pub guesses: Vec<Guess>,
    next_seq: u64,
}

impl RedactionEntry {
    pub fn new(term: impl Into<String>, mask_width: usize) -> Self {
        Self {
            term: term.into(),
            mask_width: mask_width.max(1),
            guesses: Vec::new(),
            next_seq: 0,
        }
    }

    fn push_guess(&mut self, author: &str, text: &str, justification: Option<&str>) -> String {
        let guess = Guess {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            justification: justification.map(str::to_string),
            author: author.to_string(),
            created_at: OffsetDateTime::now_utc(),
            vote_count: 0,
            seq: self.next_seq,
            replies: Vec::new(),
        };
        self.next_seq += 1;
        let id = guess.id.clone();
        self.guesses.insert(0, guess);
        id
    }

    pub fn guess(&self, guess_id: &str) -> Option<&Guess> {
        self.guesses.iter().find(|g| g.id == guess_id)
    }

    fn guess_mut(&mut self, guess_id: &str) -> Option<&mut Guess> {
        self.guesses.iter_mut().find(|g| g.id == guess_id)
    }

    /// Guesses in display order: vote count descending, earliest submission
    /// first on ties. Recomputed on every call.
    pub fn sorted_guesses(&self) -> Vec<&Guess> {
        let mut sorted: Vec<&Guess> = self.guesses.iter().collect();
        sorted.sort_by(|a, b| b.vote_count.cmp(&a.vote_count).then(a.seq.cmp(&b.seq)));
        sorted
    }

    /// The guess that currently replaces the mask, if any guess has been
    /// voted at least once.
    pub fn top_guess(&self) -> Option<&Guess> {
        self.sorted_guesses()
            .into_iter()
            .next()
            .filter(|g| g.vote_count > 0)
    }
}

/// All redaction entries for one open document, keyed by lowercase term.
///
/// Constructed once per view from the term dictionary and discarded with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationBoard {
    entries: HashMap<String, RedactionEntry>,
}

impl AnnotationBoard {
    pub fn from_dictionary(dictionary: &TermDictionary) -> Self {
        let entries = dictionary
            .iter()
            .map(|spec| {
                (
                    spec.key(),
                    RedactionEntry::new(spec.term.clone(), spec.mask_width),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn entry(&self, term_key: &str) -> Option<&RedactionEntry> {
        self.entries.get(&term_key.to_lowercase())
    }

    pub fn contains(&self, term_key: &str) -> bool {
        self.entries.contains_key(&term_key.to_lowercase())
    }

    /// Submit a guess for a term. Empty or whitespace-only text is silently
    /// rejected (returns `None`); callers are expected to disable submission
    /// affordances for empty input.
    pub fn submit_guess(
        &mut self,
        term_key: &str,
        author: &str,
        text: &str,
        justification: Option<&str>,
    ) -> Result<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let justification = justification.map(str::trim).filter(|j| !j.is_empty());

        let entry = self.entry_mut(term_key)?;
        let id = entry.push_guess(author, text, justification);
        debug!(term = %entry.term, guess = %id, "guess submitted");
        Ok(Some(id))
    }

    /// Append a reply under a specific guess. Empty text is silently
    /// rejected, like [`submit_guess`].
    ///
    /// [`submit_guess`]: AnnotationBoard::submit_guess
    pub fn submit_reply(
        &mut self,
        term_key: &str,
        guess_id: &str,
        author: &str,
        text: &str,
    ) -> Result<Option<String>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let entry = self.entry_mut(term_key)?;
        let guess = entry
            .guess_mut(guess_id)
            .ok_or_else(|| Error::GuessNotFound(guess_id.to_string()))?;
        let reply = Reply::new(author, text);
        let id = reply.id.clone();
        guess.replies.push(reply);
        debug!(guess = %guess_id, reply = %id, "reply appended");
        Ok(Some(id))
    }

    /// Increment a guess's vote count by exactly 1 and return the new count.
    ///
    /// Repeat voting by the same reader repeatedly increments: there is no
    /// identity model anywhere in this system, so one-vote-per-user is not
    /// enforced. Documented behavior, not a defect.
    pub fn vote_guess(&mut self, term_key: &str, guess_id: &str) -> Result<u32> {
        let entry = self.entry_mut(term_key)?;
        let guess = entry
            .guess_mut(guess_id)
            .ok_or_else(|| Error::GuessNotFound(guess_id.to_string()))?;
        guess.vote_count = guess.vote_count.saturating_add(1);
        debug!(guess = %guess_id, votes = guess.vote_count, "vote recorded");
        Ok(guess.vote_count)
    }

    /// Display-ordered guesses for a term; empty for unknown terms.
    pub fn sorted_guesses(&self, term_key: &str) -> Vec<&Guess> {
        self.entry(term_key)
            .map(|e| e.sorted_guesses())
            .unwrap_or_default()
    }

    /// The promoted guess for a term, if one exists.
    pub fn top_guess(&self, term_key: &str) -> Option<&Guess> {
        self.entry(term_key).and_then(|e| e.top_guess())
    }

    fn entry_mut(&mut self, term_key: &str) -> Result<&mut RedactionEntry> {
        let key = term_key.to_lowercase();
        self.entries
            .get_mut(&key)
            .ok_or(Error::UnknownTerm(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> AnnotationBoard {
        let dict = TermDictionary::new([("Epstein", 8), ("temple", 6)]);
        AnnotationBoard::from_dictionary(&dict)
    }

    #[test]
    fn test_empty_guess_is_noop() {
        let mut board = board();
        assert!(board
            .submit_guess("epstein", "anon", "   ", None)
            .unwrap()
            .is_none());
        assert!(board.entry("epstein").unwrap().guesses.is_empty());
    }

    #[test]
    fn test_guess_starts_unvoted_and_prepends() {
        let mut board = board();
        board
            .submit_guess("epstein", "anon", "first", None)
            .unwrap();
        board
            .submit_guess("epstein", "anon", "second", None)
            .unwrap();

        let entry = board.entry("epstein").unwrap();
        assert_eq!(entry.guesses[0].text, "second");
        assert_eq!(entry.guesses[0].vote_count, 0);
        assert_eq!(entry.guesses[1].seq, 0);
        assert_eq!(entry.guesses[0].seq, 1);
    }

    #[test]
    fn test_vote_increments_exactly_one_guess() {
        let mut board = board();
        let a = board
            .submit_guess("epstein", "anon", "the senator", None)
            .unwrap()
            .unwrap();
        let b = board
            .submit_guess("epstein", "anon", "the banker", None)
            .unwrap()
            .unwrap();

        assert_eq!(board.vote_guess("epstein", &a).unwrap(), 1);
        assert_eq!(board.entry("epstein").unwrap().guess(&a).unwrap().vote_count, 1);
        assert_eq!(board.entry("epstein").unwrap().guess(&b).unwrap().vote_count, 0);
    }

    #[test]
    fn test_repeat_votes_keep_incrementing() {
        let mut board = board();
        let id = board
            .submit_guess("epstein", "anon", "the senator", None)
            .unwrap()
            .unwrap();
        for _ in 0..3 {
            board.vote_guess("epstein", &id).unwrap();
        }
        assert_eq!(board.entry("epstein").unwrap().guess(&id).unwrap().vote_count, 3);
    }

    #[test]
    fn test_sort_by_votes_then_submission_order() {
        let mut board = board();
        let first = board
            .submit_guess("epstein", "anon", "first", None)
            .unwrap()
            .unwrap();
        let second = board
            .submit_guess("epstein", "anon", "second", None)
            .unwrap()
            .unwrap();
        let third = board
            .submit_guess("epstein", "anon", "third", None)
            .unwrap()
            .unwrap();

        board.vote_guess("epstein", &second).unwrap();
        board.vote_guess("epstein", &third).unwrap();

        let order: Vec<&str> = board
            .sorted_guesses("epstein")
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        // second and third tie at 1 vote; second was submitted earlier.
        assert_eq!(order, vec![second.as_str(), third.as_str(), first.as_str()]);
    }

    #[test]
    fn test_no_promotion_without_votes() {
        let mut board = board();
        board
            .submit_guess("epstein", "anon", "the senator", None)
            .unwrap();
        assert!(board.top_guess("epstein").is_none());
    }

    #[test]
    fn test_promotion_after_single_vote() {
        let mut board = board();
        let id = board
            .submit_guess("epstein", "anon", "the senator", None)
            .unwrap()
            .unwrap();
        board.vote_guess("epstein", &id).unwrap();
        assert_eq!(board.top_guess("epstein").unwrap().text, "the senator");
    }

    #[test]
    fn test_replies_append_in_order() {
        let mut board = board();
        let id = board
            .submit_guess("temple", "anon", "observatory", None)
            .unwrap()
            .unwrap();

        board.submit_reply("temple", &id, "anon", "one").unwrap();
        board.submit_reply("temple", &id, "anon", "two").unwrap();
        board.submit_reply("temple", &id, "anon", "three").unwrap();
        assert!(board
            .submit_reply("temple", &id, "anon", "  ")
            .unwrap()
            .is_none());

        let replies: Vec<&str> = board
            .entry("temple")
            .unwrap()
            .guess(&id)
            .unwrap()
            .replies
            .iter()
            .map(|r| r.text.as_str())
            .collect();
        assert_eq!(replies, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_unknown_term_is_an_error() {
        let mut board = board();
        assert!(matches!(
            board.submit_guess("island", "anon", "text", None),
            Err(Error::UnknownTerm(_))
        ));
    }

    #[test]
    fn test_justification_trimmed_and_optional() {
        let mut board = board();
        let id = board
            .submit_guess("epstein", "anon", "the senator", Some("  flight logs  "))
            .unwrap()
            .unwrap();
        let entry = board.entry("epstein").unwrap();
        assert_eq!(
            entry.guess(&id).unwrap().justification.as_deref(),
            Some("flight logs")
        );

        let bare = board
            .submit_guess("epstein", "anon", "the banker", Some("   "))
            .unwrap()
            .unwrap();
        assert!(board
            .entry("epstein")
            .unwrap()
            .guess(&bare)
            .unwrap()
            .justification
            .is_none());
    }
}
