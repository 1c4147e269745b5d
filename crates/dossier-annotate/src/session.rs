use tracing::debug;

use dossier_core::{AnnotationBoard, Guess, Result, TermDictionary};

/// Where the reader is in the annotation workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No term selected; the panel is closed.
    Idle,
    /// A term is selected and the guess entry form is visible.
    TermSelected { term: String },
    /// A reply box is open under one specific guess of the selected term.
    ReplyComposing { term: String, guess_id: String },
}

/// One document view's annotation session: the board plus the selection
/// state machine. Exactly one term may be active at a time. Discarded when
/// the view closes; nothing persists.
#[derive(Debug)]
pub struct AnnotationSession {
    board: AnnotationBoard,
    state: SessionState,
    author: String,
    pub guess_input: String,
    pub justification_input: String,
    pub reply_input: String,
    expanded: Vec<String>,
}

impl AnnotationSession {
    pub fn new(dictionary: &TermDictionary, author: impl Into<String>) -> Self {
        Self {
            board: AnnotationBoard::from_dictionary(dictionary),
            state: SessionState::Idle,
            author: author.into(),
            guess_input: String::new(),
            justification_input: String::new(),
            reply_input: String::new(),
            expanded: Vec::new(),
        }
    }

    pub fn board(&self) -> &AnnotationBoard {
        &self.board
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The lowercase key of the active term, if any.
    pub fn active_term(&self) -> Option<&str> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::TermSelected { term }
            | SessionState::ReplyComposing { term, .. } => Some(term),
        }
    }

    /// Select a masked or revealed span. Always lands in `TermSelected`,
    /// clearing any in-progress input; selecting a different term while a
    /// reply is being composed short-circuits straight here.
    pub fn select_term(&mut self, term_key: &str) {
        let key = term_key.to_lowercase();
        if !self.board.contains(&key) {
            debug!(term = %key, "ignoring selection of unknown term");
            return;
        }
        self.clear_inputs();
        self.state = SessionState::TermSelected { term: key };
    }

    /// Close the panel from any state.
    pub fn dismiss(&mut self) {
        self.clear_inputs();
        self.state = SessionState::Idle;
    }

    /// Open the reply composer under one guess of the active term.
    pub fn open_reply(&mut self, guess_id: &str) {
        if let SessionState::TermSelected { term } = &self.state {
            let term = term.clone();
            self.reply_input.clear();
            self.state = SessionState::ReplyComposing {
                term,
                guess_id: guess_id.to_string(),
            };
        }
    }

    /// Collapse the reply composer without submitting.
    pub fn cancel_reply(&mut self) {
        if let SessionState::ReplyComposing { term, .. } = &self.state {
            let term = term.clone();
            self.reply_input.clear();
            self.state = SessionState::TermSelected { term };
        }
    }

    /// Submit the guess input for the active term. Empty input (after trim)
    /// is a no-op; the inputs are cleared only on an actual submission.
    pub fn submit_guess(&mut self) -> Result<Option<String>> {
        let Some(term) = self.active_term().map(str::to_string) else {
            return Ok(None);
        };
        let justification = if self.justification_input.trim().is_empty() {
            None
        } else {
            Some(self.justification_input.clone())
        };
        let id = self.board.submit_guess(
            &term,
            &self.author,
            &self.guess_input,
            justification.as_deref(),
        )?;
        if id.is_some() {
            self.guess_input.clear();
            self.justification_input.clear();
        }
        Ok(id)
    }

    /// Submit the reply input under the targeted guess, then collapse the
    /// composer back to `TermSelected`. Empty input is a no-op and leaves
    /// the composer open.
    pub fn submit_reply(&mut self) -> Result<Option<String>> {
        let SessionState::ReplyComposing { term, guess_id } = self.state.clone() else {
            return Ok(None);
        };
        let id = self
            .board
            .submit_reply(&term, &guess_id, &self.author, &self.reply_input)?;
        if id.is_some() {
            self.reply_input.clear();
            self.state = SessionState::TermSelected { term };
        }
        Ok(id)
    }

    /// Vote for a guess of the active term.
    pub fn vote(&mut self, guess_id: &str) -> Result<Option<u32>> {
        let Some(term) = self.active_term().map(str::to_string) else {
            return Ok(None);
        };
        self.board.vote_guess(&term, guess_id).map(Some)
    }

    /// Display-ordered guesses for the active term.
    pub fn visible_guesses(&self) -> Vec<&Guess> {
        self.active_term()
            .map(|term| self.board.sorted_guesses(term))
            .unwrap_or_default()
    }

    /// Toggle the expanded/collapsed display of one guess's justification
    /// and replies. Pure display state; the data model is untouched.
    pub fn toggle_expand(&mut self, guess_id: &str) {
        if let Some(pos) = self.expanded.iter().position(|id| id == guess_id) {
            self.expanded.remove(pos);
        } else {
            self.expanded.push(guess_id.to_string());
        }
    }

    pub fn is_expanded(&self, guess_id: &str) -> bool {
        self.expanded.iter().any(|id| id == guess_id)
    }

    fn clear_inputs(&mut self) {
        self.guess_input.clear();
        self.justification_input.clear();
        self.reply_input.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AnnotationSession {
        let dict = TermDictionary::new([("Epstein", 8), ("temple", 6)]);
        AnnotationSession::new(&dict, "ANONYMOUS INVESTIGATOR")
    }

    #[test]
    fn test_starts_idle() {
        let session = session();
        assert_eq!(*session.state(), SessionState::Idle);
        assert!(session.active_term().is_none());
    }

    #[test]
    fn test_select_term_normalizes_key() {
        let mut session = session();
        session.select_term("EPSTEIN");
        assert_eq!(session.active_term(), Some("epstein"));
    }

    #[test]
    fn test_select_unknown_term_is_ignored() {
        let mut session = session();
        session.select_term("island");
        assert_eq!(*session.state(), SessionState::Idle);
    }

    #[test]
    fn test_selecting_new_term_clears_inputs() {
        let mut session = session();
        session.select_term("epstein");
        session.guess_input.push_str("half-typed");
        session.select_term("temple");
        assert!(session.guess_input.is_empty());
        assert_eq!(session.active_term(), Some("temple"));
    }

    #[test]
    fn test_dismiss_from_any_state() {
        let mut session = session();
        session.select_term("epstein");
        session.guess_input.push_str("the senator");
        session.submit_guess().unwrap();
        let id = session.visible_guesses()[0].id.clone();
        session.open_reply(&id);

        session.dismiss();
        assert_eq!(*session.state(), SessionState::Idle);
        assert!(session.reply_input.is_empty());
    }

    #[test]
    fn test_guess_submission_round_trip() {
        let mut session = session();
        session.select_term("epstein");
        session.guess_input.push_str("  the senator  ");
        session.justification_input.push_str("flight logs");

        let id = session.submit_guess().unwrap();
        assert!(id.is_some());
        assert!(session.guess_input.is_empty());
        assert!(session.justification_input.is_empty());

        let guesses = session.visible_guesses();
        assert_eq!(guesses.len(), 1);
        assert_eq!(guesses[0].text, "the senator");
        assert_eq!(guesses[0].justification.as_deref(), Some("flight logs"));
    }

    #[test]
    fn test_empty_guess_submission_is_noop() {
        let mut session = session();
        session.select_term("epstein");
        session.guess_input.push_str("   ");
        assert!(session.submit_guess().unwrap().is_none());
        assert!(session.visible_guesses().is_empty());
    }

    #[test]
    fn test_guess_without_selection_is_noop() {
        let mut session = session();
        session.guess_input.push_str("the senator");
        assert!(session.submit_guess().unwrap().is_none());
    }

    #[test]
    fn test_reply_flow_returns_to_term_selected() {
        let mut session = session();
        session.select_term("temple");
        session.guess_input.push_str("observatory");
        session.submit_guess().unwrap();
        let guess_id = session.visible_guesses()[0].id.clone();

        session.open_reply(&guess_id);
        assert!(matches!(
            session.state(),
            SessionState::ReplyComposing { .. }
        ));

        session.reply_input.push_str("seen in the blueprints");
        session.submit_reply().unwrap();
        assert_eq!(
            *session.state(),
            SessionState::TermSelected {
                term: "temple".to_string()
            }
        );

        let guesses = session.visible_guesses();
        assert_eq!(guesses[0].replies.len(), 1);
        assert_eq!(guesses[0].replies[0].text, "seen in the blueprints");
    }

    #[test]
    fn test_empty_reply_keeps_composer_open() {
        let mut session = session();
        session.select_term("temple");
        session.guess_input.push_str("observatory");
        session.submit_guess().unwrap();
        let guess_id = session.visible_guesses()[0].id.clone();

        session.open_reply(&guess_id);
        session.reply_input.push_str("  ");
        assert!(session.submit_reply().unwrap().is_none());
        assert!(matches!(
            session.state(),
            SessionState::ReplyComposing { .. }
        ));
    }

    #[test]
    fn test_cancel_reply_returns_without_submitting() {
        let mut session = session();
        session.select_term("temple");
        session.guess_input.push_str("observatory");
        session.submit_guess().unwrap();
        let guess_id = session.visible_guesses()[0].id.clone();

        session.open_reply(&guess_id);
        session.reply_input.push_str("half a thought");
        session.cancel_reply();

        assert_eq!(
            *session.state(),
            SessionState::TermSelected {
                term: "temple".to_string()
            }
        );
        assert!(session.visible_guesses()[0].replies.is_empty());
    }

    #[test]
    fn test_selecting_term_short_circuits_reply_composition() {
        let mut session = session();
        session.select_term("temple");
        session.guess_input.push_str("observatory");
        session.submit_guess().unwrap();
        let guess_id = session.visible_guesses()[0].id.clone();
        session.open_reply(&guess_id);
        session.reply_input.push_str("half a thought");

        session.select_term("epstein");
        assert_eq!(
            *session.state(),
            SessionState::TermSelected {
                term: "epstein".to_string()
            }
        );
        assert!(session.reply_input.is_empty());
    }

    #[test]
    fn test_vote_through_session() {
        let mut session = session();
        session.select_term("epstein");
        session.guess_input.push_str("the senator");
        session.submit_guess().unwrap();
        let guess_id = session.visible_guesses()[0].id.clone();

        assert_eq!(session.vote(&guess_id).unwrap(), Some(1));
        assert_eq!(session.board().top_guess("epstein").unwrap().vote_count, 1);
    }

    #[test]
    fn test_toggle_expand_is_display_only() {
        let mut session = session();
        session.select_term("epstein");
        session.guess_input.push_str("the senator");
        session.submit_guess().unwrap();
        let guess_id = session.visible_guesses()[0].id.clone();

        assert!(!session.is_expanded(&guess_id));
        session.toggle_expand(&guess_id);
        assert!(session.is_expanded(&guess_id));
        session.toggle_expand(&guess_id);
        assert!(!session.is_expanded(&guess_id));
        assert_eq!(session.visible_guesses().len(), 1);
    }
}
