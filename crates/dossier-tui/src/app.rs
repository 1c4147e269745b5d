use anyhow::Result;

use dossier_annotate::AnnotationSession;
use dossier_archive::Archive;
use dossier_config::Config;
use dossier_core::{CaseFile, FileCategory, TermDictionary};
use dossier_oracle::{Narrator, Oracle};
use dossier_redact::{mask_document, MaskedDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    ComposingGuess,
    ComposingJustification,
    ComposingReply,
}

/// Which pane reacts to list navigation while a letter is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Cabinet,
    Letter,
}

/// One open document: the letter popup plus its annotation session.
pub struct LetterView {
    pub file_id: String,
    pub session: AnnotationSession,
    pub masked: MaskedDocument,
    /// Index into `masked.click_targets()`, the span the cursor sits on.
    pub redaction_cursor: Option<usize>,
    /// Index into the vote-sorted guess list of the active term.
    pub guess_cursor: usize,
    pub decrypted: Option<String>,
    pub reconstruction_url: Option<String>,
    pub scroll: usize,
}

pub struct App {
    pub archive: Archive,
    pub config: Config,
    pub dictionary: TermDictionary,
    oracle: Option<Box<dyn Oracle>>,
    narrator: Option<Narrator>,
    pub active_category: FileCategory,
    pub selected_index: usize,
    pub letter: Option<LetterView>,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub status_message: Option<String>,
}

const GENERATION_TOPICS: &[&str] = &[
    "Forbidden Frequency",
    "The Shadow in the Hall",
    "Project Mercury Leak",
    "The Clock that Ran Backwards",
];

impl App {
    pub fn new(archive: Archive, config: Config, oracle: Option<Box<dyn Oracle>>) -> Self {
        Self {
            archive,
            config,
            dictionary: TermDictionary::builtin(),
            oracle,
            narrator: None,
            active_category: FileCategory::Emails,
            selected_index: 0,
            letter: None,
            focus: Focus::Cabinet,
            input_mode: InputMode::Normal,
            status_message: None,
        }
    }

    pub fn visible_files(&self) -> Vec<&CaseFile> {
        self.archive.by_category(self.active_category)
    }

    pub fn next_file(&mut self) {
        let count = self.visible_files().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1) % count;
        }
    }

    pub fn previous_file(&mut self) {
        let count = self.visible_files().len();
        if count > 0 {
            self.selected_index = if self.selected_index == 0 {
                count - 1
            } else {
                self.selected_index - 1
            };
        }
    }

    pub fn cycle_category(&mut self) {
        let all = FileCategory::all();
        let pos = all
            .iter()
            .position(|c| *c == self.active_category)
            .unwrap_or(0);
        self.active_category = all[(pos + 1) % all.len()];
        self.selected_index = 0;
    }

    /// Open the selected case file in the letter popup, with a fresh
    /// annotation session for it.
    pub fn open_letter(&mut self) {
        let Some(file) = self.visible_files().get(self.selected_index).copied() else {
            return;
        };
        let file_id = file.id.clone();
        let content = file.content.clone();

        let session = AnnotationSession::new(&self.dictionary, &self.config.author_label);
        let masked = mask_document(&content, &self.dictionary, session.board());
        self.letter = Some(LetterView {
            file_id,
            session,
            masked,
            redaction_cursor: None,
            guess_cursor: 0,
            decrypted: None,
            reconstruction_url: None,
            scroll: 0,
        });
        self.focus = Focus::Letter;
    }

    /// Close the popup, discarding the session and releasing narration.
    pub fn close_letter(&mut self) {
        if let Some(narrator) = &mut self.narrator {
            narrator.stop();
        }
        self.letter = None;
        self.focus = Focus::Cabinet;
        self.input_mode = InputMode::Normal;
    }

    pub fn open_file(&self) -> Option<&CaseFile> {
        let letter = self.letter.as_ref()?;
        self.archive.get(&letter.file_id).ok()
    }

    /// Re-render the masked document after any board mutation, so the view
    /// can never show a stale promotion.
    fn remask(&mut self) {
        let Some(file) = self.open_file().cloned() else {
            return;
        };
        if let Some(letter) = &mut self.letter {
            letter.masked = mask_document(&file.content, &self.dictionary, letter.session.board());
        }
    }

    /// Move the redaction cursor and make the span under it the active term.
    pub fn next_redaction(&mut self) {
        self.move_redaction_cursor(1);
    }

    pub fn previous_redaction(&mut self) {
        self.move_redaction_cursor(-1);
    }

    fn move_redaction_cursor(&mut self, delta: isize) {
        let Some(letter) = &mut self.letter else {
            return;
        };
        let targets: Vec<(usize, String)> = letter
            .masked
            .click_targets()
            .into_iter()
            .map(|(occ, term)| (occ, term.to_string()))
            .collect();
        if targets.is_empty() {
            return;
        }

        let next = match letter.redaction_cursor {
            None => 0,
            Some(current) => {
                let len = targets.len() as isize;
                ((current as isize + delta).rem_euclid(len)) as usize
            }
        };
        letter.redaction_cursor = Some(next);
        letter.guess_cursor = 0;
        letter.session.select_term(&targets[next].1);
    }

    pub fn dismiss_panel(&mut self) {
        if let Some(letter) = &mut self.letter {
            letter.session.dismiss();
            letter.redaction_cursor = None;
            letter.guess_cursor = 0;
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn guess_cursor_down(&mut self) {
        if let Some(letter) = &mut self.letter {
            let count = letter.session.visible_guesses().len();
            if count > 0 {
                letter.guess_cursor = (letter.guess_cursor + 1) % count;
            }
        }
    }

    pub fn guess_cursor_up(&mut self) {
        if let Some(letter) = &mut self.letter {
            let count = letter.session.visible_guesses().len();
            if count > 0 {
                letter.guess_cursor = if letter.guess_cursor == 0 {
                    count - 1
                } else {
                    letter.guess_cursor - 1
                };
            }
        }
    }

    fn selected_guess_id(&self) -> Option<String> {
        let letter = self.letter.as_ref()?;
        letter
            .session
            .visible_guesses()
            .get(letter.guess_cursor)
            .map(|g| g.id.clone())
    }

    pub fn start_guess(&mut self) {
        let Some(letter) = &self.letter else { return };
        if letter.session.active_term().is_some() {
            self.input_mode = InputMode::ComposingGuess;
        } else {
            self.status_message = Some("Select a redaction first (Tab)".to_string());
        }
    }

    /// Guess text entered; move on to the optional justification.
    pub fn confirm_guess_text(&mut self) {
        let Some(letter) = &self.letter else { return };
        if letter.session.guess_input.trim().is_empty() {
            // Empty submissions are a silent no-op; stay in the composer.
            return;
        }
        self.input_mode = InputMode::ComposingJustification;
    }

    pub fn confirm_guess(&mut self) -> Result<()> {
        if let Some(letter) = &mut self.letter {
            letter.session.submit_guess()?;
            letter.guess_cursor = 0;
        }
        self.input_mode = InputMode::Normal;
        self.remask();
        Ok(())
    }

    pub fn start_reply(&mut self) {
        let Some(guess_id) = self.selected_guess_id() else {
            return;
        };
        if let Some(letter) = &mut self.letter {
            letter.session.open_reply(&guess_id);
            self.input_mode = InputMode::ComposingReply;
        }
    }

    pub fn confirm_reply(&mut self) -> Result<()> {
        if let Some(letter) = &mut self.letter {
            if letter.session.submit_reply()?.is_some() {
                self.input_mode = InputMode::Normal;
            }
        }
        Ok(())
    }

    pub fn cancel_reply(&mut self) {
        if let Some(letter) = &mut self.letter {
            letter.session.cancel_reply();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_guess(&mut self) {
        if let Some(letter) = &mut self.letter {
            letter.session.guess_input.clear();
            letter.session.justification_input.clear();
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn vote_selected(&mut self) -> Result<()> {
        let Some(guess_id) = self.selected_guess_id() else {
            return Ok(());
        };
        if let Some(letter) = &mut self.letter {
            letter.session.vote(&guess_id)?;
        }
        self.remask();
        Ok(())
    }

    pub fn toggle_expand_selected(&mut self) {
        let Some(guess_id) = self.selected_guess_id() else {
            return;
        };
        if let Some(letter) = &mut self.letter {
            letter.session.toggle_expand(&guess_id);
        }
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(letter) = &mut self.letter {
            match self.input_mode {
                InputMode::ComposingGuess => letter.session.guess_input.push(c),
                InputMode::ComposingJustification => letter.session.justification_input.push(c),
                InputMode::ComposingReply => letter.session.reply_input.push(c),
                InputMode::Normal => {}
            }
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(letter) = &mut self.letter {
            match self.input_mode {
                InputMode::ComposingGuess => {
                    letter.session.guess_input.pop();
                }
                InputMode::ComposingJustification => {
                    letter.session.justification_input.pop();
                }
                InputMode::ComposingReply => {
                    letter.session.reply_input.pop();
                }
                InputMode::Normal => {}
            }
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(letter) = &mut self.letter {
            letter.scroll = letter.scroll.saturating_sub(1);
        }
    }

    pub fn scroll_down(&mut self) {
        if let Some(letter) = &mut self.letter {
            letter.scroll = letter.scroll.saturating_add(1);
        }
    }

    /// Read the letter aloud (masks included, as glyph runs are skipped by
    /// most voices anyway). Failure surfaces on the status line only.
    pub fn narrate(&mut self) {
        if !self.config.narration.enabled {
            self.status_message = Some("Narration disabled in config".to_string());
            return;
        }
        let Some(letter) = &self.letter else { return };
        let text = letter.masked.to_plain_text(self.config.mask_glyph);

        if self.narrator.is_none() {
            match Narrator::locate(self.config.narration.command.as_deref()) {
                Ok(narrator) => self.narrator = Some(narrator),
                Err(e) => {
                    self.status_message = Some(format!("Narration failed: {e}"));
                    return;
                }
            }
        }
        if let Some(narrator) = &mut self.narrator {
            match narrator.speak(&text) {
                Ok(()) => self.status_message = Some("Narrating...".to_string()),
                Err(e) => self.status_message = Some(format!("Narration failed: {e}")),
            }
        }
    }

    /// Ask the oracle for a decrypted reading of the letter. The result is
    /// display-only; the annotation model is never touched.
    pub async fn decrypt(&mut self) {
        let Some(file) = self.open_file().cloned() else {
            return;
        };
        let Some(oracle) = &self.oracle else {
            self.status_message = Some("Oracle unavailable: no API key".to_string());
            return;
        };
        self.status_message = Some("Decrypting...".to_string());
        match oracle.decrypt_redactions(&file.content).await {
            Ok(decrypted) => {
                if let Some(letter) = &mut self.letter {
                    letter.decrypted = Some(decrypted);
                }
                self.status_message = Some("Decryption complete".to_string());
            }
            Err(e) => self.status_message = Some(format!("Decryption failed: {e}")),
        }
    }

    /// Reconstruct the scene of an evidence file as video.
    pub async fn reconstruct(&mut self) {
        let Some(file) = self.open_file().cloned() else {
            return;
        };
        if file.category != FileCategory::Evidence {
            self.status_message = Some("Reconstruction is for evidence files".to_string());
            return;
        }
        let Some(oracle) = &self.oracle else {
            self.status_message = Some("Oracle unavailable: no API key".to_string());
            return;
        };
        let prompt = file
            .reconstruction_prompt
            .clone()
            .unwrap_or_else(|| file.content.clone());

        self.status_message = Some("Reconstructing scene...".to_string());
        match oracle.reconstruct_scene(&prompt).await {
            Ok(url) => {
                if let Some(letter) = &mut self.letter {
                    letter.reconstruction_url = Some(url);
                }
                self.status_message = Some("Reconstruction ready".to_string());
            }
            Err(e) => self.status_message = Some(format!("Reconstruction failed: {e}")),
        }
    }

    /// Generate a fresh dossier and file it on top of the cabinet.
    pub async fn generate_dossier(&mut self) {
        let Some(oracle) = &self.oracle else {
            self.status_message = Some("Oracle unavailable: no API key".to_string());
            return;
        };

        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as usize)
            .unwrap_or(0);
        let topic = GENERATION_TOPICS[nanos % GENERATION_TOPICS.len()];
        let category = FileCategory::all()[nanos % 3];

        self.status_message = Some(format!("Accessing archive segment: {topic}..."));
        match oracle.generate_dossier(topic, category).await {
            Ok(dossier) => {
                let file = CaseFile::new(
                    dossier.subject,
                    "DEPT-7 SECURE",
                    dossier.to,
                    dossier.date,
                    category,
                    dossier.message,
                )
                .with_reconstruction_prompt(dossier.reconstruction_prompt);
                let id = file.id.clone();
                self.archive.add(file);
                self.active_category = category;
                self.selected_index = 0;
                self.status_message = Some(format!("Filed new dossier {id}"));
            }
            Err(e) => self.status_message = Some(format!("Generation failed: {e}")),
        }
    }
}
