use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use dossier_core::FileCategory;
use dossier_redact::{MaskedDocument, RedactionDisplay, Segment};

use crate::app::{App, Focus, InputMode};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_main(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("DEPT-7 ARCHIVE :: CLASSIFIED CASE FILES")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn draw_main(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32), // Cabinet
            Constraint::Percentage(68), // Letter
        ])
        .split(area);

    draw_cabinet(f, app, chunks[0]);
    draw_letter(f, app, chunks[1]);
}

fn draw_cabinet(f: &mut Frame, app: &App, area: Rect) {
    let tabs: String = FileCategory::all()
        .iter()
        .map(|c| {
            if *c == app.active_category {
                format!("[{c}]")
            } else {
                format!(" {c} ")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut items: Vec<ListItem> = vec![
        ListItem::new(tabs).style(Style::default().fg(Color::DarkGray)),
        ListItem::new(""),
    ];

    let files = app.visible_files();
    if files.is_empty() {
        items.push(
            ListItem::new("  Empty Archive Segment")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)),
        );
    }
    for (i, file) in files.iter().enumerate() {
        let marker = if i == app.selected_index { "▸" } else { " " };
        let line = format!("{} {}  ({})", marker, file.title, file.date);
        let style = if i == app.selected_index {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        items.push(ListItem::new(line).style(style));
    }

    let title = match app.focus {
        Focus::Cabinet => format!(" Cabinet: {} [FOCUSED] ", app.active_category),
        _ => format!(" Cabinet: {} ", app.active_category),
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_letter(f: &mut Frame, app: &App, area: Rect) {
    let Some(letter) = &app.letter else {
        let hint = Paragraph::new("Enter: open file   c: cycle category   g: generate   q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Letter "));
        f.render_widget(hint, area);
        return;
    };
    let Some(file) = app.open_file() else { return };

    let panel_open = letter.session.active_term().is_some();
    let constraints = if panel_open {
        vec![Constraint::Min(0), Constraint::Length(14)]
    } else {
        vec![Constraint::Min(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "CLASSIFICATION: TOP SECRET",
            Style::default().fg(Color::Red).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(format!("To/Ref:  {}", file.recipient)),
        Line::from(format!("Subject: {}", file.title)),
        Line::from(format!("Date:    {}  //  {}", file.date, file.category)),
        Line::from(format!("Sig:     {}  //  sha:{}", file.sender, &file.content_hash[..12])),
        Line::from(""),
    ];
    lines.extend(letter_lines(
        &letter.masked,
        app.config.mask_glyph,
        letter.redaction_cursor,
    ));

    if let Some(decrypted) = &letter.decrypted {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "DECRYPTED METADATA:",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("\"{decrypted}\""),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    if let Some(url) = &letter.reconstruction_url {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("RECONSTRUCTION FEED: {url}"),
            Style::default().fg(Color::Red),
        )));
    }

    let letter_widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((letter.scroll as u16, 0))
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", file.title)));
    f.render_widget(letter_widget, chunks[0]);

    if panel_open {
        draw_annotation_panel(f, app, chunks[1]);
    }
}

/// Render the masked document as styled lines: masks as glyph runs,
/// revealed guesses highlighted, the cursor's span inverted. Segment text
/// is split on newlines; nothing here interprets markup.
fn letter_lines(
    masked: &MaskedDocument,
    glyph: char,
    cursor: Option<usize>,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();

    for segment in &masked.segments {
        match segment {
            Segment::Text(text) => {
                let mut parts = text.split('\n');
                if let Some(first) = parts.next() {
                    if !first.is_empty() {
                        current.push(Span::raw(first.to_string()));
                    }
                }
                for part in parts {
                    lines.push(Line::from(std::mem::take(&mut current)));
                    if !part.is_empty() {
                        current.push(Span::raw(part.to_string()));
                    }
                }
            }
            Segment::Redaction {
                occurrence,
                display,
                ..
            } => {
                let selected = cursor == Some(*occurrence);
                let (content, mut style) = match display {
                    RedactionDisplay::Masked { width } => (
                        glyph.to_string().repeat(*width),
                        Style::default().fg(Color::Black).bg(Color::Black),
                    ),
                    RedactionDisplay::Revealed { text } => (
                        text.clone(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                };
                if selected {
                    style = style
                        .fg(Color::White)
                        .bg(Color::Red)
                        .add_modifier(Modifier::BOLD);
                }
                current.push(Span::styled(content, style));
            }
        }
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

fn draw_annotation_panel(f: &mut Frame, app: &App, area: Rect) {
    let Some(letter) = &app.letter else { return };
    let Some(term) = letter.session.active_term() else {
        return;
    };
    let entry_title = letter
        .session
        .board()
        .entry(term)
        .map(|e| e.term.clone())
        .unwrap_or_else(|| term.to_string());

    let mut lines: Vec<Line> = Vec::new();
    let guesses = letter.session.visible_guesses();
    if guesses.is_empty() {
        lines.push(Line::from(Span::styled(
            "No guesses yet. Press a to submit the first one.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, guess) in guesses.iter().enumerate() {
        let marker = if i == letter.guess_cursor { "▸" } else { " " };
        let style = if i == letter.guess_cursor {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{} [{} votes] \"{}\" — {}",
                marker, guess.vote_count, guess.text, guess.author
            ),
            style,
        )));
        if letter.session.is_expanded(&guess.id) {
            if let Some(justification) = &guess.justification {
                lines.push(Line::from(Span::styled(
                    format!("    why: {justification}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            for reply in &guess.replies {
                lines.push(Line::from(Span::styled(
                    format!("    └ {} — {}", reply.text, reply.author),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    lines.push(Line::from(""));
    match app.input_mode {
        InputMode::ComposingGuess => lines.push(Line::from(format!(
            "guess> {}▏",
            letter.session.guess_input
        ))),
        InputMode::ComposingJustification => lines.push(Line::from(format!(
            "justification (optional)> {}▏",
            letter.session.justification_input
        ))),
        InputMode::ComposingReply => lines.push(Line::from(format!(
            "reply> {}▏",
            letter.session.reply_input
        ))),
        InputMode::Normal => lines.push(Line::from(Span::styled(
            "a: guess  v: vote  r: reply  x: expand  j/k: select  Esc: close",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Community Findings: {entry_title} ")),
        );
    f.render_widget(panel, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let status = app
        .status_message
        .clone()
        .unwrap_or_else(|| "LOCAL_TERMINAL::SECURE_CONNECTION_ESTABLISHED".to_string());
    let footer = Paragraph::new(format!(
        "{}  //  {} FILES LOADED",
        status,
        app.archive.len()
    ))
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}
