use anyhow::Result;
use dossier_archive::Archive;
use dossier_config::Config;
use dossier_core::{AnnotationBoard, FileCategory, TermDictionary};
use dossier_redact::mask_document;

use crate::cli::ArchiveCommands;

pub fn handle(cmd: ArchiveCommands, archive: &Archive, config: &Config) -> Result<()> {
    match cmd {
        ArchiveCommands::List { category } => list(archive, category),
        ArchiveCommands::Show { id, markup } => show(archive, config, &id, markup),
    }
}

fn list(archive: &Archive, category: Option<String>) -> Result<()> {
    let categories: Vec<FileCategory> = match category {
        Some(raw) => vec![raw.parse()?],
        None => FileCategory::all().to_vec(),
    };

    for category in categories {
        let files = archive.by_category(category);
        println!("{} ({}):", category, files.len());
        for file in files {
            println!("  {}  {}  ({})", file.id, file.title, file.date);
        }
        println!();
    }

    Ok(())
}

fn show(archive: &Archive, config: &Config, id: &str, markup: bool) -> Result<()> {
    let file = archive.get(id)?;

    // A fresh view: no guesses yet, every term fully masked.
    let dictionary = TermDictionary::builtin();
    let board = AnnotationBoard::from_dictionary(&dictionary);
    let masked = mask_document(&file.content, &dictionary, &board);

    println!("CLASSIFICATION: TOP SECRET");
    println!("To/Ref:  {}", file.recipient);
    println!("Subject: {}", file.title);
    println!("Date:    {}  //  {}", file.date, file.category);
    println!("Sig:     {}  //  sha:{}", file.sender, &file.content_hash[..12]);
    println!();
    if markup {
        println!("{}", masked.to_markup(config.mask_glyph));
    } else {
        println!("{}", masked.to_plain_text(config.mask_glyph));
    }
    println!();
    println!("{} redacted spans", masked.redaction_count());

    Ok(())
}
