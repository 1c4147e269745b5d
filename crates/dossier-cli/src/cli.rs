use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dossier")]
#[command(about = "Classified case-file archive viewer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the case-file archive
    #[command(subcommand)]
    Archive(ArchiveCommands),

    /// Open the interactive viewer
    View,

    /// Ask the oracle to interpret a file's redactions
    Decrypt {
        /// Case file ID
        id: String,
    },

    /// Read a case file aloud
    Narrate {
        /// Case file ID
        id: String,
    },

    /// Generate a fresh dossier on a topic
    Generate {
        /// Topic of the new document
        topic: String,

        /// Archive segment to file it under (emails, statements, evidence)
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ArchiveCommands {
    /// List every case file
    List {
        /// Only show one archive segment (emails, statements, evidence)
        #[arg(long)]
        category: Option<String>,
    },

    /// Print one case file with its redactions masked
    Show {
        /// Case file ID
        id: String,

        /// Emit span markup instead of plain text
        #[arg(long)]
        markup: bool,
    },
}
