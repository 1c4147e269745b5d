use anyhow::{anyhow, Result};
use dossier_archive::Archive;
use dossier_config::Config;
use dossier_core::FileCategory;
use dossier_oracle::{GeminiOracle, Narrator, Oracle};

pub async fn decrypt(archive: &Archive, config: &Config, id: &str) -> Result<()> {
    let file = archive.get(id)?;
    let oracle = build_oracle(config)?;

    println!("Decrypting redactions in {}...", file.id);
    let decrypted = oracle.decrypt_redactions(&file.content).await?;

    println!();
    println!("DECRYPTED METADATA:");
    println!("\"{}\"", decrypted);

    Ok(())
}

pub async fn narrate(archive: &Archive, config: &Config, id: &str) -> Result<()> {
    if !config.narration.enabled {
        return Err(anyhow!("narration is disabled in config"));
    }
    let file = archive.get(id)?;

    let mut narrator = Narrator::locate(config.narration.command.as_deref())?;
    narrator.speak(&file.content)?;
    narrator.wait().await?;

    Ok(())
}

pub async fn generate(config: &Config, topic: &str, category: Option<&str>) -> Result<()> {
    let category: FileCategory = match category {
        Some(raw) => raw.parse()?,
        None => FileCategory::Emails,
    };
    let oracle = build_oracle(config)?;

    println!("Accessing archive segment: {topic}...");
    let dossier = oracle.generate_dossier(topic, category).await?;

    println!();
    println!("✓ New dossier received");
    println!("  To:      {}", dossier.to);
    println!("  Subject: {}", dossier.subject);
    println!("  Date:    {}", dossier.date);
    println!();
    println!("{}", dossier.message);

    Ok(())
}

pub fn build_oracle(config: &Config) -> Result<GeminiOracle> {
    let api_key = std::env::var(&config.oracle.api_key_env)
        .map_err(|_| anyhow!("set {} to use the oracle", config.oracle.api_key_env))?;
    Ok(GeminiOracle::new(
        api_key,
        &config.oracle.text_model,
        &config.oracle.video_model,
    ))
}
