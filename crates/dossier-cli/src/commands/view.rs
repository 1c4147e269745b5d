use anyhow::Result;
use dossier_archive::Archive;
use dossier_config::Config;
use dossier_oracle::Oracle;

use super::oracle::build_oracle;

pub async fn handle(archive: Archive, config: Config) -> Result<()> {
    // The viewer works without an API key; oracle actions just report
    // themselves unavailable.
    let oracle: Option<Box<dyn Oracle>> = build_oracle(&config)
        .ok()
        .map(|o| Box::new(o) as Box<dyn Oracle>);

    dossier_tui::run(archive, config, oracle).await
}
