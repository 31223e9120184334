use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use mattermost_dl::config::{ExportConfig, DEFAULT_CONFIG_FILE};
use mattermost_dl::cookies;
use mattermost_dl::directory::Directory;
use mattermost_dl::export::{export_channel, ExportOptions};
use mattermost_dl::logging;
use mattermost_dl::prompt::Prompter;
use mattermost_dl::selector;
use mattermost_dl::session;

/// Export Mattermost channels to JSON
#[derive(Debug, Parser)]
#[command(name = "mattermost-dl", version, about)]
struct Args {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Output directory, overrides the configured one
    #[arg(long)]
    output: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut config = ExportConfig::load(&args.config)
        .await
        .with_context(|| format!("loading {}", args.config.display()))?;
    let loaded = config.clone();

    let mut prompter = Prompter::stdio();
    let asked = config.fill_missing(&mut prompter)?;

    let cookie_databases = cookies::find_cookie_databases(&cookies::default_profile_roots());
    let session = session::establish(&mut config, &mut prompter, &cookie_databases)
        .await
        .context("logging in")?;

    if asked || config != loaded {
        config.offer_save(&args.config, &mut prompter).await?;
    }

    let mut directory = Directory::resolve(&session.client).await?;
    let teams = directory.teams(&session.client).await?;
    let team = selector::select_team(&mut prompter, &teams)?;
    let channels = directory.channels(&session.client, team).await?;
    let selected = selector::select_channels(&mut prompter, &channels)?;

    let options = ExportOptions::new(args.output.unwrap_or_else(|| config.output_dir()))
        .with_downloads(config.download_files())
        .with_date_range(config.date_range());

    let mut summaries = Vec::with_capacity(selected.len());
    for channel in &selected {
        let summary = export_channel(&session.client, channel, &mut directory.usernames, &options)
            .await
            .with_context(|| format!("exporting {}", channel.display_name))?;
        summaries.push(summary);
    }

    for s in &summaries {
        prompter.say(format!(
            "{}: {}/{} posts, {} code blocks, {} files ({} failed) -> {}",
            s.channel,
            s.posts_exported,
            s.posts_total,
            s.code_blocks,
            s.attachments_saved,
            s.attachments_failed,
            s.document.display()
        ))?;
    }
    tracing::info!("Finished export");
    Ok(())
}
