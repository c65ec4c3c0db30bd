use anyhow::Result;
use clap::Subcommand;

use localpro_core::directory::{LOAD_ERROR_SUMMARY, LoadState};
use localpro_core::{Directory, DirectoryBody, LocalProConfig, RecordStore, SearchHandoff};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse the public directory
    Directory {
        /// Match name, area, service or description
        #[arg(short, long)]
        search: Option<String>,
        /// Only show this area
        #[arg(short, long)]
        area: Option<String>,
        /// Only show verified electricians
        #[arg(long)]
        verified: bool,
    },
    /// Search from the home page and open the directory with the term
    Find { term: String },
    /// List the service areas
    Areas,
}

pub async fn handle(config: &LocalProConfig, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Directory {
            search,
            area,
            verified,
        } => {
            let mut store = crate::open_store(config).await?;
            let handoff = SearchHandoff::new(store.snapshots(), config.store.handoff_key.as_str());
            let mut directory = open_directory(&mut store, &handoff).await?;

            if let Some(search) = search {
                directory.set_search(search.as_str());
            }
            directory.set_area(area.clone());
            directory.set_verified_only(*verified);

            render(&directory);
        }
        Command::Find { term } => {
            let mut store = crate::open_store(config).await?;
            let handoff = SearchHandoff::new(store.snapshots(), config.store.handoff_key.as_str());
            if !handoff.stash(term).await? {
                tracing::debug!("Empty search term, opening unfiltered directory");
            }

            let directory = open_directory(&mut store, &handoff).await?;
            render(&directory);
        }
        Command::Areas => {
            for area in &config.store.areas {
                println!("{}", area);
            }
        }
    }

    Ok(())
}

/// Load the directory and apply a pending home page search
///
/// A failed load is an error and leaves the pending search in place for the
/// next attempt.
async fn open_directory(store: &mut RecordStore, handoff: &SearchHandoff) -> Result<Directory> {
    let mut directory = Directory::load(store).await;
    if let LoadState::Failed(reason) = directory.load_state() {
        anyhow::bail!("{} ({})", LOAD_ERROR_SUMMARY, reason);
    }

    directory.apply_handoff(handoff).await?;
    Ok(directory)
}

fn render(directory: &Directory) {
    let view = directory.view();
    println!("{}", view.summary);

    match view.body {
        DirectoryBody::Results(cards) => {
            for card in cards {
                println!();
                let badge = if card.verified { " [verified]" } else { "" };
                println!("{}{}", card.name, badge);
                println!("  {}", card.service);
                println!("  {}", card.location);
                println!("  {}", card.experience);
                if !card.description.is_empty() {
                    println!("  {}", card.description);
                }
                println!("  Call:     {}", card.call_link);
                println!("  WhatsApp: {}", card.whatsapp_link);
            }
        }
        DirectoryBody::NoResults => {
            println!("Try adjusting your search or filters.");
        }
        DirectoryBody::LoadFailed(reason) => {
            eprintln!("{}", reason);
        }
    }
}
