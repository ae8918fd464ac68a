// ABOUTME: CLI commands for the persisted anti-forgery token
// ABOUTME: Show where the token lives and whether one is stored, or clear it

use academy_client::{FileTokenStore, TokenStore};
use academy_config::ClientSettings;
use clap::Subcommand;
use colored::*;

#[derive(Debug, Subcommand)]
pub enum TokenCommands {
    /// Show the stored token (masked) and its location
    Show,
    /// Remove the stored token
    Clear,
}

impl TokenCommands {
    pub fn execute(&self) -> anyhow::Result<()> {
        let settings = ClientSettings::from_env()?;
        let store = FileTokenStore::from_settings(&settings);

        match self {
            TokenCommands::Show => show_command(&store),
            TokenCommands::Clear => clear_command(&store),
        }
        Ok(())
    }
}

fn show_command(store: &FileTokenStore) {
    let Some(path) = store.path() else {
        println!(
            "{} No token storage location (set ACADEMY_TOKEN_FILE or HOME)",
            "!".yellow().bold()
        );
        return;
    };

    println!("{} {}", "Location:".bold(), path.display());
    match store.get() {
        Some(token) => println!(
            "{} {}",
            "Token:".bold(),
            academy_cli::mask_token(token.as_str()).green()
        ),
        None => println!("{} {}", "Token:".bold(), "none".dimmed()),
    }
}

fn clear_command(store: &FileTokenStore) {
    store.remove();
    println!("{} Anti-forgery token cleared", "✓".green().bold());
}
