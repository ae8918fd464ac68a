// ABOUTME: Entry point of the academy command-line tool
// ABOUTME: Parses arguments, loads .env, installs logging and dispatches subcommands

use clap::{Parser, Subcommand};

mod cli;

use cli::request::RequestArgs;
use cli::token::TokenCommands;

#[derive(Parser)]
#[command(name = "academy")]
#[command(about = "Academy admin console - API access with anti-forgery token handling")]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or clear the stored anti-forgery token
    #[command(subcommand)]
    Token(TokenCommands),

    /// Send one request to the console API
    Request(RequestArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    academy_cli::logging::init_tracing(cli.verbose);

    match cli.command {
        Commands::Token(command) => command.execute(),
        Commands::Request(args) => args.execute().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_request_with_login() {
        let cli = Cli::try_parse_from([
            "academy",
            "request",
            "GET",
            "/api/trainers",
            "--username",
            "admin",
            "--password",
            "pw",
        ])
        .unwrap();

        match cli.command {
            Commands::Request(args) => {
                assert_eq!(args.method, "GET");
                assert_eq!(args.endpoint, "/api/trainers");
                assert_eq!(args.username.as_deref(), Some("admin"));
                assert_eq!(args.login_endpoint, "/api/auth/login");
            }
            _ => panic!("Expected request command"),
        }
    }

    #[test]
    fn test_password_requires_username() {
        let result = Cli::try_parse_from([
            "academy",
            "request",
            "GET",
            "/api/trainers",
            "--password",
            "pw",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_token_clear() {
        let cli = Cli::try_parse_from(["academy", "token", "clear"]).unwrap();
        assert!(matches!(cli.command, Commands::Token(TokenCommands::Clear)));
    }
}
