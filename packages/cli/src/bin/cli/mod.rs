// ABOUTME: Subcommand implementations for the academy binary
// ABOUTME: Token inspection and single API requests

pub mod request;
pub mod token;
