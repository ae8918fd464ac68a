// ABOUTME: Support code for the `academy` command-line binary
// ABOUTME: Logging setup and parsing of request arguments

pub mod logging;
pub mod parse;

pub use parse::{mask_token, parse_form_field, parse_json_body, parse_method, CliError};
