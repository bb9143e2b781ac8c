// ABOUTME: Configuration helpers shared across Zen packages
// ABOUTME: Environment variable names plus parsers with fallback defaults

pub mod constants;
pub mod env;

pub use constants::*;
pub use env::{
    parse_env_flag_or_default, parse_env_or_default, parse_env_or_default_with_validation,
};
