use crate::config::{ClientConfig, DEFAULT_API_BASE_URL};
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use secrecy::SecretString;
use std::time::Duration;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_LOGOUT_ON_UNAUTHORIZED: &str = "logout-on-unauthorized";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the studio backend")
                .env("YOGASTUDIO_API_URL")
                .global(true)
                .default_value(DEFAULT_API_BASE_URL),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("YOGASTUDIO_TIMEOUT")
                .global(true)
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Account email")
                .env("YOGASTUDIO_EMAIL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Account password")
                .env("YOGASTUDIO_PASSWORD")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_LOGOUT_ON_UNAUTHORIZED)
                .long(ARG_LOGOUT_ON_UNAUTHORIZED)
                .help("Clear the session when the backend answers 401 to an authenticated request")
                .env("YOGASTUDIO_LOGOUT_ON_UNAUTHORIZED")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug)]
pub struct Options {
    pub config: ClientConfig,
    pub email: String,
    pub password: SecretString,
}

impl Options {
    /// # Errors
    /// Returns an error if the URL is invalid or credentials are missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let api_url = matches
            .get_one::<String>(ARG_API_URL)
            .map_or(DEFAULT_API_BASE_URL, String::as_str);
        let timeout = matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10);

        let config = ClientConfig::new(api_url)
            .context("invalid YOGASTUDIO_API_URL")?
            .with_timeout(Duration::from_secs(timeout))
            .with_logout_on_unauthorized(matches.get_flag(ARG_LOGOUT_ON_UNAUTHORIZED));

        let email = matches
            .get_one::<String>(ARG_EMAIL)
            .cloned()
            .context("missing required argument: --email")?;
        let password = matches
            .get_one::<String>(ARG_PASSWORD)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --password")?;

        Ok(Self {
            config,
            email,
            password,
        })
    }
}
