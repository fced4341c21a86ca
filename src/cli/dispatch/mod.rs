//! Maps validated CLI matches to an action.

use crate::cli::actions::{
    client::{Args, Task},
    Action,
};
use crate::cli::commands::{api, ARG_FIRST_NAME, ARG_ID, ARG_LAST_NAME};
use anyhow::{anyhow, Context, Result};

fn session_id(matches: &clap::ArgMatches) -> Result<u64> {
    matches
        .get_one::<u64>(ARG_ID)
        .copied()
        .context("missing required argument: <id>")
}

fn name(matches: &clap::ArgMatches, arg: &str) -> Result<String> {
    matches
        .get_one::<String>(arg)
        .cloned()
        .with_context(|| format!("missing required argument: --{arg}"))
}

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let task = match matches.subcommand() {
        Some(("sessions", _)) => Task::Sessions,
        Some(("session", sub)) => Task::Session(session_id(sub)?),
        Some(("teachers", _)) => Task::Teachers,
        Some(("me", _)) => Task::Me,
        Some(("participate", sub)) => Task::Participate(session_id(sub)?),
        Some(("unparticipate", sub)) => Task::Unparticipate(session_id(sub)?),
        Some(("register", sub)) => Task::Register {
            first_name: name(sub, ARG_FIRST_NAME)?,
            last_name: name(sub, ARG_LAST_NAME)?,
        },
        Some(("delete-account", _)) => Task::DeleteAccount,
        Some((other, _)) => return Err(anyhow!("unknown command: {other}")),
        None => return Err(anyhow!("missing command")),
    };

    let options = api::Options::parse(matches)?;

    Ok(Action::Client(Args {
        config: options.config,
        email: options.email,
        password: options.password,
        task,
    }))
}
