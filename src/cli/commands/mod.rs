pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_ID: &str = "id";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";

fn session_id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Session id")
        .required(true)
        .value_parser(clap::value_parser!(u64))
}

fn subcommands() -> Vec<Command> {
    vec![
        Command::new("sessions").about("List yoga sessions"),
        Command::new("session")
            .about("Show a session with its teacher and attendees")
            .arg(session_id_arg()),
        Command::new("teachers").about("List teachers"),
        Command::new("me").about("Show the signed-in account"),
        Command::new("participate")
            .about("Join a session")
            .arg(session_id_arg()),
        Command::new("unparticipate")
            .about("Leave a session")
            .arg(session_id_arg()),
        Command::new("register")
            .about("Create an account with the configured email and password")
            .arg(
                Arg::new(ARG_FIRST_NAME)
                    .long(ARG_FIRST_NAME)
                    .help("First name")
                    .required(true),
            )
            .arg(
                Arg::new(ARG_LAST_NAME)
                    .long(ARG_LAST_NAME)
                    .help("Last name")
                    .required(true),
            ),
        Command::new("delete-account").about("Delete the signed-in account"),
    ]
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("yogastudio")
        .about("Yoga studio session booking")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(subcommands());

    let command = api::with_args(command);
    logging::with_args(command)
}
