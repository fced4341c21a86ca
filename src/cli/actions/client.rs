use crate::{
    config::ClientConfig,
    features::{
        auth::{LoginRequest, RegisterRequest},
        sessions::YogaSession,
        teachers::Teacher,
        users::User,
    },
    session::SessionStore,
    studio::Studio,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::fmt::Write;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Task {
    Sessions,
    Session(u64),
    Teachers,
    Me,
    Participate(u64),
    Unparticipate(u64),
    Register {
        first_name: String,
        last_name: String,
    },
    DeleteAccount,
}

#[derive(Debug)]
pub struct Args {
    pub config: ClientConfig,
    pub email: String,
    pub password: SecretString,
    pub task: Task,
}

/// Runs one task against the backend and prints the result on stdout.
///
/// # Errors
/// Returns an error if login or the task itself fails.
pub async fn execute(args: Args) -> Result<()> {
    let studio = Studio::new(args.config, SessionStore::new())?;

    if let Task::Register {
        first_name,
        last_name,
    } = args.task
    {
        let request = RegisterRequest {
            email: args.email,
            first_name,
            last_name,
            password: args.password,
        };
        studio.register(&request).await.context("registration failed")?;
        println!("Account created for {}, you can now log in.", request.email);
        return Ok(());
    }

    let login = LoginRequest {
        email: args.email,
        password: args.password,
    };
    let signed_in = studio.login(&login).await.context("login failed")?;
    debug!(user_id = signed_in.value.user_id, "logged in");

    let output = match args.task {
        Task::Sessions => render_sessions(&studio.list_sessions().await?),
        Task::Session(id) => {
            let (session, teacher) = studio.session_detail(id).await?;
            render_session(&session, teacher.as_ref(), studio.is_participant(&session))
        }
        Task::Teachers => render_teachers(&studio.teachers().all().await?),
        Task::Me => render_profile(&studio.profile().await?),
        Task::Participate(id) => {
            let session = studio.participate(id).await?;
            format!(
                "Joined \"{}\" ({} attendees)",
                session.name,
                session.attendees()
            )
        }
        Task::Unparticipate(id) => {
            let session = studio.unparticipate(id).await?;
            format!("Left \"{}\" ({} attendees)", session.name, session.attendees())
        }
        Task::DeleteAccount => {
            let outcome = studio.delete_account().await?;
            outcome.notice.unwrap_or_default().to_string()
        }
        Task::Register { .. } => String::new(),
    };

    println!("{output}");
    Ok(())
}

fn render_sessions(sessions: &[YogaSession]) -> String {
    if sessions.is_empty() {
        return "No sessions scheduled.".to_string();
    }
    let mut out = String::new();
    for session in sessions {
        let _ = writeln!(
            out,
            "#{:<4} {}  {}  ({} attendees)",
            session.id,
            session.date.format(DATE_FORMAT),
            session.name,
            session.attendees()
        );
    }
    out.trim_end().to_string()
}

fn render_session(session: &YogaSession, teacher: Option<&Teacher>, participating: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", session.name, session.id);
    let _ = writeln!(out, "Date: {}", session.date.format(DATE_FORMAT));
    if let Some(teacher) = teacher {
        let _ = writeln!(out, "Teacher: {}", teacher.full_name());
    }
    let _ = writeln!(out, "Attendees: {}", session.attendees());
    if participating {
        let _ = writeln!(out, "You are participating.");
    }
    if !session.description.is_empty() {
        let _ = writeln!(out, "\n{}", session.description);
    }
    out.trim_end().to_string()
}

fn render_teachers(teachers: &[Teacher]) -> String {
    teachers
        .iter()
        .map(|teacher| format!("#{:<4} {}", teacher.id, teacher.full_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", user.display_name());
    let _ = writeln!(out, "Email: {}", user.email);
    if user.admin {
        let _ = writeln!(out, "You are admin");
    }
    if let Some(created) = user.created_at {
        let _ = writeln!(out, "Created: {}", created.format(DATE_FORMAT));
    }
    if let Some(updated) = user.updated_at {
        let _ = writeln!(out, "Last update: {}", updated.format(DATE_FORMAT));
    }
    out.trim_end().to_string()
}
