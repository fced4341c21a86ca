//! User flows over the API clients and the shared session store.
//!
//! Each flow validates locally, calls the backend once, and on success updates
//! the store and reports where the user goes next. Failures end the flow; the
//! store is left as it was.

use crate::{
    config::ClientConfig,
    error::{Error, Result},
    features::{
        auth::{AuthClient, LoginRequest, RegisterRequest},
        sessions::{SessionClient, SessionForm, YogaSession},
        teachers::{Teacher, TeacherClient},
        users::{User, UserClient},
    },
    net::ApiClient,
    routing::{Route, Router},
    session::{SessionIdentity, SessionStore},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const ACCOUNT_DELETED: &str = "Your account has been deleted !";
pub const SESSION_CREATED: &str = "Session created !";
pub const SESSION_UPDATED: &str = "Session updated !";
pub const SESSION_DELETED: &str = "Session deleted !";

/// Result of a completed flow: its value, the route to show next, and an
/// optional notice for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub next: Route,
    pub notice: Option<&'static str>,
}

impl<T> Outcome<T> {
    fn new(value: T, next: Route) -> Self {
        Self {
            value,
            next,
            notice: None,
        }
    }

    fn with_notice(mut self, notice: &'static str) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[derive(Clone, Debug)]
pub struct Studio {
    store: SessionStore,
    auth: AuthClient,
    sessions: SessionClient,
    teachers: TeacherClient,
    users: UserClient,
}

impl Studio {
    /// # Errors
    /// Returns `Error::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, store: SessionStore) -> Result<Self> {
        Ok(Self::with_api(ApiClient::new(config, store)?))
    }

    #[must_use]
    pub fn with_api(api: ApiClient) -> Self {
        Self {
            store: api.store().clone(),
            auth: AuthClient::new(api.clone()),
            sessions: SessionClient::new(api.clone()),
            teachers: TeacherClient::new(api.clone()),
            users: UserClient::new(api),
        }
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub fn router(&self) -> Router {
        Router::new(&self.store)
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionClient {
        &self.sessions
    }

    #[must_use]
    pub fn teachers(&self) -> &TeacherClient {
        &self.teachers
    }

    fn identity(&self) -> Result<Arc<SessionIdentity>> {
        self.store.current_identity().ok_or(Error::NotAuthenticated)
    }

    fn admin_identity(&self) -> Result<Arc<SessionIdentity>> {
        let identity = self.identity()?;
        if identity.is_admin {
            Ok(identity)
        } else {
            warn!(user_id = identity.user_id, "admin operation refused");
            Err(Error::Forbidden(
                "session management requires an admin account".to_string(),
            ))
        }
    }

    /// Signs in and publishes the identity, replacing any previous one.
    ///
    /// # Errors
    /// Returns `Error::Validation` for an incomplete form, or the backend error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Outcome<Arc<SessionIdentity>>> {
        request.validate()?;
        let identity = self.auth.login(request).await?;
        info!(user_id = identity.user_id, admin = identity.is_admin, "signed in");
        self.store.log_in(identity);
        let identity = self.identity()?;
        Ok(Outcome::new(identity, Route::Sessions))
    }

    /// # Errors
    /// Returns `Error::Validation` listing every invalid field, or the backend error.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<Outcome<()>> {
        request.validate()?;
        self.auth.register(request).await?;
        info!("account registered");
        Ok(Outcome::new((), Route::Login))
    }

    pub fn logout(&self) -> Outcome<()> {
        self.store.log_out();
        Outcome::new((), Route::Home)
    }

    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is signed in.
    pub async fn profile(&self) -> Result<User> {
        let identity = self.identity()?;
        self.users.get_by_id(identity.user_id).await
    }

    /// Deletes the signed-in account, then signs out.
    ///
    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is signed in, or the backend
    /// error, in which case the session is kept.
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> Result<Outcome<()>> {
        let identity = self.identity()?;
        self.users.delete(identity.user_id).await?;
        info!(user_id = identity.user_id, "account deleted");
        self.store.log_out();
        Ok(Outcome::new((), Route::Home).with_notice(ACCOUNT_DELETED))
    }

    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is signed in.
    pub async fn list_sessions(&self) -> Result<Vec<YogaSession>> {
        self.identity()?;
        self.sessions.all().await
    }

    /// Session detail with its teacher, when one is assigned.
    ///
    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is signed in, or the backend error.
    pub async fn session_detail(&self, id: u64) -> Result<(YogaSession, Option<Teacher>)> {
        self.identity()?;
        let session = self.sessions.detail(id).await?;
        let teacher = match session.teacher_id {
            Some(teacher_id) => Some(self.teachers.detail(teacher_id).await?),
            None => None,
        };
        Ok((session, teacher))
    }

    /// Joins the session as the signed-in user and returns the refreshed session.
    ///
    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is signed in, or the backend error.
    #[instrument(skip(self))]
    pub async fn participate(&self, session_id: u64) -> Result<YogaSession> {
        let identity = self.identity()?;
        self.sessions.participate(session_id, identity.user_id).await?;
        self.sessions.detail(session_id).await
    }

    /// Leaves the session and returns the refreshed session.
    ///
    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is signed in, or the backend error.
    #[instrument(skip(self))]
    pub async fn unparticipate(&self, session_id: u64) -> Result<YogaSession> {
        let identity = self.identity()?;
        self.sessions
            .unparticipate(session_id, identity.user_id)
            .await?;
        self.sessions.detail(session_id).await
    }

    /// Whether the signed-in user attends `session`.
    #[must_use]
    pub fn is_participant(&self, session: &YogaSession) -> bool {
        self.store
            .current_identity()
            .is_some_and(|identity| session.has_participant(identity.user_id))
    }

    /// # Errors
    /// Returns `Error::Forbidden` for non-admins, `Error::Validation` for an
    /// incomplete form, or the backend error.
    #[instrument(skip(self, form))]
    pub async fn create_session(&self, form: &SessionForm) -> Result<Outcome<YogaSession>> {
        self.admin_identity()?;
        form.validate()?;
        let session = self.sessions.create(form).await?;
        Ok(Outcome::new(session, Route::Sessions).with_notice(SESSION_CREATED))
    }

    /// # Errors
    /// Returns `Error::Forbidden` for non-admins, `Error::Validation` for an
    /// incomplete form, or the backend error.
    #[instrument(skip(self, form))]
    pub async fn update_session(&self, id: u64, form: &SessionForm) -> Result<Outcome<YogaSession>> {
        self.admin_identity()?;
        form.validate()?;
        let session = self.sessions.update(id, form).await?;
        Ok(Outcome::new(session, Route::Sessions).with_notice(SESSION_UPDATED))
    }

    /// # Errors
    /// Returns `Error::Forbidden` for non-admins, or the backend error.
    #[instrument(skip(self))]
    pub async fn delete_session(&self, id: u64) -> Result<Outcome<()>> {
        self.admin_identity()?;
        self.sessions.delete(id).await?;
        Ok(Outcome::new((), Route::Sessions).with_notice(SESSION_DELETED))
    }
}
