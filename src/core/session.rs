//! Session state for the two independent SleepIQ logins.
//!
//! The primary session carries a session key plus the cookies handed out by
//! the bed API; the Insights session carries a bearer token. Both follow the
//! same discipline: cleared when a login starts, populated only when it
//! succeeds.

use std::fmt;

use crate::error::{Result, SessionKind, SleepIqError};

/// A cookie received from the bed API.
#[derive(Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// Raw attributes as sent (`Path=/`, `HttpOnly`, ...).
    pub attributes: Vec<String>,
}

impl Cookie {
    /// Parse a single `Set-Cookie` header value.
    ///
    /// Returns `None` when the header has no `name=value` pair.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let attributes = parts
            .map(str::trim)
            .filter(|attr| !attr.is_empty())
            .map(ToString::to_string)
            .collect();

        Some(Self {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
            attributes,
        })
    }

    /// Render cookies as a single `Cookie` request header value.
    #[must_use]
    pub fn header_value(cookies: &[Self]) -> Option<String> {
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| format!("{}={}", c.name, c.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl fmt::Debug for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cookie")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Login progress of one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggingIn,
    LoggedIn,
}

/// Session-key + cookie session against the bed API.
#[derive(Clone, Default)]
pub struct PrimarySession {
    state: SessionState,
    session_key: String,
    cookies: Vec<Cookie>,
}

impl PrimarySession {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Drop the key and mark the session as mid-login. Cookies are kept so
    /// they can accompany the login request itself.
    pub(crate) fn begin_login(&mut self) {
        self.state = SessionState::LoggingIn;
        self.session_key.clear();
    }

    pub(crate) fn complete_login(&mut self, key: String, cookies: Vec<Cookie>) {
        self.session_key = key;
        self.cookies = cookies;
        self.state = SessionState::LoggedIn;
    }

    pub(crate) fn fail_login(&mut self) {
        self.session_key.clear();
        self.state = SessionState::LoggedOut;
    }

    /// Replace held cookies with those from the latest response, if it set any.
    pub(crate) fn replace_cookies(&mut self, cookies: Vec<Cookie>) {
        if !cookies.is_empty() {
            self.cookies = cookies;
        }
    }
}

impl fmt::Debug for PrimarySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimarySession")
            .field("state", &self.state)
            .field("session_key", &redact(&self.session_key))
            .field("cookies", &self.cookies)
            .finish()
    }
}

/// Bearer-token session against the Insights API.
#[derive(Clone, Default)]
pub struct InsightsSession {
    state: SessionState,
    token: String,
}

impl InsightsSession {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state == SessionState::LoggedIn
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn begin_login(&mut self) {
        self.state = SessionState::LoggingIn;
        self.token.clear();
    }

    pub(crate) fn complete_login(&mut self, token: String) {
        self.token = token;
        self.state = SessionState::LoggedIn;
    }

    pub(crate) fn fail_login(&mut self) {
        self.token.clear();
        self.state = SessionState::LoggedOut;
    }
}

impl fmt::Debug for InsightsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightsSession")
            .field("state", &self.state)
            .field("token", &redact(&self.token))
            .finish()
    }
}

/// Both sessions held by one client instance.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) primary: PrimarySession,
    pub(crate) insights: InsightsSession,
}

impl Session {
    #[must_use]
    pub const fn primary(&self) -> &PrimarySession {
        &self.primary
    }

    #[must_use]
    pub const fn insights(&self) -> &InsightsSession {
        &self.insights
    }

    /// The primary session, or the precondition error if it is not logged in.
    pub fn require_primary(&self) -> Result<&PrimarySession> {
        if self.primary.is_logged_in() {
            Ok(&self.primary)
        } else {
            Err(SleepIqError::NotLoggedIn {
                session: SessionKind::Primary,
            })
        }
    }

    /// The Insights session, or the precondition error if it is not logged in.
    pub fn require_insights(&self) -> Result<&InsightsSession> {
        if self.insights.is_logged_in() {
            Ok(&self.insights)
        } else {
            Err(SleepIqError::NotLoggedIn {
                session: SessionKind::Insights,
            })
        }
    }
}

/// Login transitions shared by both sessions.
pub(crate) trait LoginLifecycle {
    fn begin(&mut self);
    fn fail(&mut self);
    fn is_logging_in(&self) -> bool;
}

impl LoginLifecycle for PrimarySession {
    fn begin(&mut self) {
        self.begin_login();
    }

    fn fail(&mut self) {
        self.fail_login();
    }

    fn is_logging_in(&self) -> bool {
        self.state == SessionState::LoggingIn
    }
}

impl LoginLifecycle for InsightsSession {
    fn begin(&mut self) {
        self.begin_login();
    }

    fn fail(&mut self) {
        self.fail_login();
    }

    fn is_logging_in(&self) -> bool {
        self.state == SessionState::LoggingIn
    }
}

/// A login in flight.
///
/// Dropping the attempt before it completes (including when the login
/// future itself is dropped) returns the session to `LoggedOut`.
pub(crate) struct LoginAttempt<'a, S: LoginLifecycle> {
    session: &'a mut S,
}

impl<'a, S: LoginLifecycle> LoginAttempt<'a, S> {
    pub(crate) fn begin(session: &'a mut S) -> Self {
        session.begin();
        Self { session }
    }

    pub(crate) fn session(&self) -> &S {
        self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut S {
        self.session
    }
}

impl<S: LoginLifecycle> Drop for LoginAttempt<'_, S> {
    fn drop(&mut self) {
        if self.session.is_logging_in() {
            self.session.fail();
        }
    }
}

const fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}
