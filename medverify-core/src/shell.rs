//! Navigation shell: landing page, mock sign-in and placeholder pages.
//!
//! Local UI state only. Sign-in never talks to a server and the session is
//! gone when the process exits.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub const WELCOME_TITLE: &str = "Welcome to Med-Verify";
pub const TAGLINE: &str = "Your Trusted Medical News Detection Platform";
pub const PITCH: &str = "Med-Verify leverages advanced AI technologies to identify misinformation \
in medical news, ensuring you stay informed with trustworthy health information.";

/// The three how-it-works steps on the landing page.
pub const HOW_IT_WORKS: [(&str, &str); 3] = [
    (
        "Input News Snippet",
        "Paste any medical text or article URL for analysis.",
    ),
    (
        "AI-Powered Analysis",
        "Our engine cross-references trusted medical sources in real-time.",
    ),
    (
        "Instant Detection Results",
        "Receive a clear credibility score and evidence-based verdict.",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Landing,
    Login,
    Dashboard,
    History,
    Submit,
    Profile,
}

impl Page {
    /// Pages only reachable with a session.
    pub fn requires_session(self) -> bool {
        matches!(
            self,
            Page::Dashboard | Page::History | Page::Submit | Page::Profile
        )
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Landing => WELCOME_TITLE,
            Page::Login => "Sign In",
            Page::Dashboard => "Med-Verify",
            Page::History => "Verification History",
            Page::Submit => "Submit a Claim",
            Page::Profile => "Your Profile",
        }
    }

    /// Body copy for the placeholder pages.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Page::History => Some("Your past verifications will appear here."),
            Page::Submit => Some("Claim submission for expert review is coming soon."),
            Page::Profile => Some("Profile settings are coming soon."),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthTab {
    #[default]
    SignUp,
    Login,
}

impl AuthTab {
    pub fn toggled(self) -> Self {
        match self {
            AuthTab::SignUp => AuthTab::Login,
            AuthTab::Login => AuthTab::SignUp,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            AuthTab::SignUp => "Create Account",
            AuthTab::Login => "Sign In",
        }
    }
}

/// Raw form fields. Nothing here is ever checked against a server.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn display_name(&self) -> String {
        let username = self.username.trim();
        if !username.is_empty() {
            return username.to_string();
        }
        let local = self.email.trim().split('@').next().unwrap_or("").trim();
        if !local.is_empty() {
            return local.to_string();
        }
        "Guest".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub display_name: String,
    pub email: Option<String>,
    pub signed_in_at: DateTime<Utc>,
}

impl Session {
    pub fn from_form(form: &AuthForm) -> Self {
        let email = form.email.trim();
        Self {
            display_name: form.display_name(),
            email: (!email.is_empty()).then(|| email.to_string()),
            signed_in_at: Utc::now(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShellError {
    #[error("sign in to open {0:?}")]
    NotSignedIn(Page),

    #[error("already signed in as {0}")]
    AlreadySignedIn(String),

    #[error("{0:?} is not reachable from {1:?}")]
    Unreachable(Page, Page),
}

#[derive(Debug, Default)]
pub struct Navigator {
    page: Page,
    tab: AuthTab,
    session: Option<Session>,
}

impl Navigator {
    pub fn page(&self) -> Page {
        self.page
    }

    pub fn tab(&self) -> AuthTab {
        self.tab
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Landing → Login.
    pub fn get_started(&mut self) -> Result<Page, ShellError> {
        if self.page != Page::Landing {
            return Err(ShellError::Unreachable(Page::Login, self.page));
        }
        self.page = Page::Login;
        Ok(self.page)
    }

    pub fn select_tab(&mut self, tab: AuthTab) {
        self.tab = tab;
    }

    pub fn toggle_tab(&mut self) -> AuthTab {
        self.tab = self.tab.toggled();
        self.tab
    }

    /// Login → Dashboard. Either tab signs in the same way.
    pub fn sign_in(&mut self, form: &AuthForm) -> Result<&Session, ShellError> {
        if let Some(session) = &self.session {
            return Err(ShellError::AlreadySignedIn(session.display_name.clone()));
        }
        if self.page != Page::Login {
            return Err(ShellError::Unreachable(Page::Dashboard, self.page));
        }
        let session = Session::from_form(form);
        tracing::info!(display_name = %session.display_name, tab = ?self.tab, "Mock sign-in");
        self.page = Page::Dashboard;
        let session: &Session = self.session.insert(session);
        Ok(session)
    }

    pub fn go(&mut self, page: Page) -> Result<Page, ShellError> {
        if page.requires_session() && self.session.is_none() {
            return Err(ShellError::NotSignedIn(page));
        }
        match page {
            Page::Landing if self.session.is_some() => {
                return Err(ShellError::Unreachable(page, self.page));
            }
            Page::Login if self.session.is_some() || self.page != Page::Landing => {
                return Err(ShellError::Unreachable(page, self.page));
            }
            _ => {}
        }
        self.page = page;
        Ok(page)
    }

    /// Drop the session and return to the landing page.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.page = Page::Landing;
        self.tab = AuthTab::default();
        self.session.take()
    }
}
