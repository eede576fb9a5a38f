use crate::config::{ACCEPTED_STATUS_CODES, Endpoints};
use crate::error::{Result, ScraperError};
use crate::http::{HttpClient, HttpResponse, ReqwestHttpClient};
use crate::models::{Diary, LessonTime, StudentProfile};
use crate::parsers;
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Format of the `Date` query parameter of the diary page.
pub const DIARY_DATE_FORMAT: &str = "%d.%m.%Y.";

/// Where an [`AuthSession`] is in the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing has been sent yet, or the last login failed.
    Anonymous,
    /// Credentials were accepted; no student profile is active yet.
    Authenticated,
    /// A student profile is active and its pages can be fetched.
    ProfileSelected {
        profile_id: String,
        organization_id: String,
    },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticated => "authenticated",
            SessionState::ProfileSelected { .. } => "profile-selected",
        }
    }
}

/// Which student profile to switch to after logging in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelector {
    /// Use these identifiers directly.
    Ids {
        profile_id: String,
        organization_id: String,
    },
    /// Pick the n-th profile listed on the profile selector page.
    Index(usize),
}

impl Default for ProfileSelector {
    fn default() -> Self {
        ProfileSelector::Index(0)
    }
}

/// A logged in e-klase session.
///
/// The session owns the HTTP client and with it the cookies identifying the
/// login. Methods that change the state take `&mut self`.
pub struct AuthSession<C: HttpClient = ReqwestHttpClient> {
    client: C,
    endpoints: Endpoints,
    state: SessionState,
}

impl AuthSession<ReqwestHttpClient> {
    /// A session against the public portal with the default client settings.
    pub fn new() -> Result<Self> {
        Ok(Self::with_client(ReqwestHttpClient::new()?, Endpoints::default()))
    }
}

impl<C: HttpClient> AuthSession<C> {
    pub fn with_client(client: C, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The `(profile_id, organization_id)` of the active profile.
    pub fn current_profile(&self) -> Option<(&str, &str)> {
        match &self.state {
            SessionState::ProfileSelected {
                profile_id,
                organization_id,
            } => Some((profile_id.as_str(), organization_id.as_str())),
            _ => None,
        }
    }

    /// Logs in with a username and password.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        let form = [
            ("UserName", username),
            ("Password", password),
            ("fake_pass", ""),
        ];

        let response = self.client.post_form(&self.endpoints.login, &form).await?;
        if let Err(e) = accepted(response) {
            self.state = SessionState::Anonymous;
            return Err(e);
        }

        info!("Login accepted");
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Switches to a student profile, either by identifiers or by its position on
    /// the profile selector page.
    pub async fn select_profile(&mut self, selector: ProfileSelector) -> Result<()> {
        self.require_authenticated("select_profile")?;

        let (profile_id, organization_id) = match selector {
            ProfileSelector::Ids {
                profile_id,
                organization_id,
            } => (profile_id, organization_id),
            ProfileSelector::Index(index) => {
                let profiles = self.fetch_profiles().await?;
                let available = profiles.len();
                let profile = profiles
                    .into_iter()
                    .nth(index)
                    .ok_or(ScraperError::ProfileIndexOutOfRange { index, available })?;
                (profile.profile_id, profile.organization_id)
            }
        };

        let form = [
            ("TenantId", organization_id.as_str()),
            ("pf_id", profile_id.as_str()),
        ];
        let response = self
            .client
            .post_form(&self.endpoints.switcher, &form)
            .await?;
        accepted(response)?;

        info!(
            "Switched to profile {} of organization {}",
            profile_id, organization_id
        );
        self.state = SessionState::ProfileSelected {
            profile_id,
            organization_id,
        };
        Ok(())
    }

    /// Logs in and switches to a profile in one go.
    pub async fn login_with_profile(
        &mut self,
        username: &str,
        password: &str,
        selector: ProfileSelector,
    ) -> Result<()> {
        self.login(username, password).await?;
        self.select_profile(selector).await
    }

    /// Fetches the profiles available to the logged in account.
    pub async fn fetch_profiles(&self) -> Result<Vec<StudentProfile>> {
        self.require_authenticated("fetch_profiles")?;

        let html = self.get_html(&self.endpoints.profile_selector, &[]).await?;
        parsers::profiles::parse_profiles_from_html(&html)
    }

    /// Fetches the diary of the week containing `date`.
    pub async fn fetch_diary(&self, date: NaiveDate) -> Result<Diary> {
        let label = date.format(DIARY_DATE_FORMAT).to_string();
        self.fetch_diary_for_label(&label).await
    }

    /// Fetches the diary using a date already formatted as `DD.MM.YYYY.`.
    pub async fn fetch_diary_for_label(&self, date_label: &str) -> Result<Diary> {
        self.require_profile("fetch_diary")?;

        let html = self
            .get_html(&self.endpoints.diary, &[("Date", date_label)])
            .await?;
        parsers::diary::parse_diary_from_html(&html)
    }

    /// Fetches the lesson timetable of the active profile.
    pub async fn fetch_lesson_times(&self) -> Result<Vec<LessonTime>> {
        self.require_profile("fetch_lesson_times")?;

        let html = self.get_html(&self.endpoints.lesson_times, &[]).await?;
        parsers::lesson_times::parse_lesson_times_from_html(&html)
    }

    async fn get_html(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        let response = self.client.get(url, query).await?;
        debug!("GET {} answered {}", url, response.status);

        if !(200..300).contains(&response.status) {
            warn!("{} answered with status {}", url, response.status);
            return Err(ScraperError::UnexpectedStatus {
                url: url.to_string(),
                status: response.status,
            });
        }

        Ok(response.body)
    }

    fn require_authenticated(&self, operation: &'static str) -> Result<()> {
        match self.state {
            SessionState::Anonymous => Err(ScraperError::InvalidState {
                operation,
                required: "authenticated",
                current: self.state.name(),
            }),
            _ => Ok(()),
        }
    }

    fn require_profile(&self, operation: &'static str) -> Result<()> {
        match self.state {
            SessionState::ProfileSelected { .. } => Ok(()),
            _ => Err(ScraperError::InvalidState {
                operation,
                required: "profile-selected",
                current: self.state.name(),
            }),
        }
    }
}

fn accepted(response: HttpResponse) -> Result<()> {
    if ACCEPTED_STATUS_CODES.contains(&response.status) {
        return Ok(());
    }

    Err(ScraperError::AuthenticationFailed {
        status: response.status,
        body: response.body,
    })
}
