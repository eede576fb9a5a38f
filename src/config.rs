use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://my.e-klase.lv";

const LOGIN_PATH: &str = "/?v=15";
const SWITCHER_PATH: &str = "/SessionContext/SwitchStudentWithFamilyStudentAutoAdd";
const DIARY_PATH: &str = "/Family/Diary";
const LESSON_TIMES_PATH: &str = "/Family/LessonTimes";
const PROFILE_SELECTOR_PATH: &str = "/Family/UserLoginProfile";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/118.0";

/// Status codes the portal answers with when a login or profile switch went through.
pub const ACCEPTED_STATUS_CODES: [u16; 2] = [200, 302];

/// The portal URLs an [`AuthSession`](crate::AuthSession) talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Credentials are POSTed here.
    pub login: String,
    /// Profile switch requests are POSTed here.
    pub switcher: String,
    /// Weekly diary page, queried with `Date`.
    pub diary: String,
    /// Lesson timetable page.
    pub lesson_times: String,
    /// Page listing the profiles available to the logged in account.
    pub profile_selector: String,
}

impl Endpoints {
    /// Builds the standard endpoint paths on top of another host.
    ///
    /// Example: `Endpoints::with_base_url("http://127.0.0.1:8080").diary`
    /// is `"http://127.0.0.1:8080/Family/Diary"`.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            login: format!("{}{}", base, LOGIN_PATH),
            switcher: format!("{}{}", base, SWITCHER_PATH),
            diary: format!("{}{}", base, DIARY_PATH),
            lesson_times: format!("{}{}", base, LESSON_TIMES_PATH),
            profile_selector: format!("{}{}", base, PROFILE_SELECTOR_PATH),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

/// Configuration for simulating human browsing behavior via randomized delays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelayConfig {
    /// Minimum sleep duration in milliseconds before a request.
    pub min_delay_ms: u64,
    /// Maximum sleep duration in milliseconds before a request.
    pub max_delay_ms: u64,
    /// Whether the randomized delay logic is active.
    pub enabled: bool,
}

impl Default for DelayConfig {
    /// Default configuration: 1000ms - 3000ms, disabled.
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            enabled: false,
        }
    }
}

/// Settings for [`ReqwestHttpClient`](crate::ReqwestHttpClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Sent as the `User-Agent` header on every request.
    pub user_agent: String,
    pub delay: DelayConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delay: DelayConfig::default(),
        }
    }
}
