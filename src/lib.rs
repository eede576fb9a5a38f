// Declare all our modules
mod client;
mod config;
mod error;
mod http;
mod models;
pub mod parsers;
mod serialize;

// Publicly export the parts of our library that users will need
pub use client::{AuthSession, DIARY_DATE_FORMAT, ProfileSelector, SessionState};
pub use config::{
    ACCEPTED_STATUS_CODES, ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, DelayConfig,
    Endpoints,
};
pub use error::{Result, ScraperError};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient};
pub use models::*; // Exposes all structs like Diary, Day, Lesson, etc.
pub use serialize::{Convertible, to_plain_structure};
