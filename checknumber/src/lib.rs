pub use api_responses::{LookupDetails, LookupResponse, ResponseMessage, WhatsAppStatus};
pub use checker::{BatchChecker, CheckError, CheckFailure, LookupOutcome};
pub use config::ApiConfig;
pub use format::{format_outcome, format_response};
pub use request::{validate_country_code, validate_phone_number, LookupRequest};
pub use stats::CheckStatistics;
pub use transport::{Transport, TransportError, WebApiTransport};

#[macro_use]
extern crate lazy_static;

mod api_responses;
mod checker;
pub mod config;
mod format;
mod request;
mod stats;
pub mod transport;
