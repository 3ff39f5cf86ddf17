pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::http::HttpGateway;
pub use crate::core::{
    configuration::{BookingChange, Configuration},
    contact::{ContactChange, ContactMessage},
    pricing::{quote, quote_lenient, PriceRules, QuoteBreakdown},
    session::{BookingSession, ContactSession, FormSession},
    submission::{FormModel, PendingSubmission, SubmissionController},
    validator::{validate_booking, validate_contact, Field, FieldErrors},
};
pub use domain::model::{Frequency, ServiceType, SubmissionState};
pub use domain::ports::{BookingGateway, ConfigProvider};
pub use utils::error::{BookingError, Result};
