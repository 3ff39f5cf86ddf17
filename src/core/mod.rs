pub mod catalog;
pub mod configuration;
pub mod contact;
pub mod pricing;
pub mod session;
pub mod submission;
pub mod url_sync;
pub mod validator;
