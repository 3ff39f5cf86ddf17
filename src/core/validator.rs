//! Field-scoped validation for the booking and contact forms.
//!
//! Every rule runs independently; a form with several problems reports all
//! of them at once, one message per field.

use crate::core::configuration::Configuration;
use crate::core::contact::ContactMessage;
use crate::domain::model::TIME_SLOTS;
use crate::utils::validation::{
    validate_email, validate_non_empty_string, validate_one_of, validate_range,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

pub const MIN_ROOMS: u32 = 1;
pub const MAX_ROOMS: u32 = 10;
pub const MIN_BATHROOMS: u32 = 1;
pub const MAX_BATHROOMS: u32 = 5;

/// Format produced by date pickers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields that can fail validation. Service type and frequency are typed
/// enums and instructions are free text, so none of them appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Rooms,
    Bathrooms,
    PreferredDate,
    PreferredTime,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Message,
}

impl Field {
    /// Wire name of the field, matching the submitted payload.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Rooms => "rooms",
            Field::Bathrooms => "bathrooms",
            Field::PreferredDate => "preferredDate",
            Field::PreferredTime => "preferredTime",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn check(&mut self, field: Field, outcome: Result<(), String>) {
        if let Err(message) = outcome {
            self.insert(field, message);
        }
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn required(field_name: &str, value: &str, message: &str) -> Result<(), String> {
    validate_non_empty_string(field_name, value).map_err(|_| message.to_string())
}

fn check_email(value: &str) -> Result<(), String> {
    required("email", value, "Email is required")?;
    validate_email("email", value).map_err(|_| "Please enter a valid email address".to_string())
}

fn check_count(field_name: &str, label: &str, value: u32, min: u32, max: u32) -> Result<(), String> {
    validate_range(field_name, value, min, max)
        .map_err(|_| format!("{} must be between {} and {}", label, min, max))
}

fn check_date(value: &str, today: NaiveDate) -> Result<(), String> {
    required("preferredDate", value, "Please select a preferred date")?;
    let date = NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| "Please enter a valid date (YYYY-MM-DD)".to_string())?;
    if date < today {
        return Err("Preferred date cannot be in the past".to_string());
    }
    Ok(())
}

fn check_time(value: &str) -> Result<(), String> {
    required("preferredTime", value, "Please select a preferred time")?;
    validate_one_of("preferredTime", value, &TIME_SLOTS)
        .map_err(|_| "Please choose one of the available time slots".to_string())
}

/// Checks a booking as of `today`.
///
/// Service type and frequency are typed, so membership in their sets is
/// settled when the text is parsed (see [`crate::core::url_sync`] and the
/// CLI) and never reaches this point as an error.
pub fn validate_booking(configuration: &Configuration, today: NaiveDate) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    errors.check(
        Field::Rooms,
        check_count("rooms", "Rooms", configuration.rooms(), MIN_ROOMS, MAX_ROOMS),
    );
    errors.check(
        Field::Bathrooms,
        check_count(
            "bathrooms",
            "Bathrooms",
            configuration.bathrooms(),
            MIN_BATHROOMS,
            MAX_BATHROOMS,
        ),
    );
    errors.check(
        Field::PreferredDate,
        check_date(configuration.preferred_date(), today),
    );
    errors.check(Field::PreferredTime, check_time(configuration.preferred_time()));
    errors.check(
        Field::FirstName,
        required("firstName", configuration.first_name(), "First name is required"),
    );
    errors.check(
        Field::LastName,
        required("lastName", configuration.last_name(), "Last name is required"),
    );
    errors.check(Field::Email, check_email(configuration.email()));
    errors.check(
        Field::Phone,
        required("phone", configuration.phone(), "Phone number is required"),
    );
    errors.check(
        Field::Address,
        required("address", configuration.address(), "Address is required"),
    );

    errors.into_result()
}

/// The contact form uses the same rules as the booking form for the fields
/// they share; only `message` is its own.
pub fn validate_contact(message: &ContactMessage) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    errors.check(
        Field::FirstName,
        required("firstName", message.first_name(), "First name is required"),
    );
    errors.check(
        Field::LastName,
        required("lastName", message.last_name(), "Last name is required"),
    );
    errors.check(Field::Email, check_email(message.email()));
    errors.check(
        Field::Message,
        required("message", message.message(), "Message is required"),
    );

    errors.into_result()
}
