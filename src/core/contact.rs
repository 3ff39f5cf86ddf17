use crate::core::validator::{self, FieldErrors};
use crate::domain::model::ContactRequest;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::Validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactChange {
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    Message(String),
}

/// The general inquiry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    message: String,
}

impl ContactMessage {
    pub fn apply(&mut self, change: ContactChange) {
        match change {
            ContactChange::FirstName(value) => self.first_name = value,
            ContactChange::LastName(value) => self.last_name = value,
            ContactChange::Email(value) => self.email = value,
            ContactChange::Phone(value) => self.phone = value,
            ContactChange::Message(value) => self.message = value,
        }
    }

    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = ContactChange>) {
        for change in changes {
            self.apply(change);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn check(&self) -> std::result::Result<(), FieldErrors> {
        validator::validate_contact(self)
    }

    pub fn to_request(&self) -> ContactRequest {
        let phone = self.phone.trim();
        ContactRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            message: self.message.trim().to_string(),
        }
    }
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<()> {
        self.check().map_err(BookingError::Validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_phone_is_omitted() {
        let mut message = ContactMessage::default();
        message.apply_all([
            ContactChange::FirstName("Ada".to_string()),
            ContactChange::Phone("  ".to_string()),
            ContactChange::Message(" Hello \n".to_string()),
        ]);
        let request = message.to_request();
        assert_eq!(request.phone, None);
        assert_eq!(request.message, "Hello");

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["firstName"], "Ada");
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut message = ContactMessage::default();
        message.apply(ContactChange::Email("ada@example.com".to_string()));
        message.reset();
        assert_eq!(message.email(), "");
    }
}
