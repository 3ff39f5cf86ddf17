use crate::core::pricing::{self, QuoteBreakdown};
use crate::core::validator::{self, FieldErrors};
use crate::domain::model::{BookingRequest, Frequency, ServiceType};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::Validate;
use chrono::{Local, NaiveDate};

/// One edit to the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingChange {
    ServiceType(ServiceType),
    Rooms(u32),
    Bathrooms(u32),
    Frequency(Frequency),
    PreferredDate(String),
    PreferredTime(String),
    FirstName(String),
    LastName(String),
    Email(String),
    Phone(String),
    Address(String),
    Instructions(String),
}

impl BookingChange {
    pub fn affects_price(&self) -> bool {
        matches!(
            self,
            BookingChange::ServiceType(_)
                | BookingChange::Rooms(_)
                | BookingChange::Bathrooms(_)
                | BookingChange::Frequency(_)
        )
    }
}

/// The in-progress booking form.
///
/// Fields are only changed through [`Configuration::apply`], which keeps
/// `estimated_price` equal to the quote for the current selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    service_type: ServiceType,
    rooms: u32,
    bathrooms: u32,
    frequency: Frequency,
    preferred_date: String,
    preferred_time: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    instructions: String,
    estimated_price: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        let mut configuration = Self {
            service_type: ServiceType::default(),
            rooms: 1,
            bathrooms: 1,
            frequency: Frequency::default(),
            preferred_date: String::new(),
            preferred_time: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            instructions: String::new(),
            estimated_price: 0,
        };
        configuration.recompute();
        configuration
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, change: BookingChange) {
        let reprice = change.affects_price();
        match change {
            BookingChange::ServiceType(value) => self.service_type = value,
            BookingChange::Rooms(value) => self.rooms = value,
            BookingChange::Bathrooms(value) => self.bathrooms = value,
            BookingChange::Frequency(value) => self.frequency = value,
            BookingChange::PreferredDate(value) => self.preferred_date = value,
            BookingChange::PreferredTime(value) => self.preferred_time = value,
            BookingChange::FirstName(value) => self.first_name = value,
            BookingChange::LastName(value) => self.last_name = value,
            BookingChange::Email(value) => self.email = value,
            BookingChange::Phone(value) => self.phone = value,
            BookingChange::Address(value) => self.address = value,
            BookingChange::Instructions(value) => self.instructions = value,
        }
        if reprice {
            self.recompute();
        }
    }

    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = BookingChange>) {
        for change in changes {
            self.apply(change);
        }
    }

    fn recompute(&mut self) {
        let price = self.quote();
        if price != self.estimated_price {
            tracing::debug!(
                "Estimate for {} / {} rooms / {} bathrooms / {}: ${} -> ${}",
                self.service_type,
                self.rooms,
                self.bathrooms,
                self.frequency,
                self.estimated_price,
                price
            );
        }
        self.estimated_price = price;
    }

    fn quote(&self) -> u32 {
        pricing::quote(self.service_type, self.rooms, self.bathrooms, self.frequency)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn rooms(&self) -> u32 {
        self.rooms
    }

    pub fn bathrooms(&self) -> u32 {
        self.bathrooms
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn preferred_date(&self) -> &str {
        &self.preferred_date
    }

    pub fn preferred_time(&self) -> &str {
        &self.preferred_time
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

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn estimated_price(&self) -> u32 {
        self.estimated_price
    }

    pub fn breakdown(&self) -> QuoteBreakdown {
        pricing::breakdown(self.service_type, self.rooms, self.bathrooms, self.frequency)
    }

    pub fn validate_on(&self, today: NaiveDate) -> std::result::Result<(), FieldErrors> {
        validator::validate_booking(self, today)
    }

    /// Builds the wire payload. The price is quoted again from the fields
    /// rather than copied from the stored estimate.
    pub fn to_request(&self) -> BookingRequest {
        let instructions = self.instructions.trim();
        BookingRequest {
            service_type: self.service_type,
            rooms: self.rooms,
            bathrooms: self.bathrooms,
            frequency: self.frequency,
            preferred_date: self.preferred_date.trim().to_string(),
            preferred_time: self.preferred_time.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            instructions: (!instructions.is_empty()).then(|| instructions.to_string()),
            estimated_price: self.quote(),
        }
    }
}

impl Validate for Configuration {
    fn validate(&self) -> Result<()> {
        self.validate_on(Local::now().date_naive())
            .map_err(BookingError::Validation)
    }
}
