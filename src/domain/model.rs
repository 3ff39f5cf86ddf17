use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The fixed appointment slots offered on the booking form.
pub const TIME_SLOTS: [&str; 10] = [
    "8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM",
    "4:00 PM", "5:00 PM",
];

pub fn is_time_slot(value: &str) -> bool {
    TIME_SLOTS.contains(&value)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    #[default]
    Standard,
    Deep,
    Moveout,
    Recurring,
}

impl ServiceType {
    pub const ALL: [ServiceType; 4] = [
        ServiceType::Standard,
        ServiceType::Deep,
        ServiceType::Moveout,
        ServiceType::Recurring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Standard => "standard",
            ServiceType::Deep => "deep",
            ServiceType::Moveout => "moveout",
            ServiceType::Recurring => "recurring",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Standard => "Standard Cleaning",
            ServiceType::Deep => "Deep Cleaning",
            ServiceType::Moveout => "Move-In/Out Cleaning",
            ServiceType::Recurring => "Recurring Cleaning",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ServiceType::Standard => "Routine cleaning for a tidy home",
            ServiceType::Deep => "Detailed cleaning for every corner",
            ServiceType::Moveout => "Complete property preparation",
            ServiceType::Recurring => "Regular service with discounts",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "service type",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Onetime,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Onetime,
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Onetime => "onetime",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Onetime => "One-time",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Bi-weekly",
            Frequency::Monthly => "Monthly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::Onetime)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "frequency",
                value: s.to_string(),
            })
    }
}

/// Wire payload for the booking boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_type: ServiceType,
    pub rooms: u32,
    pub bathrooms: u32,
    pub frequency: Frequency,
    pub preferred_date: String,
    pub preferred_time: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub estimated_price: u32,
}

/// Wire payload for the contact boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRequest {
    Booking(BookingRequest),
    Contact(ContactRequest),
}

impl SubmissionRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionRequest::Booking(_) => "booking",
            SubmissionRequest::Contact(_) => "contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed { reason: String },
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded | SubmissionState::Failed { .. }
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => f.write_str("idle"),
            SubmissionState::Pending => f.write_str("pending"),
            SubmissionState::Succeeded => f.write_str("succeeded"),
            SubmissionState::Failed { reason } => write!(f, "failed ({})", reason),
        }
    }
}
