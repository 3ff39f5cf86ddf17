use crate::core::pricing::{self, PriceRow, PriceRules};
use crate::domain::model::{Frequency, ServiceType};
use serde::Serialize;

/// A service as listed on the services and pricing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOffering {
    pub service: ServiceType,
    pub label: &'static str,
    pub description: &'static str,
    pub rates: PriceRow,
    pub starting_price: u32,
    pub starting_frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyOption {
    pub frequency: Frequency,
    pub label: &'static str,
    pub discount_percent: u32,
    pub badge: Option<String>,
}

pub fn offering(service: ServiceType) -> ServiceOffering {
    ServiceOffering {
        service,
        label: service.label(),
        description: service.description(),
        rates: PriceRules::row(service),
        starting_price: pricing::starting_price(service),
        starting_frequency: pricing::starting_frequency(service),
    }
}

pub fn service_catalog() -> Vec<ServiceOffering> {
    ServiceType::ALL.into_iter().map(offering).collect()
}

pub fn frequency_options() -> Vec<FrequencyOption> {
    Frequency::ALL
        .into_iter()
        .map(|frequency| {
            let discount_percent = PriceRules::discount_percent(frequency);
            FrequencyOption {
                frequency,
                label: frequency.label(),
                discount_percent,
                badge: (discount_percent > 0).then(|| format!("{}% off", discount_percent)),
            }
        })
        .collect()
}

/// One-room, one-bathroom price at each recurring cadence.
pub fn recurring_price_list(service: ServiceType) -> Vec<(Frequency, u32)> {
    Frequency::ALL
        .into_iter()
        .filter(Frequency::is_recurring)
        .map(|frequency| (frequency, pricing::quote(service, 1, 1, frequency)))
        .collect()
}
