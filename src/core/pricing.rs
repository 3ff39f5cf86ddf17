//! Price rules and the quote calculator.
//!
//! This is the only place prices live. The calculator preview, the booking
//! form, the service catalog and the CLI all quote through these functions.

use crate::domain::model::{Frequency, ServiceType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub base_price: u32,
    pub per_room_price: u32,
    pub per_bathroom_price: u32,
}

pub struct PriceRules;

impl PriceRules {
    pub const fn row(service: ServiceType) -> PriceRow {
        match service {
            ServiceType::Standard => PriceRow {
                base_price: 80,
                per_room_price: 20,
                per_bathroom_price: 15,
            },
            ServiceType::Deep => PriceRow {
                base_price: 150,
                per_room_price: 25,
                per_bathroom_price: 20,
            },
            ServiceType::Moveout => PriceRow {
                base_price: 200,
                per_room_price: 35,
                per_bathroom_price: 25,
            },
            ServiceType::Recurring => PriceRow {
                base_price: 80,
                per_room_price: 30,
                per_bathroom_price: 25,
            },
        }
    }

    /// Discount in whole percent. Kept integral so rounding is exact.
    pub const fn discount_percent(frequency: Frequency) -> u32 {
        match frequency {
            Frequency::Onetime => 0,
            Frequency::Weekly => 10,
            Frequency::Biweekly => 15,
            Frequency::Monthly => 20,
        }
    }

    pub fn discount_fraction(frequency: Frequency) -> f64 {
        f64::from(Self::discount_percent(frequency)) / 100.0
    }

    /// Unrecognized service names price as `standard`.
    pub fn row_for_name(service: &str) -> PriceRow {
        Self::row(service.parse().unwrap_or(ServiceType::Standard))
    }

    /// Unrecognized frequency names carry no discount.
    pub fn discount_percent_for_name(frequency: &str) -> u32 {
        frequency
            .parse()
            .map(Self::discount_percent)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuoteBreakdown {
    pub base: u32,
    pub rooms_charge: u32,
    pub bathrooms_charge: u32,
    pub subtotal: u32,
    pub discount_percent: u32,
    pub discount_amount: u32,
    pub total: u32,
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn compute(row: PriceRow, rooms: u64, bathrooms: u64, discount_percent: u32) -> QuoteBreakdown {
    let extra_rooms = rooms.max(1) - 1;
    let extra_bathrooms = bathrooms.max(1) - 1;

    let base = u64::from(row.base_price);
    let rooms_charge = extra_rooms.saturating_mul(u64::from(row.per_room_price));
    let bathrooms_charge = extra_bathrooms.saturating_mul(u64::from(row.per_bathroom_price));
    let subtotal = base
        .saturating_add(rooms_charge)
        .saturating_add(bathrooms_charge);

    // round half up: (subtotal * (100 - pct) + 50) / 100
    let kept = u64::from(100 - discount_percent.min(100));
    let total = subtotal.saturating_mul(kept).saturating_add(50) / 100;

    QuoteBreakdown {
        base: saturate(base),
        rooms_charge: saturate(rooms_charge),
        bathrooms_charge: saturate(bathrooms_charge),
        subtotal: saturate(subtotal),
        discount_percent,
        discount_amount: saturate(subtotal.saturating_sub(total)),
        total: saturate(total),
    }
}

pub fn breakdown(
    service: ServiceType,
    rooms: u32,
    bathrooms: u32,
    frequency: Frequency,
) -> QuoteBreakdown {
    compute(
        PriceRules::row(service),
        u64::from(rooms),
        u64::from(bathrooms),
        PriceRules::discount_percent(frequency),
    )
}

pub fn quote(service: ServiceType, rooms: u32, bathrooms: u32, frequency: Frequency) -> u32 {
    breakdown(service, rooms, bathrooms, frequency).total
}

/// Quotes untyped input without ever failing: unknown service names fall
/// back to `standard`, unknown frequencies to no discount, and counts below
/// one are clamped to one.
pub fn quote_lenient(service: &str, rooms: i64, bathrooms: i64, frequency: &str) -> u32 {
    let rooms = u64::try_from(rooms).unwrap_or(1);
    let bathrooms = u64::try_from(bathrooms).unwrap_or(1);
    compute(
        PriceRules::row_for_name(service),
        rooms,
        bathrooms,
        PriceRules::discount_percent_for_name(frequency),
    )
    .total
}

/// Cadence behind the advertised "starting at" price. Recurring service is
/// only sold on a schedule, so it is advertised at its weekly rate (72)
/// rather than the one-time table rate (80).
pub fn starting_frequency(service: ServiceType) -> Frequency {
    match service {
        ServiceType::Recurring => Frequency::Weekly,
        _ => Frequency::Onetime,
    }
}

/// Price for one room and one bathroom at the advertised cadence.
pub fn starting_price(service: ServiceType) -> u32 {
    quote(service, 1, 1, starting_frequency(service))
}
