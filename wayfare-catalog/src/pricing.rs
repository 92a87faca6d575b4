use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wayfare_core::{CoreError, CoreResult};
use wayfare_shared::CurrencyCode;

use crate::product::{CabinClass, InsuranceTier, SeatCategory};

/// Seat prices for one cabin. Categories without an entry use `default`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SeatPriceRow {
    #[serde(default)]
    pub default: Option<Decimal>,
    #[serde(default)]
    pub categories: BTreeMap<SeatCategory, Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsuranceTierPrice {
    pub price: Decimal,
    /// Multiply by passenger count unless the selection says otherwise
    #[serde(default)]
    pub per_passenger: bool,
}

/// Static extras prices, loaded once at startup and shared read-only.
///
/// Sections missing from a config file keep their built-in values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtrasPricingTable {
    pub currency: CurrencyCode,
    pub seats: BTreeMap<CabinClass, SeatPriceRow>,
    /// Checked bag unit prices keyed by bag type, e.g. "20kg"
    pub baggage: BTreeMap<String, Decimal>,
    pub insurance: BTreeMap<InsuranceTier, InsuranceTierPrice>,
}

impl Default for ExtrasPricingTable {
    fn default() -> Self {
        let row = |default: Decimal, categories: &[(SeatCategory, Decimal)]| SeatPriceRow {
            default: Some(default),
            categories: categories.iter().copied().collect(),
        };

        Self {
            currency: CurrencyCode::from_static("AUD"),
            seats: BTreeMap::from([
                (
                    CabinClass::Economy,
                    row(
                        dec!(10),
                        &[
                            (SeatCategory::Window, dec!(12)),
                            (SeatCategory::Aisle, dec!(12)),
                            (SeatCategory::Exit, dec!(15)),
                            (SeatCategory::Preferred, dec!(18)),
                        ],
                    ),
                ),
                (CabinClass::Business, row(dec!(25), &[(SeatCategory::Exit, dec!(40))])),
                // Seat selection is included in first
                (CabinClass::First, row(dec!(0), &[])),
            ]),
            baggage: BTreeMap::from([
                ("15kg".to_string(), dec!(25)),
                ("20kg".to_string(), dec!(35)),
                ("23kg".to_string(), dec!(45)),
                ("32kg".to_string(), dec!(70)),
            ]),
            insurance: BTreeMap::from([
                (InsuranceTier::Basic, InsuranceTierPrice { price: dec!(20), per_passenger: false }),
                (InsuranceTier::Premium, InsuranceTierPrice { price: dec!(45), per_passenger: true }),
            ]),
        }
    }
}

impl ExtrasPricingTable {
    /// Seat price for a cabin, falling back to the cabin's default price.
    pub fn seat_price(&self, cabin: CabinClass, category: SeatCategory) -> CoreResult<Decimal> {
        let row = self.seats.get(&cabin).ok_or_else(|| {
            CoreError::configuration(format!("No seat pricing configured for cabin {}", cabin))
        })?;

        row.categories
            .get(&category)
            .copied()
            .or(row.default)
            .ok_or_else(|| {
                CoreError::configuration(format!(
                    "No {} or default seat price configured for cabin {}",
                    category, cabin
                ))
            })
    }

    /// Unit price of one checked bag of the given type.
    pub fn bag_price(&self, bag_type: &str) -> CoreResult<Decimal> {
        let key = bag_type.trim().to_ascii_lowercase();
        self.baggage
            .get(&key)
            .copied()
            .ok_or_else(|| CoreError::validation(format!("Unknown baggage type: {}", bag_type)))
    }

    pub fn insurance_price(&self, tier: InsuranceTier) -> CoreResult<&InsuranceTierPrice> {
        self.insurance.get(&tier).ok_or_else(|| {
            CoreError::configuration(format!("No insurance pricing configured for tier {}", tier))
        })
    }

    /// Startup check: every cabin priced, no negative prices.
    pub fn validate(&self) -> CoreResult<()> {
        for cabin in CabinClass::ALL {
            let row = self.seats.get(&cabin).ok_or_else(|| {
                CoreError::configuration(format!("No seat pricing configured for cabin {}", cabin))
            })?;
            if row.default.is_none() && row.categories.len() < SeatCategory::ALL.len() {
                return Err(CoreError::configuration(format!(
                    "Cabin {} needs a default seat price or an entry for every seat type",
                    cabin
                )));
            }
        }

        let seat_prices = self.seats.values().flat_map(|row| row.default.iter().chain(row.categories.values()));
        let bag_prices = self.baggage.values();
        let insurance_prices = self.insurance.values().map(|tier| &tier.price);

        if seat_prices.chain(bag_prices).chain(insurance_prices).any(|p| p.is_sign_negative()) {
            return Err(CoreError::configuration("Extras prices must not be negative"));
        }
        Ok(())
    }
}
