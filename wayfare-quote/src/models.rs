use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use wayfare_catalog::CabinClass;
use wayfare_core::{CoreError, CoreResult};
use wayfare_shared::CurrencyCode;

use crate::fees::FeeRule;

// ============================================================================
// Extras selections (as sent by the client)
// ============================================================================

/// Paid add-ons a passenger picked on top of the base fare.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingExtras {
    #[serde(default)]
    pub seats: Vec<SeatSelection>,
    #[serde(default)]
    pub baggage: Option<BaggageSelection>,
    #[serde(default)]
    pub insurance: Option<InsuranceSelection>,
}

impl BookingExtras {
    /// True when nothing chargeable was selected.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
            && self.baggage.as_ref().map_or(true, |b| b.checked_bags.is_empty())
            && self.insurance.as_ref().map_or(true, |i| !i.selected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeatSelection {
    #[serde(default)]
    pub seat_number: Option<String>,
    /// window / aisle / middle / exit / preferred
    pub seat_type: String,
    /// Price the client displayed; must agree with the pricing table
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BaggageSelection {
    /// Always included, never priced
    #[serde(default = "default_carry_on")]
    pub carry_on: bool,
    #[serde(default)]
    pub checked_bags: Vec<CheckedBag>,
}

fn default_carry_on() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckedBag {
    #[serde(rename = "type")]
    pub bag_type: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceSelection {
    pub selected: bool,
    /// basic / premium
    #[serde(rename = "type")]
    pub tier: String,
    /// Overrides the tier's default when present
    #[serde(default)]
    pub per_passenger: Option<bool>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
}

// ============================================================================
// Quote request / result
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub base: Decimal,
    pub currency: String,
    #[serde(default)]
    pub extras: Option<BookingExtras>,
    #[serde(default)]
    pub cabin_class: Option<String>,
    #[serde(default)]
    pub passengers: Option<u32>,
    /// Replaces the configured default fee rules when present
    #[serde(default)]
    pub fees: Option<Vec<FeeRule>>,
}

/// Extras cost split by category, in the pricing table's currency.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasBreakdown {
    pub seats: Decimal,
    pub baggage: Decimal,
    pub insurance: Decimal,
    pub total: Decimal,
    pub currency: CurrencyCode,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFee {
    pub name: String,
    pub amount: Decimal,
}

/// A point-in-time price. Only `QuoteBuilder` creates one; it is never mutated.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    base: Decimal,
    currency: CurrencyCode,
    cabin_class: CabinClass,
    passengers: u32,
    extras: Option<ExtrasBreakdown>,
    extras_total: Decimal,
    fees: Vec<AppliedFee>,
    fees_total: Decimal,
    total: Decimal,
}

impl Quote {
    pub(crate) fn new(
        base: Decimal,
        currency: CurrencyCode,
        cabin_class: CabinClass,
        passengers: u32,
        extras: Option<ExtrasBreakdown>,
        fees: Vec<AppliedFee>,
    ) -> CoreResult<Self> {
        let out_of_range = || CoreError::validation("Quote total out of range");

        let extras_total = extras.as_ref().map_or(Decimal::ZERO, |e| e.total);
        let fees_total = fees
            .iter()
            .try_fold(Decimal::ZERO, |sum, fee| sum.checked_add(fee.amount))
            .ok_or_else(out_of_range)?;
        let total = base
            .checked_add(extras_total)
            .and_then(|t| t.checked_add(fees_total))
            .ok_or_else(out_of_range)?;

        Ok(Self {
            base,
            currency,
            cabin_class,
            passengers,
            extras,
            extras_total,
            fees,
            fees_total,
            total,
        })
    }

    pub fn base(&self) -> Decimal {
        self.base
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn extras(&self) -> Option<&ExtrasBreakdown> {
        self.extras.as_ref()
    }

    pub fn extras_total(&self) -> Decimal {
        self.extras_total
    }

    pub fn fees(&self) -> &[AppliedFee] {
        &self.fees
    }

    pub fn fees_total(&self) -> Decimal {
        self.fees_total
    }

    pub fn total(&self) -> Decimal {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_client_payload() {
        let request: QuoteRequest = serde_json::from_value(serde_json::json!({
            "base": 250,
            "currency": "AUD",
            "extras": {
                "seats": [{ "seatType": "exit", "price": 15, "currency": "AUD" }],
                "baggage": {
                    "carryOn": true,
                    "checkedBags": [{ "type": "20kg", "quantity": 1, "price": 35, "currency": "AUD" }]
                },
                "insurance": null
            }
        }))
        .unwrap();

        let extras = request.extras.unwrap();
        assert_eq!(extras.seats[0].seat_type, "exit");
        assert_eq!(extras.baggage.as_ref().unwrap().checked_bags[0].bag_type, "20kg");
        assert!(extras.insurance.is_none());
        assert!(!extras.is_empty());
        assert!(request.fees.is_none());
    }

    #[test]
    fn test_negative_bag_quantity_rejected_by_type() {
        let result = serde_json::from_value::<CheckedBag>(serde_json::json!({
            "type": "20kg",
            "quantity": -1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_extras_empty_when_nothing_chargeable() {
        let extras = BookingExtras {
            seats: vec![],
            baggage: Some(BaggageSelection { carry_on: true, checked_bags: vec![] }),
            insurance: Some(InsuranceSelection {
                selected: false,
                tier: "basic".to_string(),
                per_passenger: None,
                price: None,
                currency: None,
            }),
        };
        assert!(extras.is_empty());
    }
}
