use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use wayfare_core::{CoreError, CoreResult};
use wayfare_shared::CurrencyCode;

use crate::models::AppliedFee;

/// A fee adjustment added on top of base fare + extras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeeRule {
    /// Fixed amount, e.g. a booking fee
    Flat {
        name: String,
        amount: Decimal,
        currency: String,
    },
    /// Fraction of the subtotal (0.05 = 5%), rounded to cents
    Percentage { name: String, rate: Decimal },
}

impl FeeRule {
    pub fn name(&self) -> &str {
        match self {
            FeeRule::Flat { name, .. } | FeeRule::Percentage { name, .. } => name,
        }
    }

    pub fn apply(&self, subtotal: Decimal, currency: &CurrencyCode) -> CoreResult<AppliedFee> {
        let amount = match self {
            FeeRule::Flat { name, amount, currency: fee_currency } => {
                let fee_currency: CurrencyCode = fee_currency.parse()?;
                if &fee_currency != currency {
                    return Err(CoreError::currency_mismatch(currency, fee_currency));
                }
                if amount.is_sign_negative() {
                    return Err(CoreError::validation(format!("Fee {} must not be negative", name)));
                }
                *amount
            }
            FeeRule::Percentage { name, rate } => {
                if rate.is_sign_negative() || *rate > Decimal::ONE {
                    return Err(CoreError::validation(format!("Fee {} rate must be between 0 and 1", name)));
                }
                subtotal
                    .checked_mul(*rate)
                    .ok_or_else(|| CoreError::validation("Quote total out of range"))?
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            }
        };

        Ok(AppliedFee {
            name: self.name().to_string(),
            amount,
        })
    }
}
