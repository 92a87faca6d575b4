use rust_decimal::Decimal;
use std::sync::Arc;
use wayfare_catalog::{CabinClass, ExtrasPricingTable};
use wayfare_core::{CoreError, CoreResult};
use wayfare_shared::CurrencyCode;

use crate::extras::ExtrasCalculator;
use crate::fees::FeeRule;
use crate::models::{AppliedFee, Quote, QuoteRequest};

/// Turns a pricing request into a `Quote`: base + extras + fees.
///
/// Building is a pure function of the request and the (immutable) configuration,
/// so callers may retry freely and get an identical quote back.
pub struct QuoteBuilder {
    pricing: Arc<ExtrasPricingTable>,
    default_fees: Vec<FeeRule>,
}

impl QuoteBuilder {
    pub fn new(pricing: Arc<ExtrasPricingTable>, default_fees: Vec<FeeRule>) -> Self {
        Self { pricing, default_fees }
    }

    pub fn build(&self, request: &QuoteRequest) -> CoreResult<Quote> {
        let currency: CurrencyCode = request.currency.parse()?;

        if request.base.is_sign_negative() {
            return Err(CoreError::validation("Base amount must not be negative"));
        }

        let passengers = request.passengers.unwrap_or(1);
        if passengers == 0 {
            return Err(CoreError::validation("At least one passenger is required"));
        }

        let cabin: CabinClass = match request.cabin_class.as_deref() {
            Some(cabin) => cabin.parse()?,
            None => CabinClass::default(),
        };

        // Nothing chargeable selected means no extras component, whatever the table currency.
        let extras = match request.extras.as_ref().filter(|e| !e.is_empty()) {
            Some(extras) => {
                let breakdown = ExtrasCalculator::new(&self.pricing).calculate(cabin, passengers, extras)?;
                if breakdown.currency != currency {
                    return Err(CoreError::currency_mismatch(&currency, &breakdown.currency));
                }
                Some(breakdown)
            }
            None => None,
        };

        let subtotal = request
            .base
            .checked_add(extras.as_ref().map_or(Decimal::ZERO, |e| e.total))
            .ok_or_else(|| CoreError::validation("Quote total out of range"))?;
        let rules = request.fees.as_deref().unwrap_or(&self.default_fees);
        let fees = rules
            .iter()
            .map(|rule| rule.apply(subtotal, &currency))
            .collect::<CoreResult<Vec<AppliedFee>>>()?;

        let quote = Quote::new(request.base, currency, cabin, passengers, extras, fees)?;
        tracing::debug!(
            "Built quote: {} {} ({} passengers, {} cabin)",
            quote.total(),
            quote.currency(),
            passengers,
            cabin
        );
        Ok(quote)
    }
}
