use rust_decimal::Decimal;
use wayfare_catalog::{CabinClass, ExtrasPricingTable, InsuranceTier, SeatCategory};
use wayfare_core::{CoreError, CoreResult};
use wayfare_shared::CurrencyCode;

use crate::models::{BaggageSelection, BookingExtras, ExtrasBreakdown, InsuranceSelection, SeatSelection};

/// Prices extras selections against the pricing table. Pure: no side effects.
pub struct ExtrasCalculator<'a> {
    table: &'a ExtrasPricingTable,
}

impl<'a> ExtrasCalculator<'a> {
    pub fn new(table: &'a ExtrasPricingTable) -> Self {
        Self { table }
    }

    /// Price a whole extras selection for `passengers` travellers in `cabin`.
    pub fn calculate(
        &self,
        cabin: CabinClass,
        passengers: u32,
        extras: &BookingExtras,
    ) -> CoreResult<ExtrasBreakdown> {
        if passengers == 0 {
            return Err(CoreError::validation("At least one passenger is required"));
        }

        let seats = self.seats_total(cabin, &extras.seats)?;
        let baggage = self.baggage_total(extras.baggage.as_ref())?;
        let insurance = self.insurance_total(extras.insurance.as_ref(), passengers)?;

        Ok(ExtrasBreakdown {
            seats,
            baggage,
            insurance,
            total: seats + baggage + insurance,
            currency: self.table.currency.clone(),
        })
    }

    pub fn seat_price(&self, cabin: CabinClass, seat: &SeatSelection) -> CoreResult<Decimal> {
        let category: SeatCategory = seat.seat_type.parse()?;
        let price = self.table.seat_price(cabin, category)?;
        self.check_echoed("Seat", seat.price, seat.currency.as_deref(), price)?;
        Ok(price)
    }

    pub fn seats_total(&self, cabin: CabinClass, seats: &[SeatSelection]) -> CoreResult<Decimal> {
        seats.iter().map(|seat| self.seat_price(cabin, seat)).sum()
    }

    /// Checked bags only; carry-on is always included at no cost.
    pub fn baggage_total(&self, baggage: Option<&BaggageSelection>) -> CoreResult<Decimal> {
        let Some(baggage) = baggage else {
            return Ok(Decimal::ZERO);
        };

        baggage
            .checked_bags
            .iter()
            .map(|bag| -> CoreResult<Decimal> {
                let unit = self.table.bag_price(&bag.bag_type)?;
                self.check_echoed("Baggage", bag.price, bag.currency.as_deref(), unit)?;
                Ok(unit * Decimal::from(bag.quantity))
            })
            .sum()
    }

    pub fn insurance_total(
        &self,
        insurance: Option<&InsuranceSelection>,
        passengers: u32,
    ) -> CoreResult<Decimal> {
        let Some(insurance) = insurance.filter(|i| i.selected) else {
            return Ok(Decimal::ZERO);
        };

        let tier: InsuranceTier = insurance.tier.parse()?;
        let tier_price = self.table.insurance_price(tier)?;
        let per_passenger = insurance.per_passenger.unwrap_or(tier_price.per_passenger);

        let price = if per_passenger {
            tier_price.price * Decimal::from(passengers)
        } else {
            tier_price.price
        };
        self.check_echoed("Insurance", insurance.price, insurance.currency.as_deref(), price)?;
        Ok(price)
    }

    /// Client-displayed prices must agree with what the table says right now.
    fn check_echoed(
        &self,
        what: &str,
        echoed_price: Option<Decimal>,
        echoed_currency: Option<&str>,
        priced: Decimal,
    ) -> CoreResult<()> {
        if let Some(currency) = echoed_currency {
            let currency: CurrencyCode = currency.parse()?;
            if currency != self.table.currency {
                return Err(CoreError::currency_mismatch(&self.table.currency, currency));
            }
        }
        match echoed_price {
            Some(echoed) if echoed != priced => Err(CoreError::validation(format!(
                "{} price {} does not match current price {}",
                what, echoed, priced
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CheckedBag;
    use rust_decimal_macros::dec;

    fn seat(seat_type: &str) -> SeatSelection {
        SeatSelection {
            seat_number: None,
            seat_type: seat_type.to_string(),
            price: None,
            currency: None,
        }
    }

    fn bag(bag_type: &str, quantity: u32) -> CheckedBag {
        CheckedBag {
            bag_type: bag_type.to_string(),
            quantity,
            price: None,
            currency: None,
        }
    }

    fn insurance(tier: &str, per_passenger: Option<bool>) -> InsuranceSelection {
        InsuranceSelection {
            selected: true,
            tier: tier.to_string(),
            per_passenger,
            price: None,
            currency: None,
        }
    }

    #[test]
    fn test_premium_insurance_per_passenger() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let cover = insurance("premium", Some(true));
        assert_eq!(calc.insurance_total(Some(&cover), 2).unwrap(), dec!(90));
    }

    #[test]
    fn test_flat_insurance_ignores_passenger_count() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let cover = insurance("premium", Some(false));
        assert_eq!(calc.insurance_total(Some(&cover), 3).unwrap(), dec!(45));

        // basic defaults to flat in the table
        let cover = insurance("basic", None);
        assert_eq!(calc.insurance_total(Some(&cover), 3).unwrap(), dec!(20));
    }

    #[test]
    fn test_unselected_insurance_is_free() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let mut cover = insurance("premium", Some(true));
        cover.selected = false;
        assert_eq!(calc.insurance_total(Some(&cover), 2).unwrap(), Decimal::ZERO);
        assert_eq!(calc.insurance_total(None, 2).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_carry_on_never_priced() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let carry_on_only = BaggageSelection { carry_on: true, checked_bags: vec![] };
        assert_eq!(calc.baggage_total(Some(&carry_on_only)).unwrap(), Decimal::ZERO);

        let with_bags = BaggageSelection {
            carry_on: true,
            checked_bags: vec![bag("20kg", 2), bag("32kg", 1), bag("15kg", 0)],
        };
        assert_eq!(calc.baggage_total(Some(&with_bags)).unwrap(), dec!(140));
    }

    #[test]
    fn test_total_equals_sum_of_components() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let extras = BookingExtras {
            seats: vec![seat("window"), seat("middle"), seat("exit")],
            baggage: Some(BaggageSelection {
                carry_on: true,
                checked_bags: vec![bag("23kg", 1), bag("20kg", 2)],
            }),
            insurance: Some(insurance("premium", None)),
        };

        let breakdown = calc.calculate(CabinClass::Economy, 3, &extras).unwrap();
        let seats = calc.seats_total(CabinClass::Economy, &extras.seats).unwrap();
        let baggage = calc.baggage_total(extras.baggage.as_ref()).unwrap();
        let cover = calc.insurance_total(extras.insurance.as_ref(), 3).unwrap();

        assert_eq!(breakdown.seats, seats);
        assert_eq!(breakdown.baggage, baggage);
        assert_eq!(breakdown.insurance, cover);
        assert_eq!(breakdown.total, seats + baggage + cover);
        // 12 + 10 + 15, 45 + 70, 45 * 3
        assert_eq!(breakdown.total, dec!(287));
        assert_eq!(breakdown.currency.as_str(), "AUD");
    }

    #[test]
    fn test_seat_fallback_uses_cabin_default() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        assert_eq!(calc.seat_price(CabinClass::Business, &seat("aisle")).unwrap(), dec!(25));
        assert_eq!(calc.seat_price(CabinClass::Business, &seat("exit")).unwrap(), dec!(40));
    }

    #[test]
    fn test_unknown_keys_are_validation_errors() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let err = calc.seat_price(CabinClass::Economy, &seat("cockpit")).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        let bags = BaggageSelection { carry_on: true, checked_bags: vec![bag("99kg", 1)] };
        let err = calc.baggage_total(Some(&bags)).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));

        let err = calc.insurance_total(Some(&insurance("platinum", None)), 1).unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn test_missing_tier_is_configuration_error() {
        let mut table = ExtrasPricingTable::default();
        table.insurance.remove(&InsuranceTier::Basic);
        let calc = ExtrasCalculator::new(&table);

        let err = calc.insurance_total(Some(&insurance("basic", None)), 1).unwrap_err();
        assert!(matches!(err, CoreError::ConfigurationError(_)));
    }

    #[test]
    fn test_stale_client_price_rejected() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let mut stale = seat("exit");
        stale.price = Some(dec!(12));
        assert!(matches!(
            calc.seat_price(CabinClass::Economy, &stale),
            Err(CoreError::ValidationError(_))
        ));

        let mut matching = seat("exit");
        matching.price = Some(dec!(15.00));
        matching.currency = Some("aud".to_string());
        assert_eq!(calc.seat_price(CabinClass::Economy, &matching).unwrap(), dec!(15));
    }

    #[test]
    fn test_selection_currency_must_match_table() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);

        let mut priced_in_usd = bag("20kg", 1);
        priced_in_usd.currency = Some("USD".to_string());
        let bags = BaggageSelection { carry_on: true, checked_bags: vec![priced_in_usd] };
        let err = calc.baggage_total(Some(&bags)).unwrap_err();
        assert!(matches!(err, CoreError::CurrencyMismatchError { .. }));
    }

    #[test]
    fn test_zero_passengers_rejected() {
        let table = ExtrasPricingTable::default();
        let calc = ExtrasCalculator::new(&table);
        assert!(calc.calculate(CabinClass::Economy, 0, &BookingExtras::default()).is_err());
    }
}
