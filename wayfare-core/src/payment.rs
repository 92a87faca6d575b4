use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use wayfare_shared::CurrencyCode;

use crate::CoreResult;

/// Payment rails the checkout can be routed to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    /// Card payments
    Stripe,
    /// Crypto payments
    NowPayments,
}

impl PaymentProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Stripe => "stripe",
            PaymentProvider::NowPayments => "nowpayments",
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaymentDecision {
    pub provider: PaymentProvider,
    pub reason: String,
}

/// Pick the payment provider for a checkout.
///
/// Only an explicit `crypto` method (case-insensitive) goes to NOWPayments.
/// Everything else, including a missing or unrecognised method, falls back to card.
pub fn choose_payment_provider(method: Option<&str>, currency: Option<&str>) -> PaymentDecision {
    let method = method.map(str::trim).filter(|m| !m.is_empty());
    let currency_note = currency
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!(" ({})", c.to_ascii_uppercase()))
        .unwrap_or_default();

    match method {
        Some(m) if m.eq_ignore_ascii_case("crypto") => PaymentDecision {
            provider: PaymentProvider::NowPayments,
            reason: format!("Crypto payment requested{}, routing to NOWPayments", currency_note),
        },
        Some(m) if m.eq_ignore_ascii_case("card") => PaymentDecision {
            provider: PaymentProvider::Stripe,
            reason: format!("Card payment requested{}, routing to Stripe", currency_note),
        },
        Some(m) => {
            tracing::debug!("Unrecognised payment method {:?}, falling back to card", m);
            PaymentDecision {
                provider: PaymentProvider::Stripe,
                reason: format!("Unrecognised payment method{}, defaulting to Stripe card payments", currency_note),
            }
        }
        None => PaymentDecision {
            provider: PaymentProvider::Stripe,
            reason: format!("No payment method specified{}, defaulting to Stripe card payments", currency_note),
        },
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    RequiresPaymentMethod,
    WaitingForPayment,
    Processing,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String, // Provider's ID (e.g., pi_123 or an invoice number)
    pub provider: PaymentProvider,
    pub booking_id: Option<String>,
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub status: PaymentStatus,
    pub client_secret: Option<String>,
    pub checkout_url: Option<String>,
}

#[async_trait]
pub trait PaymentAdapter: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    /// Create a payment intent (or hosted invoice) with the provider
    async fn create_intent(
        &self,
        amount: Decimal,
        currency: &CurrencyCode,
        booking_id: Option<&str>,
    ) -> CoreResult<PaymentIntent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_routes_to_nowpayments() {
        let decision = choose_payment_provider(Some("crypto"), None);
        assert_eq!(decision.provider, PaymentProvider::NowPayments);
        assert_eq!(decision.provider.as_str(), "nowpayments");

        let decision = choose_payment_provider(Some("  CRYPTO "), Some("usd"));
        assert_eq!(decision.provider, PaymentProvider::NowPayments);
        assert!(decision.reason.contains("(USD)"));
    }

    #[test]
    fn test_default_routes_to_stripe() {
        assert_eq!(choose_payment_provider(None, None).provider, PaymentProvider::Stripe);
        assert_eq!(choose_payment_provider(Some("card"), Some("AUD")).provider, PaymentProvider::Stripe);
        assert_eq!(choose_payment_provider(Some(""), None).provider, PaymentProvider::Stripe);
    }

    #[test]
    fn test_garbage_method_falls_back_to_card() {
        let decision = choose_payment_provider(Some("bitcoin-ish"), None);
        assert_eq!(decision.provider, PaymentProvider::Stripe);
        assert!(decision.reason.starts_with("Unrecognised payment method"));
    }

    #[test]
    fn test_provider_serializes_lowercase() {
        let json = serde_json::to_string(&PaymentProvider::NowPayments).unwrap();
        assert_eq!(json, "\"nowpayments\"");
    }
}
