use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use wayfare_core::payment::{PaymentAdapter, PaymentIntent, PaymentStatus};
use wayfare_core::{choose_payment_provider, CoreError, CoreResult, PaymentDecision, PaymentProvider};
use wayfare_shared::{CurrencyCode, Masked};

#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    pub secret_key: Masked<String>,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: Masked::new("sk_test_demo".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NowPaymentsConfig {
    pub api_key: Masked<String>,
    #[serde(default = "default_invoice_url")]
    pub invoice_url: String,
}

fn default_invoice_url() -> String {
    "https://nowpayments.io/payment".to_string()
}

impl Default for NowPaymentsConfig {
    fn default() -> Self {
        Self {
            api_key: Masked::new("np_test_demo".to_string()),
            invoice_url: default_invoice_url(),
        }
    }
}

fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Card rail stand-in: hands out Stripe-shaped payment intents without network calls.
pub struct DemoCardAdapter {
    config: StripeConfig,
}

impl DemoCardAdapter {
    pub fn new(config: StripeConfig) -> CoreResult<Self> {
        if config.secret_key.expose().trim().is_empty() {
            return Err(CoreError::configuration("payments.stripe.secret_key is not set"));
        }
        Ok(Self { config })
    }
}

#[async_trait]
impl PaymentAdapter for DemoCardAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    async fn create_intent(
        &self,
        amount: Decimal,
        currency: &CurrencyCode,
        booking_id: Option<&str>,
    ) -> CoreResult<PaymentIntent> {
        let id = format!("pi_demo_{}", random_token(16));
        let mode = if self.config.secret_key.expose().starts_with("sk_live_") { "live" } else { "test" };
        tracing::debug!("Created {} mode card intent {}", mode, id);

        Ok(PaymentIntent {
            client_secret: Some(format!("{}_secret_{}", id, random_token(12))),
            id,
            provider: PaymentProvider::Stripe,
            booking_id: booking_id.map(String::from),
            amount,
            currency: currency.clone(),
            status: PaymentStatus::RequiresPaymentMethod,
            checkout_url: None,
        })
    }
}

/// Crypto rail stand-in: hands out NOWPayments-shaped hosted invoices.
pub struct DemoCryptoAdapter {
    config: NowPaymentsConfig,
}

impl DemoCryptoAdapter {
    pub fn new(config: NowPaymentsConfig) -> CoreResult<Self> {
        if config.api_key.expose().trim().is_empty() {
            return Err(CoreError::configuration("payments.nowpayments.api_key is not set"));
        }
        Ok(Self { config })
    }
}

#[async_trait]
impl PaymentAdapter for DemoCryptoAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::NowPayments
    }

    async fn create_intent(
        &self,
        amount: Decimal,
        currency: &CurrencyCode,
        booking_id: Option<&str>,
    ) -> CoreResult<PaymentIntent> {
        let invoice_id: u64 = rand::thread_rng().gen_range(1_000_000_000..10_000_000_000);
        let checkout_url = format!("{}?iid={}", self.config.invoice_url.trim_end_matches('/'), invoice_id);

        Ok(PaymentIntent {
            id: invoice_id.to_string(),
            provider: PaymentProvider::NowPayments,
            booking_id: booking_id.map(String::from),
            amount,
            currency: currency.clone(),
            status: PaymentStatus::WaitingForPayment,
            client_secret: None,
            checkout_url: Some(checkout_url),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Checkout {
    #[serde(flatten)]
    pub decision: PaymentDecision,
    pub intent: PaymentIntent,
}

/// Routes a checkout to the provider picked by `choose_payment_provider`.
pub struct PaymentOrchestrator {
    adapters: HashMap<PaymentProvider, Arc<dyn PaymentAdapter>>,
}

impl PaymentOrchestrator {
    pub fn new(adapters: Vec<Arc<dyn PaymentAdapter>>) -> Self {
        Self {
            adapters: adapters.into_iter().map(|a| (a.provider(), a)).collect(),
        }
    }

    /// Both demo rails, each built from its own config section.
    pub fn from_config(stripe: StripeConfig, nowpayments: NowPaymentsConfig) -> CoreResult<Self> {
        let adapters: Vec<Arc<dyn PaymentAdapter>> = vec![
            Arc::new(DemoCardAdapter::new(stripe)?),
            Arc::new(DemoCryptoAdapter::new(nowpayments)?),
        ];
        Ok(Self::new(adapters))
    }

    pub async fn checkout(
        &self,
        method: Option<&str>,
        amount: Decimal,
        currency: &CurrencyCode,
        booking_id: Option<&str>,
    ) -> CoreResult<Checkout> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::validation("Payment amount must be positive"));
        }

        let decision = choose_payment_provider(method, Some(currency.as_str()));
        let adapter = self.adapters.get(&decision.provider).ok_or_else(|| {
            CoreError::configuration(format!("No payment adapter configured for {}", decision.provider))
        })?;

        let intent = adapter.create_intent(amount, currency, booking_id).await?;
        tracing::info!(
            "Payment intent {} created with {} for {} {}",
            intent.id,
            decision.provider,
            amount,
            currency
        );

        Ok(Checkout { decision, intent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn aud() -> CurrencyCode {
        CurrencyCode::from_static("AUD")
    }

    fn orchestrator() -> PaymentOrchestrator {
        PaymentOrchestrator::from_config(StripeConfig::default(), NowPaymentsConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_card_checkout_uses_stripe() {
        let checkout = orchestrator().checkout(None, dec!(300), &aud(), Some("bk_1")).await.unwrap();

        assert_eq!(checkout.decision.provider, PaymentProvider::Stripe);
        assert!(checkout.intent.id.starts_with("pi_demo_"));
        assert!(checkout.intent.client_secret.is_some());
        assert_eq!(checkout.intent.amount, dec!(300));
        assert_eq!(checkout.intent.booking_id.as_deref(), Some("bk_1"));
        assert_eq!(checkout.intent.status, PaymentStatus::RequiresPaymentMethod);
    }

    #[tokio::test]
    async fn test_crypto_checkout_uses_nowpayments() {
        let checkout = orchestrator().checkout(Some("crypto"), dec!(90.50), &aud(), None).await.unwrap();

        assert_eq!(checkout.decision.provider, PaymentProvider::NowPayments);
        assert_eq!(checkout.intent.status, PaymentStatus::WaitingForPayment);
        let url = checkout.intent.checkout_url.unwrap();
        assert!(url.starts_with("https://nowpayments.io/payment?iid="));
        assert!(url.ends_with(&checkout.intent.id));
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let err = orchestrator().checkout(None, dec!(0), &aud(), None).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_missing_adapter_is_configuration_error() {
        let card: Arc<dyn PaymentAdapter> = Arc::new(DemoCardAdapter::new(StripeConfig::default()).unwrap());
        let card_only = PaymentOrchestrator::new(vec![card]);
        let err = card_only.checkout(Some("crypto"), dec!(10), &aud(), None).await.unwrap_err();
        assert!(matches!(err, CoreError::ConfigurationError(_)));
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let stripe = StripeConfig { secret_key: Masked::new(" ".to_string()) };
        assert!(matches!(DemoCardAdapter::new(stripe), Err(CoreError::ConfigurationError(_))));

        let nowpayments = NowPaymentsConfig { api_key: Masked::new(String::new()), invoice_url: default_invoice_url() };
        assert!(DemoCryptoAdapter::new(nowpayments).is_err());
    }

    #[test]
    fn test_credentials_masked_in_debug() {
        let debug = format!("{:?}", StripeConfig::default());
        assert!(!debug.contains("sk_test_demo"));
    }
}
