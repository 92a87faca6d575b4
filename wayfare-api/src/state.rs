use std::sync::Arc;
use wayfare_booking::{DemoBookingFactory, PaymentOrchestrator};
use wayfare_core::supplier::BookingSupplier;
use wayfare_core::{CoreResult, TimeRandomIdGenerator};
use wayfare_quote::QuoteBuilder;
use wayfare_store::{BookingRepository, Config, InMemoryBookingRepository};

#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<QuoteBuilder>,
    pub payments: Arc<PaymentOrchestrator>,
    pub demo_supplier: Arc<dyn BookingSupplier>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl AppState {
    /// Wires every component from one loaded config. Fails on an unusable
    /// pricing table or missing payment credentials.
    pub fn from_config(config: &Config) -> CoreResult<Self> {
        config.validate()?;

        let quotes = QuoteBuilder::new(Arc::new(config.pricing.clone()), config.fees.clone());
        let payments = PaymentOrchestrator::from_config(
            config.payments.stripe.clone(),
            config.payments.nowpayments.clone(),
        )?;
        let demo_supplier = DemoBookingFactory::new(Arc::new(TimeRandomIdGenerator::new()), config.demo.clone());

        Ok(Self {
            quotes: Arc::new(quotes),
            payments: Arc::new(payments),
            demo_supplier: Arc::new(demo_supplier),
            bookings: Arc::new(InMemoryBookingRepository::new()),
        })
    }
}
