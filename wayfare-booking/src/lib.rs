pub mod demo;
pub mod orchestrator;

pub use demo::{DemoBookingFactory, DemoReferenceConfig};
pub use orchestrator::{Checkout, NowPaymentsConfig, PaymentOrchestrator, StripeConfig};
