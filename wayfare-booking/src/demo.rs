use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wayfare_core::supplier::{BookingRecord, BookingRequest, BookingStatus, BookingSupplier};
use wayfare_core::{CoreError, CoreResult, IdGenerator};
use wayfare_shared::pii::redact_email;

/// Which offer / stay references count as demo inventory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoReferenceConfig {
    #[serde(default)]
    pub allow_list: Vec<String>,
    #[serde(default)]
    pub prefixes: Vec<String>,
}

impl Default for DemoReferenceConfig {
    fn default() -> Self {
        Self {
            allow_list: vec![
                "off_demo_syd_mel".to_string(),
                "off_demo_syd_akl".to_string(),
                "stay_demo_sydney_harbour".to_string(),
                "car_demo_syd_airport".to_string(),
                "transfer_demo_syd_cbd".to_string(),
            ],
            prefixes: vec!["demo_".to_string(), "demo-".to_string()],
        }
    }
}

impl DemoReferenceConfig {
    /// Allow-listed exactly, or named with a demo prefix. Case-insensitive.
    pub fn is_demo(&self, reference: &str) -> bool {
        let reference = reference.trim().to_ascii_lowercase();
        if reference.is_empty() {
            return false;
        }
        self.allow_list.iter().any(|r| r.trim().eq_ignore_ascii_case(&reference))
            || self
                .prefixes
                .iter()
                .any(|p| !p.is_empty() && reference.starts_with(&p.to_ascii_lowercase()))
    }
}

/// Builds booking confirmations for demo inventory without calling any supplier.
///
/// Records have exactly the shape a real supplier returns, so the rest of the
/// checkout flow runs unchanged in end-to-end tests.
pub struct DemoBookingFactory {
    ids: Arc<dyn IdGenerator>,
    references: DemoReferenceConfig,
}

impl DemoBookingFactory {
    pub fn new(ids: Arc<dyn IdGenerator>, references: DemoReferenceConfig) -> Self {
        Self { ids, references }
    }

    pub fn create(&self, request: &BookingRequest) -> CoreResult<BookingRecord> {
        let reference = request
            .supplier_reference()
            .ok_or_else(|| CoreError::validation("An offer or stay reference is required"))?;

        if !self.references.is_demo(reference) {
            return Err(CoreError::validation(format!("{} is not a demo reference", reference)));
        }
        request.contact.validate()?;

        let booking = BookingRecord {
            booking_id: self.ids.booking_id(),
            booking_reference: self.ids.booking_reference(),
            kind: request.kind,
            status: BookingStatus::Confirmed,
            supplier_reference: reference.to_string(),
            contact: request.contact.clone(),
            created_at: chrono::Utc::now(),
        };

        tracing::info!(
            "Demo booking {} ({}) created for {} on {}",
            booking.booking_id,
            booking.booking_reference,
            redact_email(booking.contact.email.expose()),
            reference
        );
        Ok(booking)
    }
}

#[async_trait]
impl BookingSupplier for DemoBookingFactory {
    async fn create_booking(&self, request: &BookingRequest) -> CoreResult<BookingRecord> {
        self.create(request)
    }
}
