use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use wayfare_shared::Masked;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    #[default]
    Flight,
    Stay,
    Car,
    Transfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub given_name: String,
    pub family_name: String,
    pub email: Masked<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<Masked<String>>,
}

impl ContactDetails {
    pub fn validate(&self) -> CoreResult<()> {
        if self.given_name.trim().is_empty() || self.family_name.trim().is_empty() {
            return Err(CoreError::validation("Passenger given and family name are required"));
        }
        let email = self.email.expose().trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(CoreError::validation("Passenger email is invalid")),
        }
    }
}

/// What a caller asks a supplier to book.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default)]
    pub kind: BookingKind,
    pub offer_id: Option<String>,
    pub stay_id: Option<String>,
    pub contact: ContactDetails,
}

impl BookingRequest {
    /// The supplier-side reference being booked: the stay id for stays, the offer id otherwise.
    pub fn supplier_reference(&self) -> Option<&str> {
        let preferred = match self.kind {
            BookingKind::Stay => self.stay_id.as_deref().or(self.offer_id.as_deref()),
            _ => self.offer_id.as_deref().or(self.stay_id.as_deref()),
        };
        preferred.map(str::trim).filter(|r| !r.is_empty())
    }
}

/// A confirmed booking as returned by any supplier, real or demo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub booking_id: String,
    pub booking_reference: String,
    pub kind: BookingKind,
    pub status: BookingStatus,
    pub supplier_reference: String,
    pub contact: ContactDetails,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait BookingSupplier: Send + Sync {
    /// Create a booking with the supplier and return its confirmation
    async fn create_booking(&self, request: &BookingRequest) -> CoreResult<BookingRecord>;
}
