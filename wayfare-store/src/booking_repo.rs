use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use wayfare_core::supplier::BookingRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Booking {0} already exists")]
    Duplicate(String),
}

/// Booking records are written once at confirmation and only read afterwards.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: BookingRecord) -> Result<(), StoreError>;

    async fn get(&self, booking_id: &str) -> Result<Option<BookingRecord>, StoreError>;

    async fn count(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<HashMap<String, BookingRecord>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: BookingRecord) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.booking_id) {
            return Err(StoreError::Duplicate(booking.booking_id));
        }
        tracing::debug!("Stored booking {}", booking.booking_id);
        bookings.insert(booking.booking_id.clone(), booking);
        Ok(())
    }

    async fn get(&self, booking_id: &str) -> Result<Option<BookingRecord>, StoreError> {
        Ok(self.bookings.read().await.get(booking_id).cloned())
    }

    async fn count(&self) -> usize {
        self.bookings.read().await.len()
    }
}
