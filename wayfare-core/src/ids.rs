use rand::distributions::Alphanumeric;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unambiguous characters for reference codes (no 0/O, 1/I).
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const REFERENCE_LEN: usize = 6;

pub trait IdGenerator: Send + Sync {
    /// Unique booking identifier
    fn booking_id(&self) -> String;

    /// Short human-readable code, airline PNR style
    fn booking_reference(&self) -> String;
}

/// Millisecond timestamp, a per-generator sequence and a random suffix.
#[derive(Debug, Default)]
pub struct TimeRandomIdGenerator {
    sequence: AtomicU64,
}

impl TimeRandomIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for TimeRandomIdGenerator {
    fn booking_id(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(6)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("bk_{:x}{:04x}_{}", millis, seq & 0xffff, suffix)
    }

    fn booking_reference(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..REFERENCE_LEN)
            .map(|_| char::from(REFERENCE_ALPHABET[rng.gen_range(0..REFERENCE_ALPHABET.len())]))
            .collect()
    }
}
