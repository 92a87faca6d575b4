pub mod pii;
pub mod currency;

pub use currency::{CurrencyCode, InvalidCurrency};
pub use pii::Masked;
