pub mod product;
pub mod pricing;

pub use product::{CabinClass, InsuranceTier, SeatCategory};
pub use pricing::{ExtrasPricingTable, InsuranceTierPrice, SeatPriceRow};
