pub mod models;
pub mod extras;
pub mod fees;
pub mod builder;

pub use models::{
    AppliedFee, BaggageSelection, BookingExtras, CheckedBag, ExtrasBreakdown, InsuranceSelection,
    Quote, QuoteRequest, SeatSelection,
};
pub use extras::ExtrasCalculator;
pub use fees::FeeRule;
pub use builder::QuoteBuilder;
