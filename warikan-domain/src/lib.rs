#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    AmountField, Calculation, CalculationResult, Money, ParsedAmount, ParticipantId,
    ParticipantOutcome, ParticipantResult, ParticipantShare, PoolField,
};
pub use services::{EvenSplit, split_even};
