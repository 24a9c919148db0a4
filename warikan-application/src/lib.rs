#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod ports;
pub mod split_calculator;

pub use model::{ParticipantEntry, ReceiptInput};
pub use ports::{AmountParser, ParticipantDirectory};
pub use split_calculator::SplitCalculator;
