pub mod even_split;

pub use even_split::{EvenSplit, split_even};
