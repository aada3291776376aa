pub mod competitor;

pub use competitor::{Competitor, Record};
