pub mod scan;
pub mod unit;

pub use unit::{ContentUnit, ContentUnitBuilder};
