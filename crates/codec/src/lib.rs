pub mod csv;
pub mod file;

pub use csv::{decode, encode};
pub use file::{load, save};
