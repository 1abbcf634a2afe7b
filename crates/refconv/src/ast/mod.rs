//! Structs for representing a format independent reference collection and its records.
mod biblio;
mod record;

pub use biblio::Biblio;
pub use record::Record;
