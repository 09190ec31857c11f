//! Lead traits: a fixed taxonomy of qualitative labels and the detector that
//! derives them from lead, company and scraped data.

pub mod detector;
pub mod taxonomy;

pub use detector::{TraitDetector, TraitReport};
pub use taxonomy::LeadTrait;
