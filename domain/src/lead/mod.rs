//! Lead and company input records consumed from acquisition collaborators.

pub mod entities;

pub use entities::{CompanyRecord, LeadRecord};
