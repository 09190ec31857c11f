//! Use cases for the campaign brain

pub mod run_campaign;
pub(crate) mod shared;
