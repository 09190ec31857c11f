//! Core domain primitives shared by every module.

pub mod error;
pub mod string;
pub mod time;
pub mod validation;
