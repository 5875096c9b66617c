//! Small helpers shared by controllers and services.

pub mod markdown;
pub mod parse;
pub mod password;
