//! Conversion between internal types and provider wire formats

pub mod google;
pub mod openai;
