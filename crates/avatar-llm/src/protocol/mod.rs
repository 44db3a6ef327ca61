//! Wire format types for each completion protocol

pub mod google;
pub mod openai;
