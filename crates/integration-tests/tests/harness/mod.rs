#![allow(dead_code)]

pub mod config;
pub mod media;
pub mod mock_elevenlabs;
pub mod mock_gemini;
pub mod server;
