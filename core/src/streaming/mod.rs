//! Real-time streaming API.

pub mod director;
