//! Media processing API.

pub mod jobs;
