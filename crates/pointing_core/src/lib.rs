#![forbid(unsafe_code)]

pub mod cache;
pub mod pointing;
