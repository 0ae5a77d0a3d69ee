//! Local part-time job board.
//!
//! Listings, applications and favorites live in a key-value store as whole JSON
//! collections. Browsing is a pure pipeline over those collections: filter with a
//! [`board::FilterState`], then order by hourly rate.

pub mod board;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod text;
