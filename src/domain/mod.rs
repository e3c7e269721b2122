//! Domain types shared by the resource layer.

pub mod params;
pub mod search;
pub mod types;
