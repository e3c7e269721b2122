//! DTOs exposed by the resource endpoints.

pub mod api;
