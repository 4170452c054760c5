//! Typed shapes of the two external catalogs and their endpoints.

pub mod character;
pub mod creature;
