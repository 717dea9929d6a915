//! Business routes.

pub mod hits;

pub use hits::hit;
