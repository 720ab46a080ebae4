//! Data models for the listings API.
//!
//! This module contains the GraphQL envelope types and the client-side view
//! of a listing.

// Export submodules
pub mod envelope;
pub mod listing;
