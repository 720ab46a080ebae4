//! Client-side request handles and typed endpoints.

// Export submodules
pub mod listings;
pub mod mutation;
pub mod query;
pub mod state;
