//! Input handling
//! Validates what the user submits before it reaches the engine

pub mod profile;

pub use profile::UserProfile;
