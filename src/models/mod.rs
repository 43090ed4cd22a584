//! Database models and server-side session/config models.

#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod feedback;
pub mod hostel;
pub mod owner;
pub mod student;
