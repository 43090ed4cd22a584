//! Domain aggregates exposed by the marketplace service layer.

pub mod feedback;
pub mod filter;
pub mod hostel;
pub mod owner;
pub mod page;
pub mod role;
pub mod student;
pub mod types;
