//! Paginated listing access: the query layer, the per-filter page
//! accumulator and the navigation controller built on both.

pub mod accumulator;
pub mod controller;
#[cfg(feature = "client")]
pub mod http;
pub mod session;
pub mod source;

pub use accumulator::Accumulator;
pub use controller::{Completion, Navigation, PageRequest, PageTicket, PaginationController};
pub use session::SessionContext;
pub use source::{Identified, ListingSource, QueryError, RepositoryListingSource};
