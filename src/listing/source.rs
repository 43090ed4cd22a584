//! The query layer: one parameterized listing query returning a page of
//! results or an explicit error.

use std::future::Future;
use std::hash::Hash;

use thiserror::Error;

use crate::domain::filter::FilterState;
use crate::domain::hostel::Hostel;
use crate::domain::page::{PageInfo, PageResult};
use crate::domain::types::HostelId;
use crate::repository::errors::RepositoryError;
use crate::repository::{HostelListQuery, HostelReader};

/// Largest page size a listing query may ask for.
pub const MAX_PAGE_SIZE: usize = 50;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Clamps a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_PAGE_SIZE)
}

/// Failure of a listing query. An empty page is never reported through this
/// type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("session is missing or expired")]
    Unauthorized,
    #[error("invalid query: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl From<RepositoryError> for QueryError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ValidationError(message) => QueryError::Validation(message),
            other => QueryError::Server(other.to_string()),
        }
    }
}

/// Items that can be deduplicated across pages.
pub trait Identified {
    type Id: Clone + Eq + Hash;

    fn identity(&self) -> Self::Id;
}

impl Identified for Hostel {
    type Id = HostelId;

    fn identity(&self) -> HostelId {
        self.id
    }
}

/// A paged listing backend.
pub trait ListingSource {
    type Item: Identified;

    fn fetch_page(
        &self,
        filter: &FilterState,
        page: usize,
        limit: usize,
    ) -> impl Future<Output = Result<PageResult<Self::Item>, QueryError>>;
}

/// Listing source answering straight from the repository.
#[derive(Clone)]
pub struct RepositoryListingSource<R> {
    repo: R,
    verified_only: bool,
}

impl<R> RepositoryListingSource<R>
where
    R: HostelReader,
{
    /// Public search: only verified listings are visible.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            verified_only: true,
        }
    }

    pub fn include_unverified(mut self) -> Self {
        self.verified_only = false;
        self
    }

    /// Synchronous form of [`ListingSource::fetch_page`].
    pub fn query(
        &self,
        filter: &FilterState,
        page: usize,
        limit: usize,
    ) -> Result<PageResult<Hostel>, QueryError> {
        filter
            .validate()
            .map_err(|e| QueryError::Validation(e.to_string()))?;

        let page = page.max(1);
        let limit = clamp_limit(limit);

        let mut query = HostelListQuery::new(filter.clone()).paginate(page, limit);
        if self.verified_only {
            query = query.verified(true);
        }

        let (total, items) = self.repo.list_hostels(query).map_err(|e| {
            log::error!("Failed to list hostels: {e}");
            QueryError::from(e)
        })?;

        Ok(PageResult::new(items, PageInfo::new(page, total, limit)))
    }
}

impl<R> ListingSource for RepositoryListingSource<R>
where
    R: HostelReader,
{
    type Item = Hostel;

    async fn fetch_page(
        &self,
        filter: &FilterState,
        page: usize,
        limit: usize,
    ) -> Result<PageResult<Hostel>, QueryError> {
        self.query(filter, page, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Rent;
    use crate::repository::mock::MockRepository;

    #[test]
    fn limit_is_clamped() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(10), 10);
        assert_eq!(clamp_limit(500), MAX_PAGE_SIZE);
    }

    #[test]
    fn contradictory_rent_bounds_are_rejected_before_querying() {
        let mut repo = MockRepository::new();
        repo.expect_list_hostels().never();

        let source = RepositoryListingSource::new(repo);
        let filter = FilterState::new()
            .rent_between(Some(Rent::new(5000).unwrap()), Some(Rent::new(1000).unwrap()));

        let result = source.query(&filter, 1, 10);
        assert!(matches!(result, Err(QueryError::Validation(_))));
    }

    #[test]
    fn empty_result_is_a_page_not_an_error() {
        let mut repo = MockRepository::new();
        repo.expect_list_hostels()
            .withf(|query| {
                query.verified == Some(true)
                    && query.pagination.map(|p| (p.page, p.per_page)) == Some((3, 50))
            })
            .returning(|_| Ok((0, vec![])));

        let source = RepositoryListingSource::new(repo);
        let page = source.query(&FilterState::new(), 3, 80).unwrap();

        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.items_per_page, 50);
    }

    #[test]
    fn repository_failure_surfaces_as_error() {
        let mut repo = MockRepository::new();
        repo.expect_list_hostels()
            .returning(|_| Err(RepositoryError::ConnectionError("pool exhausted".into())));

        let source = RepositoryListingSource::new(repo).include_unverified();
        let result = source.query(&FilterState::new(), 1, 10);

        assert!(matches!(result, Err(QueryError::Server(_))));
    }
}
