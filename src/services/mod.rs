pub mod enricher;
pub mod paged_fetcher;
pub mod reconciler;

#[cfg(test)]
pub(crate) mod fake_directory;

pub use enricher::{DetailEnricher, Enrichment};
pub use paged_fetcher::{PagedFetcher, Relation, UserDirectory};
pub use reconciler::{reconcile, SetDifference};
