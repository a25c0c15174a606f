pub mod collection_store;
pub mod derived_view;
pub mod export;
pub mod facets;
pub mod feed_session;
pub mod filter;
pub mod pagination;
