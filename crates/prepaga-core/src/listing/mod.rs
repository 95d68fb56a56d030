//! List state: filtering and pagination.

pub mod directory;
pub mod pagination;

pub use directory::{
    filter_affiliates, filter_agendas, filter_providers, search_providers, AffiliateQuery,
    AffiliateSearchField, AgendaFilter, ProviderKindFilter, ProviderQuery, ProviderSearchField,
};
pub use pagination::{total_pages, Page, Paginator};
