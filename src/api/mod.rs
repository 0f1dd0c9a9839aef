//! Data-access boundary: the REST client and the types it decodes into.

mod client;
mod models;

pub use client::{ApiError, CatalogClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use models::{
    format_rating, Category, CategoryPayload, CategoryRef, Entity, EntityId, EntityKind, Series,
    SeriesPayload,
};
