//! Per-screen view-models.
//!
//! These hold the state each screen owns (collection, field values, loading
//! and error flags) and the transitions applied when a request completes.
//! They issue no requests and draw nothing; `app` decides what to send and
//! `ui` decides how it looks.

mod form;
mod list;

pub use form::{
    parse_rating, parse_release_date, CategoryField, CategoryFields, CategoryForm, FieldError,
    FieldInput, FieldOrder, FormMode, FormStatus, SeriesField, SeriesFields, SeriesForm,
    CATEGORY_PLACEHOLDER,
};
pub use list::ListView;
