//! Utility functions for common operations.
//!
//! - **URL validation**: API base address, form image URLs, browser hand-off
//! - **Text processing**: Unicode-aware width, truncation, line clamping and
//!   control-character stripping for API-provided strings
//!
//! # Examples
//!
//! ```
//! use catalog_admin::util::{clamp_lines, display_width, truncate_to_width};
//!
//! let width = display_width("Hello 世界"); // 10
//! let title = truncate_to_width("A very long series title", 12);
//! let description = clamp_lines("Three lines at most, like the web card", 16, 3);
//! ```

mod text;
mod url_validator;

pub use text::{clamp_lines, display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{
    validate_base_url, validate_image_url, validate_url_for_open, UrlValidationError,
};

/// Maximum length accepted for any single form field.
pub const MAX_FIELD_LENGTH: usize = 2048;
