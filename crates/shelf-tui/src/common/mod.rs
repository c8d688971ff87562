//! Shared helpers for panels and the composer.

mod text;

pub use text::{mask_secret, truncate_start_with_ellipsis, truncate_with_ellipsis};
