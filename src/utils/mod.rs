//! Shared utilities for URL handling and configuration constants.

pub mod constants;
pub mod url_utils;

pub use url_utils::{is_binary_asset, is_fragment_only, is_valid_url};
