//! URL handling module for wpoke
//!
//! This module validates user supplied targets against SSRF, compares hosts
//! for the same-origin filter, and turns discovered references into absolute
//! URLs.

mod origin;
mod validator;

pub use origin::{backfill_scheme, ensure_same_origin, extract_host, is_same_origin};
pub use validator::{is_global, parse_target, validate_url};
