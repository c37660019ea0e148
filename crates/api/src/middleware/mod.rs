//! Cross-cutting HTTP layers applied by the router builder.

pub mod cors;
pub mod security_headers;
