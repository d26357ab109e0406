//! # Request Context
//!
//! Per-request metadata threaded through [`AdsService`](crate::application::services::AdsService).

use std::fmt;
use uuid::Uuid;

/// Metadata attached to one inbound request.
///
/// Only used to label tracing spans. It carries no deadline and no
/// cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext {
    request_id: Uuid,
}

impl RequestContext {
    /// Creates a context with a fresh random request id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_request_id(Uuid::new_v4())
    }

    /// Creates a context with a caller-supplied request id.
    #[must_use]
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self { request_id }
    }

    /// Creates a context from a header value, falling back to a fresh id
    /// when it is missing or not a UUID.
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        value
            .and_then(|v| Uuid::parse_str(v.trim()).ok())
            .map_or_else(Self::new, Self::with_request_id)
    }

    /// Returns the request id.
    #[inline]
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_contexts_differ() {
        assert_ne!(RequestContext::new(), RequestContext::new());
    }

    #[test]
    fn header_value_is_reused() {
        let id = Uuid::new_v4();
        let ctx = RequestContext::from_header(Some(&id.to_string()));
        assert_eq!(ctx.request_id(), id);
        assert_eq!(ctx.to_string(), id.to_string());
    }

    #[test]
    fn garbage_header_gets_fresh_id() {
        let ctx = RequestContext::from_header(Some("not-a-uuid"));
        assert!(!ctx.request_id().is_nil());
        assert!(!RequestContext::from_header(None).request_id().is_nil());
    }
}
