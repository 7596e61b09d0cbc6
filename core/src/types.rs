//! Result values handed back to callers.

use crate::http::HttpResponse;

/// Successful outcome of a GET.
///
/// A response with a body yields the body re-encoded as compact JSON text.
/// A response without one is returned whole so the caller still sees the
/// status and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetResponse {
    Body(String),
    Empty(HttpResponse),
}

impl GetResponse {
    pub fn body(&self) -> Option<&str> {
        match self {
            GetResponse::Body(body) => Some(body),
            GetResponse::Empty(_) => None,
        }
    }
}

/// Successful outcome of a POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostOutcome {
    pub status: u16,
}
