//! Observability - request IDs for correlating logs.

mod request_id;

pub use request_id::RequestIdMiddleware;
