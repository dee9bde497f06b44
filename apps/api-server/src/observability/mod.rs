//! Observability module - request IDs on top of the tracing logger.

mod request_id;

pub use request_id::propagate_request_id;
