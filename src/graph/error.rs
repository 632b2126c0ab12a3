use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("invalid edge weight {weight} on '{from}' -> '{to}': weights must be finite and > 0")]
    InvalidWeight {
        from: Arc<str>,
        to: Arc<str>,
        weight: f64,
    },
}
