//! Intent handlers: the components that produce the final answer.
//!
//! Handlers never fail. A lookup miss is answered with a fallback message
//! because an unknown keyword or order ID is an expected conversational
//! outcome.

pub mod faq;
pub mod order_status;

pub use faq::{FaqDataset, FaqEntry, FaqHandler};
pub use order_status::{OrderBook, OrderStatusHandler};

/// Produces a user-facing response for queries of one intent.
pub trait Handler: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Answer the query.
    fn handle(&self, query: &str) -> String;
}
