//! LLM-driven intent routing for customer queries.
//!
//! A [`Router`] asks an [`IntentClassifier`] whether a free-text query is an
//! FAQ question or an order-status request, then hands the query to the
//! matching [`Handler`]. The [`Evaluator`] replays a labeled fixture through a
//! router per classifier and reports accuracy and latency.
//!
//! # Modules
//!
//! - `intent` - the two-label intent enumeration
//! - `handlers` - FAQ keyword lookup and order-status lookup
//! - `classifier` - the classification capability, the LLM-backed adapter and
//!   hosted provider bindings
//! - `router` - dispatch and the evaluation harness
//! - `fixture` - labeled test query loading
//! - `config` - TOML configuration schema and loader
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use triage::{FaqHandler, OrderStatusHandler, ProviderConfig, Router};
//!
//! let gpt = ProviderConfig::defaults().remove(0).classifier()?;
//! let router = Router::with_default_handlers(
//!     gpt.classifier,
//!     Arc::new(FaqHandler::default()),
//!     Arc::new(OrderStatusHandler::default()),
//! );
//!
//! println!("{}", router.route("Where is order 1111?").await);
//! ```

pub mod classifier;
pub mod config;
pub mod error;
pub mod fixture;
pub mod handlers;
pub mod intent;
pub mod router;

pub use classifier::{
    ClassifierError, IntentClassifier, LlmIntentClassifier, NamedClassifier, ProviderConfig,
    ProviderKind,
};
pub use config::{ConfigLoader, EvaluationConfig, TriageConfig};
pub use error::{Result, TriageError};
pub use fixture::TestCase;
pub use handlers::{FaqDataset, FaqEntry, FaqHandler, Handler, OrderBook, OrderStatusHandler};
pub use intent::Intent;
pub use router::{
    CaseOutcome, Disposition, EvaluationOptions, EvaluationResult, Evaluator, FailurePolicy,
    IntentInference, RouteOutcome, Router,
};
