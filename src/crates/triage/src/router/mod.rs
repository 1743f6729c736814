//! Router module for intent dispatch
//!
//! Provides the query router and the harness that measures its accuracy
//! across classifiers.

pub mod evaluator;
pub mod llm_router;

pub use evaluator::{
    CaseOutcome, EvaluationOptions, EvaluationResult, Evaluator, FailurePolicy, IntentInference,
};
pub use llm_router::{Disposition, RouteOutcome, Router, EMPTY_QUERY_MESSAGE, UNHANDLED_MESSAGE};
