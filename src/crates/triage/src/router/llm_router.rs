//! Intent-based query router
//!
//! Classifies each query with an [`IntentClassifier`] and delegates it to the
//! handler registered for the resulting intent. Routing never fails: empty
//! queries, classifier failures and unregistered intents all produce a
//! user-facing message.

use crate::classifier::IntentClassifier;
use crate::handlers::Handler;
use crate::intent::Intent;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Response for an empty or whitespace-only query
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid question.";

/// Response when no handler is registered for the classified intent
pub const UNHANDLED_MESSAGE: &str = "Sorry, I couldn't understand your request.";

/// How a routed response was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// The query was blank; the classifier was not called
    EmptyQuery,
    /// A handler produced the response
    Dispatched(Intent),
    /// The classifier failed; carries the failure text
    ClassificationFailed(String),
    /// The classifier answered with an intent that has no handler
    Unhandled(Intent),
}

/// Response text plus how it was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub response: String,
    pub disposition: Disposition,
}

impl RouteOutcome {
    /// The intent a handler answered for, if any
    pub fn intent(&self) -> Option<Intent> {
        match self.disposition {
            Disposition::Dispatched(intent) => Some(intent),
            _ => None,
        }
    }

    /// True unless a handler produced the response
    pub fn is_failure(&self) -> bool {
        !matches!(self.disposition, Disposition::Dispatched(_))
    }

    /// Short description of a failed route, `None` on success
    pub fn failure(&self) -> Option<String> {
        match &self.disposition {
            Disposition::Dispatched(_) => None,
            Disposition::EmptyQuery => Some("empty query".to_string()),
            Disposition::ClassificationFailed(reason) => Some(reason.clone()),
            Disposition::Unhandled(intent) => Some(format!("no handler for {}", intent)),
        }
    }
}

/// Intent router
pub struct Router {
    /// Classifier consulted for every non-empty query
    classifier: Arc<dyn IntentClassifier>,
    /// Registered handlers by intent
    handlers: HashMap<Intent, Arc<dyn Handler>>,
}

impl Router {
    /// Create a router with no handlers registered
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            classifier,
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` for `intent`, replacing any previous one
    pub fn with_handler(mut self, intent: Intent, handler: Arc<dyn Handler>) -> Self {
        self.handlers.insert(intent, handler);
        self
    }

    /// Router with the FAQ handler on `FAQ` and the order handler on
    /// `ORDER_STATUS`
    pub fn with_default_handlers(
        classifier: Arc<dyn IntentClassifier>,
        faq: Arc<dyn Handler>,
        orders: Arc<dyn Handler>,
    ) -> Self {
        Self::new(classifier)
            .with_handler(Intent::Faq, faq)
            .with_handler(Intent::OrderStatus, orders)
    }

    /// Intents that have a handler
    pub fn registered(&self) -> impl Iterator<Item = Intent> + '_ {
        self.handlers.keys().copied()
    }

    /// Route a query and return only the response text
    pub async fn route(&self, query: &str) -> String {
        self.dispatch(query).await.response
    }

    /// Route a query
    ///
    /// # Arguments
    /// * `query` - Raw user input, passed to the classifier unmodified
    ///
    /// # Returns
    /// * The response text and how it was produced
    pub async fn dispatch(&self, query: &str) -> RouteOutcome {
        if query.trim().is_empty() {
            return RouteOutcome {
                response: EMPTY_QUERY_MESSAGE.to_string(),
                disposition: Disposition::EmptyQuery,
            };
        }

        let intent = match self.classifier.classify(query).await {
            Ok(intent) => intent,
            Err(e) => {
                warn!("Intent classification failed: {}", e);
                return RouteOutcome {
                    response: format!("Routing error: {}", e),
                    disposition: Disposition::ClassificationFailed(e.to_string()),
                };
            }
        };

        match self.handlers.get(&intent) {
            Some(handler) => {
                debug!(%intent, handler = handler.name(), "Dispatching query");
                RouteOutcome {
                    response: handler.handle(query),
                    disposition: Disposition::Dispatched(intent),
                }
            }
            None => {
                warn!(%intent, "No handler registered for intent");
                RouteOutcome {
                    response: UNHANDLED_MESSAGE.to_string(),
                    disposition: Disposition::Unhandled(intent),
                }
            }
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<_> = self.registered().collect();
        registered.sort();
        f.debug_struct("Router")
            .field("handlers", &registered)
            .finish_non_exhaustive()
    }
}
