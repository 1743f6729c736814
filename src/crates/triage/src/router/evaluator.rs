//! Routing accuracy evaluation
//!
//! Replays labeled test cases through a [`Router`] per classifier and
//! tabulates correct, total and failed counts together with the wall-clock
//! time spent inside each routing call.

use crate::classifier::NamedClassifier;
use crate::fixture::TestCase;
use crate::handlers::{FaqHandler, OrderStatusHandler};
use crate::intent::Intent;
use crate::router::llm_router::{RouteOutcome, Router};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How the predicted intent of a case is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntentInference {
    /// Use the intent the router dispatched to
    #[default]
    Reported,
    /// FAQ when the response is one of the canned FAQ answers, otherwise
    /// ORDER_STATUS
    ResponseMatch,
}

impl IntentInference {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentInference::Reported => "reported",
            IntentInference::ResponseMatch => "response-match",
        }
    }
}

impl fmt::Display for IntentInference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntentInference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reported" => Ok(IntentInference::Reported),
            "response-match" => Ok(IntentInference::ResponseMatch),
            other => Err(format!(
                "Unknown inference '{}' (expected reported or response-match)",
                other
            )),
        }
    }
}

/// How cases that could not be routed are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Failed cases count toward neither correct nor total
    #[default]
    Exclude,
    /// Failed cases count toward total only
    CountAsIncorrect,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Exclude => "exclude",
            FailurePolicy::CountAsIncorrect => "count-as-incorrect",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exclude" => Ok(FailurePolicy::Exclude),
            "count-as-incorrect" => Ok(FailurePolicy::CountAsIncorrect),
            other => Err(format!(
                "Unknown failure policy '{}' (expected exclude or count-as-incorrect)",
                other
            )),
        }
    }
}

/// Evaluation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationOptions {
    pub inference: IntentInference,
    pub failures: FailurePolicy,
}

/// Result of routing one test case
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub query: String,
    pub expected: Intent,
    /// `None` when the case failed
    pub predicted: Option<Intent>,
    pub response: String,
    pub latency: Duration,
    /// Failure description when the case could not be routed
    pub error: Option<String>,
}

impl CaseOutcome {
    pub fn is_correct(&self) -> bool {
        self.predicted == Some(self.expected)
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Aggregate for one classifier
#[derive(Debug, Clone, Default)]
pub struct EvaluationResult {
    /// Classifier display name
    pub name: String,
    pub correct: usize,
    pub total: usize,
    pub failed: usize,
    /// Time spent inside routing calls, summed over all cases
    pub elapsed: Duration,
    pub cases: Vec<CaseOutcome>,
}

impl EvaluationResult {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Percentage of counted cases whose predicted intent matched, 0 when
    /// nothing was counted
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }

    /// Mean routing time over every case that was run
    pub fn average_latency(&self) -> Duration {
        match u32::try_from(self.cases.len()).unwrap_or(u32::MAX) {
            0 => Duration::ZERO,
            n => self.elapsed / n,
        }
    }

    fn record(&mut self, case: CaseOutcome, policy: FailurePolicy) {
        self.elapsed += case.latency;

        if case.is_failed() {
            self.failed += 1;
            if policy == FailurePolicy::CountAsIncorrect {
                self.total += 1;
            }
        } else {
            self.total += 1;
            if case.is_correct() {
                self.correct += 1;
            }
        }

        self.cases.push(case);
    }
}

/// Drives test cases through a router built per classifier
pub struct Evaluator {
    faq: Arc<FaqHandler>,
    orders: Arc<OrderStatusHandler>,
    options: EvaluationOptions,
}

impl Evaluator {
    /// Create an evaluator that routes to the given handlers
    pub fn new(faq: Arc<FaqHandler>, orders: Arc<OrderStatusHandler>) -> Self {
        Self {
            faq,
            orders,
            options: EvaluationOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> EvaluationOptions {
        self.options
    }

    /// Evaluate every classifier in order over the same cases
    pub async fn evaluate(
        &self,
        cases: &[TestCase],
        classifiers: &[NamedClassifier],
    ) -> Vec<EvaluationResult> {
        let mut results = Vec::with_capacity(classifiers.len());
        for classifier in classifiers {
            results.push(self.evaluate_classifier(cases, classifier).await);
        }
        results
    }

    /// Evaluate one classifier
    pub async fn evaluate_classifier(
        &self,
        cases: &[TestCase],
        classifier: &NamedClassifier,
    ) -> EvaluationResult {
        info!(
            classifier = %classifier.name,
            cases = cases.len(),
            inference = %self.options.inference,
            failures = %self.options.failures,
            "Evaluating classifier"
        );

        let router = Router::with_default_handlers(
            classifier.classifier.clone(),
            self.faq.clone(),
            self.orders.clone(),
        );
        let mut result = EvaluationResult::new(classifier.name.clone());

        for case in cases {
            let start = Instant::now();
            let outcome = router.dispatch(&case.query).await;
            let latency = start.elapsed();

            let case = self.judge(case, outcome, latency);
            match &case.error {
                Some(error) => warn!(
                    classifier = %classifier.name,
                    query = %case.query,
                    "Case failed: {}",
                    error
                ),
                None => debug!(
                    classifier = %classifier.name,
                    query = %case.query,
                    expected = %case.expected,
                    correct = case.is_correct(),
                    "Case routed"
                ),
            }

            result.record(case, self.options.failures);
        }

        info!(
            classifier = %result.name,
            correct = result.correct,
            total = result.total,
            failed = result.failed,
            "Accuracy {:.2}%",
            result.accuracy()
        );

        result
    }

    fn judge(&self, case: &TestCase, outcome: RouteOutcome, latency: Duration) -> CaseOutcome {
        let error = outcome.failure();
        let predicted = match (error.is_some(), self.options.inference) {
            (true, _) => None,
            (false, IntentInference::Reported) => outcome.intent(),
            (false, IntentInference::ResponseMatch) => {
                Some(self.infer_from_response(&outcome.response))
            }
        };

        CaseOutcome {
            query: case.query.clone(),
            expected: case.expected,
            predicted,
            response: outcome.response,
            latency,
            error,
        }
    }

    fn infer_from_response(&self, response: &str) -> Intent {
        if self.faq.is_canned_answer(response) {
            Intent::Faq
        } else {
            Intent::OrderStatus
        }
    }
}
