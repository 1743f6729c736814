//! Order status lookup by 4-digit order ID.

use super::Handler;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// A standalone run of exactly four ASCII digits.
static ORDER_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{4}\b").expect("order ID pattern is valid"));

/// Prompt returned when the query carries no order ID.
pub const MISSING_ORDER_ID: &str = "Please provide a valid 4-digit order ID.";

/// Order ID to status text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderBook(BTreeMap<String, String>);

impl OrderBook {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with_order(mut self, order_id: impl Into<String>, status: impl Into<String>) -> Self {
        self.0.insert(order_id.into(), status.into());
        self
    }

    pub fn get(&self, order_id: &str) -> Option<&str> {
        self.0.get(order_id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, status)| (id.as_str(), status.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `order_id` is exactly four ASCII digits.
    pub fn is_valid_id(order_id: &str) -> bool {
        order_id.len() == 4 && order_id.bytes().all(|b| b.is_ascii_digit())
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
            .with_order("1111", "Your order is shipped. Expected delivery in 2 days.")
            .with_order("1212", "Your order been processed. It will ship tomorrow.")
            .with_order("1313", "Your order is ready for pick up.")
    }
}

impl FromIterator<(String, String)> for OrderBook {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Answers order-status queries from an [`OrderBook`].
#[derive(Debug, Clone, Default)]
pub struct OrderStatusHandler {
    orders: OrderBook,
}

impl OrderStatusHandler {
    pub fn new(orders: OrderBook) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    /// First standalone 4-digit token in the query, if any.
    pub fn extract_order_id(query: &str) -> Option<&str> {
        ORDER_ID_REGEX.find(query).map(|m| m.as_str())
    }
}

impl Handler for OrderStatusHandler {
    fn name(&self) -> &str {
        "order_status"
    }

    fn handle(&self, query: &str) -> String {
        let query = query.trim().to_lowercase();

        let Some(order_id) = Self::extract_order_id(&query) else {
            return MISSING_ORDER_ID.to_string();
        };

        match self.orders.get(order_id) {
            Some(status) => {
                debug!(order_id, "Order found");
                format!("Order {} status: {}", order_id, status)
            }
            None => {
                debug!(order_id, "Order not found");
                format!("Order {} was not found.", order_id)
            }
        }
    }
}
