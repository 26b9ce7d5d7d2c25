//! Configuration management for the ticketing core.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,
    /// Order validation limits
    pub limits: OrderLimits,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Validation limits applied when creating orders.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderLimits {
    /// Maximum number of line items per order
    pub max_items_per_order: usize,
    /// Optional cap on the quantity of a single line item. When unset,
    /// oversized requests fail on availability rather than validation.
    pub max_quantity_per_item: Option<u32>,
}

impl Default for OrderLimits {
    fn default() -> Self {
        Self {
            max_items_per_order: 25,
            max_quantity_per_item: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log: LogConfig {
                log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            },
            limits: OrderLimits {
                max_items_per_order: env::var("BOXOFFICE_MAX_ITEMS_PER_ORDER")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(25),
                max_quantity_per_item: env::var("BOXOFFICE_MAX_QUANTITY_PER_ITEM")
                    .ok()
                    .and_then(|s| s.parse().ok()),
            },
        }
    }
}
