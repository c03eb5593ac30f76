//! Order lifecycle status.
//!
//! The set is closed: any text that is not one of the four literals is
//! rejected with [`ValidationError::InvalidChoice`] before it can reach the
//! store. The `orders.status` column carries a matching CHECK constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "In Process")]
    InProcess,
    #[serde(rename = "Sent")]
    Sent,
    #[serde(rename = "Completed")]
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::New,
        OrderStatus::InProcess,
        OrderStatus::Sent,
        OrderStatus::Completed,
    ];

    /// The literal stored in the database and exchanged over the API.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::New => "New",
            OrderStatus::InProcess => "In Process",
            OrderStatus::Sent => "Sent",
            OrderStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the four literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidChoice {
                field: "status",
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_every_literal() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }

    #[test]
    fn rejects_near_misses() {
        for raw in ["new", "In process", "InProcess", "Shipped", ""] {
            assert_matches!(
                raw.parse::<OrderStatus>(),
                Err(ValidationError::InvalidChoice { field: "status", .. })
            );
        }
    }

    #[test]
    fn serializes_with_spaces() {
        let json = serde_json::to_string(&OrderStatus::InProcess).unwrap();
        assert_eq!(json, "\"In Process\"");
    }
}
