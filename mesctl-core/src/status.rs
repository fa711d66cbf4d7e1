//! Work-order lifecycle states

use serde::{Deserialize, Serialize};

/// Lifecycle status of a work order.
///
/// The state machine is deliberately loose: any transition between
/// non-terminal states is permitted. Only COMPLETED and CANCELLED are
/// terminal; once reached, the only accepted "transition" is re-asserting
/// the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Failed,
    OnHold,
    Reopened,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::OnHold => "ON_HOLD",
            Self::Reopened => "REOPENED",
        }
    }

    /// Terminal states admit no further mutation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::InProgress,
            Self::Completed,
            Self::Cancelled,
            Self::Failed,
            Self::OnHold,
            Self::Reopened,
        ]
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            "FAILED" => Ok(Self::Failed),
            "ON_HOLD" => Ok(Self::OnHold),
            "REOPENED" => Ok(Self::Reopened),
            _ => Err(format!("Unknown order status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());

        for status in OrderStatus::all() {
            if !matches!(status, OrderStatus::Completed | OrderStatus::Cancelled) {
                assert!(!status.is_terminal(), "{} must not be terminal", status);
            }
        }
    }

    #[test]
    fn from_str_roundtrip() {
        for status in OrderStatus::all() {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
        assert!("pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&OrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");

        let status: OrderStatus = serde_json::from_str("\"ON_HOLD\"").unwrap();
        assert_eq!(status, OrderStatus::OnHold);
    }

    #[test]
    fn defaults_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
