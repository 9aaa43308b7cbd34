use serde::{Deserialize, Serialize};

/// Order lifecycle status
///
/// Allowed moves: pending -> processing -> completed, with declined reachable
/// from pending or processing. Completed and declined are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Declined,
}

impl OrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Declined => "declined",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::Declined => "Declined",
        }
    }

    pub fn all() -> Vec<OrderStatus> {
        vec![
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Completed,
            OrderStatus::Declined,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "completed" => Some(OrderStatus::Completed),
            "declined" => Some(OrderStatus::Declined),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Declined)
    }

    /// Whether a move from `self` to `next` is legal.
    ///
    /// Writing the same status back is always a no-op move.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (*self, next),
            (OrderStatus::Pending, OrderStatus::Processing)
                | (OrderStatus::Pending, OrderStatus::Declined)
                | (OrderStatus::Processing, OrderStatus::Completed)
                | (OrderStatus::Processing, OrderStatus::Declined)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_path_allowed() {
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
    }

    #[test]
    fn test_declined_reachable_from_open_states() {
        assert!(Pending.can_transition_to(Declined));
        assert!(Processing.can_transition_to(Declined));
    }

    #[test]
    fn test_terminal_states_frozen() {
        for next in OrderStatus::all() {
            if next != Completed {
                assert!(!Completed.can_transition_to(next));
            }
            if next != Declined {
                assert!(!Declined.can_transition_to(next));
            }
        }
        assert!(!Completed.can_transition_to(Pending));
    }

    #[test]
    fn test_no_skipping_processing() {
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_same_status_is_noop() {
        for s in OrderStatus::all() {
            assert!(s.can_transition_to(s));
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for s in OrderStatus::all() {
            assert_eq!(OrderStatus::from_code(s.code()), Some(s));
        }
    }
}
