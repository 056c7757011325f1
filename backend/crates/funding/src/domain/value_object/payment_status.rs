use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }

    #[inline]
    pub const fn is_final(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "failed" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }

    /// Map a gateway `transaction_status` / `fraud_status` pair to the final
    /// status it implies. `None` means the notification changes nothing.
    pub fn from_gateway(transaction_status: &str, fraud_status: Option<&str>) -> Option<Self> {
        match transaction_status {
            "settlement" => Some(PaymentStatus::Paid),
            "capture" => match fraud_status {
                None | Some("") | Some("accept") => Some(PaymentStatus::Paid),
                Some("deny") => Some(PaymentStatus::Failed),
                Some(_) => None,
            },
            "deny" | "cancel" | "expire" | "failure" => Some(PaymentStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_gateway() {
        assert_eq!(PaymentStatus::from_gateway("settlement", None), Some(PaymentStatus::Paid));
        assert_eq!(
            PaymentStatus::from_gateway("capture", Some("accept")),
            Some(PaymentStatus::Paid)
        );
        assert_eq!(PaymentStatus::from_gateway("capture", None), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::from_gateway("capture", Some("challenge")), None);
        assert_eq!(PaymentStatus::from_gateway("expire", None), Some(PaymentStatus::Failed));
        assert_eq!(PaymentStatus::from_gateway("cancel", None), Some(PaymentStatus::Failed));
        assert_eq!(PaymentStatus::from_gateway("deny", None), Some(PaymentStatus::Failed));
        assert_eq!(PaymentStatus::from_gateway("pending", None), None);
    }

    #[test]
    fn test_codes() {
        for status in [PaymentStatus::Pending, PaymentStatus::Paid, PaymentStatus::Failed] {
            assert_eq!(PaymentStatus::from_code(status.code()), Some(status));
        }
        assert!(!PaymentStatus::Pending.is_final());
        assert!(PaymentStatus::Paid.is_final());
    }
}
