use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of stock movement carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Inbound,
    Outbound,
    AdjustIncrease,
    AdjustDecrease,
}

impl OperationType {
    /// Parse user / spreadsheet input. Accepts the short codes
    /// (`in`, `out`, `adj+`, `adj-`) and the long names, any case.
    pub fn op_from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in" | "inbound" => Some(Self::Inbound),
            "out" | "outbound" => Some(Self::Outbound),
            "adj+" | "adjustment-increase" => Some(Self::AdjustIncrease),
            "adj-" | "adjustment-decrease" => Some(Self::AdjustDecrease),
            _ => None,
        }
    }

    pub fn op_as_str(&self) -> &'static str {
        match self {
            OperationType::Inbound => "inbound",
            OperationType::Outbound => "outbound",
            OperationType::AdjustIncrease => "adjustment-increase",
            OperationType::AdjustDecrease => "adjustment-decrease",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OperationType::Inbound => "in",
            OperationType::Outbound => "out",
            OperationType::AdjustIncrease => "adj+",
            OperationType::AdjustDecrease => "adj-",
        }
    }

    /// +1 for movements that add stock, -1 for those that remove it.
    pub fn sign(&self) -> f64 {
        match self {
            OperationType::Inbound | OperationType::AdjustIncrease => 1.0,
            OperationType::Outbound | OperationType::AdjustDecrease => -1.0,
        }
    }

    pub fn is_withdrawal(&self) -> bool {
        self.sign() < 0.0
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op_as_str())
    }
}

impl Serialize for OperationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.op_as_str())
    }
}
