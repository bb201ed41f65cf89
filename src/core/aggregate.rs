use crate::models::operation_type::OperationType;
use crate::models::record::Record;
use serde::Serialize;

/// Summary numbers shown under a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub count: usize,
    pub inbound: f64,
    pub outbound: f64,
    pub adjust_increase: f64,
    pub adjust_decrease: f64,
}

impl Aggregates {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut agg = Aggregates::default();

        for rec in records {
            agg.count += 1;
            match rec.operation {
                Some(OperationType::Inbound) => agg.inbound += rec.quantity,
                Some(OperationType::Outbound) => agg.outbound += rec.quantity,
                Some(OperationType::AdjustIncrease) => agg.adjust_increase += rec.quantity,
                Some(OperationType::AdjustDecrease) => agg.adjust_decrease += rec.quantity,
                None => {}
            }
        }

        agg
    }

    /// inbound − outbound, adjustments folded in with their own sign.
    pub fn net_balance(&self) -> f64 {
        self.inbound - self.outbound + self.adjust_increase - self.adjust_decrease
    }
}
