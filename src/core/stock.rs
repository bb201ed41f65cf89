//! On-hand quantities derived from transaction records.

use crate::models::record::Record;
use crate::models::stock::StockLine;
use std::collections::BTreeMap;

/// Sum signed movements per (project, item). Lines come out ordered by
/// project, then item. The category shown is the latest one seen.
pub fn on_hand<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<StockLine> {
    let mut acc: BTreeMap<(String, String), StockLine> = BTreeMap::new();

    for rec in records {
        let key = (rec.project_id.clone(), rec.item_name.clone());
        let line = acc.entry(key).or_insert_with(|| StockLine {
            project_id: rec.project_id.clone(),
            item_name: rec.item_name.clone(),
            category: rec.category.clone(),
            on_hand: 0.0,
            movements: 0,
        });

        line.on_hand += rec.signed_quantity();
        line.movements += 1;
        line.category.clone_from(&rec.category);
    }

    acc.into_values().collect()
}

/// Current quantity of one item in one project.
pub fn on_hand_for(records: &[Record], project_id: &str, item_name: &str) -> f64 {
    records
        .iter()
        .filter(|r| r.project_id == project_id && r.item_name == item_name)
        .map(Record::signed_quantity)
        .sum()
}
