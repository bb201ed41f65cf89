use serde::Serialize;

/// On-hand quantity of one item inside one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockLine {
    pub project_id: String,
    pub item_name: String,
    pub category: String,
    pub on_hand: f64,
    pub movements: usize,
}
