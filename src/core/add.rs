use super::stock::on_hand_for;
use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use crate::models::operation_type::OperationType;
use crate::models::record::{RawRecord, Record, format_quantity_raw};
use crate::source::RecordSource;
use crate::utils::date::{parse_record_date, today};

/// A transaction as typed by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub operation: String,
    pub item_name: String,
    pub quantity: f64,
    pub category: Option<String>,
    pub project_id: Option<String>,
    pub date: Option<String>,
    pub note: Option<String>,
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Validate `tx` for `identity` and append it to `source`.
    ///
    /// - the record is always attributed to the acting user
    /// - a non-admin can only record into their own project
    /// - withdrawals may not push the item's stock below zero
    pub fn add(
        source: &mut dyn RecordSource,
        identity: &Identity,
        tx: &NewTransaction,
    ) -> AppResult<Record> {
        // ------------------------------------------------
        // 1️⃣ Operation is mandatory for new records
        // ------------------------------------------------
        let operation = OperationType::op_from_str(&tx.operation)
            .ok_or_else(|| AppError::InvalidOperation(tx.operation.clone()))?;

        // ------------------------------------------------
        // 2️⃣ Project, scoped
        // ------------------------------------------------
        let project_id = match tx.project_id.as_deref().map(str::trim) {
            Some(p) if !identity.is_admin && p != identity.project_id => {
                return Err(AppError::PermissionDenied(format!(
                    "'{}' can only record into project {}",
                    identity.username, identity.project_id
                )));
            }
            Some(p) if !p.is_empty() => p.to_string(),
            _ => identity.project_id.clone(),
        };

        // ------------------------------------------------
        // 3️⃣ Date (today when omitted)
        // ------------------------------------------------
        let date = match tx.date.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => {
                parse_record_date(d).ok_or_else(|| AppError::InvalidDate(d.to_string()))?;
                d.to_string()
            }
            _ => today().format("%Y-%m-%d").to_string(),
        };

        // ------------------------------------------------
        // 4️⃣ Shared validation with every other ingestion path
        // ------------------------------------------------
        if !tx.quantity.is_finite() || tx.quantity <= 0.0 {
            return Err(AppError::InvalidQuantity(tx.quantity.to_string()));
        }

        let raw = RawRecord {
            id: None,
            date,
            operation: operation.to_db_str().to_string(),
            item_name: tx.item_name.clone(),
            category: tx.category.clone().unwrap_or_default(),
            quantity: format_quantity_raw(tx.quantity),
            actor_username: identity.username.clone(),
            project_id,
            note: tx.note.clone().unwrap_or_default(),
        };
        let mut record = Record::from_raw(&raw, 0)?;

        // ------------------------------------------------
        // 5️⃣ Stock check for withdrawals
        // ------------------------------------------------
        if operation.is_withdrawal() {
            let existing = source.get_records().or_else(|e| match e {
                AppError::SourceUnavailable(_) => Ok(Vec::new()),
                other => Err(other),
            })?;
            let available = on_hand_for(&existing, &record.project_id, &record.item_name);

            if available + 1e-9 < record.quantity {
                return Err(AppError::InsufficientStock {
                    item: record.item_name.clone(),
                    project: record.project_id.clone(),
                    on_hand: available,
                    requested: record.quantity,
                });
            }
        }

        record.id = source.append(&record)?;
        Ok(record)
    }
}
