use crate::errors::{AppError, AppResult};
use crate::models::identity::Identity;
use crate::models::record::Record;
use crate::source::RecordSource;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove record `id`. A non-admin may only delete records they entered
    /// in their own project. Returns the deleted record.
    pub fn apply(source: &mut dyn RecordSource, identity: &Identity, id: i64) -> AppResult<Record> {
        let record = source
            .get_records()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(AppError::RecordNotFound(id))?;

        if !identity.is_admin
            && (record.actor_username != identity.username
                || record.project_id != identity.project_id)
        {
            return Err(AppError::PermissionDenied(format!(
                "record {} belongs to '{}' in project {}",
                id, record.actor_username, record.project_id
            )));
        }

        if !source.delete(id)? {
            return Err(AppError::RecordNotFound(id));
        }

        Ok(record)
    }
}
