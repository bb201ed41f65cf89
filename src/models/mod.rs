pub mod identity;
pub mod operation_type;
pub mod record;
pub mod selection;
pub mod stock;
pub mod user;
