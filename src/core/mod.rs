pub mod add;
pub mod aggregate;
pub mod backup;
pub mod candidates;
pub mod config;
pub mod del;
pub mod filter;
pub mod import;
pub mod log;
pub mod report;
pub mod scope;
pub mod stock;
pub mod users;
