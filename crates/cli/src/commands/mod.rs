pub mod batch;
pub mod officers;
pub mod reports;
pub mod session;
