pub mod field;
pub mod status;
