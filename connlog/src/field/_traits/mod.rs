pub mod field_handler;
