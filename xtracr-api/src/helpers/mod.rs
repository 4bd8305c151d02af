pub mod builder_gate;
pub mod description_validator;
pub mod field_store;
pub mod notifications;
