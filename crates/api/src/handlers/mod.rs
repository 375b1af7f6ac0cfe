pub mod activities;
pub mod employees;
pub mod records;
