pub mod appointment;
pub mod request;
