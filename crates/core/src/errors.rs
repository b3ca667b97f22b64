use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("Doctor unavailable: {0}")]
    DoctorUnavailable(String),

    #[error("Appointment {0} is already cancelled")]
    AlreadyCancelled(Uuid),

    #[error("Appointment {0} has already started and cannot be cancelled")]
    PastAppointment(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type ClinicResult<T> = Result<T, ClinicError>;
