use clinic_core::errors::{ClinicError, ClinicResult};
use uuid::Uuid;

#[test]
fn test_clinic_error_display() {
    let id = Uuid::new_v4();

    let not_found = ClinicError::NotFound("Appointment not found".to_string());
    let validation = ClinicError::Validation("Patient ID is required".to_string());
    let invalid_range = ClinicError::InvalidRange("End time must be after start time".to_string());
    let unavailable = ClinicError::DoctorUnavailable("doctor-1 is booked".to_string());
    let already_cancelled = ClinicError::AlreadyCancelled(id);
    let past = ClinicError::PastAppointment(id);
    let storage = ClinicError::Storage(eyre::eyre!("backend write failed"));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Appointment not found"
    );
    assert_eq!(
        validation.to_string(),
        "Validation error: Patient ID is required"
    );
    assert_eq!(
        invalid_range.to_string(),
        "Invalid time range: End time must be after start time"
    );
    assert_eq!(
        unavailable.to_string(),
        "Doctor unavailable: doctor-1 is booked"
    );
    assert_eq!(
        already_cancelled.to_string(),
        format!("Appointment {id} is already cancelled")
    );
    assert_eq!(
        past.to_string(),
        format!("Appointment {id} has already started and cannot be cancelled")
    );
    assert!(storage.to_string().contains("Storage error:"));
}

#[test]
fn test_clinic_result() {
    let result: ClinicResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: ClinicResult<i32> = Err(ClinicError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let report = eyre::eyre!("backend unreachable");
    let clinic_error: ClinicError = report.into();

    assert!(matches!(clinic_error, ClinicError::Storage(_)));
    assert!(clinic_error.to_string().contains("backend unreachable"));
}
