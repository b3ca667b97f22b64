//! Form validation boundary. Loosely-typed form data is rejected here,
//! before any domain entity is constructed; error messages are meant to be
//! surfaced to the submitting user as-is.

use chrono::{DateTime, Utc};
use clinic_core::errors::{ClinicError, ClinicResult};
use clinic_core::models::appointment::AppointmentStatus;
use clinic_core::models::request::{
    AppointmentForm, CreateAppointmentRequest, UpdateAppointmentRequest,
};

fn required(value: Option<&str>, field: &str) -> ClinicResult<String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ClinicError::Validation(format!("{field} is required"))),
    }
}

fn parse_instant(raw: &str, field: &str) -> ClinicResult<DateTime<Utc>> {
    raw.trim().parse::<DateTime<Utc>>().map_err(|_| {
        ClinicError::InvalidRange(format!("{field} is not a valid timestamp: '{raw}'"))
    })
}

pub fn parse_create_form(form: &AppointmentForm) -> ClinicResult<CreateAppointmentRequest> {
    let patient_id = required(form.patient_id.as_deref(), "Patient ID")?;
    let doctor_id = required(form.doctor_id.as_deref(), "Doctor ID")?;
    let start_raw = required(form.start_time.as_deref(), "Start time")?;
    let end_raw = required(form.end_time.as_deref(), "End time")?;

    let start_time = parse_instant(&start_raw, "Start time")?;
    let end_time = parse_instant(&end_raw, "End time")?;
    if end_time <= start_time {
        return Err(ClinicError::InvalidRange(
            "End time must be after start time".to_string(),
        ));
    }

    Ok(CreateAppointmentRequest {
        patient_id,
        doctor_id,
        start_time,
        end_time,
        notes: form.notes.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(str::to_string),
    })
}

/// Every field is optional on update; present fields must still be
/// well-formed. When only one time bound is supplied, the inverted-range
/// check against the stored record happens in the lifecycle operation.
pub fn parse_update_form(form: &AppointmentForm) -> ClinicResult<UpdateAppointmentRequest> {
    let doctor_id = match form.doctor_id.as_deref().map(str::trim) {
        Some("") => {
            return Err(ClinicError::Validation(
                "Doctor ID must not be blank".to_string(),
            ));
        }
        other => other.map(str::to_string),
    };

    let start_time = form
        .start_time
        .as_deref()
        .map(|raw| parse_instant(raw, "Start time"))
        .transpose()?;
    let end_time = form
        .end_time
        .as_deref()
        .map(|raw| parse_instant(raw, "End time"))
        .transpose()?;
    if let (Some(start), Some(end)) = (start_time, end_time)
        && end <= start
    {
        return Err(ClinicError::InvalidRange(
            "End time must be after start time".to_string(),
        ));
    }

    let status = form
        .status
        .as_deref()
        .map(|raw| raw.trim().parse::<AppointmentStatus>())
        .transpose()?;

    Ok(UpdateAppointmentRequest {
        doctor_id,
        start_time,
        end_time,
        status,
        notes: form.notes.clone(),
    })
}
