use std::collections::HashMap;

use clinic_core::models::appointment::Appointment;
use clinic_core::models::request::AppointmentStats;

/// Folds a set of appointments into counts by status and by doctor plus the
/// average appointment duration in whole minutes.
pub fn aggregate(appointments: &[Appointment]) -> AppointmentStats {
    let mut by_status: HashMap<String, usize> = HashMap::new();
    let mut by_doctor: HashMap<String, usize> = HashMap::new();
    let mut total_minutes: i64 = 0;

    for appointment in appointments {
        *by_status.entry(appointment.status.to_string()).or_insert(0) += 1;
        *by_doctor.entry(appointment.doctor_id.clone()).or_insert(0) += 1;
        total_minutes += (appointment.end_time - appointment.start_time).num_minutes();
    }

    let average_duration_minutes = if appointments.is_empty() {
        0
    } else {
        total_minutes / appointments.len() as i64
    };

    AppointmentStats {
        total: appointments.len(),
        by_status,
        by_doctor,
        average_duration_minutes,
    }
}
