use chrono::{DateTime, Utc};
use clinic_core::errors::{ClinicError, ClinicResult};
use clinic_core::models::appointment::{Appointment, AppointmentStatus};
use clinic_core::models::request::{
    AppointmentStats, CreateAppointmentRequest, PatientAppointmentFilter, StatsFilter,
    UpdateAppointmentRequest,
};
use clinic_store::repositories::appointment::{AppointmentStore, Repository};
use clinic_store::storage::Storage;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::stats;

/// Business operations over the appointment store.
///
/// The store's availability check is not atomic with the following save, so
/// every check-then-save sequence runs under one lock. A single service
/// instance therefore never double-books a doctor; deployments sharing a
/// backend across processes need a storage-level constraint instead.
pub struct BookingService<S: Storage> {
    store: AppointmentStore<S>,
    booking_lock: Mutex<()>,
}

impl<S: Storage> BookingService<S> {
    pub fn new(store: AppointmentStore<S>) -> Self {
        Self {
            store,
            booking_lock: Mutex::new(()),
        }
    }

    /// Read access to the underlying store for callers that only query.
    pub fn store(&self) -> &AppointmentStore<S> {
        &self.store
    }

    async fn require(&self, id: Uuid) -> ClinicResult<Appointment> {
        self.store
            .find(id)
            .await?
            .ok_or_else(|| ClinicError::NotFound(format!("Appointment with ID {id} not found")))
    }

    fn ensure_not_terminal(appointment: &Appointment) -> ClinicResult<()> {
        match appointment.status {
            AppointmentStatus::Scheduled => Ok(()),
            AppointmentStatus::Cancelled => Err(ClinicError::AlreadyCancelled(appointment.id)),
            AppointmentStatus::Completed | AppointmentStatus::NoShow => {
                Err(ClinicError::Validation(format!(
                    "Appointment {} is {} and can no longer change",
                    appointment.id, appointment.status
                )))
            }
        }
    }

    pub async fn create(&self, request: CreateAppointmentRequest) -> ClinicResult<Appointment> {
        let _guard = self.booking_lock.lock().await;

        let available = self
            .store
            .check_availability(
                &request.doctor_id,
                request.start_time,
                request.end_time,
                None,
            )
            .await?;
        if !available {
            return Err(ClinicError::DoctorUnavailable(format!(
                "Doctor {} is not available between {} and {}",
                request.doctor_id, request.start_time, request.end_time
            )));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            start_time: request.start_time,
            end_time: request.end_time,
            status: AppointmentStatus::Scheduled,
            notes: request.notes,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        };

        tracing::info!(
            "Creating appointment: id={}, doctor={}, start={}",
            appointment.id,
            appointment.doctor_id,
            appointment.start_time
        );
        self.store.save(&appointment).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> ClinicResult<Appointment> {
        let _guard = self.booking_lock.lock().await;

        let mut appointment = self.require(id).await?;
        Self::ensure_not_terminal(&appointment)?;

        let doctor_id = request
            .doctor_id
            .clone()
            .unwrap_or_else(|| appointment.doctor_id.clone());
        let start_time = request.start_time.unwrap_or(appointment.start_time);
        let end_time = request.end_time.unwrap_or(appointment.end_time);

        let window_changed = doctor_id != appointment.doctor_id
            || start_time != appointment.start_time
            || end_time != appointment.end_time;
        if window_changed {
            // The record's own id is excluded so it never conflicts with itself
            let available = self
                .store
                .check_availability(&doctor_id, start_time, end_time, Some(id))
                .await?;
            if !available {
                return Err(ClinicError::DoctorUnavailable(format!(
                    "Doctor {doctor_id} is not available between {start_time} and {end_time}"
                )));
            }
        }

        appointment.doctor_id = doctor_id;
        appointment.start_time = start_time;
        appointment.end_time = end_time;
        if let Some(status) = request.status {
            appointment.status = status;
        }
        if let Some(notes) = request.notes {
            appointment.notes = Some(notes);
        }

        tracing::info!("Updating appointment: id={}", id);
        self.store.save(&appointment).await
    }

    pub async fn cancel(&self, id: Uuid, reason: Option<String>) -> ClinicResult<Appointment> {
        let mut appointment = self.require(id).await?;

        if appointment.status == AppointmentStatus::Cancelled {
            return Err(ClinicError::AlreadyCancelled(id));
        }

        let now = Utc::now();
        if appointment.start_time <= now {
            return Err(ClinicError::PastAppointment(id));
        }

        appointment.status = AppointmentStatus::Cancelled;
        appointment.cancellation_reason = reason;
        appointment.cancelled_at = Some(now);

        tracing::info!("Cancelling appointment: id={}", id);
        self.store.save(&appointment).await
    }

    /// Generic status change. Terminal states reject every transition; the
    /// current status is a no-op that still refreshes `updated_at`.
    /// Cancellation bookkeeping (`cancelled_at`, reason) only happens via
    /// [`cancel`](Self::cancel).
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> ClinicResult<Appointment> {
        let mut appointment = self.require(id).await?;

        if appointment.status != status {
            Self::ensure_not_terminal(&appointment)?;
            appointment.status = status;
        }

        tracing::info!("Updating appointment status: id={}, status={}", id, status);
        self.store.save(&appointment).await
    }

    /// A patient's appointments, optionally filtered by status and start
    /// window, newest first.
    pub async fn patient_appointments(
        &self,
        patient_id: &str,
        filter: &PatientAppointmentFilter,
    ) -> ClinicResult<Vec<Appointment>> {
        let mut appointments = self.store.find_by_patient(patient_id).await?;

        if let Some(status) = filter.status {
            appointments.retain(|a| a.status == status);
        }
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            appointments.retain(|a| a.start_time >= from && a.start_time <= to);
        }

        appointments.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(appointments)
    }

    /// A doctor's non-cancelled appointments starting within `[from, to]`.
    pub async fn doctor_schedule(
        &self,
        doctor_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ClinicResult<Vec<Appointment>> {
        self.store
            .find_by_doctor_in_range(doctor_id, from, to)
            .await
    }

    pub async fn stats(&self, filter: &StatsFilter) -> ClinicResult<AppointmentStats> {
        let mut appointments = self.store.find_all().await?;

        if let Some(doctor_id) = &filter.doctor_id {
            appointments.retain(|a| &a.doctor_id == doctor_id);
        }
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            appointments.retain(|a| a.start_time >= from && a.start_time <= to);
        }

        Ok(stats::aggregate(&appointments))
    }
}
