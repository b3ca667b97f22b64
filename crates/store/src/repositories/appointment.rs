use async_trait::async_trait;
use chrono::{DateTime, Utc};
use clinic_core::errors::{ClinicError, ClinicResult};
use clinic_core::models::appointment::{Appointment, AppointmentStatus, Entity};
use uuid::Uuid;

use crate::storage::Storage;

/// CRUD contract every concrete store fulfils.
#[async_trait]
pub trait Repository<T: Entity + Send + Sync> {
    async fn find(&self, id: Uuid) -> ClinicResult<Option<T>>;
    async fn find_all(&self) -> ClinicResult<Vec<T>>;
    async fn save(&self, entity: &T) -> ClinicResult<T>;
    async fn delete(&self, id: Uuid) -> ClinicResult<bool>;
}

/// Appointment repository over an injected key-value storage collaborator.
///
/// The whole collection is serialized as one JSON array under one key on
/// every mutation. There are no partial writes and no transaction log; a
/// mutation rewrites the full value.
pub struct AppointmentStore<S: Storage> {
    storage: S,
    collection_key: String,
}

impl<S: Storage> AppointmentStore<S> {
    pub fn new(storage: S, collection_key: impl Into<String>) -> Self {
        Self {
            storage,
            collection_key: collection_key.into(),
        }
    }

    /// Deserializes the whole collection. A missing key is an empty store.
    async fn load(&self) -> ClinicResult<Vec<Appointment>> {
        match self.storage.get(&self.collection_key).await? {
            Some(json) => serde_json::from_str(&json).map_err(|e| {
                ClinicError::Storage(eyre::eyre!("Corrupt appointment collection: {e}"))
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, appointments: &[Appointment]) -> ClinicResult<()> {
        let json = serde_json::to_string(appointments).map_err(|e| {
            ClinicError::Storage(eyre::eyre!("Failed to serialize appointments: {e}"))
        })?;
        self.storage.set(&self.collection_key, &json).await?;
        Ok(())
    }

    pub async fn find_by_patient(&self, patient_id: &str) -> ClinicResult<Vec<Appointment>> {
        tracing::debug!("Getting appointments by patient: {}", patient_id);
        let appointments = self.load().await?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.patient_id == patient_id)
            .collect())
    }

    pub async fn find_by_doctor(&self, doctor_id: &str) -> ClinicResult<Vec<Appointment>> {
        tracing::debug!("Getting appointments by doctor: {}", doctor_id);
        let appointments = self.load().await?;
        Ok(appointments
            .into_iter()
            .filter(|a| a.doctor_id == doctor_id)
            .collect())
    }

    /// Non-cancelled appointments for a doctor starting within `[from, to]`,
    /// ordered by start time.
    pub async fn find_by_doctor_in_range(
        &self,
        doctor_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ClinicResult<Vec<Appointment>> {
        let appointments = self.load().await?;
        let mut hits: Vec<Appointment> = appointments
            .into_iter()
            .filter(|a| a.doctor_id == doctor_id)
            .filter(|a| a.status != AppointmentStatus::Cancelled)
            .filter(|a| a.start_time >= from && a.start_time <= to)
            .collect();
        hits.sort_by_key(|a| a.start_time);
        Ok(hits)
    }

    /// True iff no non-cancelled appointment for the doctor intersects the
    /// half-open window `[start, end)`. `exclude` removes the update target
    /// from the overlap set so a record never conflicts with itself.
    ///
    /// The check is not atomic with a subsequent save; callers that serve
    /// concurrent bookings must serialize the check-then-save sequence.
    pub async fn check_availability(
        &self,
        doctor_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> ClinicResult<bool> {
        if end <= start {
            return Err(ClinicError::InvalidRange(
                "End time must be after start time".to_string(),
            ));
        }

        tracing::debug!(
            "Checking availability: doctor={}, start={}, end={}, exclude={:?}",
            doctor_id,
            start,
            end,
            exclude
        );

        let appointments = self.load().await?;
        let conflict = appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .filter(|a| a.status != AppointmentStatus::Cancelled)
            .filter(|a| exclude != Some(a.id))
            .any(|a| a.overlaps(start, end));

        Ok(!conflict)
    }
}

#[async_trait]
impl<S: Storage> Repository<Appointment> for AppointmentStore<S> {
    async fn find(&self, id: Uuid) -> ClinicResult<Option<Appointment>> {
        tracing::debug!("Getting appointment by id: {}", id);
        let appointments = self.load().await?;
        Ok(appointments.into_iter().find(|a| a.id == id))
    }

    async fn find_all(&self) -> ClinicResult<Vec<Appointment>> {
        self.load().await
    }

    /// Validates first and aborts the write on failure. An existing id is
    /// replaced in place, preserving its position and refreshing
    /// `updated_at`; a new id is appended. Returns the persisted copy.
    async fn save(&self, appointment: &Appointment) -> ClinicResult<Appointment> {
        appointment.validate()?;

        let mut appointments = self.load().await?;
        let mut stored = appointment.clone();

        match appointments.iter().position(|a| a.id == stored.id) {
            Some(pos) => {
                stored.updated_at = Utc::now();
                appointments[pos] = stored.clone();
                tracing::debug!("Replaced appointment in place: id={}", stored.id);
            }
            None => {
                appointments.push(stored.clone());
                tracing::debug!("Appended appointment: id={}", stored.id);
            }
        }

        self.persist(&appointments).await?;
        Ok(stored)
    }

    async fn delete(&self, id: Uuid) -> ClinicResult<bool> {
        let mut appointments = self.load().await?;
        let before = appointments.len();
        appointments.retain(|a| a.id != id);

        if appointments.len() == before {
            tracing::debug!("Delete skipped, appointment not found: id={}", id);
            return Ok(false);
        }

        self.persist(&appointments).await?;
        tracing::debug!("Deleted appointment: id={}", id);
        Ok(true)
    }
}
