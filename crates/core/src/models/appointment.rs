use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{ClinicError, ClinicResult};

/// Identity plus intrinsic-validation contract for domain records.
pub trait Entity {
    fn id(&self) -> Uuid;
    fn validate(&self) -> ClinicResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every state except `Scheduled` is terminal for the defined operations.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Scheduled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        };
        f.write_str(s)
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClinicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            other => Err(ClinicError::Validation(format!(
                "Invalid status '{other}'. Allowed values are: scheduled, completed, cancelled, no_show"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Appointment {
    /// Pure predicate: an appointment can be cancelled while it is still
    /// scheduled and strictly in the future.
    pub fn can_cancel(&self, now: DateTime<Utc>) -> bool {
        self.status == AppointmentStatus::Scheduled && self.start_time > now
    }

    /// Half-open interval intersection against `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && self.end_time > start
    }
}

impl Entity for Appointment {
    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> ClinicResult<()> {
        if self.patient_id.trim().is_empty() {
            return Err(ClinicError::Validation("Patient ID is required".to_string()));
        }
        if self.doctor_id.trim().is_empty() {
            return Err(ClinicError::Validation("Doctor ID is required".to_string()));
        }
        if self.end_time <= self.start_time {
            return Err(ClinicError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(())
    }
}
