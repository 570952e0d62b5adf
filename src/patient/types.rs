//! Patient entity.

use crate::rank::{PriorityRule, RankKey, TriageRule};
use chrono::{DateTime, Local, Utc};
use std::fmt;

/// Kind of visit, as interpreted for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppointmentType {
    WalkIn,
    Appointment,
    Emergency,
}

impl AppointmentType {
    /// All kinds, in the order used by the simulator's weights.
    pub const ALL: [AppointmentType; 3] = [
        AppointmentType::WalkIn,
        AppointmentType::Appointment,
        AppointmentType::Emergency,
    ];

    /// Matches a label case-insensitively. Returns `None` for anything
    /// other than `walk-in`, `appointment` or `emergency`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(label))
    }

    /// Canonical lower-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentType::WalkIn => "walk-in",
            AppointmentType::Appointment => "appointment",
            AppointmentType::Emergency => "emergency",
        }
    }

    /// Additive priority bonus applied to severity.
    pub fn boost(self) -> i64 {
        match self {
            AppointmentType::WalkIn => 0,
            AppointmentType::Appointment => 1,
            AppointmentType::Emergency => 2,
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admitted patient.
///
/// `appointment_type` keeps the label exactly as supplied; ranking goes
/// through [`appointment_kind`](Patient::appointment_kind), which maps
/// unrecognized labels to walk-in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Patient {
    /// Admission id, unique within one queue lifetime.
    pub id: u64,
    pub name: String,
    pub age: i32,
    /// 1 (mild) to 4 (critical).
    pub severity: i32,
    /// 1 to 10.
    pub urgency: i32,
    pub appointment_type: String,
    pub notes: String,
    /// Seconds since the Unix epoch.
    pub booking_time: f64,
}

impl Patient {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        age: i32,
        severity: i32,
        urgency: i32,
        appointment_type: impl Into<String>,
        booking_time: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            severity,
            urgency,
            appointment_type: appointment_type.into(),
            notes: String::new(),
            booking_time,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn appointment_kind(&self) -> AppointmentType {
        AppointmentType::from_label(&self.appointment_type).unwrap_or(AppointmentType::WalkIn)
    }

    /// Rank key under the clinic [`TriageRule`], computed from the
    /// current attribute values.
    pub fn rank_key(&self) -> RankKey {
        TriageRule.rank(self)
    }

    /// Booking time rendered as local `YYYY-mm-dd HH:MM:SS`.
    pub fn booking_time_display(&self) -> String {
        format_booking_time(self.booking_time)
    }
}

/// One-line summary used by list views and dialogs.
impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | Age:{} | Sev:{} | Urg:{} | {} | {}",
            self.id,
            self.name,
            self.age,
            self.severity,
            self.urgency,
            self.appointment_type,
            self.booking_time_display()
        )
    }
}

/// Renders epoch seconds as local time, `YYYY-mm-dd HH:MM:SS`.
///
/// Timestamps chrono cannot represent fall back to the raw seconds.
pub fn format_booking_time(seconds: f64) -> String {
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    match DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)) {
        Some(utc) if seconds.is_finite() => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        _ => format!("{seconds:.3}"),
    }
}

/// Current wall-clock time in seconds since the Unix epoch.
pub fn now_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1e6
}
