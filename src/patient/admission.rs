//! Admission input and boundary validation.

use crate::error::AdmissionError;

/// Attributes supplied when registering a patient.
///
/// # Examples
///
/// ```
/// use u_triage::patient::Admission;
///
/// let admission = Admission::new("Rohit", 65, 2, 6)
///     .with_appointment_type("appointment")
///     .with_notes("follow-up");
/// assert!(admission.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Admission {
    pub name: String,
    pub age: i32,
    pub severity: i32,
    pub urgency: i32,

    /// Free-text visit kind; defaults to `walk-in`.
    pub appointment_type: String,

    pub notes: String,

    /// Explicit booking time (epoch seconds). `None` means "now".
    pub booking_time: Option<f64>,
}

impl Admission {
    pub fn new(name: impl Into<String>, age: i32, severity: i32, urgency: i32) -> Self {
        Self {
            name: name.into(),
            age,
            severity,
            urgency,
            appointment_type: String::from("walk-in"),
            notes: String::new(),
            booking_time: None,
        }
    }

    pub fn with_appointment_type(mut self, appointment_type: impl Into<String>) -> Self {
        self.appointment_type = appointment_type.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_booking_time(mut self, booking_time: f64) -> Self {
        self.booking_time = Some(booking_time);
        self
    }

    /// Checks the ranges a front-end enforces before admitting.
    ///
    /// [`TriageQueue::admit`](crate::queue::TriageQueue::admit) does not
    /// call this; any integers are accepted there.
    pub fn validate(&self) -> Result<(), AdmissionError> {
        if self.name.trim().is_empty() {
            return Err(AdmissionError::EmptyName);
        }
        if !(0..=130).contains(&self.age) {
            return Err(AdmissionError::AgeOutOfRange(self.age));
        }
        if !(1..=4).contains(&self.severity) {
            return Err(AdmissionError::SeverityOutOfRange(self.severity));
        }
        if !(1..=10).contains(&self.urgency) {
            return Err(AdmissionError::UrgencyOutOfRange(self.urgency));
        }
        Ok(())
    }
}

/// Demo roster loaded by [`TriageQueue::load_samples`].
///
/// [`TriageQueue::load_samples`]: crate::queue::TriageQueue::load_samples
pub fn sample_admissions() -> Vec<Admission> {
    [
        ("Rohit", 65, 2, 6, "appointment"),
        ("Sana", 30, 4, 9, "emergency"),
        ("Kavi", 8, 3, 8, "walk-in"),
        ("Maya", 50, 1, 3, "walk-in"),
        ("Arjun", 72, 2, 5, "walk-in"),
        ("Priya", 25, 4, 10, "appointment"),
    ]
    .into_iter()
    .map(|(name, age, severity, urgency, appt)| {
        Admission::new(name, age, severity, urgency).with_appointment_type(appt)
    })
    .collect()
}
