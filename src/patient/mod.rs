//! Patient records and admission input.
//!
//! [`Admission`] carries the attributes supplied by whoever registers a
//! patient; the queue turns it into a [`Patient`] by assigning an id and
//! a booking time.

mod admission;
mod types;

pub use admission::{sample_admissions, Admission};
pub use types::{format_booking_time, now_seconds, AppointmentType, Patient};
