use thiserror::Error;

use crate::models::booking::BookingStatus;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{message}")]
    IllegalTransition {
        status: BookingStatus,
        message: String,
    },

    #[error("Upstream service error ({service}): {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

impl SchedulingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// "Cannot {action} a booking with status: {status}"
    pub fn illegal_transition(action: &str, status: BookingStatus) -> Self {
        Self::IllegalTransition {
            status,
            message: format!("Cannot {action} a booking with status: {status}"),
        }
    }

    pub fn booking_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound(format!("Booking with ID {id} not found"))
    }

    pub fn mentor_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound(format!("Mentor with ID {id} not found"))
    }

    /// Status carried by an illegal transition, if this is one.
    pub fn current_status(&self) -> Option<BookingStatus> {
        match self {
            Self::IllegalTransition { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
