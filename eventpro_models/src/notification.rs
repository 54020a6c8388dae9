use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::macros::id;

id!(ToastId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastSeverity {
    Success,
    Failure,
}

/// A transient notification shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub severity: ToastSeverity,
    pub message: String,
    /// How long the toast stays visible before it is dismissed.
    pub duration: Duration,
}
