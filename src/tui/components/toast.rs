//! Toast notifications
//!
//! One-line messages shown above the footer after actions complete or fail.

use std::time::{Duration, Instant};

use iocraft::prelude::*;

use crate::error::BackofficeError;

/// How long a toast stays on screen
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// A toast notification message
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    /// When the toast was created
    pub timestamp: Instant,
}

/// Severity level for toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
    Success,
}

impl Toast {
    pub fn new(message: String, level: ToastLevel) -> Self {
        Self {
            message,
            level,
            timestamp: Instant::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Error)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message.into(), ToastLevel::Success)
    }

    /// Error toast titled with the error's category
    pub fn from_error(error: &BackofficeError) -> Self {
        Self::error(format!("{}: {}", error.category(), error))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.timestamp) >= TOAST_TTL
    }

    /// Get the color associated with this toast's level
    pub fn color(&self) -> Color {
        match self.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => Color::Red,
            ToastLevel::Success => Color::Green,
        }
    }
}

/// Props for the ToastNotification component
#[derive(Default, Props)]
pub struct ToastNotificationProps {
    pub toast: Option<Toast>,
}

/// Toast bar styled by level; renders nothing without a toast
#[component]
pub fn ToastNotification(props: &ToastNotificationProps) -> impl Into<AnyElement<'static>> {
    element! {
        View(flex_shrink: 0.0) {
            #(props.toast.as_ref().map(|t| {
                element! {
                    View(
                        width: 100pct,
                        height: 2,
                        padding_left: 1,
                        background_color: Color::Black,
                        border_edges: Edges::Top,
                        border_style: BorderStyle::Single,
                        border_color: t.color(),
                    ) {
                        Text(content: t.message.clone(), color: t.color())
                    }
                }
            }))
        }
    }
}
