//! User-facing outcome messages.
//!
//! The store never renders anything. Presentation turns each operation result
//! into a [`Notice`] and decides how to show it.

use std::time::Duration;

use crate::catalog::TemplateDescriptor;
use crate::persist::PersistWarning;
use crate::store::checkout::Receipt;
use crate::store::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// How long the message should stay visible.
    pub duration: Duration,
}

const SHORT: Duration = Duration::from_millis(2000);
const MEDIUM: Duration = Duration::from_millis(3000);
const LONG: Duration = Duration::from_millis(4000);

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            duration,
        }
    }

    pub fn added(template: &TemplateDescriptor) -> Self {
        Self::new(
            NoticeLevel::Success,
            format!("{} added to cart!", template.name),
            SHORT,
        )
    }

    pub fn removed(template: &TemplateDescriptor) -> Self {
        Self::new(
            NoticeLevel::Info,
            format!("{} removed from cart", template.name),
            SHORT,
        )
    }

    pub fn purchased(receipt: &Receipt) -> Self {
        Self::new(
            NoticeLevel::Success,
            format!(
                "Purchase successful! {}. Remaining credits: {}",
                receipt.names(),
                receipt.remaining_credits
            ),
            LONG,
        )
    }

    pub fn reset() -> Self {
        Self::new(NoticeLevel::Success, "Store reset to default state!", MEDIUM)
    }

    pub fn persistence(warning: &PersistWarning) -> Self {
        Self::new(NoticeLevel::Warning, warning.message.clone(), MEDIUM)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&StoreError> for Notice {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::AlreadyStaged { .. } | StoreError::EmptyCart => {
                Notice::new(NoticeLevel::Info, err.to_string(), SHORT)
            }
            StoreError::AlreadyOwned { .. } | StoreError::NotFound { .. } => {
                Notice::new(NoticeLevel::Error, err.to_string(), SHORT)
            }
            StoreError::InsufficientCredits { shortfall, .. } => Notice::new(
                NoticeLevel::Error,
                format!("Insufficient credits! You need {shortfall} more credits."),
                MEDIUM,
            ),
            StoreError::InvalidInput { .. }
            | StoreError::TransactionInProgress
            | StoreError::StaleTicket { .. }
            | StoreError::Persistence(_) => {
                Notice::new(NoticeLevel::Error, err.to_string(), MEDIUM)
            }
        }
    }
}
