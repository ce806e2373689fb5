//! User-facing notices and confirmation prompts

use delicrem_core::OrderStatus;
use tracing::warn;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation succeeded
    Success,
    /// Operation failed or input was rejected
    Error,
}

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Short heading
    pub title: String,
    /// Body text
    pub message: String,
}

impl Notice {
    /// Success notice
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notice
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Presents notices and asks the user to confirm or choose
pub trait Notifier {
    /// Show a notice
    fn notify(&self, notice: Notice);

    /// Ask for confirmation of a destructive action
    fn confirm(&self, title: &str, text: &str) -> bool;

    /// Ask for a new status; `None` when cancelled or unrecognized
    fn select_status(&self, title: &str) -> Option<OrderStatus>;
}

/// Notifier backed by the browser's native dialogs
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNotifier;

impl Notifier for BrowserNotifier {
    fn notify(&self, notice: Notice) {
        gloo_dialogs::alert(&format!("{}\n\n{}", notice.title, notice.message));
    }

    fn confirm(&self, title: &str, text: &str) -> bool {
        gloo_dialogs::confirm(&format!("{title}\n\n{text}"))
    }

    fn select_status(&self, title: &str) -> Option<OrderStatus> {
        let options = OrderStatus::ALL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let answer = gloo_dialogs::prompt(
            &format!("{title}\n\nOpciones: {options}"),
            Some(OrderStatus::Pending.as_str()),
        )?;

        match answer.parse() {
            Ok(status) => Some(status),
            Err(e) => {
                warn!(%e, "status prompt answered with an unknown value");
                None
            }
        }
    }
}
