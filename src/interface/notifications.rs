use serde::Serialize;
use std::time::Duration;
use strum_macros::{Display, EnumString};

/// How long a notification stays on screen before it starts sliding out.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);
/// Length of the slide-out transition, after which the notification is removed.
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl NotificationKind {
    pub fn border_colour(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#10b981",
            NotificationKind::Error => "#ef4444",
            NotificationKind::Warning => "#f59e0b",
            NotificationKind::Info => "#3b82f6",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Warning)
    }

    /// CSS class list used by the front end, e.g. "notification notification-success".
    pub fn css_class(&self) -> String {
        format!("notification notification-{}", self.kind)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NotificationPhase {
    Visible,
    Leaving,
    Removed,
}

/// Holds at most one notification: showing a new one replaces whatever is on screen.
#[derive(Debug, Default)]
pub struct NotificationArea {
    current: Option<Notification>,
}

impl NotificationArea {
    pub fn show(&mut self, notification: Notification) {
        tracing::debug!(kind = %notification.kind, "{}", notification.message);
        self.current = Some(notification);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Phase of the current notification `elapsed` after it was shown. Once removed, the area is
    /// cleared.
    pub fn tick(&mut self, elapsed: Duration) -> Option<NotificationPhase> {
        self.current.as_ref()?;
        let phase = phase_at(elapsed);
        if phase == NotificationPhase::Removed {
            self.current = None;
        }

        Some(phase)
    }
}

pub fn phase_at(elapsed: Duration) -> NotificationPhase {
    if elapsed < DISPLAY_DURATION {
        NotificationPhase::Visible
    } else if elapsed < DISPLAY_DURATION + EXIT_DURATION {
        NotificationPhase::Leaving
    } else {
        NotificationPhase::Removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(NotificationKind::Success, "#10b981")]
    #[case(NotificationKind::Error, "#ef4444")]
    #[case(NotificationKind::Warning, "#f59e0b")]
    #[case(NotificationKind::Info, "#3b82f6")]
    fn test_border_colours(#[case] kind: NotificationKind, #[case] colour: &str) {
        assert_eq!(kind.border_colour(), colour);
    }

    #[rstest]
    fn test_unknown_kind_falls_back_to_info() {
        let kind = "celebration".parse::<NotificationKind>().unwrap_or_default();
        assert_eq!(kind, NotificationKind::Info);
    }

    #[rstest]
    fn test_new_notification_replaces_previous() {
        let mut area = NotificationArea::default();
        area.show(Notification::info("first"));
        area.show(Notification::success("second"));

        assert_eq!(area.current(), Some(&Notification::success("second")));
        assert_eq!(
            area.current().unwrap().css_class(),
            "notification notification-success"
        );
    }

    #[rstest]
    fn test_lifecycle() {
        let mut area = NotificationArea::default();
        assert_eq!(area.tick(Duration::ZERO), None);

        area.show(Notification::warning("careful"));
        assert_eq!(
            area.tick(Duration::from_millis(2999)),
            Some(NotificationPhase::Visible)
        );
        assert_eq!(
            area.tick(Duration::from_millis(3100)),
            Some(NotificationPhase::Leaving)
        );
        assert!(area.current().is_some());
        assert_eq!(
            area.tick(Duration::from_millis(3300)),
            Some(NotificationPhase::Removed)
        );
        assert_eq!(area.current(), None);
    }
}
