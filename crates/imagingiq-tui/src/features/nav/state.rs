use std::time::Duration;

use imagingiq_core::session::SessionUser;

use crate::common::{TaskKind, TransientFlag};
use crate::overlays::InfoTopic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Closes on its own after the notice duration.
    Success,
    /// Stays until dismissed.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavState {
    /// Mirrors the provider subscription.
    pub user: Option<SessionUser>,
    /// Logout confirmation modal.
    pub logout: TransientFlag,
    /// Open informational overlay, at most one.
    pub info: Option<InfoTopic>,
    pub notice: TransientFlag,
    pub notice_content: Option<Notice>,
    pub(crate) notice_after: Duration,
}

impl NavState {
    pub fn new(notice_after: Duration) -> Self {
        Self {
            user: None,
            logout: TransientFlag::manual(),
            info: None,
            notice: TransientFlag::timed(TaskKind::NoticeTimer, notice_after),
            notice_content: None,
            notice_after,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// The notice to render, if its flag is up.
    pub fn visible_notice(&self) -> Option<&Notice> {
        self.notice_content
            .as_ref()
            .filter(|_| self.notice.is_visible())
    }
}
