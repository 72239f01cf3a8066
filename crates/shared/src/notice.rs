/// How long a notice stays on screen.
pub const NOTICE_DURATION_MS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// The notice on screen, if any. Every `show` bumps a generation number and expiry is by
/// generation, so a newer notice cancels the pending dismissal of the one it replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifier {
    current: Option<Notice>,
    generation: u64,
}

impl Notifier {
    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    /// Replace whatever is showing. Returns the generation to expire later.
    pub fn show(&mut self, notice: Notice) -> u64 {
        self.generation += 1;
        self.current = Some(notice);
        self.generation
    }

    /// Dismiss the notice if it is still the one shown under `generation`.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation == self.generation && self.current.is_some() {
            self.current = None;
            return true;
        }
        false
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_expire() {
        let mut n = Notifier::default();
        let g = n.show(Notice::success("Callout added to easy.json"));
        assert_eq!(n.current().map(|x| x.kind), Some(NoticeKind::Success));
        assert!(n.expire(g));
        assert!(n.current().is_none());
    }

    #[test]
    fn test_newer_notice_cancels_older_expiry() {
        let mut n = Notifier::default();
        let first = n.show(Notice::info("Saving..."));
        let second = n.show(Notice::error("Disk full"));
        assert!(!n.expire(first));
        assert_eq!(n.current().unwrap().message, "Disk full");
        assert!(n.expire(second));
    }

    #[test]
    fn test_expire_after_manual_dismiss_is_noop() {
        let mut n = Notifier::default();
        let g = n.show(Notice::info("x"));
        n.dismiss();
        assert!(!n.expire(g));
    }
}
