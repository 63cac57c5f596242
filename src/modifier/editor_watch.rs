use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::host::EditorControl;

/// Whether the world editor is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Open,
    Closed,
}

impl EditorMode {
    pub fn from_open(open: bool) -> Self {
        if open {
            EditorMode::Open
        } else {
            EditorMode::Closed
        }
    }
}

/// Source of editor-mode changes.
///
/// Hosts that publish editor notifications use [`SubscribedEditorWatch`];
/// the rest fall back to [`PollingEditorWatch`].
pub trait EditorWatch {
    /// Next mode change, if one happened since the last call
    fn poll(&mut self, now: Instant, editor: &dyn EditorControl) -> Option<EditorMode>;
}

/// Samples the editor state at a bounded rate and reports transitions
#[derive(Debug, Clone)]
pub struct PollingEditorWatch {
    interval: Duration,
    last_check: Option<Instant>,
    last_mode: Option<EditorMode>,
}

impl PollingEditorWatch {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_check: None,
            last_mode: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl EditorWatch for PollingEditorWatch {
    fn poll(&mut self, now: Instant, editor: &dyn EditorControl) -> Option<EditorMode> {
        if let Some(last) = self.last_check {
            if now.saturating_duration_since(last) < self.interval {
                return None;
            }
        }
        self.last_check = Some(now);

        let mode = EditorMode::from_open(editor.is_open());
        if self.last_mode == Some(mode) {
            return None;
        }
        self.last_mode = Some(mode);
        Some(mode)
    }
}

/// Relays mode changes the host pushes through its [`EditorNotifier`]
#[derive(Debug)]
pub struct SubscribedEditorWatch {
    rx: mpsc::UnboundedReceiver<EditorMode>,
}

impl SubscribedEditorWatch {
    /// The watch and the handle the host notifies it through
    pub fn new() -> (Self, EditorNotifier) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, EditorNotifier(tx))
    }
}

impl EditorWatch for SubscribedEditorWatch {
    fn poll(&mut self, _now: Instant, _editor: &dyn EditorControl) -> Option<EditorMode> {
        self.rx.try_recv().ok()
    }
}

/// Host side of a [`SubscribedEditorWatch`]
#[derive(Debug, Clone)]
pub struct EditorNotifier(mpsc::UnboundedSender<EditorMode>);

impl EditorNotifier {
    /// Host callback for an editor open/close notification. Returns false
    /// once the watch has been dropped.
    pub fn notify(&self, mode: EditorMode) -> bool {
        self.0.send(mode).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Editor(bool);

    impl EditorControl for Editor {
        fn is_open(&self) -> bool {
            self.0
        }

        fn select(&mut self, _id: &str) {}
    }

    #[test]
    fn test_first_poll_reports_current_mode() {
        let mut watch = PollingEditorWatch::new(Duration::from_secs(1));
        let now = Instant::now();
        assert_eq!(watch.poll(now, &Editor(false)), Some(EditorMode::Closed));
    }

    #[test]
    fn test_polling_is_rate_limited() {
        let mut watch = PollingEditorWatch::new(Duration::from_secs(1));
        let start = Instant::now();
        watch.poll(start, &Editor(false));

        // Too soon: the open editor is not seen yet
        assert_eq!(watch.poll(start + Duration::from_millis(500), &Editor(true)), None);
        assert_eq!(
            watch.poll(start + Duration::from_millis(1000), &Editor(true)),
            Some(EditorMode::Open)
        );
    }

    #[test]
    fn test_polling_reports_transitions_only() {
        let mut watch = PollingEditorWatch::new(Duration::from_secs(1));
        let start = Instant::now();
        let step = Duration::from_secs(1);

        assert_eq!(watch.poll(start, &Editor(true)), Some(EditorMode::Open));
        assert_eq!(watch.poll(start + step, &Editor(true)), None);
        assert_eq!(watch.poll(start + step * 2, &Editor(false)), Some(EditorMode::Closed));
        assert_eq!(watch.poll(start + step * 3, &Editor(false)), None);
    }

    #[test]
    fn test_subscription_drains_in_order() {
        let (mut watch, notifier) = SubscribedEditorWatch::new();
        assert!(notifier.notify(EditorMode::Open));
        assert!(notifier.notify(EditorMode::Closed));

        let now = Instant::now();
        let editor = Editor(false);
        assert_eq!(watch.poll(now, &editor), Some(EditorMode::Open));
        assert_eq!(watch.poll(now, &editor), Some(EditorMode::Closed));
        assert_eq!(watch.poll(now, &editor), None);
    }

    #[test]
    fn test_notifier_reports_dropped_watch() {
        let (watch, notifier) = SubscribedEditorWatch::new();
        drop(watch);
        assert!(!notifier.notify(EditorMode::Open));
    }
}
