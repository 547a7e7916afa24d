//! Desktop notification support.
//! Currently only implements macOS notifications.

#[cfg(target_os = "macos")]
use std::process::Command;

/// Fire-and-forget notification sink. Implementations must never fail the caller.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Sends notifications through the desktop, or drops them where unsupported
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        #[cfg(target_os = "macos")]
        {
            let script = format!(
                r#"display notification "{}" with title "{}""#,
                body.replace('"', "\\\""),
                title.replace('"', "\\\"")
            );

            if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
                tracing::debug!(error = %e, "desktop notification failed");
            }
        }

        #[cfg(not(target_os = "macos"))]
        {
            tracing::debug!(title, body, "desktop notifications unsupported, skipping");
        }
    }
}

pub const BREAK_TITLE: &str = "Time for a break";

/// Body of the break reminder for the running task
pub fn break_message(task_name: &str, interval_minutes: u32) -> String {
    format!(
        "You've been working on \"{}\" for {} minutes. Take a break!",
        task_name, interval_minutes
    )
}

/// Send the break reminder for the running task
pub fn notify_break_needed(notifier: &dyn Notifier, task_name: &str, interval_minutes: u32) {
    notifier.notify(BREAK_TITLE, &break_message(task_name, interval_minutes));
}

#[cfg(test)]
pub use recording::RecordingNotifier;

#[cfg(test)]
mod recording {
    use super::Notifier;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects notifications for assertions. Clones share the same log.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingNotifier {
        sent: Rc<RefCell<Vec<(String, String)>>>,
    }

    impl RecordingNotifier {
        pub fn sent(&self) -> Vec<(String, String)> {
            self.sent.borrow().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, title: &str, body: &str) {
            self.sent
                .borrow_mut()
                .push((title.to_string(), body.to_string()));
        }
    }
}
