use std::time::Duration;

const APP_NAME: &str = "cropshare";

/// How long a transient notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Short-lived, non-blocking user notices such as "Copied!".
pub trait Notifier {
    fn notify(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        let timeout = u32::try_from(NOTICE_DURATION.as_millis()).unwrap_or(u32::MAX);
        if let Err(err) = notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(APP_NAME)
            .body(message)
            .timeout(notify_rust::Timeout::Milliseconds(timeout))
            .show()
        {
            tracing::warn!("system notification failed: {err}");
        }
    }
}
