/// Desktop notifications
/// Currently only implements macOS notifications

#[cfg(target_os = "macos")]
use std::process::Command;

fn notify(title: &str, message: &str) {
    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            message.replace('"', "\\\""),
            title.replace('"', "\\\"")
        );

        if let Err(e) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %e, "notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = (title, message);
    }
}

/// Send a notification when a Pomodoro phase runs out
pub fn notify_pomodoro_complete(work_finished: bool) {
    if work_finished {
        notify("Flowtime - Focus Complete", "Great work! Time for a break.");
    } else {
        notify("Flowtime - Break Over", "Break's over! Ready to focus?");
    }
}

/// Send a notification when a task is completed
pub fn notify_task_done(task_title: &str) {
    notify("Flowtime - Task Completed", task_title);
}
