use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// How long the "copied" indicator stays on screen.
pub const COPIED_INDICATOR: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warn,
}

impl Status {
    fn template(self) -> &'static str {
        match self {
            Status::Ok => "{prefix:.green.bold} {msg}",
            Status::Warn => "{prefix:.yellow.bold} {msg}",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Status::Ok => "[ok]",
            Status::Warn => "[!!]",
        }
    }
}

fn status_bar(status: Status, message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template(status.template()) {
        bar.set_style(style);
    }
    bar.set_prefix(status.prefix());
    bar.set_message(message.to_string());
    bar
}

/// Print a status line that stays on screen.
pub fn announce(status: Status, message: &str) {
    status_bar(status, message).finish();
}

/// Show a status line for `linger`, then erase it.
pub fn flash(status: Status, message: &str, linger: Duration) {
    let bar = status_bar(status, message);
    bar.tick();
    std::thread::sleep(linger);
    bar.finish_and_clear();
}

/// The copy indicator used after every clipboard action.
pub fn copied(ok: bool, what: &str) {
    if ok {
        flash(Status::Ok, &format!("Copied {what} to clipboard!"), COPIED_INDICATOR);
    } else {
        announce(Status::Warn, &format!("Could not copy {what}; copy it manually."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_templates_parse() {
        for status in [Status::Ok, Status::Warn] {
            assert!(ProgressStyle::with_template(status.template()).is_ok());
        }
    }

    #[test]
    fn test_status_bar_carries_message() {
        let bar = status_bar(Status::Ok, "Copied command");
        assert_eq!(bar.message(), "Copied command");
        assert_eq!(bar.prefix(), "[ok]");
        bar.finish_and_clear();
    }
}
