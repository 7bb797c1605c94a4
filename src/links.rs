use crate::platform::PlatformError;
use crate::prefs::Prefs;
use anyhow::Result;

/// Links offered by the interactive session.
pub const PROJECT_LINKS: &[(&str, &str)] = &[
    ("Download FFmpeg", "https://ffmpeg.org/download.html"),
    ("FFmpeg documentation", "https://ffmpeg.org/ffmpeg.html"),
    ("Filter reference", "https://ffmpeg.org/ffmpeg-filters.html"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Opened,
    /// No opener worked; the caller should show the URL instead.
    Unopened,
    Declined,
}

/// Open `url`, asking through `confirm` the first time this URL is seen.
///
/// A confirmation is remembered in `prefs`; failing to persist it only costs
/// the user another prompt next time, so it is logged rather than returned.
pub fn follow<C, O>(prefs: &mut Prefs, url: &str, confirm: C, open: O) -> Result<LinkOutcome>
where
    C: FnOnce(&str) -> Result<bool>,
    O: FnOnce(&str) -> Result<(), PlatformError>,
{
    if !prefs.has_seen_notice(url) {
        if !confirm(url)? {
            tracing::info!(%url, "external link declined");
            return Ok(LinkOutcome::Declined);
        }
        if let Err(err) = prefs.mark_notice_seen(url) {
            tracing::warn!(%err, "could not remember link notice");
        }
    }

    match open(url) {
        Ok(()) => Ok(LinkOutcome::Opened),
        Err(err) => {
            tracing::warn!(%err, %url, "could not open link");
            Ok(LinkOutcome::Unopened)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    const URL: &str = "https://ffmpeg.org/download.html";

    fn opened_ok(_: &str) -> Result<(), PlatformError> {
        Ok(())
    }

    #[test]
    fn test_first_visit_asks_then_remembers() {
        let dir = tempdir().unwrap();
        let mut prefs = Prefs::load(dir.path().join("prefs.json")).unwrap();
        let asked = Cell::new(0);

        let outcome = follow(
            &mut prefs,
            URL,
            |_| {
                asked.set(asked.get() + 1);
                Ok(true)
            },
            opened_ok,
        )
        .unwrap();
        assert_eq!(outcome, LinkOutcome::Opened);

        let outcome = follow(
            &mut prefs,
            URL,
            |_| {
                asked.set(asked.get() + 1);
                Ok(true)
            },
            opened_ok,
        )
        .unwrap();
        assert_eq!(outcome, LinkOutcome::Opened);
        assert_eq!(asked.get(), 1);
        assert!(Prefs::load(prefs.path()).unwrap().has_seen_notice(URL));
    }

    #[test]
    fn test_declined_link_is_not_opened_or_remembered() {
        let dir = tempdir().unwrap();
        let mut prefs = Prefs::load(dir.path().join("prefs.json")).unwrap();
        let outcome = follow(&mut prefs, URL, |_| Ok(false), |_| panic!("must not open")).unwrap();
        assert_eq!(outcome, LinkOutcome::Declined);
        assert!(!prefs.has_seen_notice(URL));
    }

    #[test]
    fn test_opener_failure_is_reported_not_raised() {
        let dir = tempdir().unwrap();
        let mut prefs = Prefs::load(dir.path().join("prefs.json")).unwrap();
        let outcome = follow(
            &mut prefs,
            URL,
            |_| Ok(true),
            |_| {
                Err(PlatformError::NoOpener {
                    tried: "xdg-open".into(),
                })
            },
        )
        .unwrap();
        assert_eq!(outcome, LinkOutcome::Unopened);
    }
}
