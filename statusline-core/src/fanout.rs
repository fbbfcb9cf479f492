//! Fan-out of a new status into its index rows.
//!
//! ```text
//!                  ┌──────────► userline[author]
//!                  ├──────────► timeline[recipient]   (one per recipient)
//!   Status ───────►├──────────► tagline[tag]          (one per distinct tag)
//!                  └──────────► dayline[day]
//! ```
//!
//! Each arrow is one independent single-column insert. There is no
//! atomicity across them; a failed insert leaves the others in place and the
//! caller decides whether to retry.

use regex::Regex;
use statusline_store::{StoreError, WideRowStore};
use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use crate::error::StatusError;
use crate::line::Line;
use crate::status::Status;

// ASCII word characters only: `#Café` tags `caf`
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#((?-u:\w)+)").expect("hashtag pattern compiles"));

/// Distinct lowercase hashtags of `content`, without the leading `#`.
pub fn extract_hashtags(content: &str) -> BTreeSet<String> {
    HASHTAG
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|tag| tag.as_str().to_lowercase())
        .collect()
}

/// Outcome of [`FanoutWriter::fan_out`].
#[derive(Debug, Default)]
pub struct FanoutReport {
    /// Index entries written
    pub written: usize,
    /// Inserts that failed, with the row they targeted
    pub failed: Vec<(Line, String, StoreError)>,
}

impl FanoutReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, line: Line, row: &str, result: Result<(), StoreError>) {
        match result {
            Ok(()) => self.written += 1,
            Err(e) => {
                log::warn!("Fan-out to {line}[{row}] failed: {e}");
                self.failed.push((line, row.to_owned(), e));
            }
        }
    }
}

/// Appends status ids to index rows.
#[derive(Clone)]
pub struct FanoutWriter {
    store: Arc<dyn WideRowStore>,
}

impl FanoutWriter {
    pub fn new(store: Arc<dyn WideRowStore>) -> Self {
        Self { store }
    }

    /// Append to the author's own line.
    pub fn add_to_userline(&self, status: &Status) -> Result<(), StatusError> {
        Ok(self.append(Line::Userline, &status.author_login, status)?)
    }

    /// Append to one recipient's timeline.
    pub fn add_to_timeline(&self, login: &str, status: &Status) -> Result<(), StatusError> {
        Ok(self.append(Line::Timeline, login, status)?)
    }

    /// Append to the line of every distinct hashtag in the content.
    ///
    /// Stops at the first failed insert; tags already written stay written.
    pub fn add_to_taglines(&self, status: &Status) -> Result<(), StatusError> {
        for tag in extract_hashtags(&status.content) {
            log::debug!("Tag line augmented: {tag}");
            self.append(Line::Tagline, &tag, status)?;
        }
        Ok(())
    }

    /// Append to the global line of a day bucket.
    pub fn add_to_dayline(&self, status: &Status, day_key: &str) -> Result<(), StatusError> {
        Ok(self.append(Line::Dayline, day_key, status)?)
    }

    /// Run every fan-out kind for a new status, carrying on past failures.
    ///
    /// Writes the author line, one timeline per recipient, each tag line and
    /// the day line of `status.day_key()`.
    pub fn fan_out<'a, I>(&self, status: &Status, recipients: I) -> FanoutReport
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = FanoutReport::default();

        let author = status.author_login.as_str();
        report.record(Line::Userline, author, self.append(Line::Userline, author, status));

        for login in recipients {
            report.record(Line::Timeline, login, self.append(Line::Timeline, login, status));
        }

        for tag in extract_hashtags(&status.content) {
            let result = self.append(Line::Tagline, &tag, status);
            report.record(Line::Tagline, &tag, result);
        }

        let day = status.day_key();
        report.record(Line::Dayline, &day, self.append(Line::Dayline, &day, status));

        log::debug!(
            "Fanned out status {}: {} written, {} failed",
            status.id,
            report.written,
            report.failed.len()
        );
        report
    }

    fn append(&self, line: Line, key: &str, status: &Status) -> Result<(), StoreError> {
        self.store
            .insert(line.family(), &line.row_key(key), status.id.as_bytes())
    }
}
