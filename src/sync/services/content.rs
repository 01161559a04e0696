//! Formatting of issue tasks according to the URL option.

use crate::sync::domain::{FormattedContent, SourceIssue, UrlOption};

/// Turns one source issue into the fields of its task.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentFormatter;

impl ContentFormatter {
    /// Formats an issue for the given URL option.
    ///
    /// The plain title and its hyperlinked form are always recorded as known
    /// names so a task created under a different option is still recognised.
    #[must_use]
    pub fn format(issue: &SourceIssue, option: UrlOption) -> FormattedContent {
        let title = issue.title();
        let url = issue.url();
        let linked = Self::hyperlink(title, url);

        let (content, description, comment) = match option {
            UrlOption::DoNotAdd => (title.to_owned(), String::new(), String::new()),
            UrlOption::AddAsDescription => (title.to_owned(), url.to_owned(), String::new()),
            UrlOption::AddAsComment => (title.to_owned(), String::new(), url.to_owned()),
            UrlOption::HyperLinkedTaskName => (linked.clone(), String::new(), String::new()),
        };

        let known_names = [title.to_owned(), linked]
            .into_iter()
            .filter(|name| *name != content)
            .collect();

        FormattedContent {
            content,
            description,
            comment,
            known_names,
        }
    }

    /// Builds a markdown link task name.
    #[must_use]
    pub fn hyperlink(title: &str, url: &str) -> String {
        format!("[{title}]({url})")
    }
}
