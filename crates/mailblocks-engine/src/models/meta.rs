use serde::{Deserialize, Serialize};

/// Envelope data of an email, edited outside the block tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMeta {
    /// Internal name shown in the dashboard
    pub name: String,
    /// Subject line, also used as the document `<title>`
    pub subject: String,
    /// Preview text shown by inboxes next to the subject
    pub snippet: String,
}

impl EmailMeta {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            snippet: snippet.into(),
        }
    }
}
