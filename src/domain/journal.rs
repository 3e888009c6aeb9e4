use serde::{Deserialize, Serialize};

/// Categorized log an entry is posted through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum JournalKind {
    Purchases,
    Sales,
    Bank,
    Cash,
    Misc,
}

/// An accounting journal (journal comptable).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journal {
    pub code: String,
    pub name: String,
    pub kind: JournalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub active: bool,
}

impl Journal {
    pub fn new(code: impl Into<String>, name: impl Into<String>, kind: JournalKind) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            kind,
            description: None,
            active: true,
        }
    }
}
