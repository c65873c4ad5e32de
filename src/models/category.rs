use serde::Serialize;

/// Kind of interval an entry records.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Work,
    Break,
    Course,
}

impl EntryCategory {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EntryCategory::Work => "work",
            EntryCategory::Break => "break",
            EntryCategory::Course => "course",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work" => Some(EntryCategory::Work),
            "break" => Some(EntryCategory::Break),
            "course" => Some(EntryCategory::Course),
            _ => None,
        }
    }

    /// Lenient parse for user input (trimmed, case-insensitive).
    pub fn from_input(s: &str) -> Option<Self> {
        Self::from_db_str(&s.trim().to_lowercase())
    }

    /// Breaks never count toward net worked time.
    pub fn is_productive(&self) -> bool {
        !matches!(self, EntryCategory::Break)
    }
}
