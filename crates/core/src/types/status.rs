//! Complaint lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a complaint.
///
/// Stored in the database as the strings `"waiting"`, `"in process"` and
/// `"complete"`. New complaints always start as [`ComplaintStatus::Waiting`]
/// and only administrators can move them forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    /// Submitted and not yet picked up by an administrator.
    #[default]
    Waiting,
    /// An administrator is working on the complaint.
    InProcess,
    /// The complaint has been resolved.
    Complete,
}

impl ComplaintStatus {
    /// All statuses, in lifecycle order. Used to build filter dropdowns.
    pub const ALL: [Self; 3] = [Self::Waiting, Self::InProcess, Self::Complete];

    /// The database/form value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::InProcess => "in process",
            Self::Complete => "complete",
        }
    }

    /// Arabic display label for templates and exports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Waiting => "قيد الانتظار",
            Self::InProcess => "قيد المعالجة",
            Self::Complete => "مكتملة",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "in process" => Ok(Self::InProcess),
            "complete" => Ok(Self::Complete),
            _ => Err(format!("invalid complaint status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_statuses() {
        for status in ComplaintStatus::ALL {
            let parsed: ComplaintStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_parse_unknown_status() {
        assert!("resolved".parse::<ComplaintStatus>().is_err());
        assert!("".parse::<ComplaintStatus>().is_err());
        // Case sensitive, matching the stored strings
        assert!("Waiting".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn test_default_is_waiting() {
        assert_eq!(ComplaintStatus::default(), ComplaintStatus::Waiting);
    }

    #[test]
    fn test_display_matches_db_value() {
        assert_eq!(ComplaintStatus::InProcess.to_string(), "in process");
    }

    #[test]
    fn test_labels_are_arabic_display_text() {
        assert_eq!(ComplaintStatus::Waiting.label(), "قيد الانتظار");
        assert_eq!(ComplaintStatus::InProcess.label(), "قيد المعالجة");
        assert_eq!(ComplaintStatus::Complete.label(), "مكتملة");
    }
}
