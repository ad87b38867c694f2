//! Complaint domain types.

use chrono::{DateTime, Utc};

use shakwa_core::{ComplaintId, ComplaintStatus, Email, Phone, TrackingToken};

/// A citizen-submitted complaint (domain type).
#[derive(Debug, Clone)]
pub struct Complaint {
    /// Unique complaint ID.
    pub id: ComplaintId,
    /// Opaque tracking token, unique and immutable once assigned.
    pub token: TrackingToken,
    /// Submitter's full name.
    pub name: String,
    /// Submitter's mobile phone number.
    pub phone: Phone,
    /// Submitter's email address, if provided.
    pub email: Option<Email>,
    /// Complaint title.
    pub title: String,
    /// Free-text complaint body.
    pub content: String,
    /// Current lifecycle status.
    pub status: ComplaintStatus,
    /// When the complaint was submitted.
    pub created_at: DateTime<Utc>,
}

/// A validated complaint ready for insertion.
///
/// New complaints always start with status [`ComplaintStatus::Waiting`].
#[derive(Debug, Clone)]
pub struct NewComplaint {
    /// Freshly generated tracking token.
    pub token: TrackingToken,
    /// Submitter's full name.
    pub name: String,
    /// Submitter's mobile phone number.
    pub phone: Phone,
    /// Submitter's email address, if provided.
    pub email: Option<Email>,
    /// Complaint title.
    pub title: String,
    /// Free-text complaint body.
    pub content: String,
}

/// Aggregate complaint counts per status, shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Total number of complaints.
    pub total: i64,
    /// Complaints still waiting.
    pub waiting: i64,
    /// Complaints being worked on.
    pub in_process: i64,
    /// Resolved complaints.
    pub complete: i64,
}

impl StatusCounts {
    /// Add a `(status, count)` aggregation row to the tally.
    pub fn record(&mut self, status: ComplaintStatus, count: i64) {
        self.total += count;
        match status {
            ComplaintStatus::Waiting => self.waiting += count,
            ComplaintStatus::InProcess => self.in_process += count,
            ComplaintStatus::Complete => self.complete += count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_counts_record() {
        let mut counts = StatusCounts::default();
        counts.record(ComplaintStatus::Waiting, 3);
        counts.record(ComplaintStatus::InProcess, 2);
        counts.record(ComplaintStatus::Complete, 1);
        counts.record(ComplaintStatus::Waiting, 1);

        assert_eq!(counts.total, 7);
        assert_eq!(counts.waiting, 4);
        assert_eq!(counts.in_process, 2);
        assert_eq!(counts.complete, 1);
    }
}
