//! Staff meeting domain types.

use chrono::{DateTime, Utc};

use fournil_core::{MeetingId, StaffUserId};

/// A scheduled staff meeting.
#[derive(Debug, Clone)]
pub struct Meeting {
    /// Unique meeting ID.
    pub id: MeetingId,
    /// Meeting subject.
    pub title: String,
    /// When the meeting starts.
    pub starts_at: DateTime<Utc>,
    /// Planned duration in minutes.
    pub duration_minutes: i32,
    /// Optional agenda or notes.
    pub notes: Option<String>,
    /// Staff member who scheduled it.
    pub created_by: StaffUserId,
}

/// Data for scheduling a meeting.
#[derive(Debug, Clone)]
pub struct NewMeeting {
    /// Meeting subject.
    pub title: String,
    /// When the meeting starts.
    pub starts_at: DateTime<Utc>,
    /// Planned duration in minutes.
    pub duration_minutes: i32,
    /// Optional agenda or notes.
    pub notes: Option<String>,
    /// Staff member scheduling it.
    pub created_by: StaffUserId,
}
