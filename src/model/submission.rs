use bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grading status of a submission.
///
/// Stored as the plain strings `"pending"` and `"Complete"`. Any other stored
/// value is kept verbatim in `Other` so that reads never fail on legacy data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubmissionStatus {
    Pending,
    Complete,
    Other(String),
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Complete => "Complete",
            SubmissionStatus::Other(raw) => raw,
        }
    }

    /// The status after one toggle. Only `pending` moves to `Complete`;
    /// everything else, unknown values included, goes back to `pending`.
    pub fn toggled(current: Option<&SubmissionStatus>) -> SubmissionStatus {
        match current {
            Some(SubmissionStatus::Pending) => SubmissionStatus::Complete,
            _ => SubmissionStatus::Pending,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SubmissionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => SubmissionStatus::Pending,
            "Complete" => SubmissionStatus::Complete,
            _ => SubmissionStatus::Other(raw),
        }
    }
}

impl From<SubmissionStatus> for String {
    fn from(status: SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl From<&SubmissionStatus> for bson::Bson {
    fn from(status: &SubmissionStatus) -> Self {
        bson::Bson::String(status.as_str().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub assignment_id: Option<String>,
    pub title: Option<String>,
    pub pdf_link: Option<String>,
    pub note: Option<String>,
    /// Student who submitted.
    pub user_email: Option<String>,
    /// Instructor who grades.
    pub owner_email: Option<String>,
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
    pub feedback: Option<String>,
    /// Number or numeric string, stored as sent.
    pub obtain_marks: Option<Bson>,
    pub submitted_at: Option<Bson>,
    #[serde(flatten)]
    pub extra: Document,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle_pending_to_complete_and_back() {
        let once = SubmissionStatus::toggled(Some(&SubmissionStatus::Pending));
        assert_eq!(once, SubmissionStatus::Complete);
        let twice = SubmissionStatus::toggled(Some(&once));
        assert_eq!(twice, SubmissionStatus::Pending);
    }

    #[test]
    fn test_toggle_normalizes_unknown_and_missing() {
        let legacy = SubmissionStatus::Other("graded".to_string());
        assert_eq!(SubmissionStatus::toggled(Some(&legacy)), SubmissionStatus::Pending);
        assert_eq!(SubmissionStatus::toggled(None), SubmissionStatus::Pending);
    }

    #[test]
    fn test_status_wire_format() {
        let submission: Submission = serde_json::from_value(json!({
            "userEmail": "student@x.com",
            "status": "Complete"
        }))
        .unwrap();
        assert_eq!(submission.status, Some(SubmissionStatus::Complete));

        let legacy: Submission = serde_json::from_value(json!({ "status": "done" })).unwrap();
        assert_eq!(legacy.status, Some(SubmissionStatus::Other("done".to_string())));
        assert_eq!(serde_json::to_value(&legacy).unwrap()["status"], "done");
    }

    #[test]
    fn test_loose_fields_are_kept() {
        let submission: Submission = serde_json::from_value(json!({
            "obtainMarks": "8",
            "submittedAt": "2024-05-01T10:00:00Z",
            "attempt": 2
        }))
        .unwrap();
        assert_eq!(submission.obtain_marks, Some(Bson::String("8".to_string())));
        assert!(submission.extra.contains_key("attempt"));

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["obtainMarks"], "8");
        assert_eq!(value["attempt"], 2);
    }

    #[test]
    fn test_missing_status_is_none() {
        let submission: Submission = serde_json::from_value(json!({ "feedback": "ok" })).unwrap();
        assert!(submission.status.is_none());
    }
}
