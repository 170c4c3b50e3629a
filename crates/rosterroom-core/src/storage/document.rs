//! The single persisted application document.

use serde::{Deserialize, Serialize};

use crate::courses::Course;
use crate::roster::Admin;
use crate::schedule::ScheduleEntry;

/// Everything the application knows, as one JSON-serializable value.
///
/// The document must round-trip through JSON encode/decode without loss,
/// nested arrays and optional fields included. Field names follow the
/// legacy export format (`sedulous` is the historical name of the schedule
/// list), so old backups restore without a migration step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub admins: Vec<Admin>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default, rename = "sedulous")]
    pub schedules: Vec<ScheduleEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::courses::{BatchDraft, BatchStatus};
    use crate::roster::AdminDraft;
    use crate::schedule::{ClassTime, Meridiem, ScheduleDraft, Weekday};
    use chrono::Utc;

    fn sample_document() -> Document {
        let mut admin = AdminDraft {
            name: Some("Rahim Uddin".into()),
            age: Some("24".into()),
            gender: Some("Male".into()),
            address: Some("Mirpur, Dhaka".into()),
            mobile: Some("01700000000".into()),
            whatsapp: Some("01700000000".into()),
            batch: Some("20".into()),
            join_date: Some("2023-01-15".into()),
            ..AdminDraft::default()
        }
        .finalize()
        .unwrap();
        admin.set_rating(5).unwrap();
        admin.documents = vec!["aGVsbG8=".into(), "d29ybGQ=".into()];

        let batch = BatchDraft {
            batch_number: Some("20".into()),
            start_date: "2024-02-01".into(),
            head_teacher: "Ms. Nasrin".into(),
            status: Some(BatchStatus::Ongoing),
            admin_ids: vec![admin.id.clone()],
            ..BatchDraft::default()
        }
        .finalize(Utc::now())
        .unwrap();
        let course = crate::courses::Course::new("Spoken English").with_batch_added(batch);

        let schedule = ScheduleDraft {
            course_name: Some("Spoken English".into()),
            class_type: Some("Live Zoom".into()),
            batch_number: Some("20".into()),
            class_time: Some(ClassTime::new(8, 30, Meridiem::Pm)),
            days: vec![Weekday::Monday, Weekday::Wednesday],
        }
        .finalize()
        .unwrap();

        Document {
            admins: vec![admin],
            courses: vec![course],
            schedules: vec![schedule],
        }
    }

    #[test]
    fn document_round_trips_through_json_without_loss() {
        let doc = sample_document();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let decoded: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn document_uses_the_legacy_field_names() {
        let doc = sample_document();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("sedulous").is_some());
        assert!(json.get("schedules").is_none());
        assert_eq!(json["admins"][0]["joinDate"], "2023-01-15");
        assert_eq!(json["courses"][0]["batches"][0]["adminIds"][0], doc.admins[0].id);
        assert_eq!(json["sedulous"][0]["classTime"], "08:30 PM");
    }

    #[test]
    fn empty_and_partial_payloads_deserialize_to_defaults() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());

        let doc: Document = serde_json::from_str(r#"{"admins": []}"#).unwrap();
        assert!(doc.courses.is_empty());
        assert!(doc.schedules.is_empty());
    }
}
