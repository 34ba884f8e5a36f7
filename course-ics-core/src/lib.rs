//! Course ICS Core Library
//!
//! This library expands course schedule records into individual calendar
//! events and serializes them as ICS.

pub mod error;
pub mod expand;
pub mod ics;
pub mod semester;
pub mod slot;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use semester::Semester;
pub use types::*;

/// 从JSON字符串解析课程记录列表
pub fn parse_records(json_data: &str) -> Result<Vec<CourseRecord>> {
    let records: Vec<CourseRecord> = serde_json::from_str(json_data)?;
    tracing::debug!("Loaded {} course records", records.len());
    Ok(records)
}

/// Commonly used items
pub mod prelude {
    pub use crate::{expand::*, ics::*, parse_records, semester::*, slot::*, types::*};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let json = r#"[
            {
                "course": {"nameZh": "大学英语"},
                "teachers": [{"nameZh": "陈老师"}],
                "weekText": {"text": "1~8"},
                "dateTimePlace": {"text": "GT-A101: 2(3,4)"}
            },
            {
                "course": {"nameZh": "军事理论"},
                "teachers": [],
                "weekText": {"text": "9~9"},
                "dateTimePlace": {"text": "GT-B201: 5(19:00~21:00)"}
            }
        ]"#;

        let records = parse_records(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "大学英语");
        assert_eq!(records[1].teacher_name(), UNKNOWN_TEACHER);
    }

    #[test]
    fn test_parse_records_invalid_json() {
        assert!(matches!(parse_records("{not json"), Err(Error::Json(_))));
        assert!(matches!(parse_records(r#"{"course": 1}"#), Err(Error::Json(_))));
    }
}
