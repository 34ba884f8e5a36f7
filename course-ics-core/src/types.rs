use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

/// 无教师信息时使用的占位名称
pub const UNKNOWN_TEACHER: &str = "Unknown Teacher";

/// 带 `text` 字段的包装对象，如 `weekText`、`dateTimePlace`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextField {
    pub text: String,
}

/// 课程名称
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseName {
    #[serde(rename = "nameZh")]
    pub name_zh: String,
}

/// 教师信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "nameZh")]
    pub name_zh: String,
}

/// 选课导出的单条课程记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course: CourseName,
    /// 可能缺失或为 null，均视为空列表
    #[serde(default, deserialize_with = "null_as_empty")]
    pub teachers: Vec<Teacher>,
    /// 周次范围，如 "1~16"
    pub week_text: TextField,
    /// 上课时间地点，如 "GT-A403: 1(11,12,13)"
    pub date_time_place: TextField,
}

impl CourseRecord {
    pub fn new(
        name: impl Into<String>,
        teachers: &[&str],
        week_text: impl Into<String>,
        date_time_place: impl Into<String>,
    ) -> Self {
        Self {
            course: CourseName {
                name_zh: name.into(),
            },
            teachers: teachers
                .iter()
                .map(|t| Teacher {
                    name_zh: (*t).to_string(),
                })
                .collect(),
            week_text: TextField {
                text: week_text.into(),
            },
            date_time_place: TextField {
                text: date_time_place.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.course.name_zh
    }

    /// 第一位教师的姓名，没有教师时返回 [`UNKNOWN_TEACHER`]
    pub fn teacher_name(&self) -> &str {
        self.teachers
            .first()
            .map_or(UNKNOWN_TEACHER, |t| t.name_zh.as_str())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Teacher>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Teacher>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 每周一次的上课时段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOccurrence {
    /// 单个数字，通常为 1-7；与学期起始日的偏移为 `weekday % 7` 天
    pub weekday: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
}

/// 展开后的单次课程事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInstance {
    pub title: String,
    pub location: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub description: String,
}

/// ICS生成选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcsOptions {
    /// 日历名称
    pub calendar_name: Option<String>,
    /// 提醒时间（分钟）
    pub reminder_minutes: Option<u32>,
    /// 是否输出 VTIMEZONE 定义
    pub include_timezone: bool,
}

impl Default for IcsOptions {
    fn default() -> Self {
        Self {
            calendar_name: Some("课程表".to_string()),
            reminder_minutes: None,
            include_timezone: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "course": {"nameZh": "数据结构", "code": "CS201"},
            "teachers": [{"nameZh": "张老师"}, {"nameZh": "李老师"}],
            "weekText": {"text": "1~16"},
            "dateTimePlace": {"text": "GT-A403: 1(11,12,13)"},
            "credits": 3
        }"#;

        let record: CourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name(), "数据结构");
        assert_eq!(record.teacher_name(), "张老师");
        assert_eq!(record.week_text.text, "1~16");
        assert_eq!(record.date_time_place.text, "GT-A403: 1(11,12,13)");
    }

    #[test]
    fn test_missing_or_null_teachers() {
        let missing = r#"{
            "course": {"nameZh": "体育"},
            "weekText": {"text": "1~2"},
            "dateTimePlace": {"text": "GT-B112: 7(08:30~12:30)"}
        }"#;
        let null = r#"{
            "course": {"nameZh": "体育"},
            "teachers": null,
            "weekText": {"text": "1~2"},
            "dateTimePlace": {"text": "GT-B112: 7(08:30~12:30)"}
        }"#;

        for json in [missing, null] {
            let record: CourseRecord = serde_json::from_str(json).unwrap();
            assert!(record.teachers.is_empty());
            assert_eq!(record.teacher_name(), UNKNOWN_TEACHER);
        }
    }

    #[test]
    fn test_missing_required_field() {
        let json = r#"{"course": {"nameZh": "体育"}, "teachers": []}"#;
        assert!(serde_json::from_str::<CourseRecord>(json).is_err());
    }
}
