//! 将课程记录按周次展开为具体的课程事件

use std::ops::RangeInclusive;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::{
    CourseRecord, Error, EventInstance, ParsedOccurrence, Result, semester::Semester,
    slot::parse_schedule_notation,
};

/// 事件使用的时区标识
pub const TIMEZONE_ID: &str = "Asia/Shanghai";

/// Asia/Shanghai，固定 UTC+8，无夏令时
pub fn timezone() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

/// 解析周数范围（如 "1~10" -> 1..=10）
///
/// 周数可以为0或负数，对应学期开始日期之前的周。
pub fn parse_week_range(week_text: &str) -> Result<RangeInclusive<i64>> {
    let parts: Vec<&str> = week_text.split('~').map(str::trim).collect();
    let [start, end] = parts.as_slice() else {
        return Err(Error::format(week_text, "expected '<start>~<end>'"));
    };

    let parse = |s: &str| {
        s.parse::<i64>()
            .map_err(|_| Error::format(week_text, format!("invalid week number '{}'", s)))
    };
    let (start, end) = (parse(*start)?, parse(*end)?);

    if start > end {
        return Err(Error::format(
            week_text,
            format!("week range is inverted ({} > {})", start, end),
        ));
    }

    Ok(start..=end)
}

/// 展开单门课程
///
/// 外层按周次升序，内层按上课时段的解析顺序。
pub fn expand(course: &CourseRecord, semester: &Semester) -> Result<Vec<EventInstance>> {
    let weeks = parse_week_range(&course.week_text.text)?;
    let occurrences = parse_schedule_notation(&course.date_time_place.text)?;

    // 首尾两周都要落在可表示的日期范围内
    semester.week_start(*weeks.start())?;
    semester.week_start(*weeks.end())?;

    let teacher = course.teacher_name();
    let title = format!("{} ({})", course.name(), teacher);
    let description = format!("Teacher: {}", teacher);

    let mut events = Vec::new();
    for week in weeks.clone() {
        for occurrence in &occurrences {
            let date = semester.event_date(week, occurrence.weekday)?;
            let (start, end) = localize(date, occurrence)?;

            events.push(EventInstance {
                title: title.clone(),
                location: occurrence.location.clone(),
                start,
                end,
                description: description.clone(),
            });
        }
    }

    tracing::debug!(
        "Expanded '{}' into {} events (weeks {}~{} x {} occurrences)",
        course.name(),
        events.len(),
        weeks.start(),
        weeks.end(),
        occurrences.len()
    );

    Ok(events)
}

/// 按输入顺序展开所有课程，任意一门失败则整体失败
pub fn expand_all(courses: &[CourseRecord], semester: &Semester) -> Result<Vec<EventInstance>> {
    let mut events = Vec::new();
    for course in courses {
        events.extend(expand(course, semester)?);
    }

    tracing::info!(
        "Expanded {} courses into {} events",
        courses.len(),
        events.len()
    );

    Ok(events)
}

fn localize(
    date: NaiveDate,
    occurrence: &ParsedOccurrence,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let to_local = |time: NaiveTime| {
        timezone()
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| Error::Config(format!("ambiguous local time {} {}", date, time)))
    };

    Ok((to_local(occurrence.start_time)?, to_local(occurrence.end_time)?))
}
