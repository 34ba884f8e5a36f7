//! 节次时间表与上课时间地点解析
//!
//! 支持以下格式，多段之间以 `;` 分隔：
//! - `GT-A403: 1(11,12,13)` 节次列表
//! - `GT-B112: 7(08:30~12:30)` 具体时间段

use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::{Error, ParsedOccurrence, Result};

/// 节次数量
pub const PERIOD_COUNT: u32 = 13;

const PERIOD_TIMES: [(u32, u32); PERIOD_COUNT as usize] = [
    (7 * 60 + 50, 8 * 60 + 35),   // 第1节: 07:50-08:35
    (8 * 60 + 40, 9 * 60 + 25),   // 第2节: 08:40-09:25
    (9 * 60 + 45, 10 * 60 + 30),  // 第3节: 09:45-10:30
    (10 * 60 + 35, 11 * 60 + 20), // 第4节: 10:35-11:20
    (11 * 60 + 25, 12 * 60 + 10), // 第5节: 11:25-12:10
    (14 * 60, 14 * 60 + 45),      // 第6节: 14:00-14:45
    (14 * 60 + 50, 15 * 60 + 35), // 第7节: 14:50-15:35
    (15 * 60 + 55, 16 * 60 + 40), // 第8节: 15:55-16:40
    (16 * 60 + 45, 17 * 60 + 30), // 第9节: 16:45-17:30
    (17 * 60 + 35, 18 * 60 + 20), // 第10节: 17:35-18:20
    (19 * 60 + 30, 20 * 60 + 15), // 第11节: 19:30-20:15
    (20 * 60 + 20, 21 * 60 + 5),  // 第12节: 20:20-21:05
    (21 * 60 + 10, 21 * 60 + 55), // 第13节: 21:10-21:55
];

/// 只要求分段以该格式开头，`)` 之后的内容忽略
fn segment_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\S+):\s*(\d)\(([\d,~:]+)\)").unwrap())
}

/// 查询节次的开始和结束时间
pub fn period_slot(period: u32) -> Result<(NaiveTime, NaiveTime)> {
    if period == 0 || period > PERIOD_COUNT {
        return Err(Error::Config(format!(
            "period {} is outside the period table (1-{})",
            period, PERIOD_COUNT
        )));
    }

    let (start, end) = PERIOD_TIMES[(period - 1) as usize];
    Ok((minutes_to_time(start)?, minutes_to_time(end)?))
}

fn minutes_to_time(minutes: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| Error::Config(format!("invalid period time: {} minutes", minutes)))
}

/// 解析 dateTimePlace，按分段顺序返回每周的上课时段
///
/// 任意一段格式错误都会返回 [`Error::Format`]，其中携带该段原文。
pub fn parse_schedule_notation(notation: &str) -> Result<Vec<ParsedOccurrence>> {
    notation
        .split(';')
        .map(|segment| {
            let segment = segment.trim();
            let occurrence =
                parse_segment(segment).map_err(|reason| Error::format(segment, reason))?;
            tracing::debug!(
                "Parsed segment '{}' -> weekday {} {}-{} @ {}",
                segment,
                occurrence.weekday,
                occurrence.start_time.format("%H:%M"),
                occurrence.end_time.format("%H:%M"),
                occurrence.location
            );
            Ok(occurrence)
        })
        .collect()
}

fn parse_segment(segment: &str) -> std::result::Result<ParsedOccurrence, String> {
    let captures = segment_pattern().captures(segment).ok_or_else(|| {
        "expected '<location>: <weekday>(<periods>)' or '<location>: <weekday>(<start>~<end>)'"
            .to_string()
    })?;

    let location = captures[1].to_string();
    let weekday: u32 = captures[2]
        .parse()
        .map_err(|_| format!("invalid weekday: {}", &captures[2]))?;

    let payload = &captures[3];
    let (start_time, end_time) = if payload.contains('~') {
        parse_time_range(payload)?
    } else {
        parse_period_span(payload)?
    };

    Ok(ParsedOccurrence {
        weekday,
        start_time,
        end_time,
        location,
    })
}

fn parse_time_range(payload: &str) -> std::result::Result<(NaiveTime, NaiveTime), String> {
    let parts: Vec<&str> = payload.split('~').map(str::trim).collect();
    let [start, end] = parts.as_slice() else {
        return Err(format!("invalid time range: {}", payload));
    };

    let parse = |time: &str| {
        NaiveTime::parse_from_str(time, "%H:%M")
            .map_err(|e| format!("invalid time '{}': {}", time, e))
    };
    Ok((parse(*start)?, parse(*end)?))
}

/// 节次列表视为连续节次，取最早节次的开始到最晚节次的结束
fn parse_period_span(payload: &str) -> std::result::Result<(NaiveTime, NaiveTime), String> {
    let periods = payload
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid period index: '{}'", p.trim()))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let (Some(&first), Some(&last)) = (periods.iter().min(), periods.iter().max()) else {
        return Err("empty period list".to_string());
    };

    let (start_time, _) = period_slot(first).map_err(|e| e.to_string())?;
    let (_, end_time) = period_slot(last).map_err(|e| e.to_string())?;
    Ok((start_time, end_time))
}
