use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// 学期信息
/// 只需要学期开始日期，第N周的日期都从它推算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub start_date: NaiveDate,
}

impl Semester {
    pub const fn new(start_date: NaiveDate) -> Self {
        Self { start_date }
    }

    /// 解析 `YYYY-MM-DD` 格式的学期开始日期，不做星期对齐
    pub fn from_date_str(date_str: &str) -> Result<Self> {
        let start_date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")?;
        Ok(Self { start_date })
    }

    /// 第 `week` 周的起始日期：开始日期 + (week-1) 周
    ///
    /// 第0周及负数周落在开始日期之前。
    pub fn week_start(&self, week: i64) -> Result<NaiveDate> {
        let out_of_range =
            || Error::Config(format!("week {} is out of the supported date range", week));

        let offset = week
            .checked_sub(1)
            .and_then(|w| w.checked_mul(7))
            .ok_or_else(out_of_range)?;
        let days = Days::new(offset.unsigned_abs());
        let date = if offset >= 0 {
            self.start_date.checked_add_days(days)
        } else {
            self.start_date.checked_sub_days(days)
        };
        date.ok_or_else(out_of_range)
    }

    /// 第 `week` 周、星期 `weekday` 的上课日期
    ///
    /// 偏移为 `weekday % 7` 天，即 1 对应开始日期后一天，7 对应开始日期当天。
    pub fn event_date(&self, week: i64, weekday: u32) -> Result<NaiveDate> {
        self.week_start(week)?
            .checked_add_days(Days::new(u64::from(weekday % 7)))
            .ok_or_else(|| {
                Error::Config(format!(
                    "week {} weekday {} is out of the supported date range",
                    week, weekday
                ))
            })
    }

    /// 获取学期开始的年份
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }

    /// 推算学期类型（春季/秋季）
    pub fn term_type(&self) -> &'static str {
        let month = self.start_date.month();
        if (2..=7).contains(&month) {
            "春季"
        } else {
            "秋季"
        }
    }
}
