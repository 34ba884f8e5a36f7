use chrono::{DateTime, FixedOffset, Utc};
use uuid::Uuid;

use crate::{
    EventInstance, IcsOptions, Result,
    expand::{TIMEZONE_ID, timezone},
};


const LOCAL_FORMAT: &str = "%Y%m%dT%H%M%S";

/// ICS日历生成器
pub struct IcsGenerator {
    options: IcsOptions,
}

impl IcsGenerator {
    pub const fn new(options: IcsOptions) -> Self {
        Self { options }
    }

    /// 生成ICS日历内容
    pub fn generate(&self, events: &[EventInstance]) -> Result<String> {
        let mut ics_content = String::new();

        // ICS文件头部
        ics_content.push_str("BEGIN:VCALENDAR\r\n");
        ics_content.push_str("VERSION:2.0\r\n");
        ics_content.push_str("PRODID:-//Course ICS//Course Schedule Calendar//CN\r\n");
        ics_content.push_str("CALSCALE:GREGORIAN\r\n");
        ics_content.push_str("METHOD:PUBLISH\r\n");

        if let Some(ref name) = self.options.calendar_name {
            ics_content.push_str(&format!("X-WR-CALNAME:{}\r\n", escape_text(name)));
        }
        ics_content.push_str(&format!("X-WR-TIMEZONE:{}\r\n", TIMEZONE_ID));

        if self.options.include_timezone {
            add_timezone(&mut ics_content);
        }

        let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        for event in events {
            self.add_event(&mut ics_content, event, &dtstamp);
        }

        // ICS文件尾部
        ics_content.push_str("END:VCALENDAR\r\n");

        tracing::debug!("Generated ICS with {} events", events.len());
        Ok(ics_content)
    }

    /// 添加单个课程事件
    fn add_event(&self, ics_content: &mut String, event: &EventInstance, dtstamp: &str) {
        ics_content.push_str("BEGIN:VEVENT\r\n");
        ics_content.push_str(&format!("UID:{}\r\n", Uuid::new_v4()));
        ics_content.push_str(&format!("DTSTAMP:{}\r\n", dtstamp));
        ics_content.push_str(&format!("SUMMARY:{}\r\n", escape_text(&event.title)));
        ics_content.push_str(&format!("LOCATION:{}\r\n", escape_text(&event.location)));
        ics_content.push_str(&format!(
            "DTSTART;TZID={}:{}\r\n",
            TIMEZONE_ID,
            local_timestamp(&event.start)
        ));
        ics_content.push_str(&format!(
            "DTEND;TZID={}:{}\r\n",
            TIMEZONE_ID,
            local_timestamp(&event.end)
        ));
        ics_content.push_str(&format!(
            "DESCRIPTION:{}\r\n",
            escape_text(&event.description)
        ));

        // 添加提醒
        if let Some(reminder_minutes) = self.options.reminder_minutes {
            ics_content.push_str("BEGIN:VALARM\r\n");
            ics_content.push_str("ACTION:DISPLAY\r\n");
            ics_content.push_str("DESCRIPTION:课程提醒\r\n");
            ics_content.push_str(&format!("TRIGGER:-PT{}M\r\n", reminder_minutes));
            ics_content.push_str("END:VALARM\r\n");
        }

        ics_content.push_str("END:VEVENT\r\n");
    }
}

impl Default for IcsGenerator {
    fn default() -> Self {
        Self::new(IcsOptions::default())
    }
}

/// 固定 +0800 的时区定义
fn add_timezone(ics_content: &mut String) {
    ics_content.push_str("BEGIN:VTIMEZONE\r\n");
    ics_content.push_str(&format!("TZID:{}\r\n", TIMEZONE_ID));
    ics_content.push_str(&format!("X-LIC-LOCATION:{}\r\n", TIMEZONE_ID));
    ics_content.push_str("BEGIN:STANDARD\r\n");
    ics_content.push_str("TZOFFSETFROM:+0800\r\n");
    ics_content.push_str("TZOFFSETTO:+0800\r\n");
    ics_content.push_str("TZNAME:CST\r\n");
    ics_content.push_str("DTSTART:19700101T000000\r\n");
    ics_content.push_str("END:STANDARD\r\n");
    ics_content.push_str("END:VTIMEZONE\r\n");
}

/// 以 Asia/Shanghai 本地时间输出
fn local_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.with_timezone(&timezone()).format(LOCAL_FORMAT).to_string()
}

/// 转义ICS文本内容
fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace(',', "\\,")
        .replace(';', "\\;")
}
