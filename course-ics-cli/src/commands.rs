use std::path::PathBuf;

use anyhow::{Context, Result};
use course_ics_core::prelude::*;

/// 默认输出文件名
pub const DEFAULT_OUTPUT: &str = "schedule.ics";

/// 生成日历命令参数
pub struct GenerateParams {
    pub json_file: PathBuf,
    pub start_date: String,
    pub output: PathBuf,
    pub calendar_name: Option<String>,
    pub reminder_minutes: Option<u32>,
    pub include_timezone: bool,
    pub dry_run: bool,
}

/// 读取课程JSON，展开为课程事件并写入ICS文件
///
/// 任意一门课程解析失败都会直接返回错误，不写入任何内容。
pub async fn generate_command(params: GenerateParams) -> Result<()> {
    let semester = Semester::from_date_str(&params.start_date).with_context(|| {
        format!(
            "无效的学期开始日期 '{}'，格式应为 YYYY-MM-DD",
            params.start_date
        )
    })?;

    tracing::info!(
        "开始生成课程表: 输入={}, 学期开始={}",
        params.json_file.display(),
        semester.start_date
    );

    let content = tokio::fs::read_to_string(&params.json_file)
        .await
        .with_context(|| format!("无法读取课程文件: {}", params.json_file.display()))?;
    let records = parse_records(&content)
        .with_context(|| format!("课程文件格式错误: {}", params.json_file.display()))?;
    println!("✓ 成功读取 {} 门课程", records.len());

    let events = expand_all(&records, &semester).context("课程展开失败")?;
    println!("✓ 共展开 {} 个课程事件", events.len());

    if params.dry_run {
        tracing::info!("dry run, 跳过写入");
        return Ok(());
    }

    let options = IcsOptions {
        calendar_name: params
            .calendar_name
            .or_else(|| Some(format!("{}{}课程表", semester.year(), semester.term_type()))),
        reminder_minutes: params.reminder_minutes,
        include_timezone: params.include_timezone,
    };

    let generator = IcsGenerator::new(options);
    let ics_content = generator.generate(&events)?;

    tokio::fs::write(&params.output, ics_content)
        .await
        .with_context(|| format!("无法写入ICS文件: {}", params.output.display()))?;
    println!("✓ ICS文件已保存到: {}", params.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSES: &str = r#"[
        {
            "course": {"nameZh": "操作系统"},
            "teachers": [{"nameZh": "刘老师"}],
            "weekText": {"text": "1~3"},
            "dateTimePlace": {"text": "GT-A403: 1(11,12,13);GT-B112: 3(08:30~12:30)"}
        },
        {
            "course": {"nameZh": "体育"},
            "teachers": [],
            "weekText": {"text": "2~2"},
            "dateTimePlace": {"text": "风华运动场: 7(14:00~15:35)"}
        }
    ]"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("course-ics-{}-{}", std::process::id(), name))
    }

    fn params(json_file: PathBuf, output: PathBuf) -> GenerateParams {
        GenerateParams {
            json_file,
            start_date: "2025-02-23".to_string(),
            output,
            calendar_name: None,
            reminder_minutes: None,
            include_timezone: true,
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn test_generate_writes_calendar() {
        let input = temp_path("generate.json");
        let output = temp_path("generate.ics");
        tokio::fs::write(&input, COURSES).await.unwrap();

        generate_command(params(input.clone(), output.clone()))
            .await
            .unwrap();

        let content = tokio::fs::read_to_string(&output).await.unwrap();
        assert_eq!(content.matches("BEGIN:VEVENT").count(), 7);
        assert!(content.contains("X-WR-CALNAME:2025春季课程表\r\n"));
        assert!(content.contains("SUMMARY:操作系统 (刘老师)\r\n"));
        assert!(content.contains("SUMMARY:体育 (Unknown Teacher)\r\n"));
        assert!(content.contains("DTSTART;TZID=Asia/Shanghai:20250302T140000\r\n"));

        let _ = tokio::fs::remove_file(&input).await;
        let _ = tokio::fs::remove_file(&output).await;
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let input = temp_path("dry-run.json");
        let output = temp_path("dry-run.ics");
        tokio::fs::write(&input, COURSES).await.unwrap();

        let mut p = params(input.clone(), output.clone());
        p.dry_run = true;
        generate_command(p).await.unwrap();
        assert!(!output.exists());

        let _ = tokio::fs::remove_file(&input).await;
    }

    #[tokio::test]
    async fn test_malformed_course_aborts_without_output() {
        let input = temp_path("malformed.json");
        let output = temp_path("malformed.ics");
        let courses = r#"[
            {
                "course": {"nameZh": "正常课程"},
                "teachers": [],
                "weekText": {"text": "1~2"},
                "dateTimePlace": {"text": "A101: 1(1,2)"}
            },
            {
                "course": {"nameZh": "错误课程"},
                "teachers": [],
                "weekText": {"text": "1~2"},
                "dateTimePlace": {"text": "garbage"}
            }
        ]"#;
        tokio::fs::write(&input, courses).await.unwrap();

        let err = generate_command(params(input.clone(), output.clone()))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("garbage"));
        assert!(!output.exists());

        let _ = tokio::fs::remove_file(&input).await;
    }

    #[tokio::test]
    async fn test_invalid_start_date() {
        let mut p = params(temp_path("unused.json"), temp_path("unused.ics"));
        p.start_date = "2025/02/23".to_string();

        let err = generate_command(p).await.unwrap_err();
        assert!(err.to_string().contains("2025/02/23"));
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let err = generate_command(params(temp_path("missing.json"), temp_path("missing.ics")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("无法读取课程文件"));
    }
}
