mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "course-ics")]
#[command(about = "从课程数据生成ICS日历文件")]
#[command(version)]
struct Cli {
    /// 选定课程的JSON文件路径
    json_file: PathBuf,

    /// 学期开始日期（格式：YYYY-MM-DD，如 2025-02-23）
    start_date: String,

    /// 输出文件路径
    #[arg(short, long, default_value = commands::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// 日历名称，默认按学期推算
    #[arg(long)]
    calendar_name: Option<String>,

    /// 提醒时间（分钟）
    #[arg(long)]
    reminder_minutes: Option<u32>,

    /// 不输出VTIMEZONE时区定义
    #[arg(long)]
    no_timezone: bool,

    /// 只解析并展开课程，不写入文件
    #[arg(long)]
    dry_run: bool,

    /// 启用详细日志
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 设置日志级别
    let log_level = if cli.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("course_ics_cli={0},course_ics_core={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    commands::generate_command(commands::GenerateParams {
        json_file: cli.json_file,
        start_date: cli.start_date,
        output: cli.output,
        calendar_name: cli.calendar_name,
        reminder_minutes: cli.reminder_minutes,
        include_timezone: !cli.no_timezone,
        dry_run: cli.dry_run,
    })
    .await
}
