use crate::app::CliApp;
use anyhow::{Context, Result};
use schema_core::pipeline;
use std::path::PathBuf;
use tracing::{info, warn};

/// 运行完整流程：渲染表结构、组装提示词、写出文件
///
/// 单表失败只影响该表的片段，不会让命令失败。
pub fn run_pipeline(app: &CliApp, output: Option<PathBuf>) -> Result<()> {
    let mut config = app.config.clone();
    if let Some(output) = output {
        config.files.output = output;
    }

    info!("🚀 开始生成提示词，共 {} 张表", config.tables.len());
    let summary = pipeline::run(&config, app.source.as_ref()).context("生成提示词失败")?;

    if !summary.failures.is_empty() {
        warn!("⚠️  {} 张表渲染失败，错误信息已写入输出:", summary.failures.len());
        for (table, error) in &summary.failures {
            warn!("   - {} [{:?}]: {}", table, error.kind(), error);
        }
    }

    info!(
        "🎉 完成: {} ({} 字节)",
        summary.output.display(),
        summary.bytes_written
    );
    Ok(())
}
