use crate::app::CliApp;
use anyhow::Result;
use schema_core::pipeline::build_schema_script;
use schema_core::schema::SchemaRenderer;
use tracing::info;

/// 渲染表结构脚本并输出到标准输出
pub fn run_render(app: &CliApp, tables: &[String]) -> Result<()> {
    let tables = if tables.is_empty() {
        app.config.tables.as_slice()
    } else {
        tables
    };

    let renderer = SchemaRenderer::new(app.source.as_ref());
    let report = build_schema_script(&renderer, tables);
    println!("{}", report.script);

    info!(
        "📊 渲染完成: {} 成功, {} 失败",
        report.rendered,
        report.failures.len()
    );
    Ok(())
}
