use crate::catalog::CatalogSource;
use crate::config::AppConfig;
use crate::error::{RenderError, Result};
use crate::fileio;
use crate::prompt::PromptDocument;
use crate::schema::{SchemaRenderer, error_text};
use std::path::PathBuf;
use tracing::{info, warn};

/// 拼接后的表结构脚本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub script: String,
    pub rendered: usize,
    pub failures: Vec<(String, RenderError)>,
}

/// 一次完整运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub bytes_written: usize,
    pub rendered: usize,
    pub failures: Vec<(String, RenderError)>,
}

/// 按列表顺序逐表渲染并拼接
///
/// 失败的表以 `Error: <message>` 文本占据自己的位置，不影响其他表。
pub fn build_schema_script<S: AsRef<str>>(renderer: &SchemaRenderer<'_>, tables: &[S]) -> ScriptReport {
    let mut script = String::from("\n");
    let mut rendered = 0;
    let mut failures = Vec::new();

    for table in tables {
        let table = table.as_ref();
        match renderer.render(table) {
            Ok(fragment) => {
                info!(
                    "✅ {}: {} 列, {} 个索引",
                    table, fragment.column_count, fragment.index_count
                );
                script.push_str(fragment.text());
                rendered += 1;
            }
            Err(e) => {
                warn!("❌ {}: {}", table, e);
                script.push_str(&error_text(&e));
                failures.push((table.to_string(), e));
            }
        }
    }

    ScriptReport {
        script,
        rendered,
        failures,
    }
}

/// 读取需求和模板，渲染所有表，写出组装好的提示词
///
/// 输入文件读取失败时直接返回错误，不会写出任何内容。
pub fn run(config: &AppConfig, source: &dyn CatalogSource) -> Result<RunSummary> {
    info!("📋 元数据来源: {}", source.describe());

    let requirement = fileio::read_text(&config.files.requirement)?;
    let template = PromptDocument::new(fileio::read_text(&config.files.template)?);

    let renderer = SchemaRenderer::new(source);
    let report = build_schema_script(&renderer, &config.tables);

    let prompt = template.assemble(&requirement, &report.script);
    fileio::write_text(&config.files.output, &prompt)?;
    info!(
        "📝 已写出 {} ({} 字节, {}/{} 张表成功)",
        config.files.output.display(),
        prompt.len(),
        report.rendered,
        config.tables.len()
    );

    Ok(RunSummary {
        output: config.files.output.clone(),
        bytes_written: prompt.len(),
        rendered: report.rendered,
        failures: report.failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::config::FilesConfig;
    use crate::error::{RenderErrorKind, SchemaError};
    use crate::schema::{ColumnDefinition, TableIdentifier};
    use tempfile::tempdir;

    fn column(name: &str) -> ColumnDefinition {
        ColumnDefinition {
            name: name.to_string(),
            data_type: "int".to_string(),
            char_max_length: None,
            nullable: false,
            default_value: None,
        }
    }

    fn catalog() -> StaticCatalog {
        ["s.A", "s.B", "s.C"]
            .iter()
            .fold(StaticCatalog::new(), |catalog, name| {
                let table = TableIdentifier::parse(name).unwrap();
                let id = format!("{}_id", table.table);
                catalog.with_table(table, vec![column(&id)], Vec::new())
            })
    }

    #[test]
    fn test_script_keeps_list_order() {
        let catalog = catalog();
        let renderer = SchemaRenderer::new(&catalog);

        let report = build_schema_script(&renderer, &["s.C", "s.A", "s.B", "s.A"]);
        assert!(report.script.starts_with('\n'));
        assert_eq!(report.rendered, 4);
        assert!(report.failures.is_empty());

        let c = report.script.find("CREATE TABLE s.C").unwrap();
        let a = report.script.find("CREATE TABLE s.A").unwrap();
        let b = report.script.find("CREATE TABLE s.B").unwrap();
        assert!(c < a && a < b);
        // 不去重
        assert_eq!(report.script.matches("CREATE TABLE s.A").count(), 2);
    }

    #[test]
    fn test_script_embeds_error_text_in_place() {
        let catalog = catalog();
        let renderer = SchemaRenderer::new(&catalog);

        let report = build_schema_script(&renderer, &["s.A", "nodot", "s.missing", "s.B"]);
        assert_eq!(report.rendered, 2);
        let kinds: Vec<_> = report.failures.iter().map(|(_, e)| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![RenderErrorKind::MalformedIdentifier, RenderErrorKind::TableNotFound]
        );

        let error = report.script.find("Error: ").unwrap();
        assert!(report.script.find("CREATE TABLE s.A").unwrap() < error);
        assert!(error < report.script.find("CREATE TABLE s.B").unwrap());
    }

    #[test]
    fn test_one_connection_per_table() {
        let catalog = catalog();
        let renderer = SchemaRenderer::new(&catalog);

        build_schema_script(&renderer, &["s.A", "s.B", "s.C"]);
        assert_eq!(catalog.opened(), 3);
        assert_eq!(catalog.closed(), 3);
    }

    #[test]
    fn test_run_writes_assembled_prompt() {
        let temp_dir = tempdir().unwrap();
        let files = FilesConfig {
            requirement: temp_dir.path().join("BusinessRequirement.txt"),
            template: temp_dir.path().join("Prompt template.txt"),
            output: temp_dir.path().join("out").join("op.txt"),
        };
        std::fs::write(&files.requirement, "统计每个客户的订单数").unwrap();
        std::fs::write(
            &files.template,
            "REQ=[BUSINESS REQUIREMENT]\nTABLES=[TABLE STRUCTURE]END",
        )
        .unwrap();

        let config = AppConfig {
            tables: vec!["s.A".to_string(), "s.B".to_string()],
            files: files.clone(),
            ..AppConfig::default()
        };

        let summary = run(&config, &catalog()).unwrap();
        assert_eq!(summary.rendered, 2);
        assert!(summary.failures.is_empty());

        let output = std::fs::read_to_string(&files.output).unwrap();
        assert_eq!(summary.bytes_written, output.len());
        assert!(output.starts_with("REQ=统计每个客户的订单数\nTABLES=\nCREATE TABLE s.A (\n"));
        assert!(output.ends_with(");\nEND"));
        assert!(!output.contains("[TABLE STRUCTURE]"));
    }

    #[test]
    fn test_run_missing_input_writes_nothing() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig {
            files: FilesConfig {
                requirement: temp_dir.path().join("missing.txt"),
                template: temp_dir.path().join("template.txt"),
                output: temp_dir.path().join("op.txt"),
            },
            ..AppConfig::default()
        };

        let err = run(&config, &catalog()).unwrap_err();
        assert!(matches!(err, SchemaError::ReadFile { .. }));
        assert!(!config.files.output.exists());
    }
}
