use anyhow::{Context, Result};
use schema_core::catalog::{self, CatalogSource};
use schema_core::config::AppConfig;
use std::path::Path;

use crate::cli::Commands;
use crate::commands;
use tracing::debug;

pub struct CliApp {
    pub config: AppConfig,
    pub source: Box<dyn CatalogSource>,
}

impl CliApp {
    /// 加载配置并创建元数据来源
    pub fn new(config_path: &Path) -> Result<Self> {
        let config = AppConfig::load_from_file(config_path)
            .with_context(|| format!("加载配置文件 {} 失败", config_path.display()))?;
        let source = catalog::open_source(&config.database)?;
        debug!("使用 {} 后端: {}", config.database.backend, source.describe());

        Ok(Self::with_source(config, source))
    }

    /// 使用指定的元数据来源
    pub fn with_source(config: AppConfig, source: Box<dyn CatalogSource>) -> Self {
        Self { config, source }
    }

    /// 运行应用命令
    pub fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Init { .. } => unreachable!(), // 已经在 main.rs 中处理
            Commands::Run { output } => commands::run_pipeline(self, output),
            Commands::Render { tables } => commands::run_render(self, &tables),
            Commands::Tables => commands::show_tables(self),
            Commands::ConnInfo => commands::show_connection_info(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_core::catalog::StaticCatalog;
    use schema_core::config::FilesConfig;
    use schema_core::schema::{ColumnDefinition, TableIdentifier};
    use tempfile::tempdir;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new().with_table(
            TableIdentifier::parse("Sales.Orders").unwrap(),
            vec![ColumnDefinition {
                name: "OrderID".to_string(),
                data_type: "int".to_string(),
                char_max_length: None,
                nullable: false,
                default_value: None,
            }],
            Vec::new(),
        )
    }

    #[test]
    fn test_run_command_with_output_override() {
        let temp_dir = tempdir().unwrap();
        let files = FilesConfig {
            requirement: temp_dir.path().join("req.txt"),
            template: temp_dir.path().join("template.txt"),
            output: temp_dir.path().join("op.txt"),
        };
        std::fs::write(&files.requirement, "R").unwrap();
        std::fs::write(&files.template, "[BUSINESS REQUIREMENT]|[TABLE STRUCTURE]").unwrap();

        let config = AppConfig {
            tables: vec!["Sales.Orders".to_string(), "Sales".to_string()],
            files,
            ..AppConfig::default()
        };
        let app = CliApp::with_source(config, Box::new(catalog()));

        let override_path = temp_dir.path().join("custom").join("prompt.txt");
        app.run_command(Commands::Run {
            output: Some(override_path.clone()),
        })
        .unwrap();

        let output = std::fs::read_to_string(&override_path).unwrap();
        assert!(output.starts_with("R|\nCREATE TABLE Sales.Orders (\n    OrderID int NOT NULL\n);\n"));
        assert!(output.ends_with("Error: 表标识 'Sales' 格式错误，应为 schema.table"));
        assert!(!temp_dir.path().join("op.txt").exists());
    }

    #[test]
    fn test_render_and_info_commands() {
        let app = CliApp::with_source(AppConfig::default(), Box::new(catalog()));
        app.run_command(Commands::Render {
            tables: vec!["Sales.Orders".to_string()],
        })
        .unwrap();
        app.run_command(Commands::Tables).unwrap();
        app.run_command(Commands::ConnInfo).unwrap();
    }

    #[test]
    fn test_new_without_config_file() {
        let temp_dir = tempdir().unwrap();
        let result = CliApp::new(&temp_dir.path().join("missing.toml"));
        assert!(result.is_err());
    }
}
