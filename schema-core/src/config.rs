use crate::constants::{database, files};
use crate::error::{Result, SchemaError};
use crate::fileio;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// 应用配置结构
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// 按输出顺序排列的 `schema.table` 列表
    pub tables: Vec<String>,
    pub database: DatabaseConfig,
    pub files: FilesConfig,
}

/// 数据库后端
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// 本地 DuckDB 数据库文件，`database` 为文件路径
    #[default]
    DuckDb,
    /// SQL Server，需要启用 `mssql` 特性
    SqlServer,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::DuckDb => write!(f, "duckdb"),
            Backend::SqlServer => write!(f, "sqlserver"),
        }
    }
}

/// 数据库连接配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: Backend,
    pub server: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// ODBC 驱动名，仅用于生成连接串
    pub driver: String,
    /// 跳过服务端证书校验
    pub trust_cert: bool,
}

/// 输入输出文件配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FilesConfig {
    pub requirement: PathBuf,
    pub template: PathBuf,
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tables: database::DEFAULT_TABLES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            database: DatabaseConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            server: database::DEFAULT_SERVER.to_string(),
            database: database::DEFAULT_DATABASE.to_string(),
            username: None,
            password: None,
            driver: database::DEFAULT_DRIVER.to_string(),
            trust_cert: true,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            requirement: PathBuf::from(files::DEFAULT_REQUIREMENT_FILE),
            template: PathBuf::from(files::DEFAULT_TEMPLATE_FILE),
            output: PathBuf::from(files::DEFAULT_OUTPUT_FILE),
        }
    }
}

impl AppConfig {
    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SchemaError::ConfigNotFound(path.to_path_buf()));
        }
        let content = fileio::read_text(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("已加载配置文件: {}", path.display());
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_with_comments()?;
        fileio::write_text(path, &content)
    }

    /// 生成带注释的TOML配置
    fn to_toml_with_comments(&self) -> Result<String> {
        const HEADER: &str = "# schema-prompt 配置文件\n\
# database.backend: \"duckdb\" (database 为文件路径) 或 \"sqlserver\" (需要 mssql 特性)\n\
# 未设置 username/password 时使用集成身份验证\n\
# tables 的顺序即输出顺序\n\n";

        Ok(format!("{HEADER}{}", toml::to_string_pretty(self)?))
    }
}

impl DatabaseConfig {
    /// 用户名和密码都非空时才使用 SQL 身份验证
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some((user, password))
            }
            _ => None,
        }
    }

    /// 驱动级连接串
    pub fn connection_string(&self) -> String {
        self.build_connection_string(false)
    }

    /// 密码打码后的连接串，用于日志和展示
    pub fn redacted_connection_string(&self) -> String {
        self.build_connection_string(true)
    }

    fn build_connection_string(&self, redact: bool) -> String {
        match self.backend {
            Backend::DuckDb => format!("DATABASE={}", self.database),
            Backend::SqlServer => {
                let base = format!(
                    "DRIVER={};SERVER={};DATABASE={}",
                    self.driver, self.server, self.database
                );
                match self.credentials() {
                    Some((user, password)) => {
                        let password = if redact { "****" } else { password };
                        format!("{base};UID={user};PWD={password}")
                    }
                    None => format!("{base};Trusted_Connection=yes"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_legacy_run() {
        let config = AppConfig::default();
        assert_eq!(config.database.server, ".");
        assert_eq!(config.database.database, "WideWorldImporters");
        assert_eq!(config.tables.len(), 23);
        assert_eq!(config.tables[0], "Application.People");
        assert_eq!(
            config.tables.last().map(String::as_str),
            Some("Warehouse.StockItemTransactions")
        );
        assert_eq!(config.files.output, PathBuf::from("op.txt"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("schema-prompt.toml");

        let mut config = AppConfig::default();
        config.database.backend = Backend::SqlServer;
        config.database.username = Some("sa".to_string());
        config.database.password = Some("secret".to_string());
        config.tables = vec!["Sales.Orders".to_string(), "Sales.OrderLines".to_string()];

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("partial.toml");
        std::fs::write(&path, "tables = [\"main.people\"]\n").unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.tables, vec!["main.people".to_string()]);
        assert_eq!(loaded.database.backend, Backend::DuckDb);
        assert_eq!(loaded.files, FilesConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = tempdir().unwrap();
        let result = AppConfig::load_from_file(temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(SchemaError::ConfigNotFound(_))));
    }

    #[test]
    fn test_connection_string_variants() {
        let mut db = DatabaseConfig {
            backend: Backend::SqlServer,
            ..DatabaseConfig::default()
        };
        assert_eq!(
            db.connection_string(),
            "DRIVER={ODBC Driver 17 for SQL Server};SERVER=.;DATABASE=WideWorldImporters;Trusted_Connection=yes"
        );

        // 只有用户名时仍使用集成身份验证
        db.username = Some("sa".to_string());
        assert!(db.connection_string().ends_with("Trusted_Connection=yes"));

        db.password = Some("p@ss".to_string());
        assert!(db.connection_string().ends_with(";UID=sa;PWD=p@ss"));
        assert!(db.redacted_connection_string().ends_with(";UID=sa;PWD=****"));
    }
}
