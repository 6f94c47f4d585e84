// 数据库目录访问模块
//
// 渲染器只依赖这里的两个 trait：
// - CatalogSource: 每次渲染打开一个新连接
// - CatalogConnection: 在连接上执行列和索引两条元数据查询
//
// 具体后端：
// - DuckDbCatalog: 本地 DuckDB 数据库文件 (默认)
// - MssqlCatalog: SQL Server，需要 `mssql` 特性
// - StaticCatalog: 内存中的固定元数据，用于测试

mod duck;
mod memory;
#[cfg(feature = "mssql")]
mod mssql;

pub use duck::DuckDbCatalog;
pub use memory::StaticCatalog;
#[cfg(feature = "mssql")]
pub use mssql::MssqlCatalog;

use crate::config::{Backend, DatabaseConfig};
use crate::error::{RenderError, Result};
use crate::schema::{ColumnDefinition, IndexColumnRow, TableIdentifier};

/// 元数据来源，负责打开连接
pub trait CatalogSource {
    fn open(&self) -> std::result::Result<Box<dyn CatalogConnection + '_>, RenderError>;

    /// 用于日志的描述
    fn describe(&self) -> String;
}

/// 一个已打开的连接，drop 即关闭
pub trait CatalogConnection {
    /// 列元数据，按数据库返回的顺序
    fn columns(
        &mut self,
        table: &TableIdentifier,
    ) -> std::result::Result<Vec<ColumnDefinition>, RenderError>;

    /// 索引列元数据，按索引名和列序号排序
    fn index_columns(
        &mut self,
        table: &TableIdentifier,
    ) -> std::result::Result<Vec<IndexColumnRow>, RenderError>;
}

/// 根据配置创建元数据来源
pub fn open_source(config: &DatabaseConfig) -> Result<Box<dyn CatalogSource>> {
    match config.backend {
        Backend::DuckDb => Ok(Box::new(DuckDbCatalog::new(&config.database))),
        #[cfg(feature = "mssql")]
        Backend::SqlServer => Ok(Box::new(MssqlCatalog::new(config.clone()))),
        #[cfg(not(feature = "mssql"))]
        Backend::SqlServer => Err(crate::error::SchemaError::UnsupportedBackend(format!(
            "{} (编译时未启用 mssql 特性)",
            config.backend
        ))),
    }
}
