use super::types::{
    ColumnDefinition, IndexDefinition, TableFragment, TableIdentifier, quote_identifier,
};
use crate::catalog::CatalogSource;
use crate::error::RenderError;
use tracing::{debug, warn};

/// 表结构渲染器
///
/// 每次渲染单独打开一个连接，渲染结束即关闭，不在表之间复用。
pub struct SchemaRenderer<'a> {
    source: &'a dyn CatalogSource,
}

impl<'a> SchemaRenderer<'a> {
    pub fn new(source: &'a dyn CatalogSource) -> Self {
        Self { source }
    }

    /// 渲染单表的 CREATE TABLE 和 CREATE INDEX 语句
    pub fn render(&self, identifier: &str) -> Result<TableFragment, RenderError> {
        let table = TableIdentifier::parse(identifier)?;
        debug!("开始渲染表结构: {}", table);

        let mut connection = self.source.open()?;

        let columns = connection.columns(&table)?;
        if columns.is_empty() {
            return Err(RenderError::TableNotFound(table.to_string()));
        }

        let index_rows = connection.index_columns(&table)?;
        drop(connection);

        let indexes = IndexDefinition::group_rows(index_rows);

        let mut text = generate_create_table_sql(&table, &columns);
        for index in &indexes {
            text.push('\n');
            text.push_str(&generate_create_index_sql(&table, index));
            text.push('\n');
        }

        debug!(
            "表 {} 渲染完成: {} 列, {} 个索引",
            table,
            columns.len(),
            indexes.len()
        );
        Ok(TableFragment::new(table, columns.len(), indexes.len(), text))
    }

    /// 渲染失败时返回 `Error: <message>` 文本而不是错误
    pub fn render_text(&self, identifier: &str) -> String {
        match self.render(identifier) {
            Ok(fragment) => fragment.into_text(),
            Err(e) => {
                warn!("渲染表 {} 失败: {}", identifier, e);
                error_text(&e)
            }
        }
    }
}

/// 旧格式的错误文本
pub fn error_text(error: &RenderError) -> String {
    format!("Error: {error}")
}

/// 生成CREATE TABLE SQL
pub fn generate_create_table_sql(table: &TableIdentifier, columns: &[ColumnDefinition]) -> String {
    let lines = columns
        .iter()
        .map(|c| format!("    {}", generate_column_sql(c)))
        .collect::<Vec<_>>();

    format!("CREATE TABLE {table} (\n{}\n);\n", lines.join(",\n"))
}

/// 生成列定义SQL
pub fn generate_column_sql(column: &ColumnDefinition) -> String {
    let mut sql = format!("{} {}", quote_identifier(&column.name), column.rendered_type());

    if let Some(default) = column.default_expression() {
        sql.push_str(&format!(" DEFAULT {default}"));
    }

    sql.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
    sql
}

/// 生成索引定义SQL
pub fn generate_create_index_sql(table: &TableIdentifier, index: &IndexDefinition) -> String {
    let unique = if index.renders_unique() { "UNIQUE " } else { "" };
    let included = if index.included_columns.is_empty() {
        String::new()
    } else {
        format!(" INCLUDE ({})", index.included_columns.join(", "))
    };

    format!(
        "CREATE {unique}INDEX {} ON {table} ({}){included};",
        index.name,
        index.key_columns.join(", ")
    )
}
