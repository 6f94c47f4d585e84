use super::{CatalogConnection, CatalogSource};
use crate::error::RenderError;
use crate::schema::{ColumnDefinition, IndexColumnRow, TableIdentifier};
use std::cell::Cell;
use std::collections::HashMap;

/// 内存中的固定元数据
///
/// 记录连接的打开和关闭次数，可以注入连接或查询失败。
#[derive(Debug, Default)]
pub struct StaticCatalog {
    tables: HashMap<TableIdentifier, (Vec<ColumnDefinition>, Vec<IndexColumnRow>)>,
    connect_failure: Option<String>,
    query_failure: Option<String>,
    opened: Cell<usize>,
    closed: Cell<usize>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(
        mut self,
        table: TableIdentifier,
        columns: Vec<ColumnDefinition>,
        index_rows: Vec<IndexColumnRow>,
    ) -> Self {
        self.tables.insert(table, (columns, index_rows));
        self
    }

    pub fn failing_connect(mut self, message: impl Into<String>) -> Self {
        self.connect_failure = Some(message.into());
        self
    }

    pub fn failing_query(mut self, message: impl Into<String>) -> Self {
        self.query_failure = Some(message.into());
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

impl CatalogSource for StaticCatalog {
    fn open(&self) -> Result<Box<dyn CatalogConnection + '_>, RenderError> {
        if let Some(message) = &self.connect_failure {
            return Err(RenderError::connection(message.clone()));
        }
        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(StaticConnection { catalog: self }))
    }

    fn describe(&self) -> String {
        format!("static:{} tables", self.tables.len())
    }
}

struct StaticConnection<'a> {
    catalog: &'a StaticCatalog,
}

impl StaticConnection<'_> {
    fn check_query(&self) -> Result<(), RenderError> {
        match &self.catalog.query_failure {
            Some(message) => Err(RenderError::query(message.clone())),
            None => Ok(()),
        }
    }
}

impl CatalogConnection for StaticConnection<'_> {
    fn columns(&mut self, table: &TableIdentifier) -> Result<Vec<ColumnDefinition>, RenderError> {
        self.check_query()?;
        Ok(self
            .catalog
            .tables
            .get(table)
            .map(|(columns, _)| columns.clone())
            .unwrap_or_default())
    }

    fn index_columns(&mut self, table: &TableIdentifier) -> Result<Vec<IndexColumnRow>, RenderError> {
        self.check_query()?;
        Ok(self
            .catalog
            .tables
            .get(table)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

impl Drop for StaticConnection<'_> {
    fn drop(&mut self) {
        self.catalog.closed.set(self.catalog.closed.get() + 1);
    }
}
