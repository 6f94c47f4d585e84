use super::{CatalogConnection, CatalogSource};
use crate::error::RenderError;
use crate::schema::{ColumnDefinition, IndexColumnRow, TableIdentifier, quote_identifier};
use duckdb::{AccessMode, Config, Connection, params};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

/// DuckDB 索引的存储类型
const DUCKDB_INDEX_TYPE: &str = "ART";

/// 本地 DuckDB 数据库文件
#[derive(Debug, Clone)]
pub struct DuckDbCatalog {
    path: PathBuf,
}

impl DuckDbCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for DuckDbCatalog {
    fn open(&self) -> Result<Box<dyn CatalogConnection + '_>, RenderError> {
        // 以只读方式打开，避免 DuckDB 自动创建空数据库
        if !self.path.exists() {
            return Err(RenderError::connection(format!(
                "数据库文件不存在: {}",
                self.path.display()
            )));
        }

        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .map_err(|e| RenderError::connection(e.to_string()))?;
        let connection = Connection::open_with_flags(&self.path, config)
            .map_err(|e| RenderError::connection(e.to_string()))?;

        debug!("已打开 DuckDB 数据库: {}", self.path.display());
        Ok(Box::new(DuckDbConnection { connection }))
    }

    fn describe(&self) -> String {
        format!("duckdb:{}", self.path.display())
    }
}

struct DuckDbConnection {
    connection: Connection,
}

impl CatalogConnection for DuckDbConnection {
    fn columns(&mut self, table: &TableIdentifier) -> Result<Vec<ColumnDefinition>, RenderError> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT column_name, data_type, character_maximum_length, is_nullable, column_default
                 FROM information_schema.columns
                 WHERE table_schema = ? AND table_name = ?
                 ORDER BY ordinal_position",
            )
            .map_err(query_error)?;

        let column_iter = stmt
            .query_map(params![table.schema, table.table], |row| {
                let is_nullable: String = row.get(3)?;
                Ok(ColumnDefinition {
                    name: row.get(0)?,
                    data_type: row.get(1)?,
                    char_max_length: row.get(2)?,
                    nullable: is_nullable == "YES",
                    default_value: row.get(4)?,
                })
            })
            .map_err(query_error)?;

        let mut columns = Vec::new();
        for column in column_iter {
            columns.push(column.map_err(query_error)?);
        }
        Ok(columns)
    }

    fn index_columns(&mut self, table: &TableIdentifier) -> Result<Vec<IndexColumnRow>, RenderError> {
        // 主键和唯一约束不出现在 duckdb_indexes() 中，排在显式索引之前
        let mut rows = self.constraint_columns(table)?;

        let mut stmt = self
            .connection
            .prepare(
                "SELECT index_name, is_unique, sql
                 FROM duckdb_indexes()
                 WHERE schema_name = ? AND table_name = ?
                 ORDER BY index_name",
            )
            .map_err(query_error)?;

        let index_iter = stmt
            .query_map(params![table.schema, table.table], |row| {
                let name: String = row.get(0)?;
                let is_unique: bool = row.get(1)?;
                let sql: Option<String> = row.get(2)?;
                Ok((name, is_unique, sql))
            })
            .map_err(query_error)?;

        for index in index_iter {
            let (index_name, is_unique, sql) = index.map_err(query_error)?;
            let columns = match sql.as_deref() {
                Some(sql) => parse_index_columns(sql)?,
                None => Vec::new(),
            };

            for (position, column_name) in columns.into_iter().enumerate() {
                rows.push(IndexColumnRow {
                    index_name: index_name.clone(),
                    type_desc: DUCKDB_INDEX_TYPE.to_string(),
                    is_unique,
                    ordinal: position as i64 + 1,
                    column_name,
                    is_included: false,
                });
            }
        }
        Ok(rows)
    }
}

impl DuckDbConnection {
    /// 主键和唯一约束的列，每个约束生成一个唯一索引
    ///
    /// 约束没有名字，按 `PK_<table>` 和 `UQ_<table>_<columns>` 命名。
    fn constraint_columns(&mut self, table: &TableIdentifier) -> Result<Vec<IndexColumnRow>, RenderError> {
        let mut stmt = self
            .connection
            .prepare(
                "SELECT constraint_index,
                        constraint_type,
                        unnest(range(1, len(constraint_column_names) + 1)) AS ordinal,
                        unnest(constraint_column_names) AS column_name
                 FROM duckdb_constraints()
                 WHERE schema_name = ? AND table_name = ?
                   AND constraint_type IN ('PRIMARY KEY', 'UNIQUE')
                 ORDER BY constraint_index, ordinal",
            )
            .map_err(query_error)?;

        let constraint_iter = stmt
            .query_map(params![table.schema, table.table], |row| {
                let constraint_index: i64 = row.get(0)?;
                let constraint_type: String = row.get(1)?;
                let ordinal: i64 = row.get(2)?;
                let column_name: String = row.get(3)?;
                Ok((constraint_index, constraint_type, ordinal, column_name))
            })
            .map_err(query_error)?;

        // (约束序号, 约束类型, [(列序号, 列名)])
        let mut constraints: Vec<(i64, String, Vec<(i64, String)>)> = Vec::new();
        for constraint in constraint_iter {
            let (constraint_index, constraint_type, ordinal, column_name) =
                constraint.map_err(query_error)?;
            match constraints.last_mut() {
                Some((index, _, columns)) if *index == constraint_index => {
                    columns.push((ordinal, column_name));
                }
                _ => constraints.push((
                    constraint_index,
                    constraint_type,
                    vec![(ordinal, column_name)],
                )),
            }
        }

        let mut rows = Vec::new();
        for (_, constraint_type, columns) in constraints {
            let index_name = if constraint_type == "PRIMARY KEY" {
                format!("PK_{}", table.table)
            } else {
                let names = columns
                    .iter()
                    .map(|(_, name)| name.as_str())
                    .collect::<Vec<_>>()
                    .join("_");
                format!("UQ_{}_{}", table.table, names)
            };

            for (ordinal, column_name) in columns {
                rows.push(IndexColumnRow {
                    index_name: index_name.clone(),
                    type_desc: constraint_type.clone(),
                    is_unique: true,
                    ordinal,
                    column_name: quote_identifier(&column_name),
                    is_included: false,
                });
            }
        }
        Ok(rows)
    }
}

fn query_error(err: duckdb::Error) -> RenderError {
    RenderError::query(err.to_string())
}

/// 从 CREATE INDEX 语句中提取键列，只在最外层括号、双引号之外的逗号处拆分
///
/// DuckDB 只保存索引的建表语句，键列从 `ON <table>(...)` 中取出。
/// 引号内是普通标识符时去掉引号，否则原样保留；表达式原样保留。
fn parse_index_columns(sql: &str) -> Result<Vec<String>, RenderError> {
    let index_regex = Regex::new(r"(?is)\bON\s+[^(]+\((.*)\)")
        .map_err(|e| RenderError::query(format!("正则表达式编译失败: {e}")))?;

    let Some(captures) = index_regex.captures(sql) else {
        return Ok(Vec::new());
    };
    let list = &captures[1];

    let mut columns = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_quotes = false;
    let mut chars = list.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                // "" 转义
                current.push('"');
                current.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '(' if !in_quotes => {
                depth += 1;
                current.push(ch);
            }
            ')' if !in_quotes => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if !in_quotes && depth == 0 => columns.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    columns.push(current);

    Ok(columns
        .iter()
        .map(|c| normalize_index_column(c.trim()))
        .filter(|c| !c.is_empty())
        .collect())
}

fn normalize_index_column(column: &str) -> String {
    let quoted = column.len() >= 2 && column.starts_with('"') && column.ends_with('"');
    if !quoted {
        return column.to_string();
    }

    let inner = column[1..column.len() - 1].replace("\"\"", "\"");
    quote_identifier(&inner)
}
