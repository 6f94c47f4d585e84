use crate::constants::database::{CHARACTER_TYPES, MAX_LENGTH_MARKER};
use crate::error::RenderError;
use std::fmt;

/// `schema.table` 两段式表标识
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableIdentifier {
    pub schema: String,
    pub table: String,
}

impl TableIdentifier {
    /// 在第一个点处拆分，两段都不能为空，表名中不能再有点
    pub fn parse(identifier: &str) -> Result<Self, RenderError> {
        let malformed = || RenderError::MalformedIdentifier(identifier.to_string());

        let (schema, table) = identifier.split_once('.').ok_or_else(malformed)?;
        if schema.is_empty() || table.is_empty() || table.contains('.') {
            return Err(malformed());
        }

        Ok(Self {
            schema: schema.to_string(),
            table: table.to_string(),
        })
    }
}

impl fmt::Display for TableIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// 普通标识符原样返回，其他名字加双引号并转义内部引号
pub fn quote_identifier(name: &str) -> String {
    let mut chars = name.chars();
    let is_plain = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        None => false,
    };

    if is_plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// 表列定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: String,
    pub char_max_length: Option<i64>,
    pub nullable: bool,
    pub default_value: Option<String>,
}

impl ColumnDefinition {
    /// 只有字符类型才拼接长度
    pub fn rendered_type(&self) -> String {
        let is_character = CHARACTER_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&self.data_type));

        match self.char_max_length {
            Some(MAX_LENGTH_MARKER) if is_character => format!("{}(max)", self.data_type),
            Some(length) if is_character => format!("{}({length})", self.data_type),
            _ => self.data_type.clone(),
        }
    }

    /// 空字符串默认值视为没有默认值
    pub fn default_expression(&self) -> Option<&str> {
        self.default_value.as_deref().filter(|d| !d.is_empty())
    }
}

/// 索引元数据中的一行，每个索引列一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexColumnRow {
    pub index_name: String,
    pub type_desc: String,
    pub is_unique: bool,
    /// 列在索引中的序号，同一索引内按它排序
    pub ordinal: i64,
    /// 可直接写入 SQL 的列名或表达式，需要时已加引号
    pub column_name: String,
    pub is_included: bool,
}

/// 表索引定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    pub name: String,
    pub type_desc: String,
    pub is_unique: bool,
    pub key_columns: Vec<String>,
    pub included_columns: Vec<String>,
}

impl IndexDefinition {
    fn from_row(row: &IndexColumnRow) -> Self {
        Self {
            name: row.index_name.clone(),
            type_desc: row.type_desc.clone(),
            is_unique: row.is_unique,
            key_columns: Vec::new(),
            included_columns: Vec::new(),
        }
    }

    fn push(&mut self, row: IndexColumnRow) {
        if row.is_included {
            self.included_columns.push(row.column_name);
        } else {
            self.key_columns.push(row.column_name);
        }
    }

    pub fn renders_unique(&self) -> bool {
        self.is_unique || self.type_desc.to_ascii_uppercase().contains("UNIQUE")
    }

    /// 按索引名分组，保持首次出现的顺序；索引内的列按序号排列
    pub fn group_rows(rows: Vec<IndexColumnRow>) -> Vec<IndexDefinition> {
        let mut groups: Vec<(IndexDefinition, Vec<IndexColumnRow>)> = Vec::new();

        for row in rows {
            match groups.iter_mut().find(|(index, _)| index.name == row.index_name) {
                Some((_, group)) => group.push(row),
                None => groups.push((IndexDefinition::from_row(&row), vec![row])),
            }
        }

        groups
            .into_iter()
            .map(|(mut index, mut group)| {
                group.sort_by_key(|row| row.ordinal);
                for row in group {
                    index.push(row);
                }
                index
            })
            .collect()
    }
}

/// 单表渲染结果，生成后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFragment {
    pub table: TableIdentifier,
    pub column_count: usize,
    pub index_count: usize,
    text: String,
}

impl TableFragment {
    pub(crate) fn new(
        table: TableIdentifier,
        column_count: usize,
        index_count: usize,
        text: String,
    ) -> Self {
        Self {
            table,
            column_count,
            index_count,
            text,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl fmt::Display for TableFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
