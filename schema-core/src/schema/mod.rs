mod renderer;
mod types;


// 重新导出公共接口
pub use renderer::{
    SchemaRenderer, error_text, generate_column_sql, generate_create_index_sql,
    generate_create_table_sql,
};
pub use types::{
    ColumnDefinition, IndexColumnRow, IndexDefinition, TableFragment, TableIdentifier,
    quote_identifier,
};
