use super::{CatalogConnection, CatalogSource};
use crate::config::DatabaseConfig;
use crate::constants::database::DEFAULT_PORT;
use crate::error::RenderError;
use crate::schema::{ColumnDefinition, IndexColumnRow, TableIdentifier, quote_identifier};
use tiberius::{AuthMethod, Client, Config, Row};
use tokio::net::TcpStream;
use tokio::runtime::{Builder, Runtime};
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, warn};

type SqlClient = Client<Compat<TcpStream>>;

const COLUMNS_QUERY: &str = "
SELECT COLUMN_NAME, DATA_TYPE, CHARACTER_MAXIMUM_LENGTH, IS_NULLABLE, COLUMN_DEFAULT
FROM INFORMATION_SCHEMA.COLUMNS
WHERE TABLE_SCHEMA = @P1 AND TABLE_NAME = @P2";

const INDEX_COLUMNS_QUERY: &str = "
SELECT i.name AS index_name,
       i.type_desc,
       i.is_unique,
       ic.index_column_id,
       c.name AS column_name,
       ic.is_included_column
FROM sys.indexes i
JOIN sys.index_columns ic ON i.object_id = ic.object_id AND i.index_id = ic.index_id
JOIN sys.columns c ON ic.object_id = c.object_id AND ic.column_id = c.column_id
WHERE i.object_id = OBJECT_ID(QUOTENAME(@P1) + '.' + QUOTENAME(@P2))
ORDER BY i.name, ic.index_column_id";

/// SQL Server 元数据来源
///
/// 查询在当前线程的单线程运行时上同步执行，一次只有一个连接。
#[derive(Debug, Clone)]
pub struct MssqlCatalog {
    config: DatabaseConfig,
}

impl MssqlCatalog {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    fn client_config(&self) -> Result<Config, RenderError> {
        let (host, port) = parse_server(&self.config.server);

        let mut config = Config::new();
        config.host(host);
        config.port(port);
        config.database(&self.config.database);
        if self.config.trust_cert {
            config.trust_cert();
        }

        match self.config.credentials() {
            Some((user, password)) => config.authentication(AuthMethod::sql_server(user, password)),
            None => config.authentication(integrated_auth()?),
        }

        Ok(config)
    }
}

#[cfg(windows)]
fn integrated_auth() -> Result<AuthMethod, RenderError> {
    Ok(AuthMethod::Integrated)
}

#[cfg(not(windows))]
fn integrated_auth() -> Result<AuthMethod, RenderError> {
    Err(RenderError::connection(
        "当前平台不支持集成身份验证，请配置 username 和 password",
    ))
}

/// 解析 `host[,port]`，`.` 和 `(local)` 表示本机
fn parse_server(server: &str) -> (String, u16) {
    let server = server.trim().trim_start_matches("tcp:");
    let (host, port) = match server.split_once(',') {
        Some((host, port)) => (host.trim(), port.trim().parse().ok()),
        None => (server, None),
    };

    let host = match host.split_once('\\') {
        Some((host, instance)) => {
            warn!("不支持按实例名 {} 连接，请在 server 中指定端口", instance);
            host
        }
        None => host,
    };

    let host = match host {
        "" | "." | "(local)" => "localhost",
        other => other,
    };

    (host.to_string(), port.unwrap_or(DEFAULT_PORT))
}

impl CatalogSource for MssqlCatalog {
    fn open(&self) -> Result<Box<dyn CatalogConnection + '_>, RenderError> {
        let config = self.client_config()?;
        let runtime = Builder::new_current_thread()
            .enable_io()
            .build()
            .map_err(|e| RenderError::connection(e.to_string()))?;

        let client = runtime.block_on(async move {
            let tcp = TcpStream::connect(config.get_addr())
                .await
                .map_err(|e| RenderError::connection(e.to_string()))?;
            tcp.set_nodelay(true)
                .map_err(|e| RenderError::connection(e.to_string()))?;
            Client::connect(config, tcp.compat_write())
                .await
                .map_err(|e| RenderError::connection(e.to_string()))
        })?;

        debug!("已连接 SQL Server: {}", self.config.redacted_connection_string());
        Ok(Box::new(MssqlConnection { runtime, client }))
    }

    fn describe(&self) -> String {
        self.config.redacted_connection_string()
    }
}

struct MssqlConnection {
    runtime: Runtime,
    client: SqlClient,
}

impl MssqlConnection {
    fn query(&mut self, sql: &str, table: &TableIdentifier) -> Result<Vec<Row>, RenderError> {
        let Self { runtime, client } = self;
        let schema = table.schema.as_str();
        let name = table.table.as_str();

        runtime.block_on(async move {
            client
                .query(sql, &[&schema, &name])
                .await
                .map_err(query_error)?
                .into_first_result()
                .await
                .map_err(query_error)
        })
    }
}

impl CatalogConnection for MssqlConnection {
    fn columns(&mut self, table: &TableIdentifier) -> Result<Vec<ColumnDefinition>, RenderError> {
        let rows = self.query(COLUMNS_QUERY, table)?;

        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            let is_nullable: Option<&str> = row.try_get(3usize).map_err(query_error)?;
            let char_max_length: Option<i32> = row.try_get(2usize).map_err(query_error)?;
            columns.push(ColumnDefinition {
                name: required_str(row, 0)?,
                data_type: required_str(row, 1)?,
                char_max_length: char_max_length.map(i64::from),
                nullable: is_nullable == Some("YES"),
                default_value: row
                    .try_get::<&str, _>(4usize)
                    .map_err(query_error)?
                    .map(str::to_string),
            });
        }
        Ok(columns)
    }

    fn index_columns(&mut self, table: &TableIdentifier) -> Result<Vec<IndexColumnRow>, RenderError> {
        let rows = self.query(INDEX_COLUMNS_QUERY, table)?;

        let mut index_rows = Vec::with_capacity(rows.len());
        for row in &rows {
            let is_unique: Option<bool> = row.try_get(2usize).map_err(query_error)?;
            let ordinal: Option<i32> = row.try_get(3usize).map_err(query_error)?;
            let is_included: Option<bool> = row.try_get(5usize).map_err(query_error)?;
            index_rows.push(IndexColumnRow {
                index_name: required_str(row, 0)?,
                type_desc: required_str(row, 1)?,
                is_unique: is_unique.unwrap_or(false),
                ordinal: ordinal.map(i64::from).unwrap_or_default(),
                column_name: quote_identifier(&required_str(row, 4)?),
                is_included: is_included.unwrap_or(false),
            });
        }
        Ok(index_rows)
    }
}

fn required_str(row: &Row, idx: usize) -> Result<String, RenderError> {
    row.try_get::<&str, _>(idx)
        .map_err(query_error)?
        .map(str::to_string)
        .ok_or_else(|| RenderError::query(format!("第 {idx} 列为空")))
}

fn query_error(err: tiberius::error::Error) -> RenderError {
    RenderError::query(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server() {
        assert_eq!(parse_server("."), ("localhost".to_string(), 1433));
        assert_eq!(parse_server("(local)"), ("localhost".to_string(), 1433));
        assert_eq!(parse_server("db.internal,14330"), ("db.internal".to_string(), 14330));
        assert_eq!(parse_server("tcp:10.0.0.5"), ("10.0.0.5".to_string(), 1433));
        assert_eq!(parse_server("host\\SQLEXPRESS"), ("host".to_string(), 1433));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_integrated_auth_rejected_off_windows() {
        let catalog = MssqlCatalog::new(DatabaseConfig::default());
        assert!(matches!(
            catalog.open().err(),
            Some(RenderError::ConnectionFailure(_))
        ));
    }
}
