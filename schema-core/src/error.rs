use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("读取文件失败 {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("写入文件失败 {}: {source}", path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件未找到: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("不支持的数据库后端: {0}")]
    UnsupportedBackend(String),
}

/// 单表渲染失败的分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderErrorKind {
    MalformedIdentifier,
    ConnectionFailure,
    QueryFailure,
    TableNotFound,
}

/// 单表渲染错误
///
/// 调用方按 [`RenderErrorKind`] 分支处理，而不是匹配 `Error:` 前缀。
/// `Display` 只输出消息本身，旧格式的 `Error: <message>` 由渲染器负责拼接。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("表标识 '{0}' 格式错误，应为 schema.table")]
    MalformedIdentifier(String),

    #[error("数据库连接失败: {0}")]
    ConnectionFailure(String),

    #[error("元数据查询失败: {0}")]
    QueryFailure(String),

    #[error("表 {0} 不存在")]
    TableNotFound(String),
}

impl RenderError {
    pub fn kind(&self) -> RenderErrorKind {
        match self {
            Self::MalformedIdentifier(_) => RenderErrorKind::MalformedIdentifier,
            Self::ConnectionFailure(_) => RenderErrorKind::ConnectionFailure,
            Self::QueryFailure(_) => RenderErrorKind::QueryFailure,
            Self::TableNotFound(_) => RenderErrorKind::TableNotFound,
        }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionFailure(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryFailure(msg.into())
    }
}
