/// Schema Prompt 项目信息模块
///
/// schema-cli 是面向用户的主程序，项目元数据统一在这里定义
/// schema-core 作为内部库，只提供技术性常量

/// 项目元数据（自动从 schema-cli 的 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称（自动从 Cargo.toml 同步）
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述（自动从 Cargo.toml 同步）
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者（自动从 Cargo.toml 同步）
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称（手动维护，用于 UI 显示）
    pub mod display {
        /// 用户友好的项目名称
        pub const FRIENDLY_NAME: &str = "Schema Prompt";

        /// 项目详细描述（比 Cargo.toml 中的描述更详细）
        pub const DESCRIPTION_LONG: &str = "从数据库读取表的列和索引元数据，渲染为 CREATE TABLE / CREATE INDEX 语句，\
并与业务需求一起代入提示词模板，生成可直接提交给文本生成服务的提示词文件";
    }
}

/// 版本信息
pub mod version_info {
    /// CLI 版本（自动从 Cargo.toml 同步）
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}
