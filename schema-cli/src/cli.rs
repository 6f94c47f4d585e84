use crate::project_info::{metadata, version_info};
use clap::{Parser, Subcommand};
use schema_core::constants::files::CONFIG_FILE_NAME;
use std::path::PathBuf;

/// Schema Prompt CLI - 表结构提取与提示词组装工具
#[derive(Parser, Debug)]
#[command(name = "schema-prompt")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// 创建配置文件、示例模板和示例业务需求
    Init {
        /// 如果文件已存在，强制覆盖
        #[arg(long)]
        force: bool,
    },
    /// 渲染所有表结构并生成提示词文件
    Run {
        /// 覆盖配置中的输出文件路径
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 只渲染表结构脚本并输出到终端
    Render {
        /// 要渲染的表 (schema.table)，不指定则使用配置中的表
        tables: Vec<String>,
    },
    /// 按输出顺序列出配置中的表
    Tables,
    /// 显示数据库连接信息（密码已隐藏）
    ConnInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["schema-prompt", "run"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("schema-prompt.toml"));
        assert!(!cli.verbose);
        assert_eq!(cli.command, Commands::Run { output: None });
    }

    #[test]
    fn test_parse_render_tables() {
        let cli = Cli::try_parse_from([
            "schema-prompt",
            "-v",
            "--config",
            "conf/wwi.toml",
            "render",
            "Sales.Orders",
            "Sales.OrderLines",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("conf/wwi.toml"));
        assert_eq!(
            cli.command,
            Commands::Render {
                tables: vec!["Sales.Orders".to_string(), "Sales.OrderLines".to_string()]
            }
        );
    }

    #[test]
    fn test_parse_init_and_output_override() {
        let cli = Cli::try_parse_from(["schema-prompt", "init", "--force"]).unwrap();
        assert_eq!(cli.command, Commands::Init { force: true });

        let cli = Cli::try_parse_from(["schema-prompt", "run", "-o", "prompt.txt"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                output: Some(PathBuf::from("prompt.txt"))
            }
        );
    }
}
