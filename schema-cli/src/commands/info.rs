use crate::app::CliApp;
use anyhow::Result;

/// 按输出顺序列出配置中的表
pub fn show_tables(app: &CliApp) -> Result<()> {
    for (position, table) in app.config.tables.iter().enumerate() {
        println!("{:>3}. {}", position + 1, table);
    }
    Ok(())
}

/// 显示连接和文件配置，密码已隐藏
pub fn show_connection_info(app: &CliApp) -> Result<()> {
    let config = &app.config;
    println!("后端:     {}", config.database.backend);
    println!("连接串:   {}", config.database.redacted_connection_string());
    println!("元数据:   {}", app.source.describe());
    println!("业务需求: {}", config.files.requirement.display());
    println!("模板:     {}", config.files.template.display());
    println!("输出:     {}", config.files.output.display());
    Ok(())
}
