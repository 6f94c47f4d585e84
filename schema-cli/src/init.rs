use crate::project_info::metadata::{PROJECT_NAME, display::FRIENDLY_NAME};
use anyhow::{Context, Result};
use schema_core::config::{AppConfig, FilesConfig};
use schema_core::constants::prompt::{SAMPLE_REQUIREMENT, SAMPLE_TEMPLATE};
use schema_core::fileio;
use std::path::Path;
use tracing::{info, warn};

/// 运行独立的初始化流程
///
/// 示例模板和业务需求放在配置文件所在目录。
pub fn run_init(config_path: &Path, force: bool) -> Result<()> {
    info!("🗂️  {} ({}) 初始化", FRIENDLY_NAME, PROJECT_NAME);

    // 检查是否已经初始化过
    if !force && config_path.exists() {
        warn!("⚠️  检测到已存在的配置文件: {}", config_path.display());
        info!("如果您要重新初始化，请使用 --force 参数");
        return Ok(());
    }

    let mut config = AppConfig::default();
    if let Some(base) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let defaults = FilesConfig::default();
        config.files = FilesConfig {
            requirement: base.join(defaults.requirement),
            template: base.join(defaults.template),
            output: base.join(defaults.output),
        };
    }

    config
        .save_to_file(config_path)
        .with_context(|| format!("无法写入配置文件 {}", config_path.display()))?;
    info!("   ✅ 创建配置文件: {}", config_path.display());

    for (path, content) in [
        (&config.files.template, SAMPLE_TEMPLATE),
        (&config.files.requirement, SAMPLE_REQUIREMENT),
    ] {
        if path.exists() && !force {
            info!("   ⏭️  保留已有文件: {}", path.display());
            continue;
        }
        fileio::write_text(path, content)?;
        info!("   ✅ 创建示例文件: {}", path.display());
    }

    info!("🎉 初始化完成！");
    info!("📝 接下来的步骤:");
    info!("   1️⃣  编辑 {} 配置数据库和表列表", config_path.display());
    info!("   2️⃣  编辑 {} 填写业务需求", config.files.requirement.display());
    info!("   3️⃣  运行 'schema-prompt run' 生成 {}", config.files.output.display());

    Ok(())
}
