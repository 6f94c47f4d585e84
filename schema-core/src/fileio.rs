use crate::error::{Result, SchemaError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 读取整个 UTF-8 文本文件
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| SchemaError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("读取文件 {} ({} 字节)", path.display(), content.len());
    Ok(content)
}

/// 写入整个文本文件，已存在时直接覆盖
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    let to_error = |source: std::io::Error| SchemaError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, text).map_err(to_error)?;
    debug!("写入文件 {} ({} 字节)", path.display(), text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("op.txt");

        write_text(&path, "第一版").unwrap();
        write_text(&path, "CREATE TABLE a.b (\n    id int NOT NULL\n);\n").unwrap();

        let content = read_text(&path).unwrap();
        assert_eq!(content, "CREATE TABLE a.b (\n    id int NOT NULL\n);\n");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("BusinessRequirement.txt");

        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, SchemaError::ReadFile { .. }));
        assert!(err.to_string().contains("BusinessRequirement.txt"));
    }
}
