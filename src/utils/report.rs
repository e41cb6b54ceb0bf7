//! # 转换报表导出
//!
//! 将一次运行的逐文件结果导出为 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `csv` 库写入 CSV 文件

use std::path::{Path, PathBuf};

use crate::error::{GmBatchError, Result};

/// 单个文件的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// 转换成功
    Converted,
    /// 调用失败（批次在此中止）
    Failed,
    /// 因前序失败或取消而未尝试
    NotAttempted,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Converted => "converted",
            ItemStatus::Failed => "failed",
            ItemStatus::NotAttempted => "not attempted",
        }
    }
}

/// 报表中的一行
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub status: ItemStatus,
}

/// 写出 CSV 报表
pub fn write_report(rows: &[ReportRow], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(GmBatchError::CsvError)?;

    wtr.write_record(["source", "destination", "status"])
        .map_err(GmBatchError::CsvError)?;

    for row in rows {
        wtr.write_record([
            row.source.display().to_string(),
            row.dest.display().to_string(),
            row.status.as_str().to_string(),
        ])
        .map_err(GmBatchError::CsvError)?;
    }

    wtr.flush().map_err(|e| GmBatchError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_report() {
        let dir = std::env::temp_dir().join(format!("gmbatch_report_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        let rows = vec![
            ReportRow {
                source: PathBuf::from("/in/a.png"),
                dest: PathBuf::from("/out/a.webp"),
                status: ItemStatus::Converted,
            },
            ReportRow {
                source: PathBuf::from("/in/b.png"),
                dest: PathBuf::from("/out/b.webp"),
                status: ItemStatus::Failed,
            },
        ];
        write_report(&rows, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("source,destination,status"));
        assert!(content.contains("/in/a.png,/out/a.webp,converted"));
        assert!(content.contains("/in/b.png,/out/b.webp,failed"));
    }
}
