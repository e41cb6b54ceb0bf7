//! # GraphicsMagick 环境探测
//!
//! 运行任何计划之前探测 gm 是否可用。探测失败时调用方必须拒绝
//! 构建或执行任何作业计划。
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 和 `commands/check.rs` 使用
//! - `batch/builder.rs` 引用 GM_COMMAND
//! - 使用 `regex` 解析版本号

use std::process::Command;

use regex::Regex;

use crate::error::{GmBatchError, Result};

/// 外部图像转换工具名
pub const GM_COMMAND: &str = "gm";

/// 探测到的 GraphicsMagick 安装信息
#[derive(Debug, Clone)]
pub struct GmInstallation {
    /// 版本号（如 1.3.42），解析失败时为 "unknown"
    pub version: String,
    /// `gm version` 的完整输出
    pub banner: String,
}

/// 探测 GraphicsMagick 是否可用
///
/// 等价于运行 `gm version` 并确认输出确实来自 GraphicsMagick。
pub fn probe() -> Result<GmInstallation> {
    let output = Command::new(GM_COMMAND)
        .arg("version")
        .output()
        .map_err(|_| GmBatchError::CommandNotFound {
            command: GM_COMMAND.to_string(),
        })?;

    let mut banner = String::from_utf8_lossy(&output.stdout).to_string();
    banner.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() || !banner.contains("GraphicsMagick") {
        return Err(GmBatchError::CommandFailed {
            command: format!("{} version", GM_COMMAND),
            stderr: banner,
        });
    }

    Ok(GmInstallation {
        version: parse_version(&banner),
        banner,
    })
}

/// 从版本输出中提取版本号
fn parse_version(banner: &str) -> String {
    let re = Regex::new(r"GraphicsMagick\s+([0-9][0-9A-Za-z.]*)").unwrap();
    re.captures(banner)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_version_from_banner() {
        let banner = "GraphicsMagick 1.3.42 2023-09-23 Q16 http://www.GraphicsMagick.org/";
        assert_eq!(parse_version(banner), "1.3.42");
    }

    #[test]
    fn test_parse_version_unknown() {
        assert_eq!(parse_version("no magick here"), "unknown");
    }
}
