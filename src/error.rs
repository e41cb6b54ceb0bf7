//! # 统一错误处理模块
//!
//! 定义 gmbatch 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分类
//! - 校验错误：任何外部命令执行之前的输入问题，无副作用
//! - 环境错误：gm 不可用或输出目录不可写，在任何工作开始前失败
//! - 调用错误：外部命令返回非零状态（批量执行中以 Finished 事件异步上报）
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// gmbatch 统一错误类型
#[derive(Error, Debug)]
pub enum GmBatchError {
    // ─────────────────────────────────────────────────────────────
    // 校验错误
    // ─────────────────────────────────────────────────────────────
    #[error("No input files")]
    NoInputFiles,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Unrecognized image extension: {path}")]
    UnsupportedExtension { path: String },

    #[error("Invalid resize geometry '{0}' (expected WIDTHxHEIGHT)")]
    InvalidGeometry(String),

    #[error("Destination already exists: {path}\nUse --overwrite to replace it")]
    DestinationExists { path: String },

    // ─────────────────────────────────────────────────────────────
    // 环境错误
    // ─────────────────────────────────────────────────────────────
    #[error("Output directory unusable: {path}\nReason: {reason}")]
    OutputDirUnusable { path: String, reason: String },

    #[error("Failed to create directory for {file}: {path}")]
    DirectoryCreate {
        file: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 报表错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GmBatchError>;
