//! # 工具函数模块
//!
//! 提供美化输出、进度条、gm 探测与 CSV 报表等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 子模块: gm, output, progress, report

pub mod gm;
pub mod output;
pub mod progress;
pub mod report;
