//! # 批量转换核心模块
//!
//! 提供转换作业的两个阶段：命令构建与批量执行。
//!
//! ## 功能
//! - `builder`: 将输入文件与转换选项确定性地翻译为 gm 调用序列
//! - `executor`: 在独立工作线程上严格顺序执行该序列，支持协作取消
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `models/` 的数据模型
//! - 使用 `utils/gm.rs` 的外部命令常量

pub mod builder;
pub mod executor;

pub use builder::{build_plan, Invocation, JobPlan};
pub use executor::{BatchExecutor, ExecutorEvent, ExecutorHandle, StopHandle};
