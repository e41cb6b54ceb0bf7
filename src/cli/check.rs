//! # check 子命令 CLI 定义
//!
//! 探测 GraphicsMagick 安装并报告版本。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/check.rs`

use clap::Args;

/// check 子命令参数
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print the full 'gm version' banner
    #[arg(long, default_value_t = false)]
    pub full: bool,
}
