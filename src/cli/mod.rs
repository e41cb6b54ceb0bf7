//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `convert`: 批量图像转换
//! - `check`: 探测 GraphicsMagick 安装
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: check, convert

pub mod check;
pub mod convert;

use clap::{Parser, Subcommand};

/// gmbatch - 基于 GraphicsMagick 的批量图像转换器
#[derive(Parser)]
#[command(name = "gmbatch")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "A batch image converter driven by GraphicsMagick", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Convert images in batch via 'gm convert'
    Convert(convert::ConvertArgs),

    /// Check the GraphicsMagick installation
    Check(check::CheckArgs),
}
