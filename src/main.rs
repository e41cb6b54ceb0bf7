//! # gmbatch - 基于 GraphicsMagick 的批量图像转换器
//!
//! 将一组图像文件按用户选项确定性地翻译为 `gm convert` 调用序列，
//! 并在独立工作线程上顺序执行，逐文件上报进度。
//!
//! ## 子命令
//! - `convert` - 批量图像转换 (png/jpg/jpeg/bmp/tif/tiff/webp)
//! - `check`   - 探测 GraphicsMagick 安装
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── models/    (转换选项与输入文件)
//!   │     └── batch/     (命令构建器与批量执行器)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod models;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
