//! # check 命令实现
//!
//! 探测 GraphicsMagick 安装并打印版本信息。gm 不可用时整个转换
//! 功能都应视为不可用。
//!
//! ## 依赖关系
//! - 使用 `cli/check.rs` 定义的参数
//! - 使用 `utils/gm.rs` 执行探测
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::check::CheckArgs;
use crate::error::Result;
use crate::utils::{gm, output, progress};

/// 执行 check 命令
pub fn execute(args: CheckArgs) -> Result<()> {
    output::print_header("Checking GraphicsMagick installation");

    let spinner = progress::create_spinner("Probing 'gm version'");
    let installation = gm::probe();
    spinner.finish_and_clear();

    let installation = installation?;
    output::print_success(&format!(
        "GraphicsMagick {} detected",
        installation.version
    ));

    if args.full {
        println!("{}", installation.banner.trim_end());
    }

    Ok(())
}
