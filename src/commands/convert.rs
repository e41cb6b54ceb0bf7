//! # convert 命令实现
//!
//! 扮演展示层：装配转换请求，驱动批量引擎，消费事件流。
//!
//! ## 流程
//! - 探测 gm 可用性（不可用则拒绝一切工作）
//! - 收集并校验输入文件
//! - 构建作业计划（命令构建器）
//! - 在工作线程上执行计划，本线程消费事件并更新进度条
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `models/`, `batch/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/report.rs`

use std::path::PathBuf;

use crate::batch::{build_plan, BatchExecutor, ExecutorEvent};
use crate::cli::convert::ConvertArgs;
use crate::error::{GmBatchError, Result};
use crate::models::{input, ConversionOptions, ResizeSpec};
use crate::utils::report::{ItemStatus, ReportRow};
use crate::utils::{gm, output, progress, report};

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header(&format!("Batch converting to '{}'", args.format));

    // gm 不可用时在任何工作开始前失败
    let installation = gm::probe()?;
    output::print_info(&format!(
        "GraphicsMagick {} detected",
        installation.version
    ));

    let files = input::collect_inputs(&args.inputs, args.recursive, &args.pattern)?;
    if files.is_empty() {
        return Err(GmBatchError::NoInputFiles);
    }
    output::print_info(&format!("Found {} file(s) to convert", files.len()));

    let options = build_options(&args)?;
    let plan = build_plan(&files, &args.output, &options)?;

    if args.dry_run {
        output::print_info("Dry run; the following commands would be executed:");
        for invocation in plan.iter() {
            println!("  {}", invocation.command_line());
        }
        return Ok(());
    }

    // 计划移交执行器之前记录逐文件路径，供报表使用
    let items: Vec<(PathBuf, PathBuf)> = plan
        .iter()
        .map(|inv| (inv.source.clone(), inv.dest.clone()))
        .collect();
    let total = plan.len();

    let (executor, events) = BatchExecutor::new(plan);
    let handle = executor.start();

    let pb = progress::create_progress_bar(total as u64, "Converting");
    let mut statuses = vec![ItemStatus::NotAttempted; total];
    let mut current = 0usize;
    let mut outcome: Option<(bool, String)> = None;

    // 事件按产生顺序到达；进度条的合并显示只发生在这一层
    for event in events {
        match event {
            ExecutorEvent::CurrentItem { index, path } => {
                current = index;
                pb.set_message(
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string()),
                );
            }
            ExecutorEvent::Log(text) => {
                if args.verbose && !text.is_empty() {
                    pb.suspend(|| print!("{}", text));
                }
            }
            ExecutorEvent::Progress => {
                statuses[current] = ItemStatus::Converted;
                pb.inc(1);
            }
            ExecutorEvent::Finished { success, message } => {
                outcome = Some((success, message));
            }
        }
    }
    handle.join();
    pb.finish_and_clear();

    if let Some((false, _)) = outcome {
        statuses[current] = ItemStatus::Failed;
    }

    for ((source, dest), status) in items.iter().zip(statuses.iter()) {
        if *status == ItemStatus::Converted {
            output::print_conversion(&source.display().to_string(), &dest.display().to_string());
        }
    }

    if let Some(report_path) = &args.report {
        let rows: Vec<ReportRow> = items
            .iter()
            .zip(statuses.iter())
            .map(|((source, dest), status)| ReportRow {
                source: source.clone(),
                dest: dest.clone(),
                status: *status,
            })
            .collect();
        report::write_report(&rows, report_path)?;
        output::print_info(&format!("Report written to {}", report_path.display()));
    }

    match outcome {
        Some((true, _)) => {
            output::print_done(&format!(
                "Converted {} file(s) into '{}'",
                total,
                args.output.display()
            ));
            Ok(())
        }
        Some((false, message)) => {
            // 已完成的文件保留在磁盘上，不回滚
            output::print_warning(&format!(
                "{} file(s) were already converted and remain in '{}'",
                statuses
                    .iter()
                    .filter(|s| **s == ItemStatus::Converted)
                    .count(),
                args.output.display()
            ));
            Err(GmBatchError::Other(message))
        }
        None => {
            output::print_warning("Conversion stopped before completion");
            Ok(())
        }
    }
}

/// 从 CLI 参数装配转换选项
fn build_options(args: &ConvertArgs) -> Result<ConversionOptions> {
    let resize = match &args.resize {
        Some(geometry) => Some(ResizeSpec::parse(geometry, !args.no_aspect)?),
        None => None,
    };

    Ok(ConversionOptions {
        format: args.format,
        quality: args.quality,
        rotation: args.rotate,
        flip: args.flip,
        flop: args.flop,
        resize,
        preserve_profile: args.preserve_profile,
        preserve_structure: args.preserve_structure,
        overwrite: args.overwrite,
    })
}
