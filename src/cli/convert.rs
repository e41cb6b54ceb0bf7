//! # convert 子命令 CLI 定义
//!
//! 批量转换图像文件 (png/jpg/jpeg/bmp/tif/tiff/webp)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`
//! - 使用 `models/options.rs` 的选项枚举

use clap::Args;
use std::path::PathBuf;

use crate::models::{OutputFormat, Rotation};

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input image files or directories
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory for converted images
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target output format ('keep' leaves the format unchanged)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Keep)]
    pub format: OutputFormat,

    /// Quality for lossy formats (1-100); ignored otherwise
    #[arg(short, long, default_value_t = 90, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Clockwise rotation in degrees
    #[arg(long, value_enum, default_value_t = Rotation::None)]
    pub rotate: Rotation,

    /// Mirror the image vertically (gm -flip)
    #[arg(long, default_value_t = false)]
    pub flip: bool,

    /// Mirror the image horizontally (gm -flop)
    #[arg(long, default_value_t = false)]
    pub flop: bool,

    /// Resize to WIDTHxHEIGHT
    #[arg(long, value_name = "WxH")]
    pub resize: Option<String>,

    /// Do not preserve the aspect ratio when resizing
    #[arg(long, default_value_t = false)]
    pub no_aspect: bool,

    /// Preserve color profiles
    #[arg(long, default_value_t = false)]
    pub preserve_profile: bool,

    /// Mirror the source directory layout under the output directory
    #[arg(long, default_value_t = false)]
    pub preserve_structure: bool,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Recurse into subdirectories of directory inputs
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Glob pattern filter for directory inputs
    #[arg(short, long, default_value = "*")]
    pub pattern: String,

    /// Print the job plan without executing it
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Echo captured gm output while converting
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Write a per-file CSV report after the run
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}
