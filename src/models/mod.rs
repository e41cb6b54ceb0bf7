//! # 数据模型模块
//!
//! 定义转换请求的数据模型：转换选项与输入文件。
//!
//! ## 依赖关系
//! - 被 `cli/`, `commands/` 和 `batch/` 使用
//! - 子模块: options, input

pub mod input;
pub mod options;

pub use input::InputFile;
pub use options::{ConversionOptions, OutputFormat, ResizeSpec, Rotation};
