//! # 输入文件数据模型
//!
//! 校验并收集待转换的图像文件。
//!
//! ## 功能
//! - 识别固定的图像扩展名集合（大小写不敏感）
//! - 支持文件和目录输入，目录可递归遍历
//! - glob 模式过滤
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 和 `batch/builder.rs` 使用
//! - 使用 `walkdir` 遍历目录

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{GmBatchError, Result};

/// 识别的图像扩展名（小写）
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "webp"];

/// 一个已校验的输入文件
///
/// 保证路径存在且扩展名属于识别集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: PathBuf,
}

impl InputFile {
    /// 校验并包装一个输入文件路径
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            return Err(GmBatchError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        if !has_image_extension(&path) {
            return Err(GmBatchError::UnsupportedExtension {
                path: path.display().to_string(),
            });
        }
        Ok(InputFile { path })
    }

    /// 文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// 扩展名是否属于识别的图像集合（大小写不敏感）
pub fn has_image_extension(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// 收集输入文件列表
///
/// 文件输入逐个校验；目录输入按扩展名过滤（可递归），再按 glob 模式筛选。
/// 结果排序后返回，保证作业计划的确定性。
pub fn collect_inputs(inputs: &[PathBuf], recursive: bool, pattern: &str) -> Result<Vec<InputFile>> {
    let glob_pattern = glob::Pattern::new(pattern).map_err(|e| {
        GmBatchError::Other(format!("Invalid pattern '{}': {}", pattern, e))
    })?;

    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(input)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
            {
                let path = entry.path();
                if !has_image_extension(path) {
                    continue;
                }
                let matches = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|name| glob_pattern.matches(name))
                    .unwrap_or(false);
                if matches {
                    files.push(InputFile::new(path.to_path_buf())?);
                }
            }
        } else {
            // 显式给出的文件不经过 glob 过滤，但必须存在且是图像
            files.push(InputFile::new(input.clone())?);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup();
    Ok(files)
}
