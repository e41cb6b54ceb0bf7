//! # 命令构建器
//!
//! 将（输入文件列表，输出目录，转换选项）确定性地翻译为有序的 gm 调用序列。
//!
//! ## 功能
//! - 按固定且稳定的顺序装配 gm convert 参数
//! - 目标目录按需创建（幂等），可镜像源目录结构
//! - 除目录创建外不做任何 I/O，绝不调用外部工具
//!
//! ## 不变式
//! - 计划与输入列表等长且保序
//! - 不支持质量参数的格式绝不收到 `-quality`
//! - 调用引用的目标目录在构建成功时已存在
//! - 相同输入两次构建产生逐字节相同的计划
//!
//! ## 依赖关系
//! - 被 `commands/convert.rs` 调用
//! - 使用 `models/` 的数据模型
//! - 使用 `utils/gm.rs` 的 GM_COMMAND

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{GmBatchError, Result};
use crate::models::{ConversionOptions, InputFile};
use crate::utils::gm::GM_COMMAND;

/// 一条完全解析的外部工具调用
///
/// 参数表以 `convert` 动词开头、以目标路径结尾，不含任何占位符。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// 外部工具名（gm）
    pub program: String,
    /// 参数表：`convert <source> [flags...] <destination>`
    pub args: Vec<String>,
    /// 源文件路径
    pub source: PathBuf,
    /// 目标文件路径
    pub dest: PathBuf,
}

impl Invocation {
    /// 完整命令行的显示形式（日志与 dry-run 用）
    pub fn command_line(&self) -> String {
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// 一次运行的有序调用计划
///
/// 每个输入文件对应一条调用，顺序与输入列表一致。构建后不再变化，
/// 顺序同时决定执行顺序与进度上报顺序。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobPlan {
    invocations: Vec<Invocation>,
}

impl JobPlan {
    /// 从调用列表创建计划
    pub fn new(invocations: Vec<Invocation>) -> Self {
        JobPlan { invocations }
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Invocation> {
        self.invocations.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Invocation> {
        self.invocations.get(index)
    }
}

/// 构建作业计划
///
/// 校验失败时无任何部分副作用遗留（目录创建除外，且创建是幂等的）。
pub fn build_plan(
    files: &[InputFile],
    output_dir: &Path,
    options: &ConversionOptions,
) -> Result<JobPlan> {
    if files.is_empty() {
        return Err(GmBatchError::NoInputFiles);
    }

    validate_output_dir(output_dir)?;

    let mut invocations = Vec::with_capacity(files.len());
    for file in files {
        invocations.push(build_invocation(file, output_dir, options)?);
    }

    Ok(JobPlan::new(invocations))
}

/// 校验输出目录可用
fn validate_output_dir(output_dir: &Path) -> Result<()> {
    let meta = fs::metadata(output_dir).map_err(|e| GmBatchError::OutputDirUnusable {
        path: output_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    if !meta.is_dir() {
        return Err(GmBatchError::OutputDirUnusable {
            path: output_dir.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }
    if meta.permissions().readonly() {
        return Err(GmBatchError::OutputDirUnusable {
            path: output_dir.display().to_string(),
            reason: "not writable".to_string(),
        });
    }

    Ok(())
}

/// 为单个输入文件构建调用
fn build_invocation(
    file: &InputFile,
    output_dir: &Path,
    options: &ConversionOptions,
) -> Result<Invocation> {
    let source = file.path();

    // 目标目录：镜像结构时拼接源文件父目录相对文件系统根的路径
    let dest_dir = if options.preserve_structure {
        output_dir.join(relative_to_root(source))
    } else {
        output_dir.to_path_buf()
    };

    fs::create_dir_all(&dest_dir).map_err(|e| GmBatchError::DirectoryCreate {
        file: source.display().to_string(),
        path: dest_dir.display().to_string(),
        source: e,
    })?;

    // 目标文件名：显式格式替换扩展名，Keep 保持原名
    let file_name = match options.format.extension() {
        Some(ext) => {
            let stem = source
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("image");
            format!("{}.{}", stem, ext)
        }
        None => source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("image")
            .to_string(),
    };
    let dest = dest_dir.join(file_name);

    if dest.exists() && !options.overwrite {
        return Err(GmBatchError::DestinationExists {
            path: dest.display().to_string(),
        });
    }

    // 参数顺序固定：source, resize, rotate, flip, flop, quality, profile, dest
    let mut args = vec!["convert".to_string(), source.display().to_string()];

    if let Some(resize) = &options.resize {
        args.push("-resize".to_string());
        args.push(resize.geometry());
        if resize.keep_aspect {
            args.push("-filter".to_string());
            args.push("Lanczos".to_string());
            args.push("-unsharp".to_string());
            args.push("0.25x0.25+8+0.065".to_string());
        }
    }

    if options.rotation.degrees() != 0 {
        args.push("-rotate".to_string());
        args.push(options.rotation.degrees().to_string());
    }

    if options.flip {
        args.push("-flip".to_string());
    }
    if options.flop {
        args.push("-flop".to_string());
    }

    if options.format.supports_quality() {
        args.push("-quality".to_string());
        args.push(options.quality.to_string());
    }

    if options.preserve_profile {
        args.push("-profile".to_string());
        args.push("RGB.icm".to_string());
    }

    args.push(dest.display().to_string());

    Ok(Invocation {
        program: GM_COMMAND.to_string(),
        args,
        source: source.to_path_buf(),
        dest,
    })
}

/// 源文件父目录相对于文件系统根的路径
fn relative_to_root(source: &Path) -> PathBuf {
    source
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter(|c| matches!(c, Component::Normal(_)))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutputFormat, ResizeSpec, Rotation};
    use std::fs;

    struct Scratch {
        input_dir: PathBuf,
        output_dir: PathBuf,
    }

    fn scratch(name: &str) -> Scratch {
        let base = std::env::temp_dir().join(format!("gmbatch_builder_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&base);
        let input_dir = base.join("in");
        let output_dir = base.join("out");
        fs::create_dir_all(&input_dir).unwrap();
        fs::create_dir_all(&output_dir).unwrap();
        Scratch {
            input_dir,
            output_dir,
        }
    }

    fn make_input(dir: &Path, name: &str) -> InputFile {
        let path = dir.join(name);
        fs::write(&path, b"fake image").unwrap();
        InputFile::new(path).unwrap()
    }

    #[test]
    fn test_plan_length_and_order_match_inputs() {
        let s = scratch("order");

        // 对不同规模的输入列表（含乱序文件名）验证等长与保序
        for n in [1usize, 2, 3, 7, 16] {
            let files: Vec<InputFile> = (0..n)
                .map(|i| make_input(&s.input_dir, &format!("img_{}.png", (n * 31 + i) % 97)))
                .collect();

            let plan = build_plan(&files, &s.output_dir, &ConversionOptions::default()).unwrap();

            assert_eq!(plan.len(), files.len());
            for (inv, file) in plan.iter().zip(files.iter()) {
                assert_eq!(inv.source, file.path());
            }
        }
    }

    #[test]
    fn test_no_quality_flag_for_non_lossy_formats() {
        let s = scratch("quality");
        let files = vec![make_input(&s.input_dir, "a.jpg")];

        for format in [OutputFormat::Png, OutputFormat::Bmp, OutputFormat::Keep] {
            let options = ConversionOptions {
                format,
                quality: 1,
                ..Default::default()
            };
            let plan = build_plan(&files, &s.output_dir, &options).unwrap();
            assert!(
                !plan.get(0).unwrap().args.iter().any(|a| a == "-quality"),
                "{:?} must not receive -quality",
                format
            );
        }
    }

    #[test]
    fn test_webp_with_quality_scenario() {
        let s = scratch("webp");
        let files = vec![
            make_input(&s.input_dir, "a.png"),
            make_input(&s.input_dir, "b.jpg"),
        ];
        let options = ConversionOptions {
            format: OutputFormat::Webp,
            quality: 80,
            ..Default::default()
        };

        let plan = build_plan(&files, &s.output_dir, &options).unwrap();

        let first = plan.get(0).unwrap();
        assert_eq!(first.program, "gm");
        assert_eq!(
            first.args,
            vec![
                "convert".to_string(),
                s.input_dir.join("a.png").display().to_string(),
                "-quality".to_string(),
                "80".to_string(),
                s.output_dir.join("a.webp").display().to_string(),
            ]
        );
        assert_eq!(plan.get(1).unwrap().dest, s.output_dir.join("b.webp"));
    }

    #[test]
    fn test_keep_format_with_rotate_and_flip_order() {
        let s = scratch("rotate");
        let files = vec![make_input(&s.input_dir, "a.jpeg")];
        let options = ConversionOptions {
            format: OutputFormat::Keep,
            rotation: Rotation::Cw90,
            flip: true,
            ..Default::default()
        };

        let plan = build_plan(&files, &s.output_dir, &options).unwrap();
        let inv = plan.get(0).unwrap();

        // 保持原扩展名
        assert_eq!(inv.dest, s.output_dir.join("a.jpeg"));
        // -rotate 90 在 -flip 之前，目标路径最后
        assert_eq!(
            inv.args[2..],
            [
                "-rotate".to_string(),
                "90".to_string(),
                "-flip".to_string(),
                s.output_dir.join("a.jpeg").display().to_string(),
            ]
        );
    }

    #[test]
    fn test_resize_with_aspect_adds_filter_and_unsharp() {
        let s = scratch("resize");
        let files = vec![make_input(&s.input_dir, "a.png")];
        let options = ConversionOptions {
            resize: Some(ResizeSpec {
                width: 800,
                height: 600,
                keep_aspect: true,
            }),
            ..Default::default()
        };

        let plan = build_plan(&files, &s.output_dir, &options).unwrap();
        let args = &plan.get(0).unwrap().args;
        let resize_at = args.iter().position(|a| a == "-resize").unwrap();
        assert_eq!(args[resize_at + 1], "800x600");
        assert_eq!(args[resize_at + 2], "-filter");
        assert_eq!(args[resize_at + 3], "Lanczos");
        assert_eq!(args[resize_at + 4], "-unsharp");
        assert_eq!(args[resize_at + 5], "0.25x0.25+8+0.065");
    }

    #[test]
    fn test_resize_without_aspect_omits_filter() {
        let s = scratch("resize_plain");
        let files = vec![make_input(&s.input_dir, "a.png")];
        let options = ConversionOptions {
            resize: Some(ResizeSpec {
                width: 800,
                height: 600,
                keep_aspect: false,
            }),
            ..Default::default()
        };

        let plan = build_plan(&files, &s.output_dir, &options).unwrap();
        let args = &plan.get(0).unwrap().args;
        assert!(args.iter().any(|a| a == "-resize"));
        assert!(!args.iter().any(|a| a == "-filter"));
        assert!(!args.iter().any(|a| a == "-unsharp"));
    }

    #[test]
    fn test_flat_destinations_share_output_dir() {
        let s = scratch("flat");
        let sub = s.input_dir.join("sub");
        fs::create_dir_all(&sub).unwrap();
        let files = vec![
            make_input(&s.input_dir, "a.png"),
            make_input(&sub, "b.png"),
        ];

        let plan = build_plan(&files, &s.output_dir, &ConversionOptions::default()).unwrap();
        for inv in plan.iter() {
            assert_eq!(inv.dest.parent().unwrap(), s.output_dir);
        }
    }

    #[test]
    fn test_preserve_structure_mirrors_source_tree() {
        let s = scratch("mirror");
        let sub = s.input_dir.join("sub");
        fs::create_dir_all(&sub).unwrap();
        let files = vec![make_input(&sub, "b.png")];
        let options = ConversionOptions {
            preserve_structure: true,
            ..Default::default()
        };

        let plan = build_plan(&files, &s.output_dir, &options).unwrap();
        let dest = &plan.get(0).unwrap().dest;

        // 输出路径以输出目录为根，镜像源文件的绝对父路径
        assert!(dest.starts_with(&s.output_dir));
        assert!(dest.parent().unwrap().ends_with(relative_to_root(files[0].path())));
        assert!(dest.parent().unwrap().is_dir());
    }

    #[test]
    fn test_build_is_deterministic() {
        let s = scratch("deterministic");
        let files = vec![
            make_input(&s.input_dir, "a.png"),
            make_input(&s.input_dir, "b.png"),
        ];
        let options = ConversionOptions {
            format: OutputFormat::Jpg,
            quality: 75,
            rotation: Rotation::Cw180,
            flop: true,
            ..Default::default()
        };

        let first = build_plan(&files, &s.output_dir, &options).unwrap();
        let second = build_plan(&files, &s.output_dir, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_list_is_rejected() {
        let s = scratch("empty");
        let result = build_plan(&[], &s.output_dir, &ConversionOptions::default());
        assert!(matches!(result, Err(GmBatchError::NoInputFiles)));
    }

    #[test]
    fn test_missing_output_dir_is_rejected() {
        let s = scratch("missing_out");
        let files = vec![make_input(&s.input_dir, "a.png")];
        let result = build_plan(
            &files,
            &s.output_dir.join("does_not_exist"),
            &ConversionOptions::default(),
        );
        assert!(matches!(result, Err(GmBatchError::OutputDirUnusable { .. })));
    }

    #[test]
    fn test_existing_destination_requires_overwrite() {
        let s = scratch("overwrite");
        let files = vec![make_input(&s.input_dir, "a.png")];
        fs::write(s.output_dir.join("a.png"), b"already here").unwrap();

        let refused = build_plan(&files, &s.output_dir, &ConversionOptions::default());
        assert!(matches!(refused, Err(GmBatchError::DestinationExists { .. })));

        let options = ConversionOptions {
            overwrite: true,
            ..Default::default()
        };
        assert!(build_plan(&files, &s.output_dir, &options).is_ok());
    }
}
