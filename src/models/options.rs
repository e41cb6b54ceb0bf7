//! # 转换选项数据模型
//!
//! 定义一次批量转换的全部用户选项，由 CLI 装配、命令构建器消费。
//!
//! ## 依赖关系
//! - 被 `cli/convert.rs` 和 `batch/builder.rs` 使用
//! - 无外部模块依赖

use clap::ValueEnum;

use crate::error::{GmBatchError, Result};

/// 输出格式
///
/// `Keep` 表示保持输入格式不变（不替换扩展名）。
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// JPEG
    Jpg,
    /// PNG
    Png,
    /// WebP
    Webp,
    /// TIFF
    Tiff,
    /// Windows Bitmap
    Bmp,
    /// Same as input
    Keep,
}

impl OutputFormat {
    /// 输出文件扩展名；`Keep` 无固定扩展名
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Jpg => Some("jpg"),
            OutputFormat::Png => Some("png"),
            OutputFormat::Webp => Some("webp"),
            OutputFormat::Tiff => Some("tiff"),
            OutputFormat::Bmp => Some("bmp"),
            OutputFormat::Keep => None,
        }
    }

    /// 该格式是否支持有损质量参数
    ///
    /// 只有这些格式会收到 `-quality` 标志；其余格式忽略质量设置。
    pub fn supports_quality(&self) -> bool {
        matches!(
            self,
            OutputFormat::Jpg | OutputFormat::Webp | OutputFormat::Tiff
        )
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Keep => write!(f, "keep"),
            _ => write!(f, "{}", self.extension().unwrap_or("keep")),
        }
    }
}

/// 旋转角度（顺时针）
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[value(name = "0")]
    None,
    /// 90 degrees clockwise
    #[value(name = "90")]
    Cw90,
    /// 180 degrees
    #[value(name = "180")]
    Cw180,
    /// 270 degrees clockwise
    #[value(name = "270")]
    Cw270,
}

impl Rotation {
    /// 角度数值；0 度不产生 `-rotate` 标志
    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::None => 0,
            Rotation::Cw90 => 90,
            Rotation::Cw180 => 180,
            Rotation::Cw270 => 270,
        }
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// 缩放设置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    /// 目标宽度（像素）
    pub width: u32,
    /// 目标高度（像素）
    pub height: u32,
    /// 是否保持纵横比（附加 Lanczos 滤波与 unsharp 锐化）
    pub keep_aspect: bool,
}

impl ResizeSpec {
    /// 从 `WIDTHxHEIGHT` 几何字符串解析
    pub fn parse(geometry: &str, keep_aspect: bool) -> Result<Self> {
        let (w, h) = geometry
            .split_once(['x', 'X'])
            .ok_or_else(|| GmBatchError::InvalidGeometry(geometry.to_string()))?;

        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| GmBatchError::InvalidGeometry(geometry.to_string()))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| GmBatchError::InvalidGeometry(geometry.to_string()))?;

        if width == 0 || height == 0 {
            return Err(GmBatchError::InvalidGeometry(geometry.to_string()));
        }

        Ok(ResizeSpec {
            width,
            height,
            keep_aspect,
        })
    }

    /// gm 几何参数表示（`WIDTHxHEIGHT`）
    pub fn geometry(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// 一次批量转换的全部选项
///
/// 由展示层（CLI）装配；`start` 之后不再变化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// 输出格式
    pub format: OutputFormat,
    /// 有损格式的质量 (1-100)；不支持质量的格式忽略该值
    pub quality: u8,
    /// 旋转角度
    pub rotation: Rotation,
    /// 垂直镜像（gm `-flip`，上下翻转）
    pub flip: bool,
    /// 水平镜像（gm `-flop`，左右翻转）
    pub flop: bool,
    /// 缩放设置
    pub resize: Option<ResizeSpec>,
    /// 保留色彩配置文件（gm `-profile RGB.icm`）
    pub preserve_profile: bool,
    /// 在输出目录下镜像源目录结构
    pub preserve_structure: bool,
    /// 覆盖已存在的输出文件
    pub overwrite: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            format: OutputFormat::Keep,
            quality: 90,
            rotation: Rotation::None,
            flip: false,
            flop: false,
            resize: None,
            preserve_profile: false,
            preserve_structure: false,
            overwrite: false,
        }
    }
}
