//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `AcquireConfig`，保证运行时行为可观测、可调整、可测试。
//! 裁剪参数 `CropOptions` 对协调器是不透明的：协调器只负责原样转发给裁剪请求，
//! 取值合法性在配置层通过 `validate` 一次性校验。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置。
//! - `CropPreset` 负责预设字符串解析与反向输出（camera / freeform）。
//! - `CropOptions::from_preset` 将预设转换为完整参数组合。

use serde::{Deserialize, Serialize};

use super::AcquireError;

const DEGREES_360: u32 = 360;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropShape {
    Rectangle,
    Oval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guidelines {
    Off,
    OnTouch,
    On,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    FitCenter,
    Center,
    CenterCrop,
    CenterInside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressFormat {
    Jpeg,
    Png,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestSizeOption {
    None,
    Sampling,
    ResizeInside,
    ResizeFit,
    ResizeExact,
}

/// 裁剪步骤的扁平参数集合。
///
/// 颜色统一使用 ARGB `u32`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    pub crop_shape: CropShape,
    pub guidelines: Guidelines,
    pub scale_type: ScaleType,
    pub fix_aspect_ratio: bool,
    pub aspect_ratio_x: u32,
    pub aspect_ratio_y: u32,
    pub auto_zoom_enabled: bool,
    pub multi_touch_enabled: bool,
    pub center_move_enabled: bool,
    pub max_zoom: u32,
    pub show_crop_overlay: bool,
    pub snap_radius: f32,
    pub touch_radius: f32,
    /// 初始裁剪框内边距比例，取值 `[0, 0.5)`。
    pub initial_crop_window_padding_ratio: f32,
    pub border_line_thickness: f32,
    pub border_line_color: u32,
    pub border_corner_thickness: f32,
    pub border_corner_offset: f32,
    pub border_corner_length: f32,
    pub border_corner_color: u32,
    pub guidelines_thickness: f32,
    pub guidelines_color: u32,
    pub background_color: u32,
    pub min_crop_window_width: u32,
    pub min_crop_window_height: u32,
    pub min_crop_result_width: u32,
    pub min_crop_result_height: u32,
    pub max_crop_result_width: u32,
    pub max_crop_result_height: u32,
    pub activity_title: String,
    pub crop_menu_crop_button_title: Option<String>,
    pub output_uri: Option<String>,
    pub output_compress_format: CompressFormat,
    pub output_compress_quality: u8,
    pub output_request_width: u32,
    pub output_request_height: u32,
    pub output_request_size_option: RequestSizeOption,
    pub no_output_image: bool,
    pub initial_rotation: u32,
    pub allow_rotation: bool,
    pub allow_flipping: bool,
    pub allow_counter_rotation: bool,
    pub flip_horizontally: bool,
    pub flip_vertically: bool,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            crop_shape: CropShape::Rectangle,
            guidelines: Guidelines::OnTouch,
            scale_type: ScaleType::FitCenter,
            fix_aspect_ratio: false,
            aspect_ratio_x: 1,
            aspect_ratio_y: 1,
            auto_zoom_enabled: true,
            multi_touch_enabled: false,
            center_move_enabled: true,
            max_zoom: 4,
            show_crop_overlay: true,
            snap_radius: 3.0,
            touch_radius: 48.0,
            initial_crop_window_padding_ratio: 0.1,
            border_line_thickness: 3.0,
            border_line_color: 0xAAFF_FFFF,
            border_corner_thickness: 2.0,
            border_corner_offset: 5.0,
            border_corner_length: 14.0,
            border_corner_color: 0xFFFF_FFFF,
            guidelines_thickness: 1.0,
            guidelines_color: 0xAAFF_FFFF,
            background_color: 0x7700_0000,
            min_crop_window_width: 42,
            min_crop_window_height: 42,
            min_crop_result_width: 40,
            min_crop_result_height: 40,
            max_crop_result_width: 99_999,
            max_crop_result_height: 99_999,
            activity_title: String::new(),
            crop_menu_crop_button_title: None,
            output_uri: None,
            output_compress_format: CompressFormat::Jpeg,
            output_compress_quality: 90,
            output_request_width: 0,
            output_request_height: 0,
            output_request_size_option: RequestSizeOption::None,
            no_output_image: false,
            initial_rotation: 0,
            allow_rotation: true,
            allow_flipping: true,
            allow_counter_rotation: false,
            flip_horizontally: false,
            flip_vertically: false,
        }
    }
}

/// 裁剪参数预设。
///
/// - `Camera`：拍照后裁剪，保留常规方形比例与触摸辅助线
/// - `Freeform`：无来源直接裁剪，椭圆裁剪框、固定比例、PNG 输出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPreset {
    Camera,
    Freeform,
}

impl CropPreset {
    /// 从外部字符串解析预设。
    pub fn from_str(preset: &str) -> Result<Self, AcquireError> {
        match preset.trim().to_lowercase().as_str() {
            "camera" => Ok(Self::Camera),
            "freeform" => Ok(Self::Freeform),
            other => Err(AcquireError::InvalidConfig(format!(
                "未知裁剪预设：{}（可选：camera / freeform）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Freeform => "freeform",
        }
    }
}

impl CropOptions {
    pub fn from_preset(preset: CropPreset) -> Self {
        match preset {
            CropPreset::Camera => Self {
                guidelines: Guidelines::OnTouch,
                multi_touch_enabled: true,
                min_crop_window_width: 24,
                min_crop_window_height: 24,
                min_crop_result_width: 20,
                min_crop_result_height: 20,
                output_request_size_option: RequestSizeOption::ResizeInside,
                initial_rotation: 90,
                ..Self::default()
            },
            CropPreset::Freeform => Self {
                crop_shape: CropShape::Oval,
                guidelines: Guidelines::On,
                scale_type: ScaleType::Center,
                fix_aspect_ratio: true,
                aspect_ratio_x: 4,
                aspect_ratio_y: 16,
                auto_zoom_enabled: false,
                max_zoom: 8,
                show_crop_overlay: false,
                allow_flipping: false,
                snap_radius: 10.0,
                touch_radius: 30.0,
                initial_crop_window_padding_ratio: 0.3,
                border_line_thickness: 5.0,
                border_corner_thickness: 6.0,
                border_corner_offset: 2.0,
                border_corner_length: 20.0,
                border_corner_color: 0xFFFF_0000,
                guidelines_thickness: 5.0,
                guidelines_color: 0xFFFF_0000,
                background_color: 0x771E_3C5A,
                min_crop_window_width: 20,
                min_crop_window_height: 20,
                min_crop_result_width: 16,
                min_crop_result_height: 16,
                max_crop_result_width: 999,
                max_crop_result_height: 999,
                output_compress_format: CompressFormat::Png,
                output_compress_quality: 50,
                output_request_width: 100,
                output_request_height: 100,
                output_request_size_option: RequestSizeOption::ResizeFit,
                initial_rotation: 180,
                allow_rotation: false,
                allow_counter_rotation: true,
                flip_horizontally: true,
                flip_vertically: true,
                ..Self::default()
            },
        }
    }

    /// 校验参数组合是否合法。
    pub fn validate(&self) -> Result<(), AcquireError> {
        let fail = |message: &str| Err(AcquireError::InvalidConfig(message.to_string()));

        if !(self.touch_radius >= 0.0) {
            return fail("touch_radius 不能小于 0");
        }
        if !(0.0..0.5).contains(&self.initial_crop_window_padding_ratio) {
            return fail("initial_crop_window_padding_ratio 必须在 [0, 0.5) 之间");
        }
        if self.aspect_ratio_x == 0 || self.aspect_ratio_y == 0 {
            return fail("aspect_ratio 必须大于 0");
        }
        if !(self.border_line_thickness >= 0.0) {
            return fail("border_line_thickness 不能小于 0");
        }
        if !(self.border_corner_thickness >= 0.0) {
            return fail("border_corner_thickness 不能小于 0");
        }
        if !(self.guidelines_thickness >= 0.0) {
            return fail("guidelines_thickness 不能小于 0");
        }
        if self.max_crop_result_width < self.min_crop_result_width {
            return fail("max_crop_result_width 不能小于 min_crop_result_width");
        }
        if self.max_crop_result_height < self.min_crop_result_height {
            return fail("max_crop_result_height 不能小于 min_crop_result_height");
        }
        if self.initial_rotation > DEGREES_360 {
            return fail("initial_rotation 必须在 0~360 之间");
        }
        if self.output_compress_quality > 100 {
            return fail("output_compress_quality 必须在 0~100 之间");
        }

        Ok(())
    }
}

/// 图片采集配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireConfig {
    /// 预分配拍照目标所在目录。
    pub target_dir: String,
    /// 目标文件名前缀。
    pub file_prefix: String,
    /// 文件名时间戳格式（chrono 格式串）。
    pub date_format: String,
    pub file_suffix: String,
    pub file_extension: String,
    /// 通用选择器（`PickCustom`）标题。
    pub chooser_title: String,
    /// 拍照后裁剪使用的参数。
    pub capture_crop: CropOptions,
    /// 无来源直接裁剪使用的参数。
    pub freeform_crop: CropOptions,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            target_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            file_prefix: "JPEG_".to_string(),
            date_format: "%Y%m%d_%H%M%S".to_string(),
            file_suffix: "_".to_string(),
            file_extension: ".jpg".to_string(),
            chooser_title: "Select Picture".to_string(),
            capture_crop: CropOptions::from_preset(CropPreset::Camera),
            freeform_crop: CropOptions::from_preset(CropPreset::Freeform),
        }
    }
}

impl AcquireConfig {
    /// 按预设取裁剪参数。
    pub fn crop_options(&self, preset: CropPreset) -> &CropOptions {
        match preset {
            CropPreset::Camera => &self.capture_crop,
            CropPreset::Freeform => &self.freeform_crop,
        }
    }

    pub fn validate(&self) -> Result<(), AcquireError> {
        if self.file_extension.is_empty() {
            return Err(AcquireError::InvalidConfig("file_extension 不能为空".to_string()));
        }
        if self.date_format.trim().is_empty() {
            return Err(AcquireError::InvalidConfig("date_format 不能为空".to_string()));
        }
        self.capture_crop.validate()?;
        self.freeform_crop.validate()
    }
}
