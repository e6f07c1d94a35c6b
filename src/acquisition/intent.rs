//! # 入口意图与操作标签
//!
//! ## 设计思路
//!
//! 将“用户选择的入口”和“宿主回调的关联标识”解耦：
//! - `AcquisitionIntent` 表示一次流水线运行的入口语义，运行期间不可变
//! - `OperationTag` 表示一个已发出的异步宿主请求，回调靠它找回对应的处理分支
//!
//! 部分宿主只会回传整数请求码，因此保留一张 标签 ↔ 请求码 映射表，
//! 而不是在路由里写一串数字比较。

use serde::{Deserialize, Serialize};

/// 用户选择的图片获取入口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionIntent {
    /// 先拍照写入预分配目标，再进入裁剪。
    CaptureWithReference,
    /// 直接进入裁剪，由裁剪步骤自行让用户选择来源。
    CaptureWithoutReference,
    /// 从图库选择。
    PickFromGallery,
    /// 通过通用选择器选择，交付结果需经过应用自定义的路径解析。
    PickFromGalleryCustom,
}

impl AcquisitionIntent {
    pub const ALL: [Self; 4] = [
        Self::CaptureWithReference,
        Self::CaptureWithoutReference,
        Self::PickFromGallery,
        Self::PickFromGalleryCustom,
    ];

    /// 是否依赖设备相机能力。
    pub fn requires_camera(self) -> bool {
        matches!(self, Self::CaptureWithReference)
    }

    /// 一次运行中可能登记的全部标签（首个为第一个宿主请求的标签，之后为链式步骤）。
    pub fn tags(self) -> &'static [OperationTag] {
        match self {
            Self::CaptureWithReference => &[OperationTag::Capture, OperationTag::Crop],
            Self::CaptureWithoutReference => &[OperationTag::Crop],
            Self::PickFromGallery => &[OperationTag::Pick],
            Self::PickFromGalleryCustom => &[OperationTag::PickCustom],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CaptureWithReference => "capture_with_reference",
            Self::CaptureWithoutReference => "capture_without_reference",
            Self::PickFromGallery => "pick_from_gallery",
            Self::PickFromGalleryCustom => "pick_from_gallery_custom",
        }
    }
}

/// 异步宿主请求的关联标签。
///
/// 同一时刻未完成的请求之间标签必须唯一，由 `ResultRouter` 负责登记与消费。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationTag {
    Capture,
    Pick,
    PickCustom,
    Crop,
}

/// 标签 ↔ 宿主整数请求码。
const REQUEST_CODES: [(OperationTag, i32); 4] = [
    (OperationTag::Capture, 811_917),
    (OperationTag::PickCustom, 8_119_153),
    (OperationTag::Pick, 200),
    (OperationTag::Crop, 203),
];

impl OperationTag {
    /// 宿主侧使用的整数请求码。
    pub fn request_code(self) -> i32 {
        REQUEST_CODES
            .iter()
            .find(|(tag, _)| *tag == self)
            .map(|(_, code)| *code)
            .unwrap_or_default()
    }

    /// 从宿主回传的请求码还原标签；未知请求码返回 `None`。
    ///
    /// # 示例
    /// ```rust
    /// use image_acquire::acquisition::OperationTag;
    ///
    /// assert_eq!(OperationTag::from_request_code(203), Some(OperationTag::Crop));
    /// assert_eq!(OperationTag::from_request_code(42), None);
    /// ```
    pub fn from_request_code(code: i32) -> Option<Self> {
        REQUEST_CODES
            .iter()
            .find(|(_, candidate)| *candidate == code)
            .map(|(tag, _)| *tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Pick => "pick",
            Self::PickCustom => "pick_custom",
            Self::Crop => "crop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_capture_with_reference_needs_camera() {
        let needing: Vec<_> = AcquisitionIntent::ALL
            .into_iter()
            .filter(|intent| intent.requires_camera())
            .collect();
        assert_eq!(needing, vec![AcquisitionIntent::CaptureWithReference]);
    }

    #[test]
    fn request_code_table_is_bijective() {
        for (tag, code) in REQUEST_CODES {
            assert_eq!(tag.request_code(), code);
            assert_eq!(OperationTag::from_request_code(code), Some(tag));
        }

        let mut codes: Vec<_> = REQUEST_CODES.iter().map(|(_, code)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), REQUEST_CODES.len(), "request codes must not collide");
    }

    #[test]
    fn tags_follow_entry_point() {
        assert_eq!(
            AcquisitionIntent::CaptureWithReference.tags(),
            &[OperationTag::Capture, OperationTag::Crop]
        );
        assert_eq!(AcquisitionIntent::CaptureWithoutReference.tags(), &[OperationTag::Crop]);
        assert_eq!(AcquisitionIntent::PickFromGallery.tags(), &[OperationTag::Pick]);
        assert_eq!(
            AcquisitionIntent::PickFromGalleryCustom.tags(),
            &[OperationTag::PickCustom]
        );
    }

    #[test]
    fn intent_serializes_as_snake_case() {
        let json = serde_json::to_string(&AcquisitionIntent::PickFromGalleryCustom)
            .expect("serialize intent");
        assert_eq!(json, "\"pick_from_gallery_custom\"");
    }
}
