//! # 前端 / 宿主端口
//!
//! 协调器只通过这个 trait 与外部 UI 层交互：所有请求都是发出即返回，
//! 完成结果稍后经由协调器的 `on_*` 回调入口送回。

use super::{CropOptions, OperationOutcome, OperationTag, PendingTarget};

pub trait AcquireHost {
    /// 发起拍照，照片写入 `target`。
    fn dispatch_capture_request(&mut self, target: &PendingTarget);

    fn dispatch_permission_request(&mut self);

    /// 发起图库选择；`OperationTag::PickCustom` 表示通用选择器，此时带上选择器标题。
    fn dispatch_pick_request(&mut self, tag: OperationTag, chooser_title: Option<&str>);

    /// 发起裁剪；`source` 为 `None` 时由裁剪步骤自行提供来源选择。
    fn dispatch_crop_request(&mut self, source: Option<&str>, options: &CropOptions);

    /// 展示权限说明对话框，用户选择经 `Coordinator::on_rationale_choice` 送回。
    fn show_permission_rationale(&mut self);

    /// 向 UI 交付结果。
    fn report_outcome(&mut self, outcome: &OperationOutcome);
}
