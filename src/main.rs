//! # 图片采集协调器 — 演示入口
//!
//! 本文件仅负责日志初始化、设置加载，并用控制台前端跑一段脚本化会话。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;

use image_acquire::acquisition::{
    AcquireHost, AcquisitionIntent, Coordinator, CropOptions, HostResult, OperationOutcome,
    OperationTag, PendingTarget, ProbeSnapshot, StaticProbe,
};
use image_acquire::error::AppError;
use image_acquire::settings::AcquireSettings;

/// 只把宿主请求打印到日志的前端。
struct ConsoleHost;

impl AcquireHost for ConsoleHost {
    fn dispatch_capture_request(&mut self, target: &PendingTarget) {
        log::info!("[host] 拍照请求 -> {}", target.reference());
    }

    fn dispatch_permission_request(&mut self) {
        log::info!("[host] 权限请求");
    }

    fn dispatch_pick_request(&mut self, tag: OperationTag, chooser_title: Option<&str>) {
        log::info!(
            "[host] 图库选择请求 ({}, code={}, title={:?})",
            tag.as_str(),
            tag.request_code(),
            chooser_title
        );
    }

    fn dispatch_crop_request(&mut self, source: Option<&str>, options: &CropOptions) {
        log::info!(
            "[host] 裁剪请求 source={:?} shape={:?} format={:?}",
            source,
            options.crop_shape,
            options.output_compress_format
        );
    }

    fn show_permission_rationale(&mut self) {
        log::info!("[host] 展示权限说明对话框");
    }

    fn report_outcome(&mut self, outcome: &OperationOutcome) {
        match outcome {
            OperationOutcome::Success(reference) => log::info!("[host] ✅ 成功: {}", reference),
            OperationOutcome::Cancelled => log::info!("[host] ↩️ 用户取消"),
            OperationOutcome::Failed(err) => {
                log::warn!("[host] ❌ 失败: {} ({})", err, err.code())
            }
        }
    }
}

fn load_settings() -> Result<AcquireSettings, AppError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => AcquireSettings::load_from_path(&path),
        None => Ok(AcquireSettings::default()),
    }
}

fn run() -> Result<(), AppError> {
    let settings = load_settings()?;
    if settings.log_config {
        log::info!("setup: config = {:?}", settings.acquire);
    }

    let probe = StaticProbe(ProbeSnapshot {
        has_camera: true,
        permission_granted: false,
        should_show_rationale: false,
        supports_rationale: true,
    });
    let mut coordinator = Coordinator::new(Box::new(probe), settings.acquire)?;
    coordinator.bind(Box::new(ConsoleHost));
    coordinator.on_create();
    log::info!("setup: complete");

    // 图库选择
    coordinator.begin(AcquisitionIntent::PickFromGallery)?;
    coordinator.on_pick_result(Some("file:///sdcard/DCIM/sample.jpg".to_string()));

    // 拍照 → 授权 → 自动裁剪
    coordinator.begin(AcquisitionIntent::CaptureWithReference)?;
    coordinator.on_permission_result(true);
    coordinator.on_capture_result(HostResult::ok(None));
    coordinator.on_crop_result(HostResult::ok(Some("file:/sdcard/cropped.jpg".to_string())));

    // 无来源裁剪，用户取消
    coordinator.begin(AcquisitionIntent::CaptureWithoutReference)?;
    coordinator.on_crop_result(HostResult::cancelled());

    coordinator.unbind();
    // 解绑后的迟到回调被吸收
    coordinator.on_crop_result(HostResult::ok(Some("file:/sdcard/late.jpg".to_string())));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("演示会话失败: {err}");
        std::process::exit(1);
    }
}
