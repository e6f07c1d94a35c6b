//! # 结果路由模块
//!
//! ## 设计思路
//!
//! 宿主回调只带一个操作标签和原始数据，路由器负责：
//! 1. 按标签找回登记时的上下文（拍照目标）
//! 2. 把原始状态映射为统一的 `OperationOutcome`
//! 3. 归一化交付的引用
//!
//! 每个登记的标签只能被消费一次；未登记的标签一律产出
//! `Failed(unrecognized operation)`，用于吸收已被取代的旧回调。
//!
//! ## 映射表
//!
//! | 标签 | 原始信号 | 结果 |
//! |------|----------|------|
//! | Capture | Ok + 引用 | `Success(归一化引用)` |
//! | Capture | Ok + 无引用 | `Failed(result missing)` |
//! | Capture | Cancelled | `Cancelled` |
//! | Crop | Ok + 引用 | `Success(归一化引用)` |
//! | Crop | Cancelled | `Cancelled` |
//! | Crop | Error | `Failed(原因)` |
//! | Pick / PickCustom | Ok + 引用 | `Success(引用)` |
//! | Pick / PickCustom | Ok + 无引用 | `Failed(picking image failed)` |

use std::collections::HashMap;

use super::{
    normalize_reference, AcquireError, HostResult, HostStatus, OperationOutcome, OperationTag,
    PathResolver, PendingTarget,
};

const CROP_FAILED_FALLBACK: &str = "cropping image failed";

/// 一次路由的输出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub tag: OperationTag,
    pub outcome: OperationOutcome,
    /// 未归一化的原始引用，供链式步骤（拍照 → 裁剪）继续使用。
    pub source: Option<String>,
}

#[derive(Debug, Default)]
pub struct ResultRouter {
    outstanding: HashMap<OperationTag, Option<PendingTarget>>,
}

impl ResultRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个已发出的请求。
    ///
    /// 同一标签已在途、或已有拍照目标时再登记目标，均返回 `OperationInProgress`。
    pub fn register(
        &mut self,
        tag: OperationTag,
        target: Option<PendingTarget>,
    ) -> Result<(), AcquireError> {
        if self.outstanding.contains_key(&tag) {
            return Err(AcquireError::OperationInProgress);
        }
        if target.is_some() && self.has_pending_target() {
            return Err(AcquireError::OperationInProgress);
        }

        log::debug!("🧭 登记操作：{}", tag.as_str());
        self.outstanding.insert(tag, target);
        Ok(())
    }

    pub fn is_outstanding(&self, tag: OperationTag) -> bool {
        self.outstanding.contains_key(&tag)
    }

    pub fn outstanding_count(&self) -> usize {
        self.outstanding.len()
    }

    pub fn has_pending_target(&self) -> bool {
        self.outstanding.values().any(Option::is_some)
    }

    pub fn pending_target(&self) -> Option<&PendingTarget> {
        self.outstanding.values().find_map(Option::as_ref)
    }

    pub fn pending_reference(&self) -> Option<&str> {
        self.pending_target().map(PendingTarget::reference)
    }

    /// 丢弃所有在途登记（包括拍照目标）。
    pub fn clear(&mut self) {
        if !self.outstanding.is_empty() {
            log::debug!("🧭 丢弃 {} 个在途操作", self.outstanding.len());
        }
        self.outstanding.clear();
    }

    /// 消费标签并产出统一结果。
    pub fn route(
        &mut self,
        tag: OperationTag,
        raw: HostResult,
        resolver: &mut dyn PathResolver,
    ) -> Routed {
        let Some(target) = self.outstanding.remove(&tag) else {
            log::warn!("🧭 收到未登记的操作回调：{}", tag.as_str());
            return Routed {
                tag,
                outcome: OperationOutcome::Failed(AcquireError::UnrecognizedOperation),
                source: None,
            };
        };

        let routed = match tag {
            OperationTag::Capture => Self::route_capture(raw, target),
            OperationTag::Crop => Self::route_crop(raw),
            OperationTag::Pick => Self::route_pick(raw, None),
            OperationTag::PickCustom => Self::route_pick(raw, Some(resolver)),
        };

        log::info!("🧭 路由完成：{} -> {:?}", tag.as_str(), routed.0);
        Routed {
            tag,
            outcome: routed.0,
            source: routed.1,
        }
    }

    fn route_capture(
        raw: HostResult,
        target: Option<PendingTarget>,
    ) -> (OperationOutcome, Option<String>) {
        match raw.status {
            HostStatus::Ok => {
                let reference = target.map(PendingTarget::into_reference).or(raw.reference);
                match reference {
                    Some(reference) => (
                        OperationOutcome::Success(normalize_reference(&reference)),
                        Some(reference),
                    ),
                    None => (OperationOutcome::Failed(AcquireError::ResultMissing), None),
                }
            }
            HostStatus::Cancelled => (OperationOutcome::Cancelled, None),
            HostStatus::Error => (OperationOutcome::Failed(AcquireError::CaptureFailed), None),
        }
    }

    fn route_crop(raw: HostResult) -> (OperationOutcome, Option<String>) {
        match raw.status {
            HostStatus::Ok => match raw.reference {
                Some(reference) => (
                    OperationOutcome::Success(normalize_reference(&reference)),
                    Some(reference),
                ),
                None => (OperationOutcome::Failed(AcquireError::ResultMissing), None),
            },
            HostStatus::Cancelled => (OperationOutcome::Cancelled, None),
            HostStatus::Error => {
                let reason = raw
                    .error
                    .filter(|reason| !reason.trim().is_empty())
                    .unwrap_or_else(|| CROP_FAILED_FALLBACK.to_string());
                (OperationOutcome::Failed(AcquireError::Underlying(reason)), None)
            }
        }
    }

    fn route_pick(
        raw: HostResult,
        resolver: Option<&mut dyn PathResolver>,
    ) -> (OperationOutcome, Option<String>) {
        match (raw.status, raw.reference) {
            (HostStatus::Cancelled, _) => (OperationOutcome::Cancelled, None),
            (HostStatus::Ok, Some(reference)) => {
                let resolved = match resolver {
                    Some(resolver) => resolver.resolve(&reference),
                    None => Ok(reference),
                };
                match resolved {
                    Ok(resolved) => (
                        OperationOutcome::Success(normalize_reference(&resolved)),
                        Some(resolved),
                    ),
                    Err(err) => (OperationOutcome::Failed(err), None),
                }
            }
            _ => (OperationOutcome::Failed(AcquireError::PickFailed), None),
        }
    }
}
