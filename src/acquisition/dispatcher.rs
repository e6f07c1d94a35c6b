//! # 入口分发模块
//!
//! 根据用户选择的入口，结合能力快照与在途状态，决定下一步面向宿主的动作。
//! 分发器本身不持有宿主引用，只给出计划；真正发出请求的是协调器。

use super::{
    AcquireConfig, AcquireError, AcquisitionIntent, OperationTag, PendingTarget,
    PermissionNegotiator, ProbeSnapshot, ResultRouter, TargetAllocator, TimestampTargetAllocator,
};

/// 分发计划。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPlan {
    /// 需要先走权限协商，授权后再拍照。
    NegotiatePermission,
    /// 直接发起裁剪，不预选来源。
    CropWithoutSource,
    /// 发起图库选择。
    Pick(OperationTag),
}

pub struct AcquisitionDispatcher {
    allocator: Box<dyn TargetAllocator>,
}

impl std::fmt::Debug for AcquisitionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcquisitionDispatcher").finish_non_exhaustive()
    }
}

impl Default for AcquisitionDispatcher {
    fn default() -> Self {
        Self::new(Box::new(TimestampTargetAllocator))
    }
}

impl AcquisitionDispatcher {
    pub fn new(allocator: Box<dyn TargetAllocator>) -> Self {
        Self { allocator }
    }

    /// 为一次入口选择给出计划。
    ///
    /// 检查顺序：在途冲突 → 相机能力。任何失败都发生在宿主请求发出之前。
    pub fn begin(
        &self,
        intent: AcquisitionIntent,
        snapshot: &ProbeSnapshot,
        router: &ResultRouter,
        negotiator: &PermissionNegotiator,
    ) -> Result<DispatchPlan, AcquireError> {
        let busy = router.has_pending_target()
            || negotiator.is_waiting()
            || intent.tags().iter().any(|tag| router.is_outstanding(*tag));
        if busy {
            log::warn!("🚦 入口 {} 被拒绝：已有操作在途", intent.as_str());
            return Err(AcquireError::OperationInProgress);
        }

        if intent.requires_camera() && !snapshot.has_camera {
            log::warn!("🚦 入口 {} 被拒绝：设备无相机能力", intent.as_str());
            return Err(AcquireError::CapabilityUnavailable);
        }

        let plan = match intent {
            AcquisitionIntent::CaptureWithReference => DispatchPlan::NegotiatePermission,
            AcquisitionIntent::CaptureWithoutReference => DispatchPlan::CropWithoutSource,
            AcquisitionIntent::PickFromGallery => DispatchPlan::Pick(OperationTag::Pick),
            AcquisitionIntent::PickFromGalleryCustom => DispatchPlan::Pick(OperationTag::PickCustom),
        };
        log::debug!("🚦 入口 {} -> {:?}", intent.as_str(), plan);
        Ok(plan)
    }

    /// 授权后为拍照分配目标。
    pub fn allocate_target(&mut self, config: &AcquireConfig) -> Result<PendingTarget, AcquireError> {
        self.allocator.allocate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(has_camera: bool) -> ProbeSnapshot {
        ProbeSnapshot {
            has_camera,
            ..ProbeSnapshot::default()
        }
    }

    #[test]
    fn plans_follow_intent() {
        let dispatcher = AcquisitionDispatcher::default();
        let router = ResultRouter::new();
        let negotiator = PermissionNegotiator::new();
        let cases = [
            (AcquisitionIntent::CaptureWithReference, DispatchPlan::NegotiatePermission),
            (AcquisitionIntent::CaptureWithoutReference, DispatchPlan::CropWithoutSource),
            (AcquisitionIntent::PickFromGallery, DispatchPlan::Pick(OperationTag::Pick)),
            (
                AcquisitionIntent::PickFromGalleryCustom,
                DispatchPlan::Pick(OperationTag::PickCustom),
            ),
        ];

        for (intent, expected) in cases {
            let plan = dispatcher
                .begin(intent, &snapshot(true), &router, &negotiator)
                .expect("plan should succeed");
            assert_eq!(plan, expected, "intent {:?}", intent);
        }
    }

    #[test]
    fn camera_intents_fail_without_capability() {
        let dispatcher = AcquisitionDispatcher::default();
        let router = ResultRouter::new();
        let negotiator = PermissionNegotiator::new();

        for intent in AcquisitionIntent::ALL {
            let result = dispatcher.begin(intent, &snapshot(false), &router, &negotiator);
            if intent.requires_camera() {
                assert_eq!(result, Err(AcquireError::CapabilityUnavailable));
            } else {
                assert!(result.is_ok(), "intent {:?} does not need a camera", intent);
            }
        }
    }

    #[test]
    fn pending_target_blocks_every_intent() {
        let dispatcher = AcquisitionDispatcher::default();
        let mut router = ResultRouter::new();
        let negotiator = PermissionNegotiator::new();
        router
            .register(OperationTag::Capture, Some(PendingTarget::new("file:/tmp/p.jpg")))
            .expect("register capture");

        for intent in AcquisitionIntent::ALL {
            assert_eq!(
                dispatcher.begin(intent, &snapshot(true), &router, &negotiator),
                Err(AcquireError::OperationInProgress)
            );
        }
    }

    #[test]
    fn waiting_negotiation_blocks_new_runs() {
        let dispatcher = AcquisitionDispatcher::default();
        let router = ResultRouter::new();
        let mut negotiator = PermissionNegotiator::new();
        negotiator.start(&ProbeSnapshot {
            has_camera: true,
            ..ProbeSnapshot::default()
        });

        assert_eq!(
            dispatcher.begin(AcquisitionIntent::PickFromGallery, &snapshot(true), &router, &negotiator),
            Err(AcquireError::OperationInProgress)
        );
    }

    #[test]
    fn same_tag_cannot_be_outstanding_twice() {
        let dispatcher = AcquisitionDispatcher::default();
        let mut router = ResultRouter::new();
        let negotiator = PermissionNegotiator::new();
        router.register(OperationTag::Pick, None).expect("register pick");

        assert_eq!(
            dispatcher.begin(AcquisitionIntent::PickFromGallery, &snapshot(true), &router, &negotiator),
            Err(AcquireError::OperationInProgress)
        );
        assert!(dispatcher
            .begin(AcquisitionIntent::PickFromGalleryCustom, &snapshot(true), &router, &negotiator)
            .is_ok());
    }

    #[test]
    fn outstanding_crop_blocks_capture_run() {
        let dispatcher = AcquisitionDispatcher::default();
        let mut router = ResultRouter::new();
        let negotiator = PermissionNegotiator::new();
        router.register(OperationTag::Crop, None).expect("register crop");

        assert_eq!(
            dispatcher.begin(
                AcquisitionIntent::CaptureWithReference,
                &snapshot(true),
                &router,
                &negotiator
            ),
            Err(AcquireError::OperationInProgress)
        );
        assert!(dispatcher
            .begin(AcquisitionIntent::PickFromGallery, &snapshot(true), &router, &negotiator)
            .is_ok());
    }
}
