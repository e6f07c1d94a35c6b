//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `Coordinator` 持有唯一的前端绑定与全部运行状态，按以下顺序编排：
//! 用户入口 → 分发器 →（可能）权限协商 → 宿主请求 → 路由器 → 终态上报，
//! 或链式推进（拍照成功后自动以新照片为来源发起裁剪）。
//!
//! ## 实现思路
//!
//! - 所有宿主回调在同一回调线程上串行到达，因此不需要锁；
//!   唯一需要纪律的共享资源是拍照目标（先检查再设置）。
//! - `unbind` 后前端为空，所有回调入口先检查绑定再动作，迟到的回调被静默吸收。
//! - 能力快照在 `on_create` 与每次 `begin` 时重新探测，不跨运行缓存。

use super::{
    AcquireConfig, AcquireError, AcquireHost, AcquisitionDispatcher, AcquisitionIntent,
    CapabilityProbe, CropPreset, DispatchPlan, HostResult, NegotiationStep, OperationOutcome, OperationTag,
    PassThroughResolver, PathResolver, PermissionNegotiator, PermissionState, ProbeSnapshot,
    RationaleChoice, ResultRouter, TargetAllocator,
};

pub struct Coordinator {
    host: Option<Box<dyn AcquireHost>>,
    probe: Box<dyn CapabilityProbe>,
    config: AcquireConfig,
    dispatcher: AcquisitionDispatcher,
    negotiator: PermissionNegotiator,
    router: ResultRouter,
    resolver: Box<dyn PathResolver>,
    snapshot: ProbeSnapshot,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("bound", &self.host.is_some())
            .field("snapshot", &self.snapshot)
            .field("negotiator", &self.negotiator)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    /// 使用指定探测器与配置创建协调器。
    ///
    /// # 示例
    /// ```rust
    /// use image_acquire::acquisition::{AcquireConfig, Coordinator, ProbeSnapshot, StaticProbe};
    ///
    /// let probe = StaticProbe(ProbeSnapshot { has_camera: true, ..ProbeSnapshot::default() });
    /// let coordinator = Coordinator::new(Box::new(probe), AcquireConfig::default())?;
    /// assert!(!coordinator.is_bound());
    /// # Ok::<(), image_acquire::acquisition::AcquireError>(())
    /// ```
    pub fn new(probe: Box<dyn CapabilityProbe>, config: AcquireConfig) -> Result<Self, AcquireError> {
        config.validate()?;
        Ok(Self {
            host: None,
            probe,
            config,
            dispatcher: AcquisitionDispatcher::default(),
            negotiator: PermissionNegotiator::new(),
            router: ResultRouter::new(),
            resolver: Box::new(PassThroughResolver),
            snapshot: ProbeSnapshot::default(),
        })
    }

    /// 替换拍照目标分配器。
    pub fn with_allocator(mut self, allocator: Box<dyn TargetAllocator>) -> Self {
        self.dispatcher = AcquisitionDispatcher::new(allocator);
        self
    }

    /// 替换自定义选择结果的路径解析钩子。
    pub fn with_resolver(mut self, resolver: Box<dyn PathResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &AcquireConfig {
        &self.config
    }

    pub fn is_bound(&self) -> bool {
        self.host.is_some()
    }

    /// 绑定前端；重复绑定替换旧前端。
    pub fn bind(&mut self, host: Box<dyn AcquireHost>) {
        if self.host.is_some() {
            log::debug!("🔗 替换已绑定的前端");
        }
        self.host = Some(host);
    }

    /// 解绑前端并丢弃本次运行的在途状态；重复调用无副作用。
    pub fn unbind(&mut self) {
        if self.host.take().is_some() {
            log::info!("🔗 前端已解绑，丢弃 {} 个在途操作", self.router.outstanding_count());
        }
        self.router.clear();
        self.negotiator.finish();
    }

    /// 页面创建时刷新能力快照。
    pub fn on_create(&mut self) {
        self.snapshot = ProbeSnapshot::capture(self.probe.as_ref());
        log::info!("📷 能力快照：{:?}", self.snapshot);
    }

    pub fn snapshot(&self) -> ProbeSnapshot {
        self.snapshot
    }

    pub fn permission_state(&self) -> PermissionState {
        self.negotiator.permission_state()
    }

    /// 当前在途的拍照目标引用。
    pub fn pending_target(&self) -> Option<&str> {
        self.router.pending_reference()
    }

    /// 用户选择入口。
    ///
    /// 失败会同时上报给前端（`Failed`）并返回给调用方；此时不会发出任何宿主请求。
    pub fn begin(&mut self, intent: AcquisitionIntent) -> Result<(), AcquireError> {
        if self.host.is_none() {
            log::warn!("🚀 前端未绑定，忽略入口 {}", intent.as_str());
            return Err(AcquireError::NotBound);
        }

        self.snapshot = ProbeSnapshot::capture(self.probe.as_ref());
        let plan = match self
            .dispatcher
            .begin(intent, &self.snapshot, &self.router, &self.negotiator)
        {
            Ok(plan) => plan,
            Err(err) => {
                self.report(OperationOutcome::Failed(err.clone()));
                return Err(err);
            }
        };

        log::info!("🚀 开始流水线：{}", intent.as_str());
        match plan {
            DispatchPlan::NegotiatePermission => {
                let step = self.negotiator.start(&self.snapshot);
                self.apply_step(step);
            }
            DispatchPlan::CropWithoutSource => {
                self.issue_crop(None, CropPreset::Freeform);
            }
            DispatchPlan::Pick(tag) => {
                if let Err(err) = self.router.register(tag, None) {
                    self.report(OperationOutcome::Failed(err.clone()));
                    return Err(err);
                }
                let chooser_title = match tag {
                    OperationTag::PickCustom => Some(self.config.chooser_title.as_str()),
                    _ => None,
                };
                if let Some(host) = self.host.as_mut() {
                    host.dispatch_pick_request(tag, chooser_title);
                }
            }
        }
        Ok(())
    }

    /// 权限说明对话框的用户选择。
    pub fn on_rationale_choice(&mut self, choice: RationaleChoice) {
        if self.absorb_if_unbound("rationale choice") {
            return;
        }
        if let Some(step) = self.negotiator.on_rationale_choice(choice) {
            self.apply_step(step);
        }
    }

    /// 权限请求回调；拒绝时基于最新探测结果重新判断是否可展示说明。
    pub fn on_permission_result(&mut self, granted: bool) {
        if self.absorb_if_unbound("permission result") {
            return;
        }
        let fresh = ProbeSnapshot::capture(self.probe.as_ref());
        if let Some(step) = self
            .negotiator
            .on_permission_result(granted, fresh.rationale_eligible())
        {
            self.apply_step(step);
        }
    }

    pub fn on_capture_result(&mut self, result: HostResult) {
        self.on_result(OperationTag::Capture, result);
    }

    /// 图库选择回调；自动匹配在途的选择请求（普通选择优先）。
    pub fn on_pick_result(&mut self, reference: Option<String>) {
        let tag = if !self.router.is_outstanding(OperationTag::Pick)
            && self.router.is_outstanding(OperationTag::PickCustom)
        {
            OperationTag::PickCustom
        } else {
            OperationTag::Pick
        };
        self.on_result(tag, HostResult::ok(reference));
    }

    pub fn on_crop_result(&mut self, result: HostResult) {
        self.on_result(OperationTag::Crop, result);
    }

    /// 以整数请求码上报的回调入口。
    pub fn on_activity_result(&mut self, request_code: i32, result: HostResult) {
        if self.absorb_if_unbound("activity result") {
            return;
        }
        match OperationTag::from_request_code(request_code) {
            Some(tag) => self.on_result(tag, result),
            None => {
                log::warn!("🧭 未知请求码：{}", request_code);
                self.report(OperationOutcome::Failed(AcquireError::UnrecognizedOperation));
            }
        }
    }

    /// 按标签路由回调，必要时链式推进。
    pub fn on_result(&mut self, tag: OperationTag, result: HostResult) {
        if self.absorb_if_unbound(tag.as_str()) {
            return;
        }

        let routed = self.router.route(tag, result, self.resolver.as_mut());
        let chain_source = match (&routed.outcome, routed.tag) {
            (OperationOutcome::Success(_), OperationTag::Capture) => routed.source.clone(),
            _ => None,
        };

        self.report(routed.outcome);

        if let Some(source) = chain_source {
            log::info!("🔁 拍照成功，自动进入裁剪：{}", source);
            self.issue_crop(Some(source), CropPreset::Camera);
        }
    }

    fn apply_step(&mut self, step: NegotiationStep) {
        match step {
            NegotiationStep::Proceed => {
                self.negotiator.finish();
                self.issue_capture();
            }
            NegotiationStep::ShowRationale => {
                if let Some(host) = self.host.as_mut() {
                    host.show_permission_rationale();
                }
            }
            NegotiationStep::RequestPermission => {
                if let Some(host) = self.host.as_mut() {
                    host.dispatch_permission_request();
                }
            }
            NegotiationStep::Denied => {
                self.negotiator.finish();
                self.report(OperationOutcome::Failed(AcquireError::PermissionDenied));
            }
        }
    }

    fn issue_capture(&mut self) {
        let target = match self.dispatcher.allocate_target(&self.config) {
            Ok(target) => target,
            Err(err) => {
                log::error!("📷 拍照目标分配失败：{}", err);
                self.report(OperationOutcome::Failed(err));
                return;
            }
        };

        if let Err(err) = self.router.register(OperationTag::Capture, Some(target)) {
            self.report(OperationOutcome::Failed(err));
            return;
        }

        if let (Some(host), Some(target)) = (self.host.as_mut(), self.router.pending_target()) {
            host.dispatch_capture_request(target);
            log::info!("📷 已发起拍照：{}", target.reference());
        }
    }

    fn issue_crop(&mut self, source: Option<String>, preset: CropPreset) {
        if let Err(err) = self.router.register(OperationTag::Crop, None) {
            self.report(OperationOutcome::Failed(err));
            return;
        }

        let options = self.config.crop_options(preset);
        if let Some(host) = self.host.as_mut() {
            host.dispatch_crop_request(source.as_deref(), options);
        }
    }

    fn report(&mut self, outcome: OperationOutcome) {
        match self.host.as_mut() {
            Some(host) => host.report_outcome(&outcome),
            None => log::debug!("📭 前端已解绑，丢弃结果：{:?}", outcome),
        }
    }

    fn absorb_if_unbound(&self, what: &str) -> bool {
        if self.host.is_none() {
            log::debug!("📭 前端已解绑，吸收迟到回调：{}", what);
            return true;
        }
        false
    }
}
