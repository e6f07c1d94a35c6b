//! # 权限协商模块
//!
//! ## 设计思路
//!
//! 驱动“请求 → 授予/拒绝 → 说明对话框 → 重试”循环，状态机如下：
//!
//! ```text
//! NotRequested ──start──┬─ 已授权 ───────────────→ Granted
//!                       ├─ 可展示说明 ───────────→ RationaleNeeded
//!                       └─ 其它 ─────────────────→ Requested
//! RationaleNeeded ─ Proceed → Requested / Cancel → 终止（permission denied）
//! Requested ─ granted → Granted
//!           ─ denied  → 仍有重试预算：RationaleNeeded 或再次 Requested
//!                     → 预算用尽：PermanentlyDenied
//! ```
//!
//! ## 实现思路
//!
//! 每次流水线运行只有一次重试预算：说明对话框和“直接再问一次”共享这一次机会，
//! 因此一次运行内说明对话框最多出现一次，也不会出现无限请求循环。

use super::ProbeSnapshot;

/// 协商状态机状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    NotRequested,
    RationaleNeeded,
    Requested,
    Granted,
    PermanentlyDenied,
}

/// 对外汇报的权限状态，每次运行开始时重新推导。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Unknown,
    Granted,
    /// 可以再次询问，需要先展示说明。
    DeniedSoft,
    /// 只能引导用户去系统设置。
    DeniedHard,
}

impl PermissionState {
    pub fn derive(snapshot: &ProbeSnapshot) -> Self {
        if snapshot.permission_granted {
            Self::Granted
        } else if snapshot.rationale_eligible() {
            Self::DeniedSoft
        } else {
            Self::Unknown
        }
    }
}

/// 说明对话框中的用户选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationaleChoice {
    Proceed,
    Cancel,
}

/// 协商器给出的下一步动作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationStep {
    /// 已授权，可以继续拍照。
    Proceed,
    ShowRationale,
    RequestPermission,
    /// 终止：以 permission denied 结束本次运行。
    Denied,
}

#[derive(Debug)]
pub struct PermissionNegotiator {
    state: NegotiationState,
    permission: PermissionState,
    retry_used: bool,
    rationale_shown: u32,
}

impl Default for PermissionNegotiator {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionNegotiator {
    pub fn new() -> Self {
        Self {
            state: NegotiationState::NotRequested,
            permission: PermissionState::Unknown,
            retry_used: false,
            rationale_shown: 0,
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn permission_state(&self) -> PermissionState {
        self.permission
    }

    /// 本次运行中说明对话框出现的次数（最多为 1）。
    pub fn rationale_shown(&self) -> u32 {
        self.rationale_shown
    }

    /// 是否正在等待宿主回调（权限结果或对话框选择）。
    pub fn is_waiting(&self) -> bool {
        matches!(
            self.state,
            NegotiationState::RationaleNeeded | NegotiationState::Requested
        )
    }

    /// 开始新一轮协商，清空上一轮的重试预算。
    pub fn start(&mut self, snapshot: &ProbeSnapshot) -> NegotiationStep {
        self.retry_used = false;
        self.rationale_shown = 0;
        self.permission = PermissionState::derive(snapshot);

        let step = if snapshot.permission_granted {
            self.state = NegotiationState::Granted;
            NegotiationStep::Proceed
        } else if snapshot.rationale_eligible() {
            self.enter_rationale()
        } else {
            self.state = NegotiationState::Requested;
            NegotiationStep::RequestPermission
        };

        log::debug!("🔐 权限协商开始：{:?} -> {:?}", self.permission, step);
        step
    }

    /// 处理说明对话框的用户选择；非等待对话框状态下返回 `None`。
    pub fn on_rationale_choice(&mut self, choice: RationaleChoice) -> Option<NegotiationStep> {
        if self.state != NegotiationState::RationaleNeeded {
            log::warn!("🔐 忽略过期的说明对话框选择：{:?}（当前 {:?}）", choice, self.state);
            return None;
        }

        let step = match choice {
            RationaleChoice::Proceed => {
                self.state = NegotiationState::Requested;
                NegotiationStep::RequestPermission
            }
            RationaleChoice::Cancel => {
                self.state = NegotiationState::NotRequested;
                NegotiationStep::Denied
            }
        };
        Some(step)
    }

    /// 处理权限请求回调；非请求中状态下返回 `None`。
    ///
    /// `rationale_eligible` 需由调用方基于回调时刻的新探测结果给出。
    pub fn on_permission_result(
        &mut self,
        granted: bool,
        rationale_eligible: bool,
    ) -> Option<NegotiationStep> {
        if self.state != NegotiationState::Requested {
            log::warn!("🔐 忽略过期的权限回调：granted={}（当前 {:?}）", granted, self.state);
            return None;
        }

        if granted {
            self.state = NegotiationState::Granted;
            self.permission = PermissionState::Granted;
            return Some(NegotiationStep::Proceed);
        }

        if self.retry_used {
            self.state = NegotiationState::PermanentlyDenied;
            self.permission = PermissionState::DeniedHard;
            log::info!("🔐 权限被再次拒绝，本次运行终止");
            return Some(NegotiationStep::Denied);
        }

        if rationale_eligible {
            self.permission = PermissionState::DeniedSoft;
            Some(self.enter_rationale())
        } else {
            self.retry_used = true;
            self.state = NegotiationState::Requested;
            Some(NegotiationStep::RequestPermission)
        }
    }

    /// 运行结束后回到初始状态，保留最后一次权限状态用于查询。
    pub fn finish(&mut self) {
        self.state = NegotiationState::NotRequested;
        self.retry_used = false;
    }

    fn enter_rationale(&mut self) -> NegotiationStep {
        self.retry_used = true;
        self.rationale_shown += 1;
        self.state = NegotiationState::RationaleNeeded;
        NegotiationStep::ShowRationale
    }
}
