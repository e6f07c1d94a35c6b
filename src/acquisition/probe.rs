//! # 能力探测模块
//!
//! 宿主能力与权限状态只读查询。快照只在一次 `on_create` / 一次流水线运行内有效，
//! 权限可能在本组件之外被修改，所以每次运行开始都重新探测。

/// 宿主上报的能力与权限状态查询接口。
pub trait CapabilityProbe {
    /// 设备是否具备相机能力。
    fn has_camera_capability(&self) -> bool;

    /// 相机权限当前是否已授予。
    fn has_granted_permission(&self) -> bool;

    /// 宿主是否建议展示权限说明（用户拒绝过一次但仍可再次询问）。
    fn should_show_rationale(&self) -> bool;

    /// 平台是否支持运行时权限说明对话框。
    ///
    /// 版本阈值由宿主决定，这里只消费判断结果。
    fn supports_rationale(&self) -> bool;
}

/// 一次探测的结果快照。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeSnapshot {
    pub has_camera: bool,
    pub permission_granted: bool,
    pub should_show_rationale: bool,
    pub supports_rationale: bool,
}

impl ProbeSnapshot {
    pub fn capture(probe: &dyn CapabilityProbe) -> Self {
        Self {
            has_camera: probe.has_camera_capability(),
            permission_granted: probe.has_granted_permission(),
            should_show_rationale: probe.should_show_rationale(),
            supports_rationale: probe.supports_rationale(),
        }
    }

    /// 是否满足展示权限说明对话框的条件。
    pub fn rationale_eligible(&self) -> bool {
        self.supports_rationale && self.should_show_rationale
    }
}

/// 固定值探测器，便于宿主直接传入已知状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaticProbe(pub ProbeSnapshot);

impl CapabilityProbe for StaticProbe {
    fn has_camera_capability(&self) -> bool {
        self.0.has_camera
    }

    fn has_granted_permission(&self) -> bool {
        self.0.permission_granted
    }

    fn should_show_rationale(&self) -> bool {
        self.0.should_show_rationale
    }

    fn supports_rationale(&self) -> bool {
        self.0.supports_rationale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_probe() {
        let expected = ProbeSnapshot {
            has_camera: true,
            permission_granted: false,
            should_show_rationale: true,
            supports_rationale: true,
        };
        let snapshot = ProbeSnapshot::capture(&StaticProbe(expected));
        assert_eq!(snapshot, expected);
    }

    #[test]
    fn rationale_requires_platform_support() {
        let cases = [
            (false, false, false),
            (true, false, false),
            (false, true, false),
            (true, true, true),
        ];

        for (should_show, supports, expected) in cases {
            let snapshot = ProbeSnapshot {
                should_show_rationale: should_show,
                supports_rationale: supports,
                ..ProbeSnapshot::default()
            };
            assert_eq!(
                snapshot.rationale_eligible(),
                expected,
                "should_show={should_show} supports={supports}"
            );
        }
    }
}
