use crate::window::WindowState;

/// What happened to one frame on the game window's surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Presented,
    /// Nothing to draw into: minimized, or the swapchain timed out.
    Skipped,
    /// The swapchain went stale and was rebuilt; the next frame draws normally.
    Reconfigured,
    /// The device cannot present anymore. The caller learns through `should_close`.
    Close,
}

impl FrameOutcome {
    /// Engine-side policy for an acquire failure.
    pub fn from_surface_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => FrameOutcome::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => FrameOutcome::Close,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => FrameOutcome::Skipped,
        }
    }

    /// Folds the outcome into the window facts the bridge reports.
    pub fn apply(self, window: &mut WindowState) {
        match self {
            FrameOutcome::Presented => {}
            FrameOutcome::Skipped => log::trace!("frame skipped"),
            FrameOutcome::Reconfigured => log::debug!("surface reconfigured"),
            FrameOutcome::Close => {
                log::error!("surface cannot present anymore, requesting close");
                window.close_requested = true;
            }
        }
    }
}

/// The fog colour arrives already gamma encoded, so the clear must not be
/// converted again: linear (`Unorm`) formats first.
pub(crate) fn pick_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    use wgpu::TextureFormat::*;

    [Bgra8Unorm, Rgba8Unorm]
        .into_iter()
        .find(|f| formats.contains(f))
        .or_else(|| formats.iter().copied().find(|f| !f.is_srgb()))
        .or_else(|| formats.first().copied())
}

/// The game window is never composited with what is behind it.
pub(crate) fn pick_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

pub(crate) fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat::*;

    #[test]
    fn linear_format_beats_srgb() {
        assert_eq!(pick_format(&[Bgra8UnormSrgb, Bgra8Unorm]), Some(Bgra8Unorm));
        assert_eq!(pick_format(&[Rgba8UnormSrgb, Rgb10a2Unorm]), Some(Rgb10a2Unorm));
    }

    #[test]
    fn srgb_only_surface_still_gets_a_format() {
        assert_eq!(pick_format(&[Bgra8UnormSrgb]), Some(Bgra8UnormSrgb));
        assert_eq!(pick_format(&[]), None);
    }

    #[test]
    fn opaque_alpha_when_offered() {
        use wgpu::CompositeAlphaMode::*;
        assert_eq!(pick_alpha_mode(&[PreMultiplied, Opaque]), Opaque);
        assert_eq!(pick_alpha_mode(&[Inherit]), Inherit);
        assert_eq!(pick_alpha_mode(&[]), Auto);
    }

    // ── outcomes ──────────────────────────────────────────────────────────

    #[test]
    fn out_of_memory_requests_close() {
        let mut window = WindowState::new("t", 854, 480, true);
        FrameOutcome::from_surface_error(&wgpu::SurfaceError::OutOfMemory).apply(&mut window);
        assert!(window.close_requested);
    }

    #[test]
    fn stale_swapchain_keeps_running() {
        let mut window = WindowState::new("t", 854, 480, true);
        for err in [wgpu::SurfaceError::Lost, wgpu::SurfaceError::Outdated] {
            let outcome = FrameOutcome::from_surface_error(&err);
            assert_eq!(outcome, FrameOutcome::Reconfigured);
            outcome.apply(&mut window);
        }
        assert_eq!(FrameOutcome::from_surface_error(&wgpu::SurfaceError::Timeout), FrameOutcome::Skipped);
        assert!(!window.close_requested);
    }
}
