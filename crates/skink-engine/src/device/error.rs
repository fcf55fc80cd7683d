/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (out of memory); the loop should exit.
    Fatal,
}

impl SurfaceErrorAction {
    /// Classifies a surface error without touching the surface.
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(SurfaceErrorAction::classify(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(
            SurfaceErrorAction::classify(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn oom_is_fatal() {
        assert_eq!(SurfaceErrorAction::classify(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }

    #[test]
    fn timeout_skips() {
        assert_eq!(SurfaceErrorAction::classify(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::classify(&wgpu::SurfaceError::Other), SurfaceErrorAction::SkipFrame);
    }
}
