use winit::dpi::PhysicalSize;

/// Picks the surface format.
///
/// With `prefer_srgb`, an 8-bit sRGB format wins when offered. Without it, the
/// first non-sRGB format wins so shader outputs reach the display unconverted.
/// Either way the first supported format is the fallback.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    } else if let Some(f) = formats.iter().copied().find(|f| !f.is_srgb()) {
        return Some(f);
    }

    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Falls back to `Fifo` (always supported) when the requested mode is not offered.
pub(crate) fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if supported.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Updates `config` for `new_size`. Returns `false` when the size is zero and
/// configuration must be deferred.
pub(crate) fn apply_resize(
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as Alpha, PresentMode, TextureFormat as Fmt};

    fn config() -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: Fmt::Bgra8UnormSrgb,
            width: 800,
            height: 600,
            present_mode: PresentMode::Fifo,
            alpha_mode: Alpha::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn srgb_preferred_when_offered() {
        let formats = [Fmt::Bgra8Unorm, Fmt::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(Fmt::Rgba8UnormSrgb));
    }

    #[test]
    fn linear_format_without_srgb_preference() {
        let formats = [Fmt::Bgra8UnormSrgb, Fmt::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8Unorm));
    }

    #[test]
    fn srgb_only_surface_still_usable() {
        let formats = [Fmt::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, false), Some(Fmt::Bgra8UnormSrgb));
    }

    #[test]
    fn no_formats_is_none() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_falls_back() {
        let supported = [Alpha::Opaque];
        assert_eq!(choose_alpha_mode(&supported, Some(Alpha::PreMultiplied)), Alpha::Opaque);
        assert_eq!(choose_alpha_mode(&[], None), Alpha::Auto);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let supported = [PresentMode::Fifo, PresentMode::Immediate];
        assert_eq!(choose_present_mode(&supported, PresentMode::Mailbox), PresentMode::Fifo);
        assert_eq!(choose_present_mode(&supported, PresentMode::Immediate), PresentMode::Immediate);
    }

    #[test]
    fn zero_size_resize_is_deferred() {
        let mut cfg = config();
        let mut size = PhysicalSize::new(800, 600);
        assert!(!apply_resize(&mut cfg, &mut size, PhysicalSize::new(0, 600)));
        assert_eq!(size, PhysicalSize::new(0, 600));
        assert_eq!((cfg.width, cfg.height), (800, 600));
    }

    #[test]
    fn resize_updates_config() {
        let mut cfg = config();
        let mut size = PhysicalSize::new(800, 600);
        assert!(apply_resize(&mut cfg, &mut size, PhysicalSize::new(1024, 768)));
        assert_eq!((cfg.width, cfg.height), (1024, 768));
    }
}
