#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MsaaKey {
    format: wgpu::TextureFormat,
    size: [u32; 2],
    samples: u32,
}

/// A multisampled color target that is recreated only when the output size,
/// format or sample count changes.
#[derive(Debug, Default)]
pub struct MsaaTarget(Option<(MsaaKey, wgpu::TextureView)>);

impl MsaaTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: [u32; 2],
        samples: u32,
    ) -> &wgpu::TextureView {
        let key = MsaaKey {
            format,
            size,
            samples,
        };
        let (_, view) = match self.0.take() {
            Some(cached) if cached.0 == key => self.0.insert(cached),
            _ => self.0.insert((key, create_msaa_view(device, key))),
        };
        view
    }
}

fn create_msaa_view(device: &wgpu::Device, key: MsaaKey) -> wgpu::TextureView {
    device
        .create_texture(&wgpu::TextureDescriptor {
            label: Some("msaa-color"),
            size: wgpu::Extent3d {
                width: key.size[0],
                height: key.size[1],
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: key.samples,
            dimension: wgpu::TextureDimension::D2,
            format: key.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        })
        .create_view(&wgpu::TextureViewDescriptor::default())
}

/// Uses 4x MSAA when the output format supports it, otherwise no
/// multisampling.
///
/// Counts other than 1 and 4 would need
/// `TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES`, which is not requested.
pub fn choose_msaa_samples(flags: wgpu::TextureFormatFeatureFlags) -> u32 {
    if flags.sample_count_supported(4) {
        4
    } else {
        1
    }
}

/// Prefers a non-sRGB format so that vertex colors reach the screen
/// unconverted.
pub fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

pub fn choose_present_mode(present_modes: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if present_modes.contains(&wgpu::PresentMode::Mailbox) {
        wgpu::PresentMode::Mailbox
    } else {
        wgpu::PresentMode::AutoVsync
    }
}

#[cfg(test)]
mod test {
    use wgpu::{PresentMode, TextureFormat, TextureFormatFeatureFlags};

    use super::*;

    #[test]
    fn test_choose_msaa_samples() {
        let all = TextureFormatFeatureFlags::MULTISAMPLE_X2
            | TextureFormatFeatureFlags::MULTISAMPLE_X4
            | TextureFormatFeatureFlags::MULTISAMPLE_X8;
        assert_eq!(choose_msaa_samples(all), 4);
        assert_eq!(
            choose_msaa_samples(TextureFormatFeatureFlags::MULTISAMPLE_X2),
            1
        );
        assert_eq!(choose_msaa_samples(TextureFormatFeatureFlags::empty()), 1);
    }

    #[test]
    fn test_choose_surface_format() {
        assert_eq!(
            choose_surface_format(&[TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm]),
            Some(TextureFormat::Bgra8Unorm)
        );
        assert_eq!(
            choose_surface_format(&[TextureFormat::Rgba8UnormSrgb]),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn test_choose_present_mode() {
        assert_eq!(
            choose_present_mode(&[PresentMode::Fifo, PresentMode::Mailbox]),
            PresentMode::Mailbox
        );
        assert_eq!(
            choose_present_mode(&[PresentMode::Fifo]),
            PresentMode::AutoVsync
        );
    }
}
