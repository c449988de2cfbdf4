use anyhow::Context;

use crate::{
    rendering::light_uniform::{LightUniform, LightUniformState},
    viewport::Viewport,
};

/// GPU state shared by every pass.
pub struct RenderCommon {
    /// Format the passes render into. Never sRGB.
    pub output_format: wgpu::TextureFormat,
    pub camera_uniform_buffer: wgpu::Buffer,
    pub light_uniform: LightUniform,
}

impl RenderCommon {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        camera_uniform_buffer: wgpu::Buffer,
    ) -> Self {
        let light_uniform = LightUniform::new(device, LightUniformState::default());

        Self {
            output_format,
            camera_uniform_buffer,
            light_uniform,
        }
    }
}

/// Chooses the surface format and any extra view format. Output is written without sRGB
/// encoding, so a non-sRGB format is preferred and an sRGB-only surface gets a non-sRGB view.
pub fn pick_surface_format(
    formats: &[wgpu::TextureFormat],
) -> Option<(wgpu::TextureFormat, Vec<wgpu::TextureFormat>)> {
    if let Some(format) = formats.iter().find(|f| !f.is_srgb()) {
        return Some((*format, vec![]));
    }

    let format = *formats.first()?;
    Some((format, vec![format.remove_srgb_suffix()]))
}

/// Picks a surface configuration covering `viewport`.
pub fn surface_configuration(
    surface: &wgpu::Surface,
    adapter: &wgpu::Adapter,
    viewport: Viewport,
) -> anyhow::Result<wgpu::SurfaceConfiguration> {
    let surface_caps = surface.get_capabilities(adapter);
    let (format, view_formats) = pick_surface_format(&surface_caps.formats)
        .context("Surface is incompatible with the adapter")?;

    Ok(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: viewport.width(),
        height: viewport.height(),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats,
        desired_maximum_frame_latency: 2,
    })
}

pub fn output_format(config: &wgpu::SurfaceConfiguration) -> wgpu::TextureFormat {
    config.view_formats.first().copied().unwrap_or(config.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn non_srgb_format_is_preferred() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];

        assert_eq!(
            pick_surface_format(&formats),
            Some((TextureFormat::Bgra8Unorm, vec![]))
        );
    }

    #[test]
    fn srgb_only_surface_gets_a_plain_view() {
        let formats = [TextureFormat::Rgba8UnormSrgb];

        assert_eq!(
            pick_surface_format(&formats),
            Some((TextureFormat::Rgba8UnormSrgb, vec![TextureFormat::Rgba8Unorm]))
        );
    }

    #[test]
    fn no_formats_means_no_configuration() {
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn output_format_never_encodes_srgb() {
        for formats in [
            vec![TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm],
            vec![TextureFormat::Rgba8UnormSrgb],
        ] {
            let (format, view_formats) = pick_surface_format(&formats).unwrap();
            let config = wgpu::SurfaceConfiguration {
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                format,
                width: 1,
                height: 1,
                present_mode: wgpu::PresentMode::AutoVsync,
                alpha_mode: wgpu::CompositeAlphaMode::Auto,
                view_formats,
                desired_maximum_frame_latency: 2,
            };

            assert!(!output_format(&config).is_srgb());
        }
    }
}
