use std::fmt;
use std::path::{Path, PathBuf};

use image::{ColorType, ImageReader};

/// Error returned while loading or uploading a texture.
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be opened or read.
    Io { path: PathBuf, source: std::io::Error },
    /// The file was read but is not a decodable image.
    Decode { path: PathBuf, source: image::ImageError },
    /// Decoded, but not 8 bits per channel with 3 or 4 channels.
    UnsupportedFormat { path: PathBuf, color: ColorType },
    /// Wider or taller than the device allows for a 2D texture.
    TooLarge { width: u32, height: u32, max: u32 },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io { path, .. } => write!(f, "cannot read texture {}", path.display()),
            TextureError::Decode { path, .. } => {
                write!(f, "cannot decode texture {}", path.display())
            }
            TextureError::UnsupportedFormat { path, color } => write!(
                f,
                "texture {} has unsupported pixel format {color:?} (expected 8-bit RGB or RGBA)",
                path.display()
            ),
            TextureError::TooLarge { width, height, max } => write!(
                f,
                "texture is {width}x{height}, larger than the {max}px limit of the device"
            ),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io { source, .. } => Some(source),
            TextureError::Decode { source, .. } => Some(source),
            TextureError::UnsupportedFormat { .. } | TextureError::TooLarge { .. } => None,
        }
    }
}

/// Decoded texture pixels, ready for upload.
///
/// Pixels are always tightly packed RGBA8; `channels` records what the source
/// file had (3 or 4).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Reads and decodes an 8-bit RGB or RGBA image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();

        let decoded = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|source| TextureError::Io { path: path.to_path_buf(), source })?
            .decode()
            .map_err(|source| match source {
                image::ImageError::IoError(source) => {
                    TextureError::Io { path: path.to_path_buf(), source }
                }
                source => TextureError::Decode { path: path.to_path_buf(), source },
            })?;

        let color = decoded.color();
        let channels = match color {
            ColorType::Rgb8 | ColorType::Rgba8 => color.channel_count(),
            _ => return Err(TextureError::UnsupportedFormat { path: path.to_path_buf(), color }),
        };

        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            width,
            height,
            channels,
            pixels: rgba.into_raw(),
        })
    }

    /// Fails with [`TextureError::TooLarge`] when either side exceeds `max_dimension`.
    pub fn check_size(&self, max_dimension: u32) -> Result<(), TextureError> {
        if self.width > max_dimension || self.height > max_dimension {
            return Err(TextureError::TooLarge {
                width: self.width,
                height: self.height,
                max: max_dimension,
            });
        }
        Ok(())
    }

    /// A single opaque white texel.
    pub fn white() -> Self {
        Self {
            width: 1,
            height: 1,
            channels: 4,
            pixels: vec![255; 4],
        }
    }
}

/// GPU texture with its view and sampler (wrap = repeat, bilinear filtering).
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Allocates one texture object and uploads `image` into it.
    ///
    /// The image is checked against the device's 2D texture limit first.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &TextureImage,
        label: &str,
    ) -> Result<Self, TextureError> {
        image.check_size(device.limits().max_texture_dimension_2d)?;

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        log::debug!("uploaded texture {label:?} ({}x{})", image.width, image.height);

        Ok(Self {
            texture,
            view,
            sampler,
            width: image.width,
            height: image.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mano-texture-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TextureImage::open(scratch_path("does-not-exist.jpg")).unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }), "{err}");
        assert!(err.to_string().contains("does-not-exist.jpg"));

        // The OS error is reported once, through `source()`.
        let os = std::error::Error::source(&err).map(|s| s.to_string()).unwrap_or_default();
        assert!(!os.is_empty());
        assert!(!err.to_string().contains(&os), "{err}");
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        let path = scratch_path("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let err = TextureImage::open(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, TextureError::Decode { .. }), "{err}");
    }

    #[test]
    fn rgb_image_is_expanded_to_rgba() {
        let path = scratch_path("rgb.png");
        image::RgbImage::from_pixel(2, 1, image::Rgb([10, 20, 30])).save(&path).unwrap();
        let tex = TextureImage::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!((tex.width, tex.height, tex.channels), (2, 1, 3));
        assert_eq!(tex.pixels, vec![10, 20, 30, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn rgba_image_keeps_alpha() {
        let path = scratch_path("rgba.png");
        image::RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 4])).save(&path).unwrap();
        let tex = TextureImage::open(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tex.channels, 4);
        assert_eq!(tex.pixels, vec![1, 2, 3, 4]);
    }

    #[test]
    fn grayscale_image_is_rejected() {
        let path = scratch_path("gray.png");
        image::GrayImage::new(2, 2).save(&path).unwrap();
        let err = TextureImage::open(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(
            matches!(err, TextureError::UnsupportedFormat { color: ColorType::L8, .. }),
            "{err}"
        );
    }

    #[test]
    fn oversized_image_is_rejected() {
        let wide = TextureImage {
            width: 9000,
            height: 10,
            channels: 3,
            pixels: Vec::new(),
        };
        let err = wide.check_size(8192).unwrap_err();
        assert!(
            matches!(err, TextureError::TooLarge { width: 9000, height: 10, max: 8192 }),
            "{err}"
        );

        let tall = TextureImage { width: 1, height: 8193, ..wide.clone() };
        assert!(tall.check_size(8192).is_err());
    }

    #[test]
    fn image_at_the_limit_fits() {
        let img = TextureImage { width: 8192, height: 8192, channels: 4, pixels: Vec::new() };
        assert!(img.check_size(8192).is_ok());
        assert!(TextureImage::white().check_size(1).is_ok());
    }

    #[test]
    fn white_is_single_opaque_texel() {
        let w = TextureImage::white();
        assert_eq!((w.width, w.height), (1, 1));
        assert_eq!(w.pixels, vec![255, 255, 255, 255]);
    }
}
