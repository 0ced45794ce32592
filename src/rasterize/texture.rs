use std::convert::TryInto;
use std::path::{Path, PathBuf};

use super::{take_handle, GpuError, Rasterize};

/// OpenGL guarantees at least this many texture units.
pub const MAX_TEXTURE_SLOTS: u32 = 32;

#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("could not decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("expected {expected} bytes of rgba pixels, got {got}")]
    PixelCount { expected: usize, got: usize },
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// Decoded image ready for upload, rows are bottom to top.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    /// Channels of the source image before conversion to rgba.
    pub bpp: usize,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let bpp = image.color().channel_count() as usize;
        // OpenGL expects the first row to be the bottom of the image
        let rgba = image.flipv().into_rgba8();
        let (width, height) = rgba.dimensions();

        Ok(Self {
            width: width as usize,
            height: height as usize,
            bpp,
            pixels: rgba.into_raw(),
        })
    }
}

/// RGBA8 2D texture.
#[derive(Debug)]
pub struct Texture {
    gl_tex: Option<gl::types::GLuint>,
    path: Option<PathBuf>,
    width: usize,
    height: usize,
    bpp: usize,
}

impl Texture {
    /// Decode the image at `path` and upload it. The decoded pixels
    /// are dropped once they are on the GPU.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let image = DecodedImage::open(path)?;
        let mut texture = Self::from_pixels(image.width, image.height, &image.pixels)?;
        texture.bpp = image.bpp;
        texture.path = Some(path.to_path_buf());

        log::debug!(
            "texture {} loaded from {} ({}x{}, {} channels)",
            texture.get_gl_tex(),
            path.display(),
            texture.width,
            texture.height,
            texture.bpp
        );

        Ok(texture)
    }

    /// Upload tightly packed rgba8 `pixels`, first row is the bottom
    /// of the image.
    pub fn from_pixels(width: usize, height: usize, pixels: &[u8]) -> Result<Self, TextureError> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(TextureError::PixelCount {
                expected,
                got: pixels.len(),
            });
        }

        let gl_tex = Self::gen_gl_texture()?;
        let res = Self {
            gl_tex: Some(gl_tex),
            path: None,
            width,
            height,
            bpp: 4,
        };

        unsafe {
            gl_call!(gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8.try_into().unwrap(),
                width.try_into().unwrap(),
                height.try_into().unwrap(),
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const gl::types::GLvoid,
            ));
        }
        res.unbind();

        Ok(res)
    }

    fn gen_gl_texture() -> Result<gl::types::GLuint, GpuError> {
        let mut gl_tex = 0;
        unsafe {
            gl_call!(gl::GenTextures(1, &mut gl_tex));
        }
        if gl_tex == 0 {
            return Err(GpuError::HandleCreation("texture"));
        }

        unsafe {
            gl_call!(gl::BindTexture(gl::TEXTURE_2D, gl_tex));

            // filter method
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                gl::LINEAR.try_into().unwrap(),
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MAG_FILTER,
                gl::LINEAR.try_into().unwrap(),
            );

            // wrapping method
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_WRAP_S,
                gl::CLAMP_TO_EDGE.try_into().unwrap(),
            );
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_WRAP_T,
                gl::CLAMP_TO_EDGE.try_into().unwrap(),
            );
        }

        Ok(gl_tex)
    }

    /// Bind to texture unit `slot`, shaders sample it through a
    /// `sampler2D` uniform set to the same slot.
    pub fn bind(&self, slot: u32) {
        assert!(
            slot < MAX_TEXTURE_SLOTS,
            "Texture slot {} not possible, gl support [0, {})",
            slot,
            MAX_TEXTURE_SLOTS
        );
        if let Some(gl_tex) = self.gl_tex {
            unsafe {
                gl_call!(gl::ActiveTexture(gl::TEXTURE0 + slot));
                gl_call!(gl::BindTexture(gl::TEXTURE_2D, gl_tex));
            }
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl_call!(gl::BindTexture(gl::TEXTURE_2D, 0));
        }
    }

    pub fn get_gl_tex(&self) -> gl::types::GLuint {
        self.gl_tex.unwrap_or(0)
    }

    pub fn get_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get_bpp(&self) -> usize {
        self.bpp
    }
}

impl Rasterize for Texture {
    fn cleanup_opengl(&mut self) {
        if let Some(gl_tex) = take_handle(&mut self.gl_tex) {
            unsafe {
                gl::DeleteTextures(1, &gl_tex);
            }
        }
    }

    fn is_alive(&self) -> bool {
        self.gl_tex.is_some()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.cleanup_opengl();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_test_image(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "gl_sandbox_{}_{}.png",
            std::process::id(),
            name
        ));
        // top row red, bottom row blue
        let image = image::RgbImage::from_fn(2, 2, |_x, y| {
            if y == 0 {
                image::Rgb([255, 0, 0])
            } else {
                image::Rgb([0, 0, 255])
            }
        });
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn texture_decode_flips_rows() {
        let path = write_test_image("flip");
        let image = DecodedImage::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.width, 2);
        assert_eq!(image.height, 2);
        assert_eq!(image.bpp, 3);
        assert_eq!(image.pixels.len(), 2 * 2 * 4);
        // first uploaded row is the bottom (blue) row
        assert_eq!(&image.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&image.pixels[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn texture_decode_bundled_checker() {
        let image = DecodedImage::open(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/res/textures/checker.png"
        ))
        .unwrap();
        assert_eq!(image.width, 64);
        assert_eq!(image.height, 64);
        assert_eq!(image.bpp, 4);
        assert_eq!(image.pixels.len(), 64 * 64 * 4);
    }

    #[test]
    fn texture_decode_missing_file() {
        match DecodedImage::open("does/not/exist.png") {
            Err(TextureError::Decode { path, .. }) => {
                assert_eq!(path, PathBuf::from("does/not/exist.png"))
            }
            res => panic!("expected decode error, got {:?}", res),
        }
    }

    #[test]
    fn texture_pixel_count_checked_before_upload() {
        match Texture::from_pixels(2, 2, &[0; 3]) {
            Err(TextureError::PixelCount { expected, got }) => {
                assert_eq!(expected, 16);
                assert_eq!(got, 3);
            }
            res => panic!("expected pixel count error, got {:?}", res),
        }
    }
}
