//! Header logo loading and embedding
//!
//! The logo is optional: a missing file is a normal condition and a decode
//! failure only logs a warning. Decoded pixels are split into an RGB image
//! XObject plus a grayscale soft mask when the source has transparency.

use std::path::Path;

use image::DynamicImage;
use log::warn;
use pdf_writer::{Name, Pdf, Ref};

/// Page resource name the embedded logo is registered under.
pub const LOGO_NAME: Name<'static> = Name(b"Im1");

pub struct Logo {
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
    width: u32,
    height: u32,
}

impl Logo {
    /// Load the logo if the file exists and decodes.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match image::open(path) {
            Ok(img) => Some(Self::from_image(img)),
            Err(e) => {
                warn!("could not decode logo {}: {e}", path.display());
                None
            }
        }
    }

    fn from_image(img: DynamicImage) -> Self {
        if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            let bytes = rgba.into_raw();
            let mut rgb = Vec::with_capacity((width * height * 3) as usize);
            let mut alpha = Vec::with_capacity((width * height) as usize);
            for px in bytes.chunks_exact(4) {
                rgb.extend_from_slice(&px[..3]);
                alpha.push(px[3]);
            }
            Self {
                rgb,
                alpha: Some(alpha),
                width,
                height,
            }
        } else {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                rgb: rgb.into_raw(),
                alpha: None,
                width,
                height,
            }
        }
    }

    /// Height over width, for scaling to a fixed display width.
    pub fn aspect(&self) -> f64 {
        self.height as f64 / self.width.max(1) as f64
    }

    /// Write the image into the document. `smask_id` is only used when the
    /// source carried an alpha channel.
    pub fn embed(&self, pdf: &mut Pdf, image_id: Ref, smask_id: Ref) {
        if let Some(alpha) = &self.alpha {
            let mut smask = pdf.image_xobject(smask_id, alpha);
            smask.width(self.width as i32);
            smask.height(self.height as i32);
            smask.color_space().device_gray();
            smask.bits_per_component(8);
        }
        let mut xobject = pdf.image_xobject(image_id, &self.rgb);
        xobject.width(self.width as i32);
        xobject.height(self.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if self.alpha.is_some() {
            xobject.s_mask(smask_id);
        }
    }
}
