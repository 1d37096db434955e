//! Media handling - base64 codec and normalized uploaded images

pub mod codec;
pub mod image;

pub use image::{UploadedImage, ACCEPTED_IMAGE_TYPES};
