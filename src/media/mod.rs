mod encode;
mod frame;

pub use encode::{EncodedImage, encode_image};
pub use frame::extract_frame;
