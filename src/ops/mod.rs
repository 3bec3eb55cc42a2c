pub mod fill;
pub mod upscale;
