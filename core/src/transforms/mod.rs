pub mod mask;
pub mod spec;

pub use mask::{MaskInterval, MaskSource};
pub use spec::{TransformSpec, TreeVariant};
