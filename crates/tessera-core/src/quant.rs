use derive_new::new;

/// Affine quantization parameters: `real = scale * (stored - offset)`.
///
/// Carried by every descriptor regardless of its element type. Nothing here checks that
/// they are only set on integer tensors.
#[derive(new, Debug, Clone, Copy, PartialEq, Default)]
pub struct QuantizationParams {
    pub scale: f32,
    pub offset: i32,
}
