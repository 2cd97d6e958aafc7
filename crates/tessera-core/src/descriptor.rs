use crate::{DType, InvalidArgument, QuantizationParams, Shape, Strides};

/// Everything a kernel needs to know about a tensor except where it lives.
///
/// A descriptor is a `Copy` value. The default descriptor has an `F32` element type and the
/// unconfigured, rank 0 shape; it is a placeholder rather than a usable tensor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TensorDescriptor {
    shape: Shape,
    dt: DType,
    quant: QuantizationParams,
}

impl TensorDescriptor {
    pub fn new(shape: Shape, dt: DType, scale: f32, offset: i32) -> Self {
        Self {
            shape,
            dt,
            quant: QuantizationParams::new(scale, offset),
        }
    }

    /// Builds the shape from a rank and extent source, see [`Shape::from_parts`].
    pub fn from_parts(
        rank: usize,
        dims: Option<&[u32]>,
        dt: DType,
        scale: f32,
        offset: i32,
    ) -> Result<Self, InvalidArgument> {
        let shape = Shape::from_parts(rank, dims)?;
        Ok(Self::new(shape, dt, scale, offset))
    }

    /// Unquantized descriptor.
    pub fn unquantized(shape: Shape, dt: DType) -> Self {
        Self::new(shape, dt, 0.0, 0)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dt(&self) -> DType {
        self.dt
    }

    pub fn quantization(&self) -> QuantizationParams {
        self.quant
    }

    pub fn quantization_scale(&self) -> f32 {
        self.quant.scale
    }

    pub fn quantization_offset(&self) -> i32 {
        self.quant.offset
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn numel(&self) -> u64 {
        self.shape.numel()
    }

    /// Size in bytes of the dense buffer this descriptor describes.
    ///
    /// Saturates at `u64::MAX`, see [`Shape::numel`].
    pub fn num_bytes(&self) -> u64 {
        (self.dt.size_of() as u64).saturating_mul(self.numel())
    }

    pub fn strides(&self) -> Strides {
        Strides::from(&self.shape)
    }

    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    pub fn set_dt(&mut self, dt: DType) {
        self.dt = dt;
    }

    pub fn set_quantization(&mut self, quant: QuantizationParams) {
        self.quant = quant;
    }

    pub fn set_quantization_scale(&mut self, scale: f32) {
        self.quant.scale = scale;
    }

    pub fn set_quantization_offset(&mut self, offset: i32) {
        self.quant.offset = offset;
    }
}

impl std::fmt::Display for TensorDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}<{}>", self.shape, self.dt)?;
        if self.quant != QuantizationParams::default() {
            write!(f, " q(scale={}, offset={})", self.quant.scale, self.quant.offset)?;
        }
        Ok(())
    }
}
