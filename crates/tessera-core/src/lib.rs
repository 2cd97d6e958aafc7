mod descriptor;
mod dtype;
mod error;
#[cfg(feature = "ndarray")]
mod ndarray_ext;
mod quant;
mod shape;
mod strides;
mod view;

pub use descriptor::*;
pub use dtype::*;
pub use error::*;
pub use quant::*;
pub use shape::*;
pub use strides::*;
pub use view::*;

/// Maximum number of axes a [`Shape`] can hold.
pub const MAX_DIMS: usize = 5;

/// Inline storage for per-axis values. Only the first `rank` slots are significant.
pub type DimArray<T> = [T; MAX_DIMS];

#[macro_export]
macro_rules! shape {
    ($($x:expr),+ $(,)?) => ({
        let dims = [$(
            {
                let x = $x;
                match u32::try_from(x) {
                    Ok(d) => d,
                    Err(_) => panic!("invalid shape literal: extent {} does not fit in 32 bits", x),
                }
            },
        )+];
        match $crate::Shape::new(&dims) {
            Ok(shape) => shape,
            Err(e) => panic!("invalid shape literal: {}", e),
        }
    });
}

pub mod prelude {
    pub use crate::{
        shape, ConstTensorView, DType, Shape, TensorDescriptor, TensorView, MAX_DIMS,
    };
}
