use half::f16;
use strum_macros::EnumIter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Hash, EnumIter)]
pub enum DType {
    #[default]
    F32,
    F16,
    I8,
    I32,
}

impl DType {
    /// Returns the size of the type in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F16 => 2,
            DType::I8 => 1,
            DType::I32 => 4,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F16)
    }

    /// Integer types are the ones whose quantization parameters carry meaning.
    pub fn is_integer(self) -> bool {
        matches!(self, DType::I8 | DType::I32)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F16 => "f16",
            DType::I8 => "i8",
            DType::I32 => "i32",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rust scalar types that can be read out of, or written into, a bound view.
pub trait TensorDType:
    Clone + Copy + std::fmt::Debug + PartialEq + 'static + num_traits::Zero + Send + Sync + bytemuck::Pod
{
    fn dt() -> DType;
}

macro_rules! map_type {
    ($t:ty, $v:ident) => {
        impl TensorDType for $t {
            fn dt() -> DType {
                DType::$v
            }
        }
    };
}

map_type!(f32, F32);
map_type!(f16, F16);
map_type!(i8, I8);
map_type!(i32, I32);

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;
    use strum::IntoEnumIterator;

    #[test]
    fn size_matches_rust_type() {
        assert_eq!(DType::F32.size_of(), std::mem::size_of::<f32>());
        assert_eq!(DType::F16.size_of(), std::mem::size_of::<f16>());
        assert_eq!(DType::I8.size_of(), std::mem::size_of::<i8>());
        assert_eq!(DType::I32.size_of(), std::mem::size_of::<i32>());
    }

    #[test]
    fn float_and_integer_partition() {
        for dt in DType::iter() {
            assert_ne!(dt.is_float(), dt.is_integer(), "{}", dt);
        }
    }

    #[test]
    fn default_is_f32() {
        assert_eq!(DType::default(), DType::F32);
        assert_eq!(f32::dt(), DType::F32);
        assert_eq!(<i8 as TensorDType>::dt(), DType::I8);
    }
}
