use crate::{DimArray, Shape, MAX_DIMS};

/// Dense row-major strides, in elements, for a [`Shape`].
///
/// This is the layout every bound view promises for its memory. Like [`Shape::numel`], a
/// stride that does not fit in 64 bits saturates at `u64::MAX`.
#[derive(Clone, Copy, Default)]
pub struct Strides {
    rank: usize,
    strides: DimArray<u64>,
}

impl Strides {
    pub fn as_slice(&self) -> &[u64] {
        &self.strides[..self.rank]
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.as_slice().to_vec()
    }

    /// Flat element offset of a multi-dimensional index.
    ///
    /// Only the first `rank` coordinates are used.
    pub fn offset(&self, index: &[u32]) -> u64 {
        self.as_slice()
            .iter()
            .zip(index)
            .map(|(&s, &i)| s * i as u64)
            .sum()
    }
}

impl PartialEq for Strides {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Strides {}

impl std::fmt::Debug for Strides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut strides = format!("[{}", self.as_slice().first().unwrap_or(&0));
        for stride in self.as_slice().iter().skip(1) {
            strides.push_str(&format!("x{}", stride));
        }
        write!(f, "{}]", strides)
    }
}

impl From<&Shape> for Strides {
    fn from(shape: &Shape) -> Self {
        let rank = shape.rank();
        let mut strides = [0; MAX_DIMS];
        if rank == 0 {
            return Self { rank, strides };
        }
        strides[rank - 1] = 1;
        for i in (0..rank - 1).rev() {
            strides[i] = strides[i + 1].saturating_mul(shape[i + 1] as u64);
        }
        Self { rank, strides }
    }
}
