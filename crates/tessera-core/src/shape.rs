use crate::{DimArray, Enforcer, InvalidArgument, MAX_DIMS};
use std::hash::{Hash, Hasher};

/// Ordered per-axis extents of a tensor, stored inline.
///
/// A `Shape` is a plain `Copy` value: copying it copies the extents, never a reference to them.
/// The default value has rank 0 and stands for "not yet configured"; every successfully
/// constructed shape has a rank in `1..=MAX_DIMS`. Zero extents are legal.
#[derive(Clone, Copy, Default)]
pub struct Shape {
    rank: usize,
    dims: DimArray<u32>,
}

impl Shape {
    /// Builds a shape from an ordered list of extents.
    pub fn new(dims: &[u32]) -> Result<Self, InvalidArgument> {
        Self::from_parts(dims.len(), Some(dims))
    }

    /// Builds a shape from an explicit rank and extent source.
    ///
    /// `None` stands for a missing extent buffer. Only the first `rank` extents of `dims`
    /// are read.
    pub fn from_parts(rank: usize, dims: Option<&[u32]>) -> Result<Self, InvalidArgument> {
        Enforcer::check_rank(rank)?;
        let dims = dims.ok_or(InvalidArgument::NullDimensions)?;
        Enforcer::check_dims_len(rank, dims)?;

        let mut shape = Self {
            rank,
            dims: [0; MAX_DIMS],
        };
        shape.dims[..rank].copy_from_slice(&dims[..rank]);
        Ok(shape)
    }

    /// Builds a shape from a rank and a raw extent pointer.
    ///
    /// # Safety
    ///
    /// If `dims` is non-null it must point to at least `rank` readable `u32`s whenever
    /// `rank` is within `1..=MAX_DIMS`.
    pub unsafe fn from_raw_parts(rank: usize, dims: *const u32) -> Result<Self, InvalidArgument> {
        Enforcer::check_rank(rank)?;
        if dims.is_null() {
            return Err(InvalidArgument::NullDimensions);
        }
        let dims = unsafe { std::slice::from_raw_parts(dims, rank) };
        Self::from_parts(rank, Some(dims))
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// True only for the default, rank 0 state.
    pub fn is_empty(&self) -> bool {
        self.rank == 0
    }

    /// The significant extents.
    pub fn dims(&self) -> &[u32] {
        &self.dims[..self.rank]
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.dims().get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &u32> {
        self.dims().iter()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.dims().to_vec()
    }

    /// Number of elements described by this shape, 0 for the unconfigured shape.
    ///
    /// Accumulated in 64 bits. A product that does not fit saturates at `u64::MAX`; such a
    /// tensor cannot be backed by real memory anyway. Any zero extent gives 0.
    pub fn numel(&self) -> u64 {
        if self.is_empty() || self.iter().any(|&d| d == 0) {
            return 0;
        }
        self.iter()
            .try_fold(1u64, |acc, &d| acc.checked_mul(d as u64))
            .unwrap_or(u64::MAX)
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.dims() == other.dims()
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dims().hash(state);
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some(first) = self.dims().first() else {
            return write!(f, "[]");
        };
        let mut shape = format!("[{}", first);
        for dim in self.iter().skip(1) {
            shape.push_str(&format!("x{}", dim));
        }
        write!(f, "{}]", shape)
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.dims())
    }
}

impl std::ops::Index<usize> for Shape {
    type Output = u32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dims()[index]
    }
}

impl TryFrom<&[u32]> for Shape {
    type Error = InvalidArgument;

    fn try_from(dims: &[u32]) -> Result<Self, Self::Error> {
        Self::new(dims)
    }
}

impl TryFrom<Vec<u32>> for Shape {
    type Error = InvalidArgument;

    fn try_from(dims: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(&dims)
    }
}

impl TryFrom<&[usize]> for Shape {
    type Error = InvalidArgument;

    fn try_from(dims: &[usize]) -> Result<Self, Self::Error> {
        Enforcer::check_rank(dims.len())?;
        let mut narrowed = [0u32; MAX_DIMS];
        for (slot, &d) in narrowed.iter_mut().zip(dims) {
            *slot = u32::try_from(d).map_err(|_| InvalidArgument::ExtentOverflow(d))?;
        }
        Self::from_parts(dims.len(), Some(&narrowed[..]))
    }
}

macro_rules! impl_try_into_for_shape {
    ($($N:expr),*) => {
        $(
            impl TryFrom<&Shape> for [u32; $N] {
                type Error = anyhow::Error;

                fn try_from(shape: &Shape) -> Result<[u32; $N], Self::Error> {
                    if shape.rank() == $N {
                        let mut arr = [0; $N];
                        arr.copy_from_slice(shape.dims());
                        Ok(arr)
                    } else {
                        Err(anyhow::anyhow!("Shape has rank {} but expected {}", shape.rank(), $N))
                    }
                }
            }
        )*
    };
}

impl_try_into_for_shape!(1, 2, 3, 4, 5);
