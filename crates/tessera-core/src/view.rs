use crate::{DType, Shape, TensorDType, TensorDescriptor};

mod private {
    pub trait Sealed {}
}

/// Access capability of a [`BaseView`].
///
/// Implemented only by [`ReadOnly`] and [`ReadWrite`].
pub trait Access: private::Sealed + Copy + std::fmt::Debug + 'static {
    type Ptr: Copy + PartialEq + std::fmt::Debug + std::fmt::Pointer;

    const NAME: &'static str;

    fn null() -> Self::Ptr;

    fn as_const(ptr: Self::Ptr) -> *const u8;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnly;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadWrite;

impl private::Sealed for ReadOnly {}
impl private::Sealed for ReadWrite {}

impl Access for ReadOnly {
    type Ptr = *const u8;

    const NAME: &'static str = "ConstTensorView";

    fn null() -> Self::Ptr {
        std::ptr::null()
    }

    fn as_const(ptr: Self::Ptr) -> *const u8 {
        ptr
    }
}

impl Access for ReadWrite {
    type Ptr = *mut u8;

    const NAME: &'static str = "TensorView";

    fn null() -> Self::Ptr {
        std::ptr::null_mut()
    }

    fn as_const(ptr: Self::Ptr) -> *const u8 {
        ptr as *const u8
    }
}

/// A descriptor bound to memory owned by someone else.
///
/// The view stores an address and a [`TensorDescriptor`], nothing more. Copying a view copies
/// the address, so both copies refer to the same bytes. The view never allocates, frees or
/// bounds-checks that memory: keeping the memory alive and at least
/// [`TensorDescriptor::num_bytes`] long, laid out densely in row-major order, is the caller's
/// obligation. So is synchronizing access when several views alias one buffer.
pub struct BaseView<A: Access> {
    memory: A::Ptr,
    desc: TensorDescriptor,
}

/// Kernel input.
pub type ConstTensorView = BaseView<ReadOnly>;
/// Kernel output.
pub type TensorView = BaseView<ReadWrite>;

unsafe impl<A: Access> Send for BaseView<A> {}
unsafe impl<A: Access> Sync for BaseView<A> {}

impl<A: Access> Clone for BaseView<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Access> Copy for BaseView<A> {}

impl<A: Access> Default for BaseView<A> {
    fn default() -> Self {
        Self {
            memory: A::null(),
            desc: TensorDescriptor::default(),
        }
    }
}

impl<A: Access> PartialEq for BaseView<A> {
    fn eq(&self, other: &Self) -> bool {
        self.memory == other.memory && self.desc == other.desc
    }
}

impl<A: Access> std::fmt::Debug for BaseView<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(A::NAME)
            .field("memory", &self.memory)
            .field("desc", &self.desc)
            .finish()
    }
}

impl<A: Access> BaseView<A> {
    /// Slice length of the referenced memory. A slice may span at most `isize::MAX` bytes.
    fn byte_len(&self) -> usize {
        let n = self.num_bytes();
        match isize::try_from(n) {
            Ok(len) => len as usize,
            Err(_) => panic!("{} of {} bytes exceeds the address space", A::NAME, n),
        }
    }

    /// Binds `desc` to `memory`. No check is made that `memory` is large enough.
    pub fn new(desc: TensorDescriptor, memory: A::Ptr) -> Self {
        log::trace!("Binding {} to {:p}", desc, memory);
        Self { memory, desc }
    }

    pub fn memory(&self) -> A::Ptr {
        self.memory
    }

    pub fn desc(&self) -> &TensorDescriptor {
        &self.desc
    }

    pub fn shape(&self) -> &Shape {
        self.desc.shape()
    }

    pub fn dt(&self) -> DType {
        self.desc.dt()
    }

    pub fn num_bytes(&self) -> u64 {
        self.desc.num_bytes()
    }

    pub fn is_bound(&self) -> bool {
        !A::as_const(self.memory).is_null()
    }

    /// True if both views refer to the same address, whatever their descriptors.
    pub fn aliases<B: Access>(&self, other: &BaseView<B>) -> bool {
        A::as_const(self.memory) == B::as_const(other.memory)
    }

    /// Reads the referenced memory as raw bytes.
    ///
    /// # Safety
    ///
    /// The referenced memory must be live, at least `num_bytes()` long, and not written
    /// through any other view for the lifetime of the returned slice.
    ///
    /// Panics if `num_bytes()` exceeds `isize::MAX`.
    pub unsafe fn as_bytes(&self) -> &[u8] {
        let len = self.byte_len();
        if len == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(A::as_const(self.memory), len) }
    }

    /// Reads the referenced memory as elements of `T`.
    ///
    /// Panics if `T` does not match the descriptor's element type, or if the memory is not
    /// aligned for `T`.
    ///
    /// # Safety
    ///
    /// Same obligations as [`BaseView::as_bytes`].
    pub unsafe fn as_slice<T: TensorDType>(&self) -> &[T] {
        assert_eq!(T::dt(), self.dt());
        bytemuck::cast_slice(unsafe { self.as_bytes() })
    }
}

impl ConstTensorView {
    pub fn from_slice(desc: TensorDescriptor, bytes: &[u8]) -> Self {
        Self::new(desc, bytes.as_ptr())
    }

    pub fn from_data<T: TensorDType>(desc: TensorDescriptor, data: &[T]) -> Self {
        Self::from_slice(desc, bytemuck::cast_slice(data))
    }
}

impl TensorView {
    pub fn from_mut_slice(desc: TensorDescriptor, bytes: &mut [u8]) -> Self {
        Self::new(desc, bytes.as_mut_ptr())
    }

    pub fn from_data_mut<T: TensorDType>(desc: TensorDescriptor, data: &mut [T]) -> Self {
        Self::from_mut_slice(desc, bytemuck::cast_slice_mut(data))
    }

    /// Writes through the referenced memory as raw bytes.
    ///
    /// # Safety
    ///
    /// The referenced memory must be live, at least `num_bytes()` long, and not accessed
    /// through any other view for the lifetime of the returned slice.
    ///
    /// Panics if `num_bytes()` exceeds `isize::MAX`.
    pub unsafe fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.byte_len();
        if len == 0 {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.memory, len) }
    }

    /// # Safety
    ///
    /// Same obligations as [`TensorView::as_bytes_mut`].
    pub unsafe fn as_slice_mut<T: TensorDType>(&mut self) -> &mut [T] {
        assert_eq!(T::dt(), self.dt());
        bytemuck::cast_slice_mut(unsafe { self.as_bytes_mut() })
    }
}

impl From<TensorView> for ConstTensorView {
    fn from(view: TensorView) -> Self {
        Self {
            memory: view.memory as *const u8,
            desc: view.desc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape;

    #[test]
    fn default_is_unbound() {
        let view = ConstTensorView::default();
        assert!(!view.is_bound());
        assert!(view.memory().is_null());
        assert_eq!(view.desc(), &TensorDescriptor::default());
        assert!(unsafe { view.as_bytes() }.is_empty());

        let view = TensorView::default();
        assert!(view.memory().is_null());
    }

    #[test]
    fn copy_aliases_memory() {
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let desc = TensorDescriptor::unquantized(shape![2, 2], DType::F32);
        let view = ConstTensorView::from_data(desc, &data);
        let copy = view;

        assert_eq!(copy.memory(), view.memory());
        assert_eq!(copy.memory(), data.as_ptr() as *const u8);
        assert_eq!(copy, view);
        assert_eq!(unsafe { copy.as_slice::<f32>() }, &data);
    }

    #[test]
    fn reassigning_a_copy_leaves_original() {
        let data = [0i8; 6];
        let desc = TensorDescriptor::new(shape![2, 3], DType::I8, 0.5, 0);
        let view = ConstTensorView::from_data(desc, &data);
        let mut copy = view;
        copy = ConstTensorView::new(TensorDescriptor::default(), copy.memory());
        assert_eq!(view.desc(), &desc);
        assert!(copy.aliases(&view));
        assert_ne!(copy, view);
    }

    #[test]
    fn write_through_copy() {
        let mut data = [0i32; 3];
        let desc = TensorDescriptor::unquantized(shape![3], DType::I32);
        let view = TensorView::from_data_mut(desc, &mut data);
        let mut writer = view;
        let values = unsafe { writer.as_slice_mut::<i32>() };
        values.copy_from_slice(&[7, 8, 9]);

        let reader: ConstTensorView = view.into();
        assert!(reader.aliases(&view));
        assert_eq!(unsafe { reader.as_slice::<i32>() }, &[7, 8, 9]);
        assert_eq!(data, [7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "exceeds the address space")]
    fn oversized_view_panics_before_reading() {
        let desc = TensorDescriptor::unquantized(Shape::new(&[u32::MAX; 5]).unwrap(), DType::I8);
        let view = ConstTensorView::new(desc, std::ptr::NonNull::<u8>::dangling().as_ptr());
        let _ = unsafe { view.as_bytes() };
    }

    #[test]
    #[should_panic]
    fn dtype_mismatch_panics() {
        let data = [0f32; 2];
        let desc = TensorDescriptor::unquantized(shape![2], DType::F32);
        let view = ConstTensorView::from_data(desc, &data);
        let _ = unsafe { view.as_slice::<i32>() };
    }
}
