use ndarray::{ArrayViewD, ArrayViewMutD, IxDyn, ShapeError};

use crate::{Access, BaseView, Shape, TensorDType, TensorView};

fn ix(shape: &Shape) -> IxDyn {
    let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
    IxDyn(&dims)
}

impl<A: Access> BaseView<A> {
    /// Borrows the referenced memory as an `ndarray` view.
    ///
    /// # Safety
    ///
    /// Same obligations as [`BaseView::as_bytes`].
    pub unsafe fn as_array<T: TensorDType>(&self) -> Result<ArrayViewD<'_, T>, ShapeError> {
        let data = unsafe { self.as_slice::<T>() };
        ArrayViewD::from_shape(ix(self.shape()), data)
    }
}

impl TensorView {
    /// # Safety
    ///
    /// Same obligations as [`TensorView::as_bytes_mut`].
    pub unsafe fn as_array_mut<T: TensorDType>(
        &mut self,
    ) -> Result<ArrayViewMutD<'_, T>, ShapeError> {
        let shape = ix(self.shape());
        let data = unsafe { self.as_slice_mut::<T>() };
        ArrayViewMutD::from_shape(shape, data)
    }
}
