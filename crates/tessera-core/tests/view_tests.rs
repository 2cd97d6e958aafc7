#[cfg(test)]
mod tests {
    use tessera::{
        shape, ConstTensorView, DType, InvalidArgument, Shape, Strides, TensorDescriptor,
        TensorView,
    };

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Dequantizes an `I8` input into an `F32` output of the same shape.
    fn dequantize(input: ConstTensorView, mut output: TensorView) -> anyhow::Result<()> {
        anyhow::ensure!(input.shape() == output.shape(), "shape mismatch");
        anyhow::ensure!(input.dt() == DType::I8 && output.dt() == DType::F32);
        let q = input.desc().quantization();
        let src = unsafe { input.as_slice::<i8>() };
        let dst = unsafe { output.as_slice_mut::<f32>() };
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = q.scale * (s as i32 - q.offset) as f32;
        }
        Ok(())
    }

    #[test]
    fn kernel_round_trip() -> anyhow::Result<()> {
        init();
        let shape = shape![2, 3];
        let src: Vec<i8> = vec![0, 2, 4, -2, -4, 10];
        let mut dst = vec![0f32; 6];

        let in_desc = TensorDescriptor::new(shape, DType::I8, 0.5, 2);
        let out_desc = TensorDescriptor::unquantized(shape, DType::F32);
        assert_eq!(in_desc.num_bytes(), src.len() as u64);
        assert_eq!(out_desc.num_bytes(), 4 * dst.len() as u64);

        let input = ConstTensorView::from_data(in_desc, &src);
        let output = TensorView::from_data_mut(out_desc, &mut dst);
        dequantize(input, output)?;

        assert_eq!(dst, vec![-1.0, 0.0, 1.0, -2.0, -3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn output_handed_on_as_input() -> anyhow::Result<()> {
        init();
        let mut buffer = vec![0f32; 4];
        let desc = TensorDescriptor::unquantized(shape![4], DType::F32);
        let mut output = TensorView::from_data_mut(desc, &mut buffer);
        let values = unsafe { output.as_slice_mut::<f32>() };
        values.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);

        let next_input: ConstTensorView = output.into();
        assert!(next_input.aliases(&output));
        assert_eq!(next_input.desc(), output.desc());
        let sum: f32 = unsafe { next_input.as_slice::<f32>() }.iter().sum();
        assert_eq!(sum, 10.0);
        Ok(())
    }

    #[test]
    fn views_share_but_never_copy_bytes() {
        init();
        let mut buffer = vec![0u8; 16];
        let desc = TensorDescriptor::unquantized(shape![4, 4], DType::I8);
        let a = TensorView::from_mut_slice(desc, &mut buffer);
        let mut b = a;
        let bytes = unsafe { b.as_bytes_mut() };
        bytes[5] = 42;
        assert_eq!(a.memory(), b.memory());
        assert_eq!(unsafe { a.as_bytes() }[5], 42);
        assert_eq!(buffer[5], 42);
    }

    #[test]
    fn descriptor_from_raw_dims() -> Result<(), InvalidArgument> {
        let dims = [1u32, 3, 224, 224];
        let desc = TensorDescriptor::from_parts(dims.len(), Some(&dims[..]), DType::F32, 0.0, 0)?;
        assert_eq!(desc.numel(), 3 * 224 * 224);
        assert_eq!(desc.num_bytes(), 4 * 3 * 224 * 224);
        assert_eq!(desc.strides(), Strides::from(&Shape::new(&dims)?));
        assert_eq!(desc.strides().to_vec(), vec![3 * 224 * 224, 224 * 224, 224, 1]);
        Ok(())
    }

    #[test]
    fn descriptors_cross_threads() {
        init();
        let desc = TensorDescriptor::new(shape![8, 8], DType::I8, 0.25, -3);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    let mut local = desc;
                    local.set_quantization_offset(i);
                    local
                })
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let local = handle.join().unwrap();
            assert_eq!(local.quantization_offset(), i as i32);
            assert_eq!(local.shape(), desc.shape());
        }
        assert_eq!(desc.quantization_offset(), -3);
    }
}
