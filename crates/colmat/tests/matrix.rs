//! Integration tests for the algebra kernel.

use colmat::prelude::*;
use colmat::{identity_columns, Cofactor, Tolerance};

mod determinant_tests {
    use super::*;

    #[test]
    fn test_identity_determinant() {
        assert_eq!(determinant(&Mat2f::identity().unwrap()).unwrap(), 1.0);
        assert_eq!(determinant(&Mat3f::identity().unwrap()).unwrap(), 1.0);
        assert_eq!(determinant(&Mat4f::identity().unwrap()).unwrap(), 1.0);
        assert_eq!(determinant(&Mat2d::identity().unwrap()).unwrap(), 1.0);
        assert_eq!(determinant(&Mat3d::identity().unwrap()).unwrap(), 1.0);
        assert_eq!(determinant(&Mat4d::identity().unwrap()).unwrap(), 1.0);
        assert_eq!(determinant(&Mat4i::identity().unwrap()).unwrap(), 1);
    }

    #[test]
    fn test_determinant_is_deterministic() {
        let m = Mat4d::from_rows(&[
            [0.1, 0.2, 0.3, 0.4],
            [1.5, -2.5, 3.5, -4.5],
            [0.7, 0.0, 0.9, 1.1],
            [2.0, 1.0, 0.5, 0.25],
        ])
        .unwrap();
        let first = determinant(&m).unwrap();
        for _ in 0..10 {
            assert_eq!(determinant(&m).unwrap().to_bits(), first.to_bits());
        }
        assert_eq!(m.to_columns().unwrap().determinant().to_bits(), first.to_bits());
    }

    #[test]
    fn test_triangular_determinant() {
        let m = Mat4i::from_rows(&[[2, 7, 1, 8], [0, 3, 1, 4], [0, 0, -1, 5], [0, 0, 0, 4]]).unwrap();
        assert_eq!(determinant(&m).unwrap(), 2 * 3 * -4);
    }
}

mod inverse_tests {
    use super::*;

    #[test]
    fn test_invert_identity_every_dimension() {
        let mut s2 = Scratch2d::new();
        let mut s3 = Scratch3d::new();
        let mut s4 = Scratch4d::new();

        let mut out2 = Mat2d::zeroed().unwrap();
        let mut out3 = Mat3d::zeroed().unwrap();
        let mut out4 = Mat4d::zeroed().unwrap();

        assert_eq!(invert(&Mat2d::identity().unwrap(), &mut out2, &mut s2).unwrap(), Some(1.0));
        assert_eq!(invert(&Mat3d::identity().unwrap(), &mut out3, &mut s3).unwrap(), Some(1.0));
        assert_eq!(invert(&Mat4d::identity().unwrap(), &mut out4, &mut s4).unwrap(), Some(1.0));

        assert_eq!(out2.to_columns().unwrap(), identity_columns());
        assert_eq!(out3.to_columns().unwrap(), identity_columns());
        assert_eq!(out4.to_columns().unwrap(), identity_columns());
    }

    #[test]
    fn test_invert_zero_matrix() {
        let mut scratch = Scratch4f::new();
        let zero = Mat4f::zeroed().unwrap();
        let mut out = Mat4f::zeroed().unwrap();
        out.fill(42.0).unwrap();

        assert_eq!(invert(&zero, &mut out, &mut scratch).unwrap(), None);
        assert_eq!(out.to_columns().unwrap(), [[42.0; 4]; 4]);
    }

    #[test]
    fn test_inverse_times_matrix() {
        let mut scratch = Scratch4d::new();
        let m = Mat4d::from_rows(&[
            [4.0, 0.0, 1.0, 2.0],
            [1.0, 3.0, 0.0, 1.0],
            [0.0, 2.0, 5.0, 0.0],
            [1.0, 0.0, 1.0, 6.0],
        ])
        .unwrap();
        let mut inv = Mat4d::zeroed().unwrap();
        let mut product = Mat4d::zeroed().unwrap();

        let det = invert(&m, &mut inv, &mut scratch).unwrap().unwrap();
        assert!((det - determinant(&m).unwrap()).abs() < 1e-12);

        multiply(&m, &inv, &mut product, &mut scratch).unwrap();
        let id = Mat4d::identity().unwrap();
        assert!(approx_eq(&product, &id, &Tolerance::new(1e-12, 1e-12)).unwrap());
    }

    #[test]
    fn test_double_inverse() {
        let mut scratch = Scratch3f::new();
        let m = Mat3f::from_rows(&[[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0]]).unwrap();
        let mut inv = Mat3f::zeroed().unwrap();
        let mut back = Mat3f::zeroed().unwrap();

        invert(&m, &mut inv, &mut scratch).unwrap();
        invert(&inv, &mut back, &mut scratch).unwrap();
        assert!(approx_eq(&back, &m, &Tolerance::default()).unwrap());
    }

    #[test]
    fn test_inverse_swaps_spaces() {
        space!(Local);
        space!(Parent);

        let mut scratch = Scratch4f::new();
        let mut to_parent = MatrixView::<f32, 4, Local, Parent>::zeroed().unwrap();
        translation_3d([1.0, 2.0, 3.0], &mut to_parent).unwrap();

        let mut to_local = MatrixView::<f32, 4, Parent, Local>::zeroed().unwrap();
        invert(&to_parent, &mut to_local, &mut scratch).unwrap();
        assert_eq!(to_local.get_col(3).unwrap(), [-1.0, -2.0, -3.0, 1.0]);

        let mut round_trip = MatrixView::<f32, 4, Local, Local>::zeroed().unwrap();
        multiply(&to_local, &to_parent, &mut round_trip, &mut scratch).unwrap();
        assert_eq!(round_trip.to_columns().unwrap(), identity_columns());
    }
}

mod product_tests {
    use super::*;

    #[test]
    fn test_identity_is_neutral() {
        let mut scratch = ScratchContext::<i32, 3>::new();
        let m = Mat3i::from_rows(&[[3, -1, 4], [1, 5, -9], [2, 6, 5]]).unwrap();
        let id = Mat3i::identity().unwrap();
        let mut out = Mat3i::zeroed().unwrap();

        multiply(&m, &id, &mut out, &mut scratch).unwrap();
        assert_eq!(out.to_columns().unwrap(), m.to_columns().unwrap());
        multiply(&id, &m, &mut out, &mut scratch).unwrap();
        assert_eq!(out.to_columns().unwrap(), m.to_columns().unwrap());
    }

    #[test]
    fn test_transpose_strategies_agree() {
        let mut scratch = Scratch4f::new();
        let m = Mat4f::from_rows(&[
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
        .unwrap();
        let mut copied = Mat4f::zeroed().unwrap();
        transpose(&m, &mut copied, &mut scratch).unwrap();

        let mut in_place = m.duplicate().unwrap();
        transpose_in_place(&mut in_place).unwrap();

        assert_eq!(copied.to_columns().unwrap(), in_place.to_columns().unwrap());
        assert_eq!(copied.get_row(0).unwrap(), [1.0, 5.0, 9.0, 13.0]);
        assert_eq!(trace(&copied).unwrap(), trace(&m).unwrap());
    }

    #[test]
    fn test_gaussian_elimination_with_rows() {
        // solve [[2, 1], [1, 3]] x = [3, 5] on an augmented 2x3 view
        let mut aug = FixedView::<f64, 2, 3>::from_rows(&[[2.0, 1.0, 3.0], [1.0, 3.0, 5.0]]).unwrap();
        scale_row(&mut aug, 0, 0.5).unwrap();
        add_scaled_row(&mut aug, 0, 1, -1.0).unwrap();
        scale_row(&mut aug, 1, 0.4).unwrap();
        add_scaled_row(&mut aug, 1, 0, -0.5).unwrap();

        let x = aug.get_col(2).unwrap();
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic_chain() {
        let a = Mat2i::from_rows(&[[1, 2], [3, 4]]).unwrap();
        let b = Mat2i::from_rows(&[[4, 3], [2, 1]]).unwrap();
        let mut out = Mat2i::zeroed().unwrap();

        add(&a, &b, &mut out).unwrap();
        assert_eq!(out.to_columns().unwrap(), [[5, 5], [5, 5]]);
        sub_assign(&mut out, &a).unwrap();
        assert_eq!(out.to_columns().unwrap(), b.to_columns().unwrap());
        scale_in_place(&mut out, 2).unwrap();
        negate(&out.share(), &mut out).unwrap();
        assert_eq!(out.get_row(0).unwrap(), [-8, -6]);
    }
}
