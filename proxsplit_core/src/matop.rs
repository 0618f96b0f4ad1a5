use crate::solver::{SliceLike, SliceRef, Operator};
use crate::LinAlgEx;

//

/// Matrix operator
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>
/// 
/// Dense matrix struct which borrows a slice of column-major data array and implements [`Operator`].
#[derive(Debug)]
pub struct MatOp<'a, L: LinAlgEx>
{
    size: (usize, usize),
    array: SliceRef<'a, L::Sl>
}

impl<'a, L: LinAlgEx> MatOp<'a, L>
{
    /// Creates an instance
    /// 
    /// Returns [`MatOp`] instance.
    /// * `size`: a number of rows and a number of columns.
    /// * `array`: column-major matrix data.
    ///   Its length shall be the product of `size`.
    pub fn new(size: (usize, usize), array: &'a[L::F]) -> Self
    {
        assert_eq!(size.0 * size.1, array.len());

        MatOp {
            size,
            array: L::Sl::new_ref(array)
        }
    }

    fn op_impl(&self, transpose: bool, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        let (nr, nc) = self.size;

        if nr > 0 && nc > 0 {
            L::transform_ge(transpose, nr, nc, alpha, &self.array, x, beta, y)
        }
        else {
            L::scale(beta, y);
        }
    }
}

impl<'a, L: LinAlgEx> Operator<L> for MatOp<'a, L>
{
    fn size(&self) -> (usize, usize)
    {
        self.size
    }

    fn op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.op_impl(false, alpha, x, beta, y);
    }

    fn trans_op(&self, alpha: L::F, x: &L::Sl, beta: L::F, y: &mut L::Sl)
    {
        self.op_impl(true, alpha, x, beta, y);
    }
}

impl<'a, L: LinAlgEx> AsRef<[L::F]> for MatOp<'a, L>
{
    fn as_ref(&self) -> &[L::F]
    {
        self.array.get_ref()
    }
}

//

#[test]
fn test_matop1()
{
    use float_eq::assert_float_eq;
    use crate::FloatGeneric;

    type L = FloatGeneric<f64>;

    let array = &[ // column-major
        1., 4.,
        2., 5.,
        3., 6.,
    ];
    let m = MatOp::<L>::new((2, 3), array);

    let x = &[1., 0., -1.];
    let y = &mut[10., 20.];
    m.op(2., x, 1., y);
    assert_float_eq!(y.as_ref(), [6., 16.].as_ref(), abs_all <= 1e-12);

    let x = &[1., -1.];
    let y = &mut[f64::NAN; 3];
    m.trans_op(1., x, 0., y);
    assert_float_eq!(y.as_ref(), [-3., -3., -3.].as_ref(), abs_all <= 1e-12);
}
