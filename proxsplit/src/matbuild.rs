use std::ops::{Index, IndexMut, Deref};
use num_traits::{Float, Zero, One};
use proxsplit_core::solver::SliceLike;
use proxsplit_core::{LinAlgEx, MatOp};

//

/// Matrix builder
/// 
/// <script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
/// <script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-svg.js"></script>
/// 
/// Dense matrix struct which owns a `Vec` of column-major data array and is able to be converted as [`proxsplit_core::MatOp`].
/// Handy for small explicit operators such as blurring kernels or test fixtures.
#[derive(Debug, Clone)]
pub struct MatBuild<L: LinAlgEx>
{
    size: (usize, usize),
    array: Vec<L::F>,
}

impl<L: LinAlgEx> MatBuild<L>
{
    /// Creates an instance.
    /// 
    /// Returns the [`MatBuild`] instance with zero data.
    /// * `size` is a number of rows and columns.
    pub fn new(size: (usize, usize)) -> Self
    {
        MatBuild {
            size,
            array: vec![L::F::zero(); size.0 * size.1],
        }
    }

    /// Identity matrix of size `n` x `n`.
    pub fn identity(n: usize) -> Self
    {
        let f1 = L::F::one();

        MatBuild::new((n, n)).by_fn(|r, c| if r == c {f1} else {L::F::zero()})
    }

    /// Size of the matrix.
    /// 
    /// Returns a tuple of a number of rows and columns.
    pub fn size(&self) -> (usize, usize)
    {
        self.size
    }

    /// Converted as [`proxsplit_core::MatOp`].
    /// 
    /// Returns the [`proxsplit_core::MatOp`] borrowing the internal data array.
    pub fn as_op(&self) -> MatOp<'_, L>
    {
        MatOp::new(self.size, &self.array)
    }

    /// Data by a function.
    /// 
    /// * `func` takes a row and a column of the matrix and returns data of each element.
    pub fn set_by_fn<M>(&mut self, mut func: M)
    where M: FnMut(usize, usize) -> L::F
    {
        let (nr, nc) = self.size;

        for c in 0.. nc {
            for r in 0.. nr {
                self[(r, c)] = func(r, c);
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_by_fn`].
    pub fn by_fn<M>(mut self, func: M) -> Self
    where M: FnMut(usize, usize) -> L::F
    {
        self.set_by_fn(func);
        self
    }

    /// Data by an iterator in column-major.
    /// 
    /// * `iter` iterates matrix data in column-major.
    pub fn set_iter_colmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        let mut i = iter.into_iter();
        let (nr, nc) = self.size;

        for c in 0.. nc {
            for r in 0.. nr {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    break;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_colmaj`].
    pub fn iter_colmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_colmaj(iter);
        self
    }

    /// Data by an iterator in row-major.
    /// 
    /// * `iter` iterates matrix data in row-major.
    pub fn set_iter_rowmaj<T, I>(&mut self, iter: T)
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        let mut i = iter.into_iter();
        let (nr, nc) = self.size;

        for r in 0.. nr {
            for c in 0.. nc {
                if let Some(v) = i.next() {
                    self[(r, c)] = *v;
                }
                else {
                    break;
                }
            }
        }
    }
    /// Builder pattern of [`MatBuild::set_iter_rowmaj`].
    pub fn iter_rowmaj<T, I>(mut self, iter: T) -> Self
    where T: IntoIterator<Item=I>, I: Deref<Target=L::F>
    {
        self.set_iter_rowmaj(iter);
        self
    }

    /// Scales by \\(\alpha\\).
    /// 
    /// * `alpha` is a scalar \\(\alpha\\).
    pub fn set_scale(&mut self, alpha: L::F)
    {
        L::scale(alpha, &mut L::Sl::new_mut(&mut self.array));
    }
    /// Builder pattern of [`MatBuild::set_scale`].
    pub fn scale(mut self, alpha: L::F) -> Self
    {
        self.set_scale(alpha);
        self
    }

    fn index(&self, (r, c): (usize, usize)) -> usize
    {
        let (nr, nc) = self.size;

        assert!(r < nr);
        assert!(c < nc);

        c * nr + r
    }
}

//

impl<L: LinAlgEx> Index<(usize, usize)> for MatBuild<L>
{
    type Output = L::F;
    fn index(&self, index: (usize, usize)) -> &Self::Output
    {
        let i = self.index(index);

        &self.array[i]
    }
}

impl<L: LinAlgEx> IndexMut<(usize, usize)> for MatBuild<L>
{
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output
    {
        let i = self.index(index);

        &mut self.array[i]
    }
}

//

impl<L: LinAlgEx> AsRef<[L::F]> for MatBuild<L>
{
    fn as_ref(&self) -> &[L::F]
    {
        &self.array
    }
}

impl<L: LinAlgEx> AsMut<[L::F]> for MatBuild<L>
{
    fn as_mut(&mut self) -> &mut[L::F]
    {
        &mut self.array
    }
}

//

impl<L: LinAlgEx> core::fmt::Display for MatBuild<L>
where L::F: Float + core::fmt::LowerExp
{
    fn fmt(&self, f: &mut core::fmt::Formatter) -> Result<(), core::fmt::Error>
    {
        let (nr, nc) = self.size();
        if nr == 0 || nc == 0 {
            write!(f, "[ ]")?;
        }
        else {
            write!(f, "[ {:.3e}", self[(0, 0)])?;
            if nc > 2 {
                write!(f, " ...")?;
            }
            if nc > 1 {
                write!(f, " {:.3e}", self[(0, nc - 1)])?;
            }

            if nr > 2 {
                writeln!(f)?;
                write!(f, "  ...")?;
            }

            if nr > 1 {
                writeln!(f)?;
                write!(f, "  {:.3e}", self[(nr - 1, 0)])?;
                if nc > 2 {
                    write!(f, " ...")?;
                }
                if nc > 1 {
                    write!(f, " {:.3e}", self[(nr - 1, nc - 1)])?;
                }
            }
            write!(f, " ]")?;
        }

        write!(f, " ({} x {})", nr, nc)
    }
}

//

#[test]
fn test_matbuild1()
{
    use float_eq::assert_float_eq;
    use proxsplit_core::FloatGeneric;

    type L = FloatGeneric<f64>;

    let ref_array = &[ // column-major
        1., 4.,
        2., 5.,
        3., 6.,
    ];

    let m = MatBuild::<L>::new((2, 3))
            .iter_rowmaj(&[
                1., 2., 3.,
                4., 5., 6.,
            ])
            .scale(2.);

    let m_array: &[f64] = m.array.as_ref();
    let ref_array: Vec<f64> = ref_array.iter().map(|v| v * 2.).collect();
    assert_float_eq!(m_array, ref_array.as_slice(), abs_all <= 1e-12);
    assert_eq!(format!("{}", m), "[ 2.000e0 ... 6.000e0\n  8.000e0 ... 1.200e1 ] (2 x 3)");
}
