use num_traits::Float;
use core::ops::{Deref, DerefMut};

//

/// Slice-like vector trait
///
/// Storage of vectors handled by [`crate::solver::LinAlg`].
/// Operators and solvers only see vectors through this trait,
/// and borrow sub-vectors with [`SliceLike::split_ref`] and [`SliceLike::split_mut`]
/// (or with [`crate::splitm`] and [`crate::splitm_mut`]).
pub trait SliceLike
{
    /// Element type.
    type F: Float;

    /// Borrows a plain slice as a vector.
    fn new_ref(s: &[Self::F]) -> SliceRef<'_, Self>;

    /// Mutably borrows a plain slice as a vector.
    fn new_mut(s: &mut[Self::F]) -> SliceMut<'_, Self>;

    /// Splits into `[0, mid)` and `[mid, len)`.
    fn split_ref(&self, mid: usize) -> (SliceRef<'_, Self>, SliceRef<'_, Self>);

    /// Mutably splits into `[0, mid)` and `[mid, len)`.
    fn split_mut(&mut self, mid: usize) -> (SliceMut<'_, Self>, SliceMut<'_, Self>);

    /// Number of elements.
    fn len(&self) -> usize;

    /// Elements as a plain slice.
    fn get_ref(&self) -> &[Self::F];

    /// Elements as a plain mutable slice.
    fn get_mut(&mut self) -> &mut[Self::F];

    /// Element at `idx`.
    fn get(&self, idx: usize) -> Self::F
    {
        self.get_ref()[idx]
    }

    /// Sets `val` to the element at `idx`.
    fn set(&mut self, idx: usize, val: Self::F)
    {
        self.get_mut()[idx] = val;
    }
}

/// Borrowed vector
#[derive(Debug)]
pub struct SliceRef<'a, S: SliceLike + ?Sized>
{
    s: &'a S,
}

impl<'a, S: SliceLike + ?Sized> Deref for SliceRef<'a, S>
{
    type Target = S;
    fn deref(&self) -> &Self::Target {self.s}
}

/// Mutably borrowed vector
#[derive(Debug)]
pub struct SliceMut<'a, S: SliceLike + ?Sized>
{
    s: &'a mut S,
}

impl<'a, S: SliceLike + ?Sized> Deref for SliceMut<'a, S>
{
    type Target = S;
    fn deref(&self) -> &Self::Target {self.s}
}

impl<'a, S: SliceLike + ?Sized> DerefMut for SliceMut<'a, S>
{
    fn deref_mut(&mut self) -> &mut Self::Target {self.s}
}

/// Splits a vector into consecutive named sub-vectors.
///
/// `splitm!(x, (a; 2), (b; 3))` binds `a` to `x[0..2]` and `b` to `x[2..5]`.
#[macro_export]
macro_rules! splitm {
    ($slice:expr, $( ($var:ident; $len:expr) ),+ ) => {
        let (_, _splitm_rest) = $slice.split_ref(0);
        $(
            let ($var, _splitm_rest) = _splitm_rest.split_ref($len);
        )*
        drop(_splitm_rest);
    };
}

/// Mutable version of [`splitm`].
#[macro_export]
macro_rules! splitm_mut {
    ($slice:expr, $( ($var:ident; $len:expr) ),+ ) => {
        let (_, mut _splitm_rest) = $slice.split_mut(0);
        $(
            let (mut $var, mut _splitm_rest) = _splitm_rest.split_mut($len);
        )*
        drop(_splitm_rest);
    };
}

//

impl<F: Float> SliceLike for [F]
{
    type F = F;

    fn new_ref(s: &[F]) -> SliceRef<'_, Self>
    {
        SliceRef {s}
    }

    fn new_mut(s: &mut[F]) -> SliceMut<'_, Self>
    {
        SliceMut {s}
    }

    fn split_ref(&self, mid: usize) -> (SliceRef<'_, Self>, SliceRef<'_, Self>)
    {
        let s = self.split_at(mid);
        (SliceRef {s: s.0}, SliceRef {s: s.1})
    }

    fn split_mut(&mut self, mid: usize) -> (SliceMut<'_, Self>, SliceMut<'_, Self>)
    {
        let s = self.split_at_mut(mid);
        (SliceMut {s: s.0}, SliceMut {s: s.1})
    }

    fn len(&self) -> usize
    {
        <[F]>::len(self)
    }

    fn get_ref(&self) -> &[F]
    {
        self
    }

    fn get_mut(&mut self) -> &mut[F]
    {
        self
    }
}

//

#[cfg(test)]
fn splitm_set<S: SliceLike<F=f64> + ?Sized>(x: &mut[f64])
{
    let mut x = S::new_mut(x);
    splitm_mut!(x, (a; 2), (b; 3));
    a.set(1, 10.);
    b.get_mut()[2] = 40.;
}

#[test]
fn test_splitm()
{
    let x = &mut[0., 1., 2., 3., 4.];

    // through a generic vector type, where only SliceLike::split_mut applies
    splitm_set::<[f64]>(x);

    let x = <[f64]>::new_ref(x);
    splitm!(x, (_a; 1), (b; 4));
    assert_eq!(b.get_ref(), &[10., 2., 3., 40.]);
}
