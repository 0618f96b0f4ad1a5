/*!
Operators, proximal operators and TV minimization built on [`proxsplit_core`].

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

[`proxsplit_core`] provides `no_std` proximal splitting solvers.
This crate adds what needs heap allocation:

* [`operator`] - combinators of linear operators (identity, scaling, composition, restriction,
  vertical stack, Kronecker product) and finite-difference operators
  with their semi-orthogonal even/odd splits.
* [`MatBuild`] - owned dense matrix usable as an operator.
* [`op_norm`] - spectral norm estimation by power iteration.
* [`prox`] - least-squares proximal operator by LSQR and separable sums of proximal operators.
* [`LeastSq`] - \\(\frac12 \\|A x - b\\|_2^2\\) as a smooth term.
* [`tv_min_2d_gfb`] and its variants - total-variation minimization by GFB.
* [`pdhg_tv`] - TV-regularized reconstruction \\(\frac12 \\|W x - p\\|_2^2 + a \\|D x\\|_1\\) by PDHG.

# Examples

Denoising a 1-D step by \\(\frac12 \\|x - b\\|_2^2 + a\\,{\rm TV}(x)\\):

```
use float_eq::assert_float_eq;
use proxsplit::prelude::*;
use proxsplit::*;
use proxsplit::operator::OpIdentity;

//env_logger::init(); // Use any logger crate as `proxsplit` uses `log` crate.

type La = FloatGeneric<f64>;

let b = [1., 1., 3., 3., 3.];
let f = LeastSq::<La, _>::new(OpIdentity::new(5), &b).unwrap();

let par = TvMinParam {
    weight: 0.1,
    max_iter: 200,
    ..Default::default()
};
let mut x = [0.; 5];
tv_min_1d_gfb::<La, _>(f, &par, &mut x).unwrap();

// each plateau moves by a / (its length)
assert_float_eq!(x.as_ref(), [1.05, 1.05, 2.9667, 2.9667, 2.9667].as_ref(), abs_all <= 1e-3);
```
*/

pub mod operator;

pub mod prox;

//

mod matbuild;

pub use matbuild::*;

//

mod norm;

pub use norm::*;

//

mod smooth;

pub use smooth::*;

//

mod tvmin;
mod pdhg_tv;

pub use tvmin::*;
pub use pdhg_tv::*;

//

/// Prelude
pub mod prelude
{
    pub use proxsplit_core::solver::{LinAlg, Operator, Prox, Smooth, SolverError};
    pub use proxsplit_core::solver::{ProxGrad, LinAdmm, Pdhg, Gfb, ProjGfb};
    pub use proxsplit_core::{FloatGeneric, MatOp, BoxBounds};
}
