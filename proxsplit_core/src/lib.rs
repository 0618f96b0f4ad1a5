/*!
Matrix-free proximal splitting framework.

<script src="https://polyfill.io/v3/polyfill.min.js?features=es6"></script>
<script id="MathJax-script" async src="https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js"></script>

This crate provides first-order solvers for problems of the form
\\[
{\rm minimize} \ f(x) + g(A x),
\\]
optionally with a box constraint on \\(x\\),
where \\(A\\) is a linear [`solver::Operator`] defined only by its forward and adjoint action,
and \\(f\\), \\(g\\) are convex functions given by their proximal operators ([`solver::Prox`])
or gradients ([`solver::Smooth`]).

The crate is `no_std` and does not rely on dynamic heap allocation:
every solver and proximal operator that needs temporal vectors takes a work slice
whose length is given by its `query_worklen`.
*/

#![no_std]

#[cfg(test)]
extern crate std;

pub mod solver;

//

mod linalg_ex;

pub use linalg_ex::*;

//

mod floatgeneric;

pub use floatgeneric::*;

//

mod matop;

pub use matop::*;

//

mod prox_zero;
mod prox_box;
mod prox_l1;
mod prox_l2;
mod prox_l2sq;
mod prox_scale;
mod prox_orth;
mod prox_fn;
mod smooth_lsq;

pub use prox_zero::*;
pub use prox_box::*;
pub use prox_l1::*;
pub use prox_l2::*;
pub use prox_l2sq::*;
pub use prox_scale::*;
pub use prox_orth::*;
pub use prox_fn::*;
pub use smooth_lsq::*;
