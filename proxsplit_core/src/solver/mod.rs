//! Proximal splitting solvers and the traits they consume.

mod slicelike;
mod linalg;
mod operator;
mod prox;
mod smooth;
mod solver_error;
mod prox_grad;
mod lin_admm;
mod pdhg;
mod gfb;

pub use slicelike::*;
pub use linalg::*;
pub use operator::*;
pub use prox::*;
pub use smooth::*;
pub use solver_error::*;
pub use prox_grad::*;
pub use lin_admm::*;
pub use pdhg::*;
pub use gfb::*;

// periodic progress is logged at debug level, the rest at trace level
fn log_trig(log_period: usize, i: usize, max_iter: usize) -> bool
{
    log_period > 0 && (i % log_period == 0 || i + 1 == max_iter)
}
