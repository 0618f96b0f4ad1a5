//! Proximal operators relying on dynamic heap allocation

mod lsq;
mod concat;

pub use lsq::*;
pub use concat::*;
