/// Solver errors.
/// 
/// Every variant except [`SolverError::ProxFailure`] and [`SolverError::SmoothFailure`]
/// is detected before the first iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError
{
    /// Size mismatch between a [`crate::solver::Operator`] and vectors or other operators.
    InvalidOp,
    /// Indices out of range or not strictly increasing.
    InvalidIndex,
    /// Box bounds with a lower bound greater than the upper bound, or with mismatched lengths.
    InvalidBounds,
    /// Shortage of work slice length.
    WorkShortage,
    /// Failure caused by [`crate::solver::Prox`].
    ProxFailure,
    /// Failure caused by [`crate::solver::Smooth`].
    SmoothFailure,
}

impl core::fmt::Display for SolverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", match &self {
            SolverError::InvalidOp     => "InvalidOp: size mismatch of Operator",
            SolverError::InvalidIndex  => "InvalidIndex: indices out of range or not strictly increasing",
            SolverError::InvalidBounds => "InvalidBounds: lower bound exceeds upper bound",
            SolverError::WorkShortage  => "WorkShortage: shortage of work slice length",
            SolverError::ProxFailure   => "ProxFailure: failure caused by Prox",
            SolverError::SmoothFailure => "SmoothFailure: failure caused by Smooth",
        })
    }
}

//

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for SolverError {}
