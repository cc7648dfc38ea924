use thiserror::Error;

/// Inputs that fall outside the calculator's contract.
///
/// The numeric functions never produce this; they propagate `NaN`/`Inf`
/// instead. It is raised only by the opt-in check in
/// [`Interface::check`](crate::params::Interface::check), which the command
/// line front-end runs before evaluating anything.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractError {
    #[error("incident refractive index must be real, finite and positive, got {0}")]
    IncidentIndex(f64),
    #[error("substrate refractive index must have a finite, positive real part, got {re}{im:+}i")]
    SubstrateIndex { re: f64, im: f64 },
    #[error("incidence angle must lie in [0, pi/2) radians, got {0}")]
    Angle(f64),
}
