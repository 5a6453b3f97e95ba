//! Binary-star light-curve and radial-velocity synthesis.
//!
//! Given the orbital and physical parameters of an eclipsing binary and a
//! list of observation times, the engine produces the combined apparent
//! flux of the pair plus per-star fluxes, radial velocities and an
//! eclipse classification word at every time. Each tidally distorted star
//! is approximated by a triaxial ellipsoid, projected onto the sky as an
//! ellipse; eclipses are classified from the two projected ellipses and
//! the obscured flux is integrated with adaptive Gauss-Legendre
//! quadrature over the curvilinear overlap regions. Circular spots,
//! irradiation or simple reflection, and Doppler boosting are
//! superposed without double-counting eclipsed flux.
//!
//! The positional-array boundary lives in [`api`]; typed consumers drive
//! [`engine::Engine`] directly.

pub mod api;
pub mod brightness;
pub mod engine;
pub mod error;
pub mod flags;
pub mod limb;
pub mod params;
pub mod partial;
pub mod quadrature;
pub mod shape;
pub mod spot_eclipse;
pub mod spots;

#[cfg(test)]
mod api_test;
#[cfg(test)]
mod spots_test;

pub use api::{lc, rv};
pub use engine::{Engine, ObservationResult};
pub use error::{InputError, NumericError};
pub use flags::ObsFlags;
pub use limb::{LdLaw, LimbDarkening};
pub use params::{
    BinaryParams, ControlParams, GridSize, Spot, Verbosity, BAD_VALUE, NOT_SET,
};
pub use shape::{roche_lobe_l1, star_shape, ShapeModel, StarShape};
