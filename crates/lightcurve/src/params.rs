//! Public parameter model of the engine.
//!
//! [`BinaryParams`] and [`ControlParams`] are the typed faces of the
//! positional boundary arrays (39 reals and 10 integers); the slot order
//! is documented on the `from_slice` constructors. Angles arrive in
//! degrees at this boundary and are converted once, here.

use serde::{Deserialize, Serialize};
use units::Angle;

use crate::error::InputError;
use crate::limb::LdLaw;
use crate::shape::ShapeModel;

/// Sentinel filling the scalar outputs of an observation that could not
/// be computed.
pub const BAD_VALUE: f64 = -9.9e37;

/// Internal marker for a velocity that has not been computed yet.
pub const NOT_SET: f64 = -9.9e36;

/// Number of scalar binary parameters at the boundary.
pub const N_BINARY_PARS: usize = 39;

/// Number of control integers at the boundary.
pub const N_CONTROL_INTS: usize = 10;

/// Number of per-spot parameters at the boundary.
pub const N_SPOT_PARS: usize = 4;

/// Diagnostic verbosity of a synthesis call.
///
/// Maps onto the `log` levels at the diagnostic sites; `Silent`
/// suppresses even warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    /// No diagnostics
    Silent,
    /// Warnings only
    Warn,
    /// Warnings plus per-call summaries
    User,
    /// Everything, including per-observation diagnostics
    Debug,
}

/// Quadrature grid size, either a conventional preset or an explicit
/// node count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridSize {
    /// 4 nodes per dimension
    VerySparse,
    /// 8 nodes
    Sparse,
    /// 16 nodes
    Default,
    /// 24 nodes
    Fine,
    /// 32 nodes
    VeryFine,
    /// Explicit node count
    Custom(usize),
}

impl GridSize {
    /// Nodes per dimension.
    pub fn resolve(&self) -> usize {
        match self {
            Self::VerySparse => 4,
            Self::Sparse => 8,
            Self::Default => 16,
            Self::Fine => 24,
            Self::VeryFine => 32,
            Self::Custom(n) => (*n).max(2),
        }
    }
}

/// The 39 scalar parameters of the binary.
///
/// Angles are stored here as given at the boundary (degrees); the engine
/// converts on ingestion. A semi-major axis ≤ 0 disables velocity output
/// and light-time handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryParams {
    /// Epoch of the reference eclipse (days)
    pub t_zero: f64,
    /// Anomalistic period (days)
    pub period: f64,
    /// Surface brightness ratio S₂/S₁
    pub surf_ratio: f64,
    /// Fractional radius R₁/a
    pub radius_1: f64,
    /// Fractional radius R₂/a
    pub radius_2: f64,
    /// Inclination at the epoch (degrees)
    pub incl: f64,
    /// Third light fraction ℓ₃
    pub light_3: f64,
    /// Semi-major axis (solar radii); ≤ 0 disables velocities
    pub semi_major: f64,
    /// √e·cos ω
    pub f_c: f64,
    /// √e·sin ω
    pub f_s: f64,
    /// Mass ratio q = m₂/m₁
    pub mass_ratio: f64,
    /// Limb-darkening coefficients of star 1
    pub ldc_1: [f64; 4],
    /// Limb-darkening coefficients of star 2
    pub ldc_2: [f64; 4],
    /// Gravity-darkening exponent of star 1
    pub gdc_1: f64,
    /// Gravity-darkening exponent of star 2
    pub gdc_2: f64,
    /// Inclination drift di/dt (degrees per sidereal period)
    pub didt: f64,
    /// Apsidal motion dω/dt (degrees per sidereal period)
    pub domdt: f64,
    /// Asynchronous rotation factor of star 1
    pub rotfac_1: f64,
    /// Asynchronous rotation factor of star 2
    pub rotfac_2: f64,
    /// Doppler boosting factor of star 1
    pub boost_1: f64,
    /// Doppler boosting factor of star 2
    pub boost_2: f64,
    /// Heating triplet (H₀, H₁, u_H) of star 1; H₁ ≤ 0 selects the
    /// simplified reflection model
    pub heat_1: [f64; 3],
    /// Heating triplet of star 2
    pub heat_2: [f64; 3],
    /// Sky-projected spin-orbit misalignment of star 1 (degrees)
    pub lambda_1: f64,
    /// Sky-projected spin-orbit misalignment of star 2 (degrees)
    pub lambda_2: f64,
    /// Projected equatorial rotation speed of star 1 (km/s)
    pub vsini_1: f64,
    /// Projected equatorial rotation speed of star 2 (km/s)
    pub vsini_2: f64,
    /// Fluid Love number of star 1
    pub hf_1: f64,
    /// Fluid Love number of star 2
    pub hf_2: f64,
}

impl BinaryParams {
    /// Reads the positional 39-element parameter array.
    ///
    /// Slot order (0-based): 0 T₀, 1 P, 2 S₂/S₁, 3 R₁/a, 4 R₂/a, 5 i₀,
    /// 6 ℓ₃, 7 a, 8 √e·cos ω, 9 √e·sin ω, 10 q, 11–14 ldc₁, 15–18 ldc₂,
    /// 19 β₁, 20 β₂, 21 di/dt, 22 dω/dt, 23 F₁, 24 F₂, 25 k_boost,1,
    /// 26 k_boost,2, 27–29 (H₀,H₁,u_H)₁, 30–32 (H₀,H₁,u_H)₂, 33 λ₁,
    /// 34 λ₂, 35 v·sin i₁, 36 v·sin i₂, 37 h_f,1, 38 h_f,2.
    pub fn from_slice(pars: &[f64]) -> Result<Self, InputError> {
        if pars.len() != N_BINARY_PARS {
            return Err(InputError::ParameterCount {
                expected: N_BINARY_PARS,
                found: pars.len(),
            });
        }
        Ok(Self {
            t_zero: pars[0],
            period: pars[1],
            surf_ratio: pars[2],
            radius_1: pars[3],
            radius_2: pars[4],
            incl: pars[5],
            light_3: pars[6],
            semi_major: pars[7],
            f_c: pars[8],
            f_s: pars[9],
            mass_ratio: pars[10],
            ldc_1: [pars[11], pars[12], pars[13], pars[14]],
            ldc_2: [pars[15], pars[16], pars[17], pars[18]],
            gdc_1: pars[19],
            gdc_2: pars[20],
            didt: pars[21],
            domdt: pars[22],
            rotfac_1: pars[23],
            rotfac_2: pars[24],
            boost_1: pars[25],
            boost_2: pars[26],
            heat_1: [pars[27], pars[28], pars[29]],
            heat_2: [pars[30], pars[31], pars[32]],
            lambda_1: pars[33],
            lambda_2: pars[34],
            vsini_1: pars[35],
            vsini_2: pars[36],
            hf_1: pars[37],
            hf_2: pars[38],
        })
    }

    /// A detached binary with two equal Sun-like spheres; the usual
    /// starting point for tests and examples.
    pub fn defaults() -> Self {
        Self {
            t_zero: 0.0,
            period: 1.0,
            surf_ratio: 1.0,
            radius_1: 0.1,
            radius_2: 0.1,
            incl: 90.0,
            light_3: 0.0,
            semi_major: 0.0,
            f_c: 0.0,
            f_s: 0.0,
            mass_ratio: 1.0,
            ldc_1: [0.0; 4],
            ldc_2: [0.0; 4],
            gdc_1: 0.0,
            gdc_2: 0.0,
            didt: 0.0,
            domdt: 0.0,
            rotfac_1: 1.0,
            rotfac_2: 1.0,
            boost_1: 0.0,
            boost_2: 0.0,
            heat_1: [0.0, 0.0, 0.0],
            heat_2: [0.0, 0.0, 0.0],
            lambda_1: 0.0,
            lambda_2: 0.0,
            vsini_1: 0.0,
            vsini_2: 0.0,
            hf_1: 1.5,
            hf_2: 1.5,
        }
    }
}

/// The 10 control integers, parsed into their typed meanings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlParams {
    /// Quadrature grid of star 1
    pub grid_1: GridSize,
    /// Quadrature grid of star 2
    pub grid_2: GridSize,
    /// Number of spots on star 1
    pub n_spots_1: usize,
    /// Number of spots on star 2
    pub n_spots_2: usize,
    /// Limb-darkening law of star 1
    pub ld_law_1: LdLaw,
    /// Limb-darkening law of star 2
    pub ld_law_2: LdLaw,
    /// Shape model of star 1
    pub shape_1: ShapeModel,
    /// Shape model of star 2
    pub shape_2: ShapeModel,
    /// Output flux-weighted radial velocities (Rossiter-McLaughlin)
    pub flux_weighted_rv: bool,
    /// Evaluate the exact Roche potential gradient for gravity darkening
    pub exact_grav: bool,
}

impl ControlParams {
    /// Reads the positional 10-element control array.
    ///
    /// Slot order: 0 grid₁, 1 grid₂ (nodes per dimension), 2 n_spots₁,
    /// 3 n_spots₂, 4 ld law₁, 5 ld law₂ (−1 selects the tabulated μ-grid),
    /// 6 shape₁, 7 shape₂, 8 flux-weighted rv flag, 9 exact gravity flag.
    pub fn from_slice(ints: &[i32]) -> Result<Self, InputError> {
        if ints.len() != N_CONTROL_INTS {
            return Err(InputError::ParameterCount {
                expected: N_CONTROL_INTS,
                found: ints.len(),
            });
        }
        Ok(Self {
            grid_1: GridSize::Custom(ints[0].max(2) as usize),
            grid_2: GridSize::Custom(ints[1].max(2) as usize),
            n_spots_1: ints[2].max(0) as usize,
            n_spots_2: ints[3].max(0) as usize,
            ld_law_1: LdLaw::from_tag(ints[4])?,
            ld_law_2: LdLaw::from_tag(ints[5])?,
            shape_1: ShapeModel::from_tag(ints[6])?,
            shape_2: ShapeModel::from_tag(ints[7])?,
            flux_weighted_rv: ints[8] != 0,
            exact_grav: ints[9] != 0,
        })
    }

    /// Spheres on default grids, linear limb darkening, no extras.
    pub fn defaults() -> Self {
        Self {
            grid_1: GridSize::Default,
            grid_2: GridSize::Default,
            n_spots_1: 0,
            n_spots_2: 0,
            ld_law_1: LdLaw::Linear,
            ld_law_2: LdLaw::Linear,
            shape_1: ShapeModel::Sphere,
            shape_2: ShapeModel::Sphere,
            flux_weighted_rv: false,
            exact_grav: false,
        }
    }
}

/// A circular spot on one star.
///
/// Angles are stored in radians; the boundary conversion from degrees
/// happens in the constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Latitude of the spot centre (radians)
    pub latitude: f64,
    /// Longitude of the spot centre (radians); zero faces the observer at
    /// the epoch for an edge-on orbit
    pub longitude: f64,
    /// Angular radius γ (radians)
    pub radius: f64,
    /// Surface brightness factor (0 = black, 1 = photosphere, >1 bright)
    pub factor: f64,
}

impl Spot {
    /// Builds a spot from boundary values in degrees.
    pub fn from_degrees(latitude: f64, longitude: f64, radius: f64, factor: f64) -> Self {
        Self {
            latitude: Angle::from_degrees(latitude).to_radians(),
            longitude: Angle::from_degrees(longitude).to_radians(),
            radius: Angle::from_degrees(radius).to_radians(),
            factor,
        }
    }

    /// Reads the first `n_spot` columns of a column-major spot array of
    /// `n_par` rows (lat, lon, γ, factor in degrees; rows beyond the
    /// fourth are ignored).
    pub fn from_columns(data: &[f64], n_par: usize, n_spot: usize) -> Result<Vec<Self>, InputError> {
        if n_spot == 0 {
            return Ok(Vec::new());
        }
        if n_par < N_SPOT_PARS || data.len() < n_par * n_spot {
            return Err(InputError::SpotLayout {
                len: data.len(),
                n_par,
                n_spot,
            });
        }
        Ok((0..n_spot)
            .map(|k| {
                let col = &data[k * n_par..];
                Self::from_degrees(col[0], col[1], col[2], col[3])
            })
            .collect())
    }

    /// Great-circle distance between two spot centres.
    pub fn angular_separation(&self, other: &Spot) -> f64 {
        let (s1, c1) = self.latitude.sin_cos();
        let (s2, c2) = other.latitude.sin_cos();
        let dl = self.longitude - other.longitude;
        (s1 * s2 + c1 * c2 * dl.cos()).clamp(-1.0, 1.0).acos()
    }
}
