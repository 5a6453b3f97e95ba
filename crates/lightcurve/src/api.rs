//! Positional-array entry points.
//!
//! These are the stable boundary of the engine: flat parameter arrays in,
//! flat result rows out, matching the historical calling convention.
//! Angles arrive in degrees, spots column-major, tabulated limb darkening
//! as a μ-grid slice selected by the sentinel law tag. Input errors never
//! panic and never abort the caller: every output row is filled with the
//! sentinel value and the error bit instead.
//!
//! Rust consumers wanting typed parameters and results use
//! [`Engine`](crate::engine::Engine) directly.

use log::warn;

use orbit::{radial_velocities, Orbit};
use units::Angle;

use crate::engine::Engine;
use crate::flags::ObsFlags;
use crate::params::{BinaryParams, ControlParams, Spot, Verbosity, BAD_VALUE};

/// Synthesizes a light curve (plus auxiliary observables) at the given
/// times.
///
/// # Arguments
/// * `times` - observation times (days)
/// * `binary_pars` - the 39 scalar parameters
///   (see [`BinaryParams::from_slice`] for the slot order)
/// * `control_integers` - the 10 control integers
///   (see [`ControlParams::from_slice`])
/// * `spots_1`, `spots_2` - column-major spot arrays, `n_spot_par` rows
///   per spot (lat, lon, γ, factor; degrees); only the first
///   `n_spots` columns per the control block are read
/// * `n_spot_par` - rows per spot column (≥ 4)
/// * `mugrid_1`, `mugrid_2` - tabulated specific intensities, used when
///   the corresponding law tag is the μ-grid sentinel; pass empty slices
///   otherwise
/// * `verbose` - diagnostic verbosity
///
/// # Returns
/// One row per observation time: total flux, flux 1, flux 2, rv 1 (km/s),
/// rv 2 (km/s), flag word. A setup error yields sentinel-filled rows with
/// the error bit set; a per-observation numeric failure marks only its
/// own row.
#[allow(clippy::too_many_arguments)]
pub fn lc(
    times: &[f64],
    binary_pars: &[f64],
    control_integers: &[i32],
    spots_1: &[f64],
    spots_2: &[f64],
    n_spot_par: usize,
    mugrid_1: &[f64],
    mugrid_2: &[f64],
    verbose: Verbosity,
) -> Vec<[f64; 6]> {
    let engine = build_engine(
        binary_pars,
        control_integers,
        spots_1,
        spots_2,
        n_spot_par,
        mugrid_1,
        mugrid_2,
        verbose,
    );

    match engine {
        Ok(engine) => engine
            .run(times)
            .iter()
            .map(|obs| obs.to_columns())
            .collect(),
        Err(err) => {
            if verbose >= Verbosity::Warn {
                warn!("light-curve setup rejected: {err}");
            }
            let bad = crate::engine::ObservationResult::bad(ObsFlags::ERROR).to_columns();
            times.iter().map(|_| bad).collect()
        }
    }
}

/// Centre-of-mass radial velocities only; no flux machinery.
///
/// # Arguments
/// * `times` - observation times (days)
/// * `binary_pars` - the 39 scalar parameters; only the orbital subset is
///   consulted
/// * `verbose` - diagnostic verbosity
///
/// # Returns
/// One row per time: rv 1, rv 2 (km/s). Sentinel-filled rows on error.
pub fn rv(times: &[f64], binary_pars: &[f64], verbose: Verbosity) -> Vec<[f64; 2]> {
    let orbit = BinaryParams::from_slice(binary_pars)
        .map_err(|e| e.to_string())
        .and_then(|p| {
            let (ecc, omega) = orbit::elements::eccentricity_vector(p.f_c, p.f_s);
            Orbit::new(
                p.t_zero,
                p.period,
                ecc,
                omega,
                Angle::from_degrees(p.incl).to_radians(),
                Angle::from_degrees(p.domdt).to_radians(),
                Angle::from_degrees(p.didt).to_radians(),
                p.mass_ratio,
                p.semi_major,
            )
            .map_err(|e| e.to_string())
        });

    let orbit = match orbit {
        Ok(orbit) => orbit,
        Err(err) => {
            if verbose >= Verbosity::Warn {
                warn!("radial-velocity setup rejected: {err}");
            }
            return times.iter().map(|_| [BAD_VALUE, BAD_VALUE]).collect();
        }
    };

    times
        .iter()
        .map(|&t| match radial_velocities(&orbit, t) {
            Ok((rv1, rv2)) => [rv1.to_km_per_sec(), rv2.to_km_per_sec()],
            Err(_) => [BAD_VALUE, BAD_VALUE],
        })
        .collect()
}

/// Parses the boundary arrays and assembles the engine.
#[allow(clippy::too_many_arguments)]
fn build_engine(
    binary_pars: &[f64],
    control_integers: &[i32],
    spots_1: &[f64],
    spots_2: &[f64],
    n_spot_par: usize,
    mugrid_1: &[f64],
    mugrid_2: &[f64],
    verbose: Verbosity,
) -> Result<Engine, crate::error::InputError> {
    let params = BinaryParams::from_slice(binary_pars)?;
    let control = ControlParams::from_slice(control_integers)?;

    let spots_1 = Spot::from_columns(spots_1, n_spot_par.max(1), control.n_spots_1)?;
    let spots_2 = Spot::from_columns(spots_2, n_spot_par.max(1), control.n_spots_2)?;

    let grid_1 = (!mugrid_1.is_empty()).then_some(mugrid_1);
    let grid_2 = (!mugrid_2.is_empty()).then_some(mugrid_2);

    Engine::new(&params, &control, spots_1, spots_2, grid_1, grid_2, verbose)
}
