//! Eclipse orchestrator: the per-observation synthesis loop.
//!
//! [`Engine::new`] validates the inputs, builds the orbit, the star
//! shapes and the normalization constants; [`Engine::observe`] then runs
//! the fixed per-observation sequence: propagate, rebuild shapes (if the
//! orbit is eccentric), project, integrate whole-disc fluxes, classify the
//! eclipse, integrate the eclipsed contributions, fold in spots,
//! reflection and Doppler boosting, and normalize.
//!
//! The engine is immutable after construction; every observation works on
//! per-call scratch copies, so a caller may farm the loop out across
//! threads.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use log::{debug, warn};
use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};

use geometry::{ell_ell_intersect, ell_ell_overlap, project_ellipsoid, Ellipse, IntersectFlags};
use orbit::elements::eccentricity_vector;
use orbit::Orbit;
use units::constants::SPEED_OF_LIGHT_KM_S;
use units::Angle;

use crate::brightness::{BrightnessParams, Heating, RegionTransform};
use crate::error::InputError;
use crate::flags::ObsFlags;
use crate::limb::LimbDarkening;
use crate::params::{BinaryParams, ControlParams, Spot, Verbosity, BAD_VALUE, NOT_SET};
use crate::partial::{double_partial, partial, Region};
use crate::quadrature::ellgauss;
use crate::shape::{roche_lobe_l1, star_shape, ShapeModel, StarShape};
use crate::spot_eclipse::spot_eclipsed_fraction;
use crate::spots::{spot_modulation, SpotVisibility};

/// One row of the synthesis output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationResult {
    /// Normalized total flux (1 at the epoch, out of eclipse)
    pub total_flux: f64,
    /// Normalized flux of star 1
    pub flux_1: f64,
    /// Normalized flux of star 2
    pub flux_2: f64,
    /// Radial velocity of star 1 (km/s)
    pub rv_1: f64,
    /// Radial velocity of star 2 (km/s)
    pub rv_2: f64,
    /// Classification and diagnostic bits
    pub flags: ObsFlags,
}

impl ObservationResult {
    /// An uncomputable observation: sentinel values plus the reason bits.
    pub fn bad(flags: ObsFlags) -> Self {
        Self {
            total_flux: BAD_VALUE,
            flux_1: BAD_VALUE,
            flux_2: BAD_VALUE,
            rv_1: BAD_VALUE,
            rv_2: BAD_VALUE,
            flags,
        }
    }

    /// The raw column layout of the boundary interface.
    pub fn to_columns(&self) -> [f64; 6] {
        [
            self.total_flux,
            self.flux_1,
            self.flux_2,
            self.rv_1,
            self.rv_2,
            self.flags.bits() as f64,
        ]
    }
}

/// Immutable per-star synthesis context.
#[derive(Debug, Clone)]
struct StarContext {
    /// Fractional radius parameter
    radius: f64,
    /// Shape model
    model: ShapeModel,
    /// Asynchronous rotation factor
    rotfac: f64,
    /// Companion mass over this star's mass
    q_comp: f64,
    /// Fluid Love number
    hf: f64,
    /// Quadrature nodes per dimension
    grid: usize,
    /// Brightness parameter block with the epoch geometry
    bright: BrightnessParams,
    /// Spots hosted by this star
    spots: Vec<Spot>,
    /// Ellipsoid at the epoch separation
    shape: StarShape,
    /// Numeric-to-analytic ellipse area ratio at the epoch
    anorm: f64,
    /// Whole-disc flux at the epoch (anorm-normalized)
    disc_ref: f64,
    /// Doppler boosting factor
    boost: f64,
    /// Heating triplet (H₀, H₁, u_H)
    heat: [f64; 3],
}

/// The synthesis engine for one set of binary parameters.
pub struct Engine {
    orbit: Orbit,
    ecc: f64,
    semi_major: f64,
    star1: StarContext,
    star2: StarContext,
    /// Constant third light, same scale as the disc fluxes
    flux3: f64,
    /// Normalization from the epoch observation, eclipse logic skipped
    fnorm: f64,
    flux_weighted_rv: bool,
    /// Warning bits determined at setup (overlapping spots)
    base_flags: ObsFlags,
    verbosity: Verbosity,
}

impl Engine {
    /// Validates the inputs and prepares the immutable context.
    ///
    /// Fatal input problems (radius above the Roche limit, Love number
    /// out of range, malformed arrays) surface here; the per-observation
    /// loop afterwards never returns an error, only flag bits.
    pub fn new(
        params: &BinaryParams,
        control: &ControlParams,
        spots_1: Vec<Spot>,
        spots_2: Vec<Spot>,
        mugrid_1: Option<&[f64]>,
        mugrid_2: Option<&[f64]>,
        verbosity: Verbosity,
    ) -> Result<Self, InputError> {
        if params.period <= 0.0 {
            return Err(InputError::PeriodNotPositive(params.period));
        }
        for (star, radius) in [(1u8, params.radius_1), (2u8, params.radius_2)] {
            if radius <= 0.0 {
                return Err(InputError::RadiusNotPositive { star, radius });
            }
        }
        if !(0.0..1.0).contains(&params.light_3) {
            return Err(InputError::ThirdLightOutOfRange(params.light_3));
        }

        let (ecc, omega0) = eccentricity_vector(params.f_c, params.f_s);
        if ecc >= 1.0 {
            return Err(InputError::EccentricityOutOfRange(ecc));
        }

        for (star, model, hf) in [
            (1u8, control.shape_1, params.hf_1),
            (2u8, control.shape_2, params.hf_2),
        ] {
            if model == ShapeModel::Love && !(0.0..=2.5).contains(&hf) {
                return Err(InputError::LoveNumberOutOfRange { star, value: hf });
            }
        }

        // Roche limit at periastron; the ellipsoid approximation has no
        // meaning for an overflowing star, and degrades near the limit on
        // eccentric orbits
        let mut base_flags = ObsFlags::empty();
        for (star, radius, q_comp, rotfac) in [
            (1u8, params.radius_1, params.mass_ratio, params.rotfac_1),
            (
                2u8,
                params.radius_2,
                1.0 / params.mass_ratio,
                params.rotfac_2,
            ),
        ] {
            let limit = roche_lobe_l1(q_comp, rotfac) * (1.0 - ecc);
            if radius > limit {
                return Err(InputError::RadiusAboveRocheLimit {
                    star,
                    radius,
                    limit,
                });
            }
            if ecc > 0.0 && radius > 0.9 * limit {
                if verbosity >= Verbosity::Warn {
                    warn!(
                        "star {star} radius {radius} is close to its periastron Roche limit {limit}"
                    );
                }
                base_flags |= ObsFlags::WARNING;
            }
        }

        let incl0 = Angle::from_degrees(params.incl).to_radians();
        let orbit = Orbit::new(
            params.t_zero,
            params.period,
            ecc,
            omega0,
            incl0,
            Angle::from_degrees(params.domdt).to_radians(),
            Angle::from_degrees(params.didt).to_radians(),
            params.mass_ratio,
            params.semi_major,
        )
        .map_err(|_| InputError::EccentricityOutOfRange(ecc))?;

        let limb1 = LimbDarkening::from_law(control.ld_law_1, &params.ldc_1, mugrid_1, 1)?;
        let limb2 = LimbDarkening::from_law(control.ld_law_2, &params.ldc_2, mugrid_2, 2)?;

        // Epoch geometry: separation at the corrected T0 and the line of
        // centres angles at conjunction
        let sep0 = orbit
            .phase_state(orbit.t_zero)
            .map(|p| p.sep)
            .unwrap_or(1.0);
        let phase1_0 = FRAC_PI_2 + PI;
        let phase2_0 = FRAC_PI_2;

        let shape1 = star_shape(
            control.shape_1,
            params.radius_1,
            sep0,
            params.rotfac_1,
            params.mass_ratio,
            params.hf_1,
        )
        .map_err(|_| InputError::ShapeNotConverged { star: 1 })?;
        let shape2 = star_shape(
            control.shape_2,
            params.radius_2,
            sep0,
            params.rotfac_2,
            1.0 / params.mass_ratio,
            params.hf_2,
        )
        .map_err(|_| InputError::ShapeNotConverged { star: 2 })?;

        let heating1 = heating_block(params.heat_1, params.surf_ratio, params.radius_2);
        let heating2 = heating_block(params.heat_2, 1.0, params.radius_1);

        let bright1 = BrightnessParams::new(
            1.0,
            shape1,
            limb1,
            params.gdc_1,
            control.exact_grav,
            params.mass_ratio,
            params.rotfac_1,
            heating1,
            Angle::from_degrees(params.lambda_1).to_radians(),
            params.vsini_1,
            params.boost_1,
            phase1_0,
            incl0,
            sep0,
        );
        let bright2 = BrightnessParams::new(
            params.surf_ratio,
            shape2,
            limb2,
            params.gdc_2,
            control.exact_grav,
            1.0 / params.mass_ratio,
            params.rotfac_2,
            heating2,
            Angle::from_degrees(params.lambda_2).to_radians(),
            params.vsini_2,
            params.boost_2,
            phase2_0,
            incl0,
            sep0,
        );

        let mut star1 = StarContext {
            radius: params.radius_1,
            model: control.shape_1,
            rotfac: params.rotfac_1,
            q_comp: params.mass_ratio,
            hf: params.hf_1,
            grid: control.grid_1.resolve(),
            bright: bright1,
            spots: spots_1,
            shape: shape1,
            anorm: 1.0,
            disc_ref: 0.0,
            boost: params.boost_1,
            heat: params.heat_1,
        };
        let mut star2 = StarContext {
            radius: params.radius_2,
            model: control.shape_2,
            rotfac: params.rotfac_2,
            q_comp: 1.0 / params.mass_ratio,
            hf: params.hf_2,
            grid: control.grid_2.resolve(),
            bright: bright2,
            spots: spots_2,
            shape: shape2,
            anorm: 1.0,
            disc_ref: 0.0,
            boost: params.boost_2,
            heat: params.heat_2,
        };

        // anorm and the epoch whole-disc fluxes
        for (star, phase) in [(&mut star1, phase1_0), (&mut star2, phase2_0)] {
            let ellipse = project_ellipsoid(star.shape.axes, phase, incl0);
            let unit = ellgauss(ellipse.semi_major, ellipse.semi_minor, star.grid, |_, _| 1.0);
            star.anorm = unit.area / ellipse.area;
            let disc = disc_integral(&star.bright, &ellipse, star.grid, false);
            star.disc_ref = disc.flux / star.anorm;
        }

        let flux3 = params.light_3 / (1.0 - params.light_3) * (star1.disc_ref + star2.disc_ref);

        // Reflection at the epoch enters the normalization so that the
        // out-of-eclipse flux at T0 is exactly 1
        let x0 = incl0.sin();
        let refl1_0 = reflection(&star1, star2.disc_ref, sep0, x0, -1.0);
        let refl2_0 = reflection(&star2, star1.disc_ref, sep0, x0, 1.0);
        let fnorm = star1.disc_ref + star2.disc_ref + flux3 + refl1_0 + refl2_0;

        for (star, bit) in [(&star1, ObsFlags::WARN_SPOT_1), (&star2, ObsFlags::WARN_SPOT_2)] {
            for i in 0..star.spots.len() {
                for j in (i + 1)..star.spots.len() {
                    let sep = star.spots[i].angular_separation(&star.spots[j]);
                    if sep < star.spots[i].radius + star.spots[j].radius {
                        if verbosity >= Verbosity::Warn {
                            warn!("overlapping spots {i} and {j}; additive fluxes may be unphysical");
                        }
                        base_flags |= bit | ObsFlags::WARNING;
                    }
                }
            }
        }

        Ok(Self {
            orbit,
            ecc,
            semi_major: params.semi_major,
            star1,
            star2,
            flux3,
            fnorm,
            flux_weighted_rv: control.flux_weighted_rv,
            base_flags,
            verbosity,
        })
    }

    /// Runs the synthesis over an array of observation times.
    pub fn run(&self, times: &[f64]) -> Vec<ObservationResult> {
        times.iter().map(|&t| self.observe(t)).collect()
    }

    /// Synthesizes one observation.
    pub fn observe(&self, t: f64) -> ObservationResult {
        let mut flags = self.base_flags;

        let state = match self.orbit.sky_state(t) {
            Ok(s) => s,
            Err(err) => {
                if self.verbosity >= Verbosity::Warn {
                    warn!("orbit propagation failed at t={t}: {err}");
                }
                flags |= ObsFlags::FAIL;
                return ObservationResult::bad(flags);
            }
        };
        let incl = state.incl;
        let evolving = self.ecc > 0.0;

        // Line-of-centres angle seen from each star, at its retarded time
        let phase1 = state.nu1 + state.omega2;
        let phase2 = state.nu2 + state.omega1;

        // Step 2: refresh shapes on eccentric orbits (volume conserved,
        // radius not)
        let (shape1, shape2) = if evolving {
            let s1 = star_shape(
                self.star1.model,
                self.star1.radius,
                state.sep1,
                self.star1.rotfac,
                self.star1.q_comp,
                self.star1.hf,
            );
            let s2 = star_shape(
                self.star2.model,
                self.star2.radius,
                state.sep2,
                self.star2.rotfac,
                self.star2.q_comp,
                self.star2.hf,
            );
            match (s1, s2) {
                (Ok(a), Ok(b)) => (a, b),
                _ => {
                    flags |= ObsFlags::FAIL;
                    return ObservationResult::bad(flags);
                }
            }
        } else {
            (self.star1.shape, self.star2.shape)
        };

        let mut bright1 = self.star1.bright.clone();
        bright1.set_geometry(shape1, phase1, incl, state.sep1);
        let mut bright2 = self.star2.bright.clone();
        bright2.set_geometry(shape2, phase2, incl, state.sep2);

        // Step 3: project onto the sky and move to the apparent centres
        let ell1 = place_ellipse(
            project_ellipsoid(shape1.axes, phase1, incl),
            &state.pos1,
            shape1.offset,
            phase1,
            incl,
        );
        let ell2 = place_ellipse(
            project_ellipsoid(shape2.axes, phase2, incl),
            &state.pos2,
            shape2.offset,
            phase2,
            incl,
        );

        // Step 4: whole-disc fluxes, anorm-normalized
        let rv_wanted = self.flux_weighted_rv && self.semi_major > 0.0;
        let disc1 = disc_integral(&bright1, &ell1, self.star1.grid, false).flux / self.star1.anorm;
        let disc2 = disc_integral(&bright2, &ell2, self.star2.grid, false).flux / self.star2.anorm;
        let mut rvflux = [NOT_SET, NOT_SET];
        if rv_wanted {
            rvflux[0] =
                disc_integral(&bright1, &ell1, self.star1.grid, true).flux / self.star1.anorm;
            rvflux[1] =
                disc_integral(&bright2, &ell2, self.star2.grid, true).flux / self.star2.anorm;
        }

        // Step 5: classify the eclipse
        let star1_front = state.star1_in_front();
        let (host, host_star, comp) = if star1_front {
            (&ell2, 2usize, &ell1)
        } else {
            (&ell1, 1usize, &ell2)
        };
        let host_ctx = if host_star == 1 { &self.star1 } else { &self.star2 };
        let host_bright = if host_star == 1 { &bright1 } else { &bright2 };
        let host_disc = if host_star == 1 { disc1 } else { disc2 };

        let isect = ell_ell_intersect(host, comp);
        if isect.flags.contains(IntersectFlags::ERROR) {
            flags |= ObsFlags::FAIL;
            return ObservationResult::bad(flags);
        }
        if isect.flags.contains(IntersectFlags::WARN_INACCURATE) {
            flags |= ObsFlags::WARNING;
        }
        let (overlap_area, _) = ell_ell_overlap(host, comp);
        let eclipsed = overlap_area > 0.0;

        let mut kind = EclipseKind::None;
        if eclipsed {
            flags |= ObsFlags::ECLIPSE;
            flags |= if host_star == 1 {
                ObsFlags::STAR1_ECLIPSED
            } else {
                ObsFlags::STAR2_ECLIPSED
            };
            kind = if isect.flags.contains(IntersectFlags::IDENTICAL)
                || isect.flags.contains(IntersectFlags::ONE_INSIDE_TWO)
            {
                flags |= ObsFlags::TOTAL;
                EclipseKind::Total
            } else if isect.flags.contains(IntersectFlags::TWO_INSIDE_ONE) {
                flags |= ObsFlags::TRANSIT;
                EclipseKind::Transit
            } else if isect.count == 4 {
                flags |= ObsFlags::DOUBLE_PARTIAL;
                EclipseKind::DoublePartial
            } else {
                EclipseKind::Partial
            };
        }

        // Step 6: eclipsed flux (and rv-flux) of the host star
        let n = host_ctx.grid;
        let n_y_min = (n / 4).max(4).min(n);
        let mut ecl_flux = 0.0;
        let mut ecl_rv = 0.0;
        if eclipsed && kind != EclipseKind::Total {
            match eclipse_integral(
                kind,
                host,
                comp,
                &isect.points,
                host_bright,
                overlap_area,
                host_disc,
                n,
                n_y_min,
                false,
            ) {
                Ok(v) => ecl_flux = v,
                Err(_) => {
                    flags |= ObsFlags::FAIL;
                    return ObservationResult::bad(flags);
                }
            }
            if rv_wanted {
                match eclipse_integral(
                    kind,
                    host,
                    comp,
                    &isect.points,
                    host_bright,
                    overlap_area,
                    rvflux[host_star - 1],
                    n,
                    n_y_min,
                    true,
                ) {
                    Ok(v) => ecl_rv = v,
                    Err(_) => flags |= ObsFlags::WARNING,
                }
            }
        }

        // Step 7: spot modulation and the eclipsed-spot corrections
        let mut spot_net = [0.0, 0.0];
        let mut spot_ecl = [0.0, 0.0];
        for (idx, (ctx, disc, bright, ell)) in [
            (&self.star1, disc1, &bright1, &ell1),
            (&self.star2, disc2, &bright2, &ell2),
        ]
        .into_iter()
        .enumerate()
        {
            if ctx.spots.is_empty() {
                continue;
            }
            let rot_phase =
                TAU * ctx.rotfac * (t - self.orbit.t_zero) / self.orbit.period_anom;
            for spot in &ctx.spots {
                let st = spot_modulation(spot, &bright.limb, rot_phase, incl);
                let contrib = (st.modulation - 1.0) * disc;
                spot_net[idx] += contrib;

                let hosted_eclipse = eclipsed
                    && host_star == idx + 1
                    && kind != EclipseKind::Total
                    && st.visibility != SpotVisibility::Hidden;
                if hosted_eclipse {
                    let local_r = local_spot_radius(&bright.shape, spot, rot_phase);
                    let scale = 1.0 / local_r;
                    let comp_n = comp.transformed(
                        &(Matrix2::identity() * scale),
                        &(-ell.center.coords * scale),
                    );
                    let frac = spot_eclipsed_fraction(st.alpha, st.beta, spot.radius, &comp_n);
                    spot_ecl[idx] += frac * contrib;
                }
            }
        }

        // Steps 6 (deferred total) and 8: superpose
        let mut flux = [disc1 + spot_net[0], disc2 + spot_net[1]];
        let host_idx = host_star - 1;
        if eclipsed {
            if kind == EclipseKind::Total {
                ecl_rv = if rv_wanted { rvflux[host_idx] } else { 0.0 };
                flux[host_idx] = 0.0;
            } else {
                flux[host_idx] -= ecl_flux + spot_ecl[host_idx];
                // The eclipsed region cannot outshine the un-eclipsed disc
                flux[host_idx] = flux[host_idx]
                    .min(disc_for(host_idx, disc1, disc2) + spot_net[host_idx])
                    .max(0.0);
            }
        }

        // Step 9: simple reflection (heating disabled), attenuated by the
        // eclipsed fraction, never boosted
        let x = incl.sin() * (state.phase.true_anom + state.omega1).sin();
        let mut refl1 = reflection(&self.star1, disc2, state.phase.sep, x, -1.0);
        let mut refl2 = reflection(&self.star2, disc1, state.phase.sep, x, 1.0);
        if disc1 > 0.0 {
            refl1 *= (flux[0] / (disc1 + spot_net[0]).max(1e-300)).clamp(0.0, 1.0);
        }
        if disc2 > 0.0 {
            refl2 *= (flux[1] / (disc2 + spot_net[1]).max(1e-300)).clamp(0.0, 1.0);
        }

        // Step 10: Doppler boosting from the orbital radial velocities
        let mut rv = [0.0_f64, 0.0];
        if self.semi_major > 0.0 {
            let v_orb = TAU * self.semi_major
                / (self.orbit.period_anom * (1.0 - self.ecc * self.ecc).sqrt());
            let (f1, f2) = self.orbit.mass_fractions();
            let si = incl.sin();
            rv[0] = units::Velocity::from_solar_radii_per_day(
                -f1 * v_orb * si
                    * ((state.nu1 + state.omega1).cos() + self.ecc * state.omega1.cos()),
            )
            .to_km_per_sec();
            rv[1] = units::Velocity::from_solar_radii_per_day(
                -f2 * v_orb * si
                    * ((state.nu2 + state.omega2).cos() + self.ecc * state.omega2.cos()),
            )
            .to_km_per_sec();

            for k in 0..2 {
                let boost = if k == 0 { self.star1.boost } else { self.star2.boost };
                flux[k] *= 1.0 - boost * rv[k] / SPEED_OF_LIGHT_KM_S;
            }
        }

        // Step 11: flux-weighted radial velocities
        if rv_wanted {
            for k in 0..2 {
                let ecl_term = if k == host_idx { ecl_rv } else { 0.0 };
                if flux[k] > 0.0 {
                    rv[k] += (rvflux[k] - ecl_term) / flux[k];
                } else {
                    rv[k] = 0.0;
                }
            }
        }

        // Step 12: combine and normalize
        let total = (flux[0] + flux[1] + self.flux3 + refl1 + refl2) / self.fnorm;
        if self.verbosity >= Verbosity::Debug {
            debug!("t={t} total={total} flags={:#x}", flags.bits());
        }

        ObservationResult {
            total_flux: total,
            flux_1: flux[0] / self.fnorm,
            flux_2: flux[1] / self.fnorm,
            rv_1: rv[0],
            rv_2: rv[1],
            flags,
        }
    }
}

/// Eclipse topology dispatch of step 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EclipseKind {
    None,
    Partial,
    DoublePartial,
    Transit,
    Total,
}

/// Whole-disc integral of a star's brightness (or rv-weighted brightness)
/// over its projected ellipse, evaluated in the ellipse's principal frame
/// through a rotation-only region transform.
fn disc_integral(
    bright: &BrightnessParams,
    ellipse: &Ellipse,
    n: usize,
    rv_weighted: bool,
) -> crate::quadrature::QuadOutcome {
    let mut block = bright.clone();
    block.rv_weighted = rv_weighted;
    let (s, c) = ellipse.rotation.sin_cos();
    block.region_transform = Some(RegionTransform {
        linear: Matrix2::new(c, -s, s, c),
        translation: Vector2::zeros(),
    });
    ellgauss(ellipse.semi_major, ellipse.semi_minor, n, |x, y| {
        block.evaluate(x, y)
    })
}

/// Eclipsed-region integral of step 6, dispatched on the classification.
///
/// Each branch forms the area-weighted mean brightness of its region and
/// rescales by the analytic region area, so the leading quadrature error
/// cancels and no anorm correction is needed here (that factor belongs to
/// the whole-disc integrals). For a partial eclipse covering more than
/// half the host the complement is integrated and subtracted, which keeps
/// the quadrature region (and so the relative error) small.
#[allow(clippy::too_many_arguments)]
fn eclipse_integral(
    kind: EclipseKind,
    host: &Ellipse,
    comp: &Ellipse,
    points: &[Point2<f64>],
    host_bright: &BrightnessParams,
    overlap_area: f64,
    host_disc: f64,
    n: usize,
    n_y_min: usize,
    rv_weighted: bool,
) -> Result<f64, crate::error::NumericError> {
    let mut bright = host_bright.clone();
    bright.rv_weighted = rv_weighted;

    match kind {
        EclipseKind::Transit => {
            // Host brightness over the companion's disc, via the enabled
            // coordinate transform into the companion's principal frame
            let (s, c) = comp.rotation.sin_cos();
            bright.region_transform = Some(RegionTransform {
                linear: Matrix2::new(c, -s, s, c),
                translation: comp.center - host.center,
            });
            let q = ellgauss(comp.semi_major, comp.semi_minor, n, |x, y| {
                bright.evaluate(x, y)
            });
            Ok(q.mean() * comp.area)
        }
        EclipseKind::Partial => {
            if overlap_area < 0.5 * host.area {
                let q = partial(
                    host,
                    comp,
                    points[0],
                    points[1],
                    Region::Eclipsed,
                    &bright,
                    n,
                    n_y_min,
                    n,
                )?;
                Ok(q.mean() * overlap_area)
            } else {
                let q = partial(
                    host,
                    comp,
                    points[0],
                    points[1],
                    Region::Uneclipsed,
                    &bright,
                    n,
                    n_y_min,
                    n,
                )?;
                let unecl_area = host.area - overlap_area;
                Ok(host_disc - q.mean() * unecl_area)
            }
        }
        EclipseKind::DoublePartial => {
            // The integrator covers the two uneclipsed caps; scale by the
            // uneclipsed area and subtract from the whole disc
            let q = double_partial(host, comp, points, &bright, n, n_y_min, n)?;
            let unecl_area = host.area - overlap_area;
            Ok(host_disc - q.mean() * unecl_area)
        }
        _ => Ok(0.0),
    }
}

/// Places a projected ellipse at a star's apparent centre, including the
/// projected offset of the centre of figure toward the companion.
fn place_ellipse(
    ellipse: Ellipse,
    pos: &[f64; 3],
    offset: f64,
    phase: f64,
    incl: f64,
) -> Ellipse {
    let (sp, cp) = phase.sin_cos();
    let u = pos[0] + offset * cp;
    let v = pos[1] + offset * sp * incl.cos();
    ellipse.centered_at(u, v)
}

/// Simple reflection of one star: ½(1 + sign·x)² phase function over the
/// squared separation, scaled by the companion's flux and the star's
/// cross-section. Active only when the heating model is disabled
/// (H₁ ≤ 0).
fn reflection(star: &StarContext, comp_disc: f64, sep: f64, x: f64, sign: f64) -> f64 {
    if star.heat[1] > 0.0 || star.heat[0] == 0.0 {
        return 0.0;
    }
    let geometry = (star.radius / sep).powi(2);
    let phase_fn = 0.5 + 0.5 * x * x + sign * x;
    star.heat[0] * comp_disc * geometry * phase_fn
}

/// Directed radius of the host at the spot position, for the unit-disc
/// rescaling of the companion ellipse.
fn local_spot_radius(shape: &StarShape, spot: &Spot, rot_phase: f64) -> f64 {
    let lon = spot.longitude + rot_phase;
    let (sb, cb) = spot.latitude.sin_cos();
    let (sl, cl) = lon.sin_cos();
    shape.directed_radius((cb * cl, cb * sl, sb))
}

/// Heating block for one star, or `None` when the exponent disables it.
fn heating_block(heat: [f64; 3], comp_scale: f64, comp_radius: f64) -> Option<Heating> {
    if heat[1] <= 0.0 {
        return None;
    }
    Some(Heating {
        companion_flux: comp_scale,
        h0: heat[0],
        h1: heat[1],
        u_h: heat[2],
        companion_radius: comp_radius,
    })
}

/// Disc flux of star `idx` from the two precomputed values.
fn disc_for(idx: usize, disc1: f64, disc2: f64) -> f64 {
    if idx == 0 {
        disc1
    } else {
        disc2
    }
}
