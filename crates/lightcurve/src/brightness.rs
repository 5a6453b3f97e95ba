//! Surface-brightness kernel.
//!
//! [`BrightnessParams`] carries everything needed to evaluate the local
//! surface brightness of one star at a projected sky point, relative to
//! the centre of that star's projected ellipse: limb darkening, gravity
//! darkening (closed-form ellipsoid approximation or exact Roche
//! gradient), irradiation heating, and the optional flux-weighting by the
//! local line-of-sight rotation velocity used for Rossiter-McLaughlin
//! radial velocities.
//!
//! The kernel is a pure function of (s, t) and the parameter block; the
//! partial-eclipse integrators re-parameterize their curvilinear regions
//! through the explicit [`RegionTransform`] instead of side-channel state.

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};

use crate::limb::LimbDarkening;
use crate::shape::StarShape;

/// Irradiation heating parameters of one star; `h1 ≤ 0` disables the
/// kernel-level heating term (the orchestrator then applies the simple
/// reflection model instead).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heating {
    /// Bolometric flux scale of the companion
    pub companion_flux: f64,
    /// Heating coefficient H₀
    pub h0: f64,
    /// Heating exponent H₁
    pub h1: f64,
    /// Linear limb coefficient of the reprocessed light
    pub u_h: f64,
    /// Fractional radius of the companion
    pub companion_radius: f64,
}

/// Affine map from an integration parameterization (f, g) to the kernel's
/// (s, t) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionTransform {
    /// Linear part
    pub linear: Matrix2<f64>,
    /// Offset part
    pub translation: Vector2<f64>,
}

impl RegionTransform {
    /// Applies the map to a point.
    pub fn apply(&self, f: f64, g: f64) -> (f64, f64) {
        let v = self.linear * Vector2::new(f, g) + self.translation;
        (v.x, v.y)
    }
}

/// Parameter block of the brightness kernel for one star.
#[derive(Debug, Clone)]
pub struct BrightnessParams {
    /// Surface brightness scale (1 for star 1, S₂/S₁ for star 2)
    pub scale: f64,
    /// Approximating ellipsoid
    pub shape: StarShape,
    /// Limb-darkening profile
    pub limb: LimbDarkening,
    /// Gravity-darkening exponent β
    pub grav_beta: f64,
    /// Evaluate |∇Φ| of the Roche potential instead of the ellipsoid
    /// closed form
    pub exact_grav: bool,
    /// Companion mass over this star's mass
    pub mass_ratio: f64,
    /// Asynchronous rotation factor
    pub rotfac: f64,
    /// Irradiation heating, if enabled
    pub heating: Option<Heating>,
    /// Sky-projected spin-orbit misalignment (radians)
    pub lambda: f64,
    /// Projected equatorial rotation speed (km/s)
    pub vsini: f64,
    /// Doppler boosting factor (consumed by the orchestrator)
    pub boost: f64,
    /// Return B·v_los instead of B
    pub rv_weighted: bool,
    /// Optional integration-frame transform
    pub region_transform: Option<RegionTransform>,
    /// Current separation in units of the semi-major axis
    pub sep: f64,
    // Geometry caches, rebuilt by `set_geometry`
    rot: Matrix3<f64>,
    quadric: Matrix3<f64>,
}

impl BrightnessParams {
    /// Builds the block and prepares its geometry caches.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scale: f64,
        shape: StarShape,
        limb: LimbDarkening,
        grav_beta: f64,
        exact_grav: bool,
        mass_ratio: f64,
        rotfac: f64,
        heating: Option<Heating>,
        lambda: f64,
        vsini: f64,
        boost: f64,
        phase: f64,
        incl: f64,
        sep: f64,
    ) -> Self {
        let mut block = Self {
            scale,
            shape,
            limb,
            grav_beta,
            exact_grav,
            mass_ratio,
            rotfac,
            heating,
            lambda,
            vsini,
            boost,
            rv_weighted: false,
            region_transform: None,
            sep,
            rot: Matrix3::identity(),
            quadric: Matrix3::identity(),
        };
        block.set_geometry(shape, phase, incl, sep);
        block
    }

    /// Refreshes the ellipsoid and viewing geometry (needed each
    /// observation on eccentric orbits).
    ///
    /// `phase` is the angle of the line of centres from the sky x-axis in
    /// the orbital plane, `incl` the inclination.
    pub fn set_geometry(&mut self, shape: StarShape, phase: f64, incl: f64, sep: f64) {
        self.shape = shape;
        self.sep = sep;

        let (sp, cp) = phase.sin_cos();
        let (si, ci) = incl.sin_cos();
        let rz = Matrix3::new(cp, -sp, 0.0, sp, cp, 0.0, 0.0, 0.0, 1.0);
        let ri = Matrix3::new(1.0, 0.0, 0.0, 0.0, ci, -si, 0.0, si, ci);
        self.rot = ri * rz;

        let (a, b, c) = shape.axes;
        let d = Matrix3::from_diagonal(&Vector3::new(
            1.0 / (a * a),
            1.0 / (b * b),
            1.0 / (c * c),
        ));
        self.quadric = self.rot * d * self.rot.transpose();
    }

    /// Surface brightness at sky point (s, t) relative to the projected
    /// ellipse centre, or B·v_los when `rv_weighted` is set.
    ///
    /// Points outside the silhouette evaluate to zero, so quadrature nodes
    /// that spill over the limb contribute nothing.
    pub fn evaluate(&self, s: f64, t: f64) -> f64 {
        let (s, t) = match &self.region_transform {
            Some(rt) => rt.apply(s, t),
            None => (s, t),
        };

        // Line-of-sight depth of the visible surface point: the larger
        // root of the quadric restricted to (s, t, w)
        let q = &self.quadric;
        let a_q = q[(2, 2)];
        let b_q = 2.0 * (q[(0, 2)] * s + q[(1, 2)] * t);
        let c_q = q[(0, 0)] * s * s + 2.0 * q[(0, 1)] * s * t + q[(1, 1)] * t * t - 1.0;
        let disc = b_q * b_q - 4.0 * a_q * c_q;
        if disc < 0.0 {
            return 0.0;
        }
        let w = (-b_q + disc.sqrt()) / (2.0 * a_q);
        let p_sky = Vector3::new(s, t, w);

        // mu from the outward normal, clipped into [0, 1]
        let normal = q * p_sky;
        let mu = (normal.z / normal.norm()).clamp(0.0, 1.0);

        let p_body = self.rot.transpose() * p_sky;

        let mut bright = self.scale * self.limb.intensity(mu) * self.gravity_factor(&p_body);

        if let Some(heat) = &self.heating {
            if heat.h1 > 0.0 {
                bright *= self.heating_factor(heat, &p_body, mu);
            }
        }

        if self.rv_weighted {
            bright *= self.line_of_sight_velocity(s, t);
        }
        bright
    }

    /// Gravity-darkening factor (g/g_pole)^β.
    fn gravity_factor(&self, p_body: &Vector3<f64>) -> f64 {
        if self.grav_beta == 0.0 {
            return 1.0;
        }
        let (a, b, c) = self.shape.axes;

        let (g, g_pole) = if self.exact_grav {
            let pole = Vector3::new(0.0, 0.0, c);
            (
                self.roche_gradient(p_body).norm(),
                self.roche_gradient(&pole).norm(),
            )
        } else {
            // Gradient of the ellipsoid level function, normalized at the
            // pole; the cheap stand-in for |grad phi|
            let grad = Vector3::new(
                p_body.x / (a * a),
                p_body.y / (b * b),
                p_body.z / (c * c),
            );
            (grad.norm(), 1.0 / c)
        };
        (g / g_pole).powf(self.grav_beta)
    }

    /// Gradient of the Roche potential at a body-frame point (relative to
    /// the ellipsoid centre), in units G = M_star = 1.
    fn roche_gradient(&self, p_body: &Vector3<f64>) -> Vector3<f64> {
        let q = self.mass_ratio;
        let d = self.sep;
        // Mass centre sits `offset` behind the centre of figure
        let p = Vector3::new(p_body.x + self.shape.offset, p_body.y, p_body.z);
        let to_comp = Vector3::new(p.x - d, p.y, p.z);

        let r1 = p.norm().max(1e-12);
        let r2 = to_comp.norm().max(1e-12);
        let omega2 = self.rotfac * self.rotfac * (1.0 + q) / (d * d * d);
        let x_cm = d * q / (1.0 + q);

        let mut grad = -p / (r1 * r1 * r1) - to_comp * (q / (r2 * r2 * r2));
        grad.x += omega2 * (p.x - x_cm);
        grad.y += omega2 * p.y;
        grad
    }

    /// Irradiation heating factor at a surface point.
    fn heating_factor(&self, heat: &Heating, p_body: &Vector3<f64>, mu: f64) -> f64 {
        let (a, b, c) = self.shape.axes;
        // Companion centre in the body frame, relative to the ellipsoid
        // centre
        let comp = Vector3::new(self.sep - self.shape.offset, 0.0, 0.0);
        let to_comp = comp - p_body;
        let dist2 = to_comp.norm_squared().max(1e-12);

        let n_body = Vector3::new(
            p_body.x / (a * a),
            p_body.y / (b * b),
            p_body.z / (c * c),
        )
        .normalize();
        let mu_irr = (n_body.dot(&to_comp) / dist2.sqrt()).max(0.0);

        let geometry = heat.companion_radius * heat.companion_radius / dist2;
        1.0 + heat.h0
            * heat.companion_flux
            * geometry
            * mu_irr.powf(heat.h1)
            * (1.0 - heat.u_h * (1.0 - mu))
    }

    /// Local line-of-sight rotation velocity (km/s) of a solid-body
    /// rotator with sky-projected obliquity λ.
    fn line_of_sight_velocity(&self, s: f64, t: f64) -> f64 {
        let (a, b, _) = self.shape.axes;
        let r_eq = 0.5 * (a + b);
        let (sl, cl) = self.lambda.sin_cos();
        self.vsini * (s * cl + t * sl) / r_eq
    }
}
