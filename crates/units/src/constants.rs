//! Physical constants used throughout the engine.
//!
//! Values follow IAU 2015 nominal solar conversion constants.

/// Nominal solar radius (km)
pub const SOLAR_RADIUS_KM: f64 = 6.957e5;

/// Speed of light (km/s)
pub const SPEED_OF_LIGHT_KM_S: f64 = 2.997_924_58e5;

/// Seconds per day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Light travel time across one solar radius (days)
pub const LIGHT_TIME_SOLAR_RADIUS_DAYS: f64 =
    SOLAR_RADIUS_KM / (SPEED_OF_LIGHT_KM_S * SECONDS_PER_DAY);

/// Conversion from solar radii per day to km/s
pub const SOLAR_RADII_PER_DAY_TO_KM_S: f64 = SOLAR_RADIUS_KM / SECONDS_PER_DAY;

/// Apsidal-motion constant of an n = 1.5 polytrope
///
/// From Brooker & Olle (1955); fixes the fluid Love number
/// h_f = 1 + 2 k₂ = 1.2866 for convective stars.
pub const APSIDAL_CONSTANT_POLY_1_5: f64 = 0.1433;

/// Apsidal-motion constant of an n = 3 polytrope
///
/// Radiative stars; h_f = 1 + 2 k₂ = 1.0288.
pub const APSIDAL_CONSTANT_POLY_3: f64 = 0.0144;

/// Upper bound on the fluid Love number (uniform-density sphere, k₂ = 3/4)
pub const LOVE_NUMBER_MAX: f64 = 2.5;
