//! Type-safe physical units for structure catalogs
//!
//! Angular sizes and distances are carried as `uom` quantities so that the
//! conversion from a sky radius to a physical size cannot silently mix
//! degrees with radians or parsecs with kiloparsecs.

use uom::si::angle::{degree, radian};
use uom::si::length::parsec;

/// Type alias for angular measurements (structure radii)
pub type Angle = uom::si::f64::Angle;

/// Type alias for length measurements (distances, physical sizes)
pub type Length = uom::si::f64::Length;

/// Parsecs per kiloparsec
const PARSECS_PER_KILOPARSEC: f64 = 1000.0;

/// Extension trait for angle conversions used on the sky
pub trait AngleExt {
    /// Create angle from degrees
    fn from_degrees(deg: f64) -> Self;

    /// Get angle in degrees
    fn as_degrees(&self) -> f64;

    /// Create angle from radians
    fn from_radians(rad: f64) -> Self;

    /// Get angle in radians
    fn as_radians(&self) -> f64;
}

/// Extension trait for astronomical distance conversions
pub trait DistanceExt {
    /// Create length from parsecs (cloud sizes)
    fn from_parsecs(pc: f64) -> Self;

    /// Get length in parsecs
    fn as_parsecs(&self) -> f64;

    /// Create length from kiloparsecs (heliocentric distances)
    fn from_kiloparsecs(kpc: f64) -> Self;
}

impl AngleExt for Angle {
    fn from_degrees(deg: f64) -> Self {
        Angle::new::<degree>(deg)
    }

    fn as_degrees(&self) -> f64 {
        self.get::<degree>()
    }

    fn from_radians(rad: f64) -> Self {
        Angle::new::<radian>(rad)
    }

    fn as_radians(&self) -> f64 {
        self.get::<radian>()
    }
}

impl DistanceExt for Length {
    fn from_parsecs(pc: f64) -> Self {
        Length::new::<parsec>(pc)
    }

    fn as_parsecs(&self) -> f64 {
        self.get::<parsec>()
    }

    fn from_kiloparsecs(kpc: f64) -> Self {
        Length::new::<parsec>(kpc * PARSECS_PER_KILOPARSEC)
    }
}

/// Physical size subtended by an angular radius at a given distance.
///
/// Small-angle approximation: `size = radius_in_radians * distance`.
pub fn projected_size(radius: Angle, distance: Length) -> Length {
    distance * radius.as_radians()
}

/// Serde adapter storing an [`Angle`] as plain degrees.
pub mod angle_degrees {
    use super::{Angle, AngleExt};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(angle: &Angle, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(angle.as_degrees())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Angle, D::Error> {
        let deg = f64::deserialize(deserializer)?;
        Ok(Angle::from_degrees(deg))
    }
}
