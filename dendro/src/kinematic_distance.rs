//! Kinematic distances from a flat Galactic rotation curve
//!
//! Inside the solar circle a line-of-sight velocity is consistent with two
//! heliocentric distances placed symmetrically about the tangent point (the
//! kinematic distance ambiguity). Outside the solar circle only one solution
//! is positive, so the near and far branches coincide.
//!
//! Rotation parameters follow Reid et al. (2014): R0 = 8.34 kpc,
//! Θ0 = 240 km/s. A flat curve gives, for longitude l, latitude b and LSR
//! velocity v:
//!
//! ```text
//! R      = R0 Θ0 sin(l) cos(b) / (v + Θ0 sin(l) cos(b))
//! d(±)   = (R0 cos(l) ± sqrt(R² - R0² sin²(l))) / cos(b)
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Which branch of the kinematic distance solution to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NearFar {
    Near,
    Far,
}

/// Flat rotation curve model of the Milky Way
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationCurve {
    /// Galactocentric radius of the Sun (kpc)
    pub r0_kpc: f64,
    /// Circular rotation speed (km/s)
    pub theta0_kms: f64,
}

impl Default for RotationCurve {
    fn default() -> Self {
        Self::REID_2014
    }
}

impl RotationCurve {
    /// Reid et al. (2014) "A5" fit
    pub const REID_2014: RotationCurve = RotationCurve {
        r0_kpc: 8.34,
        theta0_kms: 240.0,
    };

    /// Galactocentric radius (kpc) implied by an LSR velocity along (l, b).
    ///
    /// Returns NaN when the geometry is undefined (zero projected rotation or
    /// a velocity the rotation curve cannot produce).
    pub fn galactocentric_radius(&self, l_deg: f64, b_deg: f64, v_lsr: f64) -> f64 {
        let projected = self.theta0_kms * l_deg.to_radians().sin() * b_deg.to_radians().cos();
        let denominator = v_lsr + projected;
        if projected == 0.0 || denominator == 0.0 {
            return f64::NAN;
        }
        let r = self.r0_kpc * projected / denominator;
        if r.is_finite() && r > 0.0 {
            r
        } else {
            f64::NAN
        }
    }

    /// Heliocentric kinematic distance (kpc) on the requested branch.
    ///
    /// Velocities beyond the terminal velocity are placed at the tangent
    /// point; where only one root is positive both branches return it.
    pub fn distance(&self, l_deg: f64, b_deg: f64, v_lsr: f64, branch: NearFar) -> f64 {
        let r = self.galactocentric_radius(l_deg, b_deg, v_lsr);
        if r.is_nan() {
            return f64::NAN;
        }

        let (sin_l, cos_l) = l_deg.to_radians().sin_cos();
        let cos_b = b_deg.to_radians().cos();
        let tangent = self.r0_kpc * cos_l;
        let discriminant = r * r - (self.r0_kpc * sin_l).powi(2);

        if discriminant < 0.0 {
            return if tangent > 0.0 { tangent / cos_b } else { f64::NAN };
        }

        let root = discriminant.sqrt();
        let near = tangent - root;
        let far = tangent + root;

        if far <= 0.0 {
            return f64::NAN;
        }
        if near <= 0.0 {
            return far / cos_b;
        }

        match branch {
            NearFar::Near => near / cos_b,
            NearFar::Far => far / cos_b,
        }
    }
}

/// Kinematic distance (column `D_k`, kpc) for every row on the requested
/// branch, in row order.
pub fn make_reid_distance_column(catalog: &Catalog, nearfar: NearFar) -> Vec<f64> {
    let curve = RotationCurve::REID_2014;
    catalog
        .iter()
        .map(|r| curve.distance(r.x_cen, r.y_cen, r.v_cen, nearfar))
        .collect()
}
