//! Geometric moments of a contour polygon and the seven Hu invariants.
//!
//! Raw moments are integrated over the region enclosed by the contour with
//! Green's theorem, so only the boundary points are needed. Central and
//! normalized central moments follow from the raw ones.

use serde::{Deserialize, Serialize};

use crate::types::{Contour, HuInvariants};

/// Raw, central and normalized central moments up to third order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
    pub m30: f64,
    pub m21: f64,
    pub m12: f64,
    pub m03: f64,

    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
    pub mu30: f64,
    pub mu21: f64,
    pub mu12: f64,
    pub mu03: f64,

    pub nu20: f64,
    pub nu11: f64,
    pub nu02: f64,
    pub nu30: f64,
    pub nu21: f64,
    pub nu12: f64,
    pub nu03: f64,
}

impl Moments {
    /// Moments of the polygon traced by `contour`.
    ///
    /// Orientation of the contour does not matter. A contour enclosing no
    /// area yields all-zero moments.
    pub fn of_contour(contour: &Contour) -> Self {
        let points = &contour.points;
        let Some(&[last_x, last_y]) = points.last() else {
            return Self::default();
        };

        let (mut a00, mut a10, mut a01) = (0.0, 0.0, 0.0);
        let (mut a20, mut a11, mut a02) = (0.0, 0.0, 0.0);
        let (mut a30, mut a21, mut a12, mut a03) = (0.0, 0.0, 0.0, 0.0);

        let (mut xp, mut yp) = (last_x as f64, last_y as f64);
        for &[x, y] in points {
            let (xi, yi) = (x as f64, y as f64);
            let (xp2, yp2) = (xp * xp, yp * yp);
            let (xi2, yi2) = (xi * xi, yi * yi);

            let cross = xp * yi - xi * yp;
            let sx = xp + xi;
            let sy = yp + yi;

            a00 += cross;
            a10 += cross * sx;
            a01 += cross * sy;
            a20 += cross * (xp * sx + xi2);
            a11 += cross * (xp * (sy + yp) + xi * (sy + yi));
            a02 += cross * (yp * sy + yi2);
            a30 += cross * sx * (xp2 + xi2);
            a03 += cross * sy * (yp2 + yi2);
            a21 += cross * (xp2 * (3.0 * yp + yi) + 2.0 * xi * xp * sy + xi2 * (yp + 3.0 * yi));
            a12 += cross * (yp2 * (3.0 * xp + xi) + 2.0 * yi * yp * sx + yi2 * (xp + 3.0 * xi));

            xp = xi;
            yp = yi;
        }

        if a00.abs() <= f64::EPSILON {
            return Self::default();
        }

        // Clockwise traversal integrates to negative area.
        let sign = a00.signum();
        let mut m = Self {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
            m20: sign * a20 / 12.0,
            m11: sign * a11 / 24.0,
            m02: sign * a02 / 12.0,
            m30: sign * a30 / 20.0,
            m21: sign * a21 / 60.0,
            m12: sign * a12 / 60.0,
            m03: sign * a03 / 20.0,
            ..Self::default()
        };
        m.complete();
        m
    }

    /// Center of mass, if the region has any mass.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        if self.m00 == 0.0 {
            return None;
        }
        Some([self.m10 / self.m00, self.m01 / self.m00])
    }

    fn complete(&mut self) {
        let cx = self.m10 / self.m00;
        let cy = self.m01 / self.m00;

        self.mu20 = self.m20 - self.m10 * cx;
        self.mu11 = self.m11 - self.m10 * cy;
        self.mu02 = self.m02 - self.m01 * cy;
        self.mu30 = self.m30 - cx * (3.0 * self.mu20 + cx * self.m10);
        self.mu21 = self.m21 - cx * (2.0 * self.mu11 + cx * self.m01) - cy * self.mu20;
        self.mu12 = self.m12 - cy * (2.0 * self.mu11 + cy * self.m10) - cx * self.mu02;
        self.mu03 = self.m03 - cy * (3.0 * self.mu02 + cy * self.m01);

        // nu_pq = mu_pq / m00^((p + q) / 2 + 1)
        let inv_m00 = 1.0 / self.m00.abs();
        let s2 = inv_m00 * inv_m00;
        let s3 = s2 * inv_m00.sqrt();

        self.nu20 = self.mu20 * s2;
        self.nu11 = self.mu11 * s2;
        self.nu02 = self.mu02 * s2;
        self.nu30 = self.mu30 * s3;
        self.nu21 = self.mu21 * s3;
        self.nu12 = self.mu12 * s3;
        self.nu03 = self.mu03 * s3;
    }

    /// The seven Hu invariants of the normalized central moments.
    pub fn hu_invariants(&self) -> HuInvariants {
        let (nu20, nu11, nu02) = (self.nu20, self.nu11, self.nu02);
        let (nu30, nu21, nu12, nu03) = (self.nu30, self.nu21, self.nu12, self.nu03);

        let a = nu30 + nu12;
        let b = nu21 + nu03;
        let c = nu30 - 3.0 * nu12;
        let d = 3.0 * nu21 - nu03;
        let (a2, b2) = (a * a, b * b);
        let diff = nu20 - nu02;

        let h1 = nu20 + nu02;
        let h2 = diff * diff + 4.0 * nu11 * nu11;
        let h3 = c * c + d * d;
        let h4 = a2 + b2;
        let h5 = c * a * (a2 - 3.0 * b2) + d * b * (3.0 * a2 - b2);
        let h6 = diff * (a2 - b2) + 4.0 * nu11 * a * b;
        let h7 = d * a * (a2 - 3.0 * b2) - c * b * (3.0 * a2 - b2);

        HuInvariants([h1, h2, h3, h4, h5, h6, h7])
    }
}

/// Sign-preserving log compression of one invariant: `0` stays `0`, anything
/// else maps to `-sign(v) * log10(|v|)`.
pub fn log_rescale(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        -value.signum() * value.abs().log10()
    }
}
