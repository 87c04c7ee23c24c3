use std::f64::consts::PI;

pub const DEFAULT_CURVATURE: f64 = 20.0;

// Upper bound for the horizon search; curvature 0 never reaches a cutoff.
const MAX_HORIZON: i64 = 360;
const HIDDEN_TILT: f64 = 90.0;

/// Visual parameters of a slot at a given offset from the selected one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    pub opacity: f64,
    pub tilt_deg: f64,
    pub lateral_em: f64,
}

impl SlotStyle {
    pub fn display_opacity(&self) -> f64 {
        self.opacity.max(0.0)
    }

    pub fn display_tilt(&self) -> f64 {
        self.tilt_deg.clamp(-HIDDEN_TILT, HIDDEN_TILT)
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.tilt_deg.abs() < HIDDEN_TILT
    }

    fn lerp(&self, to: &SlotStyle, t: f64) -> Self {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Self {
            opacity: mix(self.opacity, to.opacity),
            tilt_deg: mix(self.tilt_deg, to.tilt_deg),
            lateral_em: mix(self.lateral_em, to.lateral_em),
        }
    }
}

/// Which edge the slot pivots around when tilted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    BottomRight,
    TopRight,
    Center,
}

impl Origin {
    pub fn for_depth(depth: i64) -> Self {
        match depth.signum() {
            -1 => Self::BottomRight,
            1 => Self::TopRight,
            _ => Self::Center,
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn tilt_base(offset: f64, curvature: f64) -> f64 {
    (offset * curvature * (PI / 180.0)).cos()
}

/// Maps a signed offset from the selected slot to its raw (unclamped) style.
pub fn map_offset(offset: i64, curvature: f64) -> SlotStyle {
    let base = tilt_base(offset as f64, curvature);
    let sign = offset.signum() as f64;

    SlotStyle {
        opacity: round2(base / ((offset.abs() as f64) + 1.0).sqrt()),
        tilt_deg: round2(sign * (-100.0 + 50.0 * base * 2f64.powf(base))),
        lateral_em: round2(0.75 * (1.0 - base)),
    }
}

/// Smallest positive offset that is no longer visible for `curvature`.
pub fn visibility_horizon(curvature: f64) -> i64 {
    (1..MAX_HORIZON)
        .find(|&i| !map_offset(i, curvature).is_visible())
        .unwrap_or(MAX_HORIZON)
}

/// Per-curvature cache of the horizon and the block margin, resolving
/// depths to the clamped styles a renderer paints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub curvature: f64,
    pub horizon: i64,
    pub margin_em: f64,
}

impl Geometry {
    pub fn new(curvature: f64) -> Self {
        let horizon = visibility_horizon(curvature);
        Self {
            curvature,
            horizon,
            margin_em: map_offset(horizon + 1, curvature).lateral_em,
        }
    }

    pub fn is_visible(&self, depth: i64) -> bool {
        depth.abs() < self.horizon
    }

    pub fn style(&self, depth: i64) -> SlotStyle {
        if !self.is_visible(depth) {
            return self.hidden(depth);
        }
        let raw = map_offset(depth, self.curvature);
        SlotStyle {
            opacity: raw.display_opacity(),
            tilt_deg: raw.display_tilt(),
            lateral_em: raw.lateral_em,
        }
    }

    fn hidden(&self, depth: i64) -> SlotStyle {
        SlotStyle {
            opacity: 0.0,
            tilt_deg: if depth < 0 { HIDDEN_TILT } else { -HIDDEN_TILT },
            lateral_em: self.margin_em,
        }
    }

    /// Style for a fractional position, used while a rotation is in flight.
    pub fn style_at(&self, position: f64) -> SlotStyle {
        let lower = position.floor();
        let t = position - lower;
        let from = self.style(lower as i64);
        if t == 0.0 {
            return from;
        }
        from.lerp(&self.style(lower as i64 + 1), t)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(DEFAULT_CURVATURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_flat_and_opaque() {
        let style = map_offset(0, DEFAULT_CURVATURE);
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.tilt_deg, 0.0);
        assert_eq!(style.lateral_em, 0.0);
    }

    #[test]
    fn test_offsets_are_mirrored() {
        let above = map_offset(-2, DEFAULT_CURVATURE);
        let below = map_offset(2, DEFAULT_CURVATURE);
        assert_eq!(above.opacity, below.opacity);
        assert_eq!(above.tilt_deg, -below.tilt_deg);
        assert_eq!(above.lateral_em, below.lateral_em);
    }

    #[test]
    fn test_known_values() {
        let cases = vec![
            (1, SlotStyle { opacity: 0.66, tilt_deg: -9.88, lateral_em: 0.05 }),
            (2, SlotStyle { opacity: 0.44, tilt_deg: -34.86, lateral_em: 0.18 }),
            (3, SlotStyle { opacity: 0.25, tilt_deg: -64.64, lateral_em: 0.37 }),
        ];

        for (offset, expected) in cases {
            assert_eq!(map_offset(offset, 20.0), expected, "offset {offset}");
        }
    }

    #[test]
    fn test_visibility_horizon() {
        assert_eq!(visibility_horizon(20.0), 4);
        assert_eq!(visibility_horizon(10.0), 8);
        assert_eq!(visibility_horizon(45.0), 2);
        assert_eq!(visibility_horizon(90.0), 1);
    }

    #[test]
    fn test_degenerate_curvature_is_bounded() {
        assert_eq!(visibility_horizon(0.0), MAX_HORIZON);
        assert_eq!(visibility_horizon(f64::NAN), 1);
    }

    #[test]
    fn test_geometry_margin_uses_slot_past_horizon() {
        let geometry = Geometry::new(20.0);
        assert_eq!(geometry.horizon, 4);
        assert_eq!(geometry.margin_em, map_offset(5, 20.0).lateral_em);
    }

    #[test]
    fn test_hidden_slots_fold_away() {
        let geometry = Geometry::new(20.0);
        let below = geometry.style(4);
        let above = geometry.style(-7);
        assert_eq!(below.opacity, 0.0);
        assert_eq!(below.tilt_deg, -90.0);
        assert_eq!(above.tilt_deg, 90.0);
        assert_eq!(above.lateral_em, geometry.margin_em);
    }

    #[test]
    fn test_display_values_are_clamped() {
        let geometry = Geometry::new(30.0);
        let raw = map_offset(3, 30.0);
        assert!(raw.tilt_deg < -90.0);
        assert_eq!(raw.display_tilt(), -90.0);
        assert!(geometry.style(2).display_opacity() >= 0.0);
    }

    #[test]
    fn test_style_at_interpolates() {
        let geometry = Geometry::default();
        let halfway = geometry.style_at(0.5);
        assert!((halfway.opacity - 0.83).abs() < 1e-9);
        assert_eq!(geometry.style_at(1.0), geometry.style(1));
    }

    #[test]
    fn test_origin_follows_depth_sign() {
        assert_eq!(Origin::for_depth(-3), Origin::BottomRight);
        assert_eq!(Origin::for_depth(0), Origin::Center);
        assert_eq!(Origin::for_depth(2), Origin::TopRight);
    }
}
