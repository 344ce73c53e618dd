// color.rs - Radial hue bands with a rotating phase

/// An 8-bit RGB triple as written to a pixel sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Parameters of the distance-to-colour transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Hue at the centre of the grid, in degrees.
    pub base_hue: f32,
    /// How far the hue drops between the centre and a corner.
    pub hue_span: f32,
    pub saturation: f32,
    pub brightness: f32,
    /// Brightness lost at the corners. Zero keeps the whole field at full value.
    pub brightness_falloff: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            base_hue: 160.0,
            hue_span: 50.0,
            saturation: 0.8,
            brightness: 1.0,
            brightness_falloff: 0.0,
        }
    }
}

impl Palette {
    /// Colour of a live cell at `(x, y)` on a `width` x `height` grid.
    pub fn cell_color(&self, x: usize, y: usize, width: usize, height: usize, hue_phase: f32) -> Rgb {
        let eased = ease_out_cubic(normalized_distance(x, y, width, height));
        let hue = self.base_hue - eased * self.hue_span;
        let brightness = self.brightness - eased * self.brightness_falloff;
        hsv_to_rgb(wrap_degrees(hue + hue_phase), self.saturation, brightness)
    }
}

/// Distance from the centre cell, scaled so a corner is 1.0.
pub fn normalized_distance(x: usize, y: usize, width: usize, height: usize) -> f32 {
    let (cx, cy) = ((width / 2) as f32, (height / 2) as f32);
    let distance = (x as f32 - cx).hypot(y as f32 - cy);
    let max_distance = cx.hypot(cy);
    if max_distance == 0.0 {
        return 0.0;
    }
    (distance / max_distance).clamp(0.0, 1.0)
}

/// Wraps degrees into `[0, 360)`. `rem_euclid` alone can return exactly
/// 360.0 for tiny negative inputs; that and NaN map to 0.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped < 360.0 { wrapped } else { 0.0 }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Sector-based HSV to RGB. `hue` is in degrees and wrapped into `[0, 360)`;
/// `saturation` and `value` are in `[0, 1]`.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let hue = wrap_degrees(hue);
    let c = value * saturation;
    let x = c * (1.0 - ((hue / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = value - c;

    let sector = ((hue / 60.0) as usize).min(5);
    let (r1, g1, b1) = match sector {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new(channel(r1 + m), channel(g1 + m), channel(b1 + m))
}

fn channel(component: f32) -> u8 {
    (component * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_channel_delta(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(-120.0, 1.0, 1.0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(hsv_to_rgb(200.0, 0.0, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(hsv_to_rgb(17.0, 0.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn continuous_across_sector_boundaries() {
        for boundary in [0.0_f32, 60.0, 120.0, 180.0, 240.0, 300.0] {
            let below = hsv_to_rgb(boundary - 0.001, 0.8, 1.0);
            let at = hsv_to_rgb(boundary, 0.8, 1.0);
            let above = hsv_to_rgb(boundary + 0.001, 0.8, 1.0);
            assert!(max_channel_delta(below, at) <= 1, "jump below {boundary}: {below:?} vs {at:?}");
            assert!(max_channel_delta(at, above) <= 1, "jump above {boundary}: {at:?} vs {above:?}");
        }
    }

    #[test]
    fn centre_and_corner_colours() {
        let palette = Palette::default();
        // Centre: eased 0, hue 160.
        assert_eq!(palette.cell_color(5, 5, 10, 10, 0.0), Rgb::new(51, 255, 187));
        // Corner: eased 1, hue 110.
        assert_eq!(palette.cell_color(0, 0, 10, 10, 0.0), Rgb::new(85, 255, 51));
    }

    #[test]
    fn phase_rotates_hue() {
        let palette = Palette::default();
        // 160 + 200 wraps to 0.
        assert_eq!(palette.cell_color(5, 5, 10, 10, 200.0), hsv_to_rgb(0.0, 0.8, 1.0));
    }

    #[test]
    fn distance_is_normalized() {
        assert_eq!(normalized_distance(5, 5, 10, 10), 0.0);
        assert!((normalized_distance(0, 0, 10, 10) - 1.0).abs() < 1e-6);
        for (x, y) in [(9, 9), (0, 9), (9, 0)] {
            assert!(normalized_distance(x, y, 10, 10) <= 1.0);
        }
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn wrap_degrees_stays_below_a_full_turn() {
        assert_eq!(wrap_degrees(-0.00001), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
        assert_eq!(wrap_degrees(-90.0), 270.0);
        assert_eq!(wrap_degrees(725.0), 5.0);
    }

    #[test]
    fn falloff_dims_the_corners() {
        let palette = Palette { brightness_falloff: 1.0, ..Palette::default() };
        assert_eq!(palette.cell_color(0, 0, 10, 10, 0.0), Rgb::BLACK);
    }
}
