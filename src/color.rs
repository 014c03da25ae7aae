use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for the per-label swatches in the side panel.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Colormaps for the figure
// ---------------------------------------------------------------------------

/// Greyscale ramp for the digit tiles: 0 → white, 1 → black.
pub fn binary(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let gray = Srgb::new(1.0 - t, 1.0 - t, 1.0 - t).into_format::<u8>();
    [gray.red, gray.green, gray.blue]
}

/// Black-body "hot" ramp for the importance heatmap:
/// near-black → red → yellow → white.
pub fn hot(t: f32) -> [u8; 3] {
    const RED_END: f32 = 0.365_079;
    const GREEN_END: f32 = 0.746_032;

    let t = t.clamp(0.0, 1.0);
    let r = if t < RED_END {
        0.0416 + (1.0 - 0.0416) * (t / RED_END)
    } else {
        1.0
    };
    let g = if t < RED_END {
        0.0
    } else if t < GREEN_END {
        (t - RED_END) / (GREEN_END - RED_END)
    } else {
        1.0
    };
    let b = if t < GREEN_END {
        0.0
    } else {
        (t - GREEN_END) / (1.0 - GREEN_END)
    };

    let rgb = Srgb::new(r, g, b).into_format::<u8>();
    [rgb.red, rgb.green, rgb.blue]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_runs_white_to_black() {
        assert_eq!(binary(0.0), [255, 255, 255]);
        assert_eq!(binary(1.0), [0, 0, 0]);
        let mid = binary(0.5);
        assert_eq!(mid[0], mid[1]);
        assert_eq!(mid[1], mid[2]);
    }

    #[test]
    fn hot_runs_dark_to_white() {
        let low = hot(0.0);
        assert!(low[0] < 32 && low[1] == 0 && low[2] == 0);
        assert_eq!(hot(1.0), [255, 255, 255]);

        // Pure red around the first breakpoint, yellow around the second.
        let red = hot(0.4);
        assert!(red[0] == 255 && red[2] == 0);
        let yellow = hot(0.75);
        assert!(yellow[0] == 255 && yellow[1] > 200 && yellow[2] < 32);
    }

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        assert_ne!(colors[0], colors[3]);
        assert!(generate_palette(0).is_empty());
    }
}
