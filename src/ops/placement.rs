use crate::io::settings::WindowSettings;

/// The usable rectangle of one display, excluding taskbars and docks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkArea {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Window bounds in the same coordinate space as [`WorkArea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl WorkArea {
    /// Area of the intersection with the given bounds, in cells.
    fn overlap(&self, b: Bounds) -> u64 {
        let left = self.x.max(b.x);
        let top = self.y.max(b.y);
        let right = (self.x + self.width as i32).min(b.x + b.width as i32);
        let bottom = (self.y + self.height as i32).min(b.y + b.height as i32);
        if right <= left || bottom <= top {
            return 0;
        }
        (right - left) as u64 * (bottom - top) as u64
    }
}

/// Resolve the window position to restore at startup.
///
/// The saved position is only valid while a display with the remembered
/// work-area corner is still attached; otherwise the window would open
/// off-screen, so the position falls back to the origin. The saved size is
/// kept either way.
pub fn restore_bounds(settings: &WindowSettings, areas: &[WorkArea]) -> Bounds {
    let monitor_present = areas
        .iter()
        .any(|a| a.x == settings.monitor_x && a.y == settings.monitor_y);
    let (x, y) = if monitor_present {
        (settings.x, settings.y)
    } else {
        (0, 0)
    };
    Bounds {
        x,
        y,
        width: settings.width,
        height: settings.height,
    }
}

/// Record the window bounds and its display at shutdown.
///
/// The display is the work area with the greatest overlap with the window;
/// when the window overlaps none, the remembered display corner is left
/// unchanged.
pub fn capture_bounds(settings: &mut WindowSettings, bounds: Bounds, areas: &[WorkArea]) {
    settings.x = bounds.x;
    settings.y = bounds.y;
    settings.width = bounds.width;
    settings.height = bounds.height;

    let best = areas
        .iter()
        .map(|a| (a, a.overlap(bounds)))
        .filter(|(_, overlap)| *overlap > 0)
        .max_by_key(|(_, overlap)| *overlap);
    if let Some((area, _)) = best {
        settings.monitor_x = area.x;
        settings.monitor_y = area.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(x: i32, y: i32) -> WorkArea {
        WorkArea {
            x,
            y,
            width: 1920,
            height: 1040,
        }
    }

    fn saved() -> WindowSettings {
        WindowSettings {
            monitor_x: 0,
            monitor_y: 0,
            x: 100,
            y: 120,
            width: 700,
            height: 500,
            scroll: 0,
        }
    }

    #[test]
    fn restores_position_when_monitor_still_present() {
        let bounds = restore_bounds(&saved(), &[area(0, 0), area(1920, 0)]);
        assert_eq!(
            bounds,
            Bounds {
                x: 100,
                y: 120,
                width: 700,
                height: 500
            }
        );
    }

    #[test]
    fn resets_to_origin_when_monitor_is_gone() {
        // Saved corner (0,0), only a display at (1920,0) remains: the
        // position resets but the size is kept.
        let bounds = restore_bounds(&saved(), &[area(1920, 0)]);
        assert_eq!(
            bounds,
            Bounds {
                x: 0,
                y: 0,
                width: 700,
                height: 500
            }
        );
    }

    #[test]
    fn resets_to_origin_with_no_displays() {
        let bounds = restore_bounds(&saved(), &[]);
        assert_eq!((bounds.x, bounds.y), (0, 0));
    }

    #[test]
    fn capture_records_bounds_and_containing_display() {
        let mut settings = WindowSettings::default();
        let bounds = Bounds {
            x: 2000,
            y: 50,
            width: 700,
            height: 500,
        };
        capture_bounds(&mut settings, bounds, &[area(0, 0), area(1920, 0)]);
        assert_eq!(settings.x, 2000);
        assert_eq!(settings.y, 50);
        assert_eq!(settings.width, 700);
        assert_eq!(settings.height, 500);
        assert_eq!((settings.monitor_x, settings.monitor_y), (1920, 0));
    }

    #[test]
    fn capture_picks_display_with_greatest_overlap() {
        let mut settings = WindowSettings::default();
        // Straddles both displays, mostly on the second.
        let bounds = Bounds {
            x: 1820,
            y: 0,
            width: 700,
            height: 500,
        };
        capture_bounds(&mut settings, bounds, &[area(0, 0), area(1920, 0)]);
        assert_eq!((settings.monitor_x, settings.monitor_y), (1920, 0));
    }

    #[test]
    fn capture_off_screen_keeps_previous_display() {
        let mut settings = saved();
        settings.monitor_x = 1920;
        settings.monitor_y = 0;
        let bounds = Bounds {
            x: -5000,
            y: -5000,
            width: 100,
            height: 100,
        };
        capture_bounds(&mut settings, bounds, &[area(0, 0)]);
        // Bounds recorded, display corner untouched.
        assert_eq!(settings.x, -5000);
        assert_eq!((settings.monitor_x, settings.monitor_y), (1920, 0));
    }

    #[test]
    fn round_trip_restore_after_capture() {
        let mut settings = WindowSettings::default();
        let bounds = Bounds {
            x: 40,
            y: 30,
            width: 90,
            height: 24,
        };
        capture_bounds(&mut settings, bounds, &[area(0, 0)]);
        assert_eq!(restore_bounds(&settings, &[area(0, 0)]), bounds);
    }
}
