//! Viewport defaults and the map theme flag.

/// Default map center as (lat, lon): a whole-world view a bit north of the
/// equator.
pub const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);

pub const DEFAULT_ZOOM: u32 = 2;

/// Duration of the animated transition back to the default viewport.
pub const RESET_ANIMATION_MS: u64 = 1000;

/// Visual style of the base map. The map engine cannot swap styles in place;
/// changing the theme tears the whole viewport down and rebuilds it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MapTheme {
    #[default]
    Light,
    Dark,
}

impl MapTheme {
    /// Style identifier understood by the tile provider.
    pub fn style_id(self) -> &'static str {
        match self {
            MapTheme::Light => "streets-v2",
            MapTheme::Dark => "streets-v2-dark",
        }
    }

    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { MapTheme::Dark } else { MapTheme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == MapTheme::Dark
    }
}

#[cfg(test)]
mod test {
    use crate::viewport::MapTheme;

    #[test]
    fn defaults_to_light() {
        assert_eq!(MapTheme::default(), MapTheme::Light);
        assert!(!MapTheme::default().is_dark());
    }

    #[test]
    fn style_ids_differ_per_theme() {
        assert_eq!(MapTheme::Light.style_id(), "streets-v2");
        assert_eq!(MapTheme::Dark.style_id(), "streets-v2-dark");
    }

    #[test]
    fn dark_flag_round_trips() {
        assert_eq!(MapTheme::from_dark_flag(true), MapTheme::Dark);
        assert_eq!(MapTheme::from_dark_flag(false), MapTheme::Light);
        assert!(MapTheme::from_dark_flag(true).is_dark());
    }
}
