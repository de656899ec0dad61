use crate::location::SelectedLocation;

pub const DEFAULT_WEATHER_URL: &str = "https://weather.example.com";

/// Order of the coordinate query parameters in the weather link. A conforming
/// weather endpoint accepts either, so this is plain configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryOrder {
    #[default]
    LatFirst,
    LonFirst,
}

/// Builds the outbound weather-lookup URL for a selected location.
#[derive(Clone, Debug)]
pub struct WeatherLink {
    base: String,
    order: QueryOrder,
}

impl WeatherLink {
    pub fn new(base: impl Into<String>, order: QueryOrder) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }

        Self { base, order }
    }

    /// Both query values carry exactly six fractional digits and match the
    /// rounded coordinates stored in the selection.
    pub fn url_for(&self, location: &SelectedLocation) -> String {
        match self.order {
            QueryOrder::LatFirst => format!(
                "{}/weather?lat={:.6}&long={:.6}",
                self.base, location.lat, location.lon
            ),
            QueryOrder::LonFirst => format!(
                "{}/weather?long={:.6}&lat={:.6}",
                self.base, location.lon, location.lat
            ),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }
}

impl Default for WeatherLink {
    fn default() -> Self {
        Self::new(DEFAULT_WEATHER_URL, QueryOrder::default())
    }
}

#[cfg(test)]
mod test {
    use crate::location::SelectedLocation;
    use crate::weather::{QueryOrder, WeatherLink};

    #[test]
    fn lat_first_url() {
        let link = WeatherLink::new("https://weather.example.com", QueryOrder::LatFirst);
        let location = SelectedLocation::new(37.774929, -122.419416);

        assert_eq!(
            link.url_for(&location),
            "https://weather.example.com/weather?lat=37.774929&long=-122.419416"
        );
    }

    #[test]
    fn lon_first_url() {
        let link = WeatherLink::new("https://weather.example.com", QueryOrder::LonFirst);
        let location = SelectedLocation::new(37.774929, -122.419416);

        assert_eq!(
            link.url_for(&location),
            "https://weather.example.com/weather?long=-122.419416&lat=37.774929"
        );
    }

    #[test]
    fn trims_trailing_slashes() {
        let link = WeatherLink::new("https://weather.example.com//", QueryOrder::LatFirst);

        assert_eq!(link.base(), "https://weather.example.com");
    }

    #[test]
    fn url_values_are_padded_to_six_digits() {
        let link = WeatherLink::default();
        let location = SelectedLocation::new(20.0, 0.0);

        assert_eq!(
            link.url_for(&location),
            "https://weather.example.com/weather?lat=20.000000&long=0.000000"
        );
    }
}
