use geopick::location::SelectedLocation;
use geopick::token::{self, TokenStore};
use geopick::weather::{QueryOrder, WeatherLink};

#[derive(Default)]
struct MemoryStore {
    token: Option<String>,
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        // mirrors stores without a delete operation, where "cleared" means
        // an empty value under the key
        self.token = Some(String::new());
    }
}

#[test]
fn click_to_weather_link_round_trip() {
    let link = WeatherLink::new("https://weather.example.com/", QueryOrder::LatFirst);

    // raw click coordinates straight from the map engine
    let location = SelectedLocation::new(37.7749288914, -122.4194161072);
    assert_eq!(location, SelectedLocation::new(37.774929, -122.419416));

    let url = link.url_for(&location);
    assert!(url.contains("lat=37.774929"));
    assert!(url.contains("long=-122.419416"));
    assert_eq!(
        url,
        "https://weather.example.com/weather?lat=37.774929&long=-122.419416"
    );
}

#[test]
fn token_gate_full_cycle() {
    let mut store = MemoryStore::default();

    // nothing persisted yet, the form must be shown
    assert_eq!(token::stored(&store), None);

    // whitespace-only submission is rejected before persistence
    assert_eq!(token::submit(&mut store, "  \n "), None);
    assert_eq!(store.token, None);

    // a real token is trimmed, persisted, and skips the form on restart
    let token = token::submit(&mut store, " abc123 ").expect("token accepted");
    assert_eq!(token, "abc123");
    assert_eq!(token::stored(&store), Some("abc123".to_string()));

    // explicit reset leaves an empty value, which reads back as absent
    token::reset(&mut store);
    assert_eq!(token::stored(&store), None);
}

#[test]
fn query_order_is_configuration_only() {
    let location = SelectedLocation::new(-33.8688, 151.2093);
    let lat_first = WeatherLink::new("https://w.example.org", QueryOrder::LatFirst);
    let lon_first = WeatherLink::new("https://w.example.org", QueryOrder::LonFirst);

    assert_eq!(
        lat_first.url_for(&location),
        "https://w.example.org/weather?lat=-33.868800&long=151.209300"
    );
    assert_eq!(
        lon_first.url_for(&location),
        "https://w.example.org/weather?long=151.209300&lat=-33.868800"
    );
}
