use clap::Parser;
use geopick::weather::{DEFAULT_WEATHER_URL, QueryOrder, WeatherLink};
use geopick_gui::{AppOptions, GeopickApp};

#[derive(Parser)]
#[command(about = "Pick a point on a world map and open a weather lookup for it")]
struct Cli {
    /// Tile provider API key. When given, the token form is skipped and
    /// nothing is read from the persisted store.
    #[arg(long, env = "GEOPICK_TOKEN")]
    token: Option<String>,

    /// Base URL of the companion weather application.
    #[arg(long, env = "GEOPICK_WEATHER_URL", default_value = DEFAULT_WEATHER_URL)]
    weather_url: String,

    /// Put the longitude before the latitude in the weather URL query.
    #[arg(long)]
    long_first: bool,
}

fn main() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).unwrap();
    tracing_log::LogTracer::init().unwrap();

    let cli = Cli::parse();
    let order = if cli.long_first {
        QueryOrder::LonFirst
    } else {
        QueryOrder::LatFirst
    };
    let options = AppOptions {
        token: cli.token,
        weather: WeatherLink::new(cli.weather_url, order),
    };

    let native_options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };
    eframe::run_native(
        "Geopick",
        native_options,
        Box::new(|cc| Ok(Box::new(GeopickApp::new(cc, options)))),
    )
    .unwrap();
}
