use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use dial::{DisplayConfig, FaceGeometry, WallClock};
use macroclock::config::{self, Config};
use macroclock::face::Face;
use macroclock::sys::runtime;
use macroclock::sys::store::FileStore;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "macroclock", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Run the watch face (the default).
    Run,
    /// Reveal the date overlay of a running face.
    Tap,
    /// Report the phone link state to a running face.
    Bluetooth { state: LinkState },
    /// Change one preference of a running face, e.g. `set handColor red`.
    Set { key: String, value: String },
    /// Print the face geometry for a time as JSON.
    Render {
        /// Time as HH:MM; defaults to now.
        #[arg(long)]
        at: Option<WallClock>,
        /// Label the hours in 24-hour notation.
        #[arg(long = "24h")]
        twenty_four: bool,
    },
    /// Write a commented default config file if there is none.
    InitConfig,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LinkState {
    Connected,
    Disconnected,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = config::load_or_default();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(config),
        Commands::Tap => send_command(&config.socket_path, "tap"),
        Commands::Bluetooth { state } => {
            let state = match state {
                LinkState::Connected => "connected",
                LinkState::Disconnected => "disconnected",
            };
            send_command(&config.socket_path, &format!("bluetooth {}", state))
        }
        Commands::Set { key, value } => {
            send_command(&config.socket_path, &format!("set {} {}", key, value))
        }
        Commands::Render { at, twenty_four } => render(&config, at, twenty_four),
        Commands::InitConfig => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let store_path = config::get_store_path()?;
    let store = FileStore::open(&store_path).unwrap_or_else(|e| {
        log::error!(
            "Failed to read preferences from {}, using defaults: {}",
            store_path.display(),
            e
        );
        FileStore::empty(&store_path)
    });
    log::info!("Preferences stored in {}", store.path().display());
    let face = Face::new(store, &config, Local::now().naive_local());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx.clone(), config.socket_path.clone());

    #[cfg(feature = "gui")]
    {
        use macroclock::gui::app::AppModel;
        use relm4::prelude::*;

        drop(tx);
        let app = RelmApp::new("org.macroclock.face").with_args(Vec::new());
        app.run::<AppModel>((face, rx));
        Ok(())
    }

    #[cfg(not(feature = "gui"))]
    {
        macroclock::sys::headless::run(face, tx, rx)?;
        Ok(())
    }
}

fn render(config: &Config, at: Option<WallClock>, use_24h: bool) -> anyhow::Result<()> {
    let clock = at.unwrap_or_else(WallClock::now);
    let display = DisplayConfig {
        use_24h,
        ..config.layout()
    };
    let geometry = FaceGeometry::compute(&clock, &display);
    println!("{}", serde_json::to_string_pretty(&geometry)?);
    Ok(())
}

fn send_command(socket_path: &Path, cmd: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to macroclock at {}: {}. Is it running?",
            socket_path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}
