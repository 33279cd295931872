use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::broadcast;

use dwm_status::core::status_bar::tasks::{spawn_signal_listener, volume_refresh_channel};
use dwm_status::core::status_bar::{
    build_runtime, refresh_state, Mixer, NetworkProber, RefreshScheduler, StatusBar,
};
use dwm_status::platform::{
    get_gpu_provider, BatteryReader, CpuReader, PingProber, PulseMixer, RamReader,
    StdoutPublisher, SystemReaders, XsetrootPublisher,
};
use dwm_status::{Config, StatusError};

/// Time between the two CPU samples of `--once`
const CPU_WARMUP: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let matches = Command::new("dwm-status")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pushes CPU, RAM, GPU, volume, battery, network and date to the dwm status bar")
        .long_about(
            "Pushes CPU, RAM, GPU, volume, battery, network and date to the dwm status bar\n\n\
             Send SIGUSR1 or SIGHUP to refresh the volume immediately, e.g. from the\n\
             volume key bindings: pkill -USR1 dwm-status",
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: ~/.config/dwm-status/config.toml)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("once")
                .long("once")
                .help("Print a single status line to stdout and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .long("stdout")
                .help("Write every status line to stdout instead of calling xsetroot")
                .action(ArgAction::SetTrue)
                .conflicts_with("once"),
        )
        .get_matches();

    dwm_status::init_logging();

    let config_path = matches.get_one::<PathBuf>("config");
    let config = Config::load(config_path.map(PathBuf::as_path))
        .context("Failed to load configuration")?;

    let runtime = build_runtime().context("Failed to start the Tokio runtime")?;

    if matches.get_flag("once") {
        return runtime.block_on(print_once(config));
    }

    match runtime.block_on(run(config, matches.get_flag("stdout"))) {
        Ok(()) => Ok(()),
        Err(e @ StatusError::TooManyFailures { .. }) => {
            log::error!("{}, giving up", e);
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Status bar stopped"),
    }
}

fn system_readers(config: &Config) -> SystemReaders {
    let gpu = if config.gpu {
        match get_gpu_provider() {
            Ok(provider) => Some(provider),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        }
    } else {
        None
    };

    SystemReaders::new(
        CpuReader::new(),
        RamReader::new(),
        BatteryReader::new(config.battery_dir()),
        gpu,
    )
}

async fn run(config: Config, to_stdout: bool) -> dwm_status::Result<()> {
    let (shutdown_tx, _) = broadcast::channel::<()>(1);
    let (refresh_tx, refresh_rx) = volume_refresh_channel();
    let _listener = spawn_signal_listener(refresh_tx, shutdown_tx.subscribe())?;

    let metrics = system_readers(&config);
    let prober = PingProber::new(config.network_probe_host.clone(), config.command_timeout());
    let mixer = PulseMixer::new(config.command_timeout());

    if to_stdout {
        StatusBar::new(config, metrics, StdoutPublisher, prober, mixer)
            .run(refresh_rx, shutdown_tx)
            .await
    } else {
        let publisher = XsetrootPublisher::new(config.command_timeout());
        StatusBar::new(config, metrics, publisher, prober, mixer)
            .run(refresh_rx, shutdown_tx)
            .await
    }
}

async fn print_once(config: Config) -> Result<()> {
    let prober = PingProber::new(config.network_probe_host.clone(), config.command_timeout());
    let mixer = PulseMixer::new(config.command_timeout());
    let (_network, _volume, reader) = refresh_state(prober.probe().await, mixer.volume().await);

    let metrics = system_readers(&config);
    let mut scheduler = RefreshScheduler::new(&config, metrics, StdoutPublisher, reader);

    // The first CPU sample has no baseline
    scheduler.render();
    tokio::time::sleep(CPU_WARMUP).await;
    println!("{}", scheduler.render());
    Ok(())
}
