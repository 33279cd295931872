use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

use dwm_status::core::status_bar::tasks::{
    network_task, request_volume_refresh, spawn_signal_listener, volume_refresh_channel,
    volume_task,
};
use dwm_status::core::status_bar::{
    refresh_state, BatteryReading, NetworkStatus, RefreshScheduler, StatusBar, VolumeStatus,
};
use dwm_status::utils::icons;
use dwm_status::{Config, StatusError};

use super::fakes::{FakeMetrics, FakeMixer, FakeProber, FakePublisher};

const QUIET: VolumeStatus = VolumeStatus {
    percent: 10,
    muted: false,
};
const LOUD: VolumeStatus = VolumeStatus {
    percent: 90,
    muted: false,
};

fn metrics() -> FakeMetrics {
    FakeMetrics {
        cpu: 5,
        ram: 20,
        battery: BatteryReading::UNAVAILABLE,
        gpu: None,
    }
}

#[tokio::test(start_paused = true)]
async fn test_network_task_waits_before_probing() {
    let prober = FakeProber::new(&[NetworkStatus::Unreachable, NetworkStatus::Reachable]);
    let (net, _vol, mut reader) = refresh_state(NetworkStatus::Reachable, QUIET);
    let (shutdown_tx, _) = broadcast::channel(1);

    let start = Instant::now();
    let handle = tokio::spawn(network_task(
        prober.clone(),
        net,
        Duration::from_secs(20),
        shutdown_tx.subscribe(),
    ));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(prober.calls(), 0);
    assert_eq!(reader.network(), NetworkStatus::Reachable);

    assert!(reader.network_changed().await);
    assert_eq!(reader.network(), NetworkStatus::Unreachable);
    assert!(start.elapsed() >= Duration::from_secs(20));

    assert!(reader.network_changed().await);
    assert_eq!(reader.network(), NetworkStatus::Reachable);
    assert!(start.elapsed() >= Duration::from_secs(40));
    assert_eq!(prober.calls(), 2);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_network_field_is_stable_between_probes() {
    let config = Config::default();
    let prober = FakeProber::new(&[NetworkStatus::Unreachable]);
    let (net, _vol, reader) = refresh_state(NetworkStatus::Reachable, QUIET);
    let (shutdown_tx, _) = broadcast::channel(1);
    let handle = tokio::spawn(network_task(
        prober,
        net,
        config.network_period(),
        shutdown_tx.subscribe(),
    ));

    let publisher = FakePublisher::scripted(&[], true);
    let mut scheduler = RefreshScheduler::new(&config, metrics(), publisher.clone(), reader);
    for _ in 0..10 {
        scheduler.tick().await.unwrap();
        tokio::time::sleep(config.refresh_period()).await;
    }

    for line in publisher.lines() {
        assert!(line.contains(&format!("-1%] {} ", icons::NETWORK_UP)), "{}", line);
    }

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_volume_refresh_reaches_next_tick() {
    let config = Config::default();
    let mixer = FakeMixer::new(&[LOUD]);
    let (_net, vol, reader) = refresh_state(NetworkStatus::Reachable, QUIET);
    let (tx, rx) = volume_refresh_channel();
    let (shutdown_tx, _) = broadcast::channel(1);
    let handle = tokio::spawn(volume_task(mixer.clone(), vol, rx, shutdown_tx.subscribe()));

    let publisher = FakePublisher::scripted(&[], true);
    let mut scheduler =
        RefreshScheduler::new(&config, metrics(), publisher.clone(), reader.clone());
    assert_eq!(scheduler.snapshot().volume, QUIET);

    request_volume_refresh(&tx);
    let mut watcher = reader;
    assert!(watcher.volume_changed().await);

    scheduler.tick().await.unwrap();
    assert!(publisher.lines()[0].contains(&format!("[VOL {} 90%]", icons::VOLUME_HIGH)));
    assert_eq!(mixer.calls(), 1);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_volume_task_stops_when_requests_close() {
    let mixer = FakeMixer::new(&[LOUD]);
    let (_net, vol, _reader) = refresh_state(NetworkStatus::Reachable, QUIET);
    let (tx, rx) = volume_refresh_channel();
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let handle = tokio::spawn(volume_task(mixer.clone(), vol, rx, shutdown_rx));
    drop(tx);
    handle.await.unwrap();
    assert_eq!(mixer.calls(), 0);
}

#[tokio::test]
async fn test_pending_refresh_requests_coalesce() {
    let (tx, mut rx) = volume_refresh_channel();

    request_volume_refresh(&tx);
    request_volume_refresh(&tx);
    request_volume_refresh(&tx);

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_status_bar_measures_startup_values_and_gives_up() {
    let config = Config {
        max_fails: 2,
        ..Default::default()
    };
    let prober = FakeProber::new(&[NetworkStatus::Reachable]);
    let mixer = FakeMixer::new(&[LOUD]);
    let publisher = FakePublisher::scripted(&[true, true, true], false);
    let (_tx, rx) = volume_refresh_channel();
    let (shutdown_tx, _) = broadcast::channel(1);

    let bar = StatusBar::new(
        config,
        metrics(),
        publisher.clone(),
        prober.clone(),
        mixer.clone(),
    );
    let err = bar.run(rx, shutdown_tx).await.unwrap_err();

    assert!(matches!(err, StatusError::TooManyFailures { count: 2 }));
    assert_eq!(publisher.calls(), 5);
    assert_eq!(prober.calls(), 1);
    assert_eq!(mixer.calls(), 1);

    let first = &publisher.lines()[0];
    assert!(first.contains(&format!("[VOL {} 90%]", icons::VOLUME_HIGH)));
    assert!(first.contains(&format!("] {} ", icons::NETWORK_UP)));
}

#[tokio::test(start_paused = true)]
async fn test_status_bar_exit_does_not_wait_for_slow_network_check() {
    let config = Config {
        network_delay: 1,
        max_fails: 1,
        ..Default::default()
    };
    let prober = FakeProber::slow(&[NetworkStatus::Reachable], Duration::from_secs(10));
    let mixer = FakeMixer::new(&[QUIET]);
    let publisher = FakePublisher::scripted(&[true, true, true, true], false);
    let (_tx, rx) = volume_refresh_channel();
    let (shutdown_tx, _) = broadcast::channel(1);

    let start = Instant::now();
    let bar = StatusBar::new(config, metrics(), publisher.clone(), prober.clone(), mixer);
    let err = bar.run(rx, shutdown_tx).await.unwrap_err();

    assert!(matches!(err, StatusError::TooManyFailures { count: 1 }));
    assert_eq!(publisher.calls(), 5);
    assert_eq!(prober.calls(), 2);
    assert!(start.elapsed() < Duration::from_secs(3), "{:?}", start.elapsed());
}

fn send_signal(name: &str) {
    let status = std::process::Command::new("sh")
        .arg("-c")
        .arg(format!("kill -{} {}", name, std::process::id()))
        .status()
        .unwrap();
    assert!(status.success());
}

#[tokio::test]
async fn test_signals_trigger_volume_refresh() {
    let mixer = FakeMixer::new(&[LOUD, QUIET]);
    let (_net, vol, mut reader) = refresh_state(NetworkStatus::Reachable, QUIET);
    let (tx, rx) = volume_refresh_channel();
    let (shutdown_tx, _) = broadcast::channel(1);

    let listener = spawn_signal_listener(tx, shutdown_tx.subscribe()).unwrap();
    let task = tokio::spawn(volume_task(mixer.clone(), vol, rx, shutdown_tx.subscribe()));

    send_signal("USR1");
    let changed = tokio::time::timeout(Duration::from_secs(5), reader.volume_changed()).await;
    assert!(matches!(changed, Ok(true)));
    assert_eq!(reader.volume(), LOUD);

    send_signal("HUP");
    let changed = tokio::time::timeout(Duration::from_secs(5), reader.volume_changed()).await;
    assert!(matches!(changed, Ok(true)));
    assert_eq!(reader.volume(), QUIET);
    assert_eq!(mixer.calls(), 2);

    shutdown_tx.send(()).unwrap();
    listener.await.unwrap();
    task.await.unwrap();
}
