//! balboa - Balboa spa monitor
//!
//! Connects to a Balboa control unit over TCP, logs decoded status
//! traffic, and keeps the connection alive across failures. The
//! reconnect schedule lives here; the connection itself runs no
//! timers.

use balboa_client::{Connection, ConnectionConfig, ConnectionState, Event};
use balboa_protocol::{Message, DEFAULT_PORT};
use clap::Parser;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "balboa")]
#[command(about = "Monitor for Balboa spa control units")]
#[command(version)]
struct Cli {
    /// Hostname or IP address of the control unit
    #[arg(env = "BALBOA_HOST")]
    host: String,

    /// TCP port of the control unit
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "BALBOA_PORT")]
    port: u16,

    /// Seconds to wait before reconnecting after a failure
    #[arg(short, long, default_value_t = 30)]
    reconnect_interval: u64,

    /// Deliver repeated status frames instead of suppressing them
    #[arg(long)]
    babble: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let reconnect_interval = Duration::from_secs(cli.reconnect_interval);

    let config = ConnectionConfig::new(cli.host.clone())
        .with_port(cli.port)
        .with_reconnect_interval(reconnect_interval);
    let conn = Connection::new(config);
    conn.set_babble_suppression(!cli.babble);

    // Subscribe before connecting so no transition is missed.
    let mut events = conn.subscribe();
    conn.connect();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Received shutdown signal, disconnecting");
                conn.disconnect();
                break;
            }
            event = events.recv() => {
                match event {
                    Ok(Event::StateChanged { state, detail }) => {
                        tracing::info!("State: {:?} ({})", state, detail);
                        if matches!(state, ConnectionState::Offline | ConnectionState::Error) {
                            tracing::info!(
                                "Reconnecting in {}s",
                                reconnect_interval.as_secs()
                            );
                            tokio::time::sleep(reconnect_interval).await;
                            conn.connect();
                        }
                    }
                    Ok(Event::Message(message)) => log_message(&message),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event stream lagged, {} events dropped", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

fn log_message(message: &Message) {
    match message {
        Message::StatusUpdate(status) => {
            let unit = if status.celsius { "°C" } else { "°F" };
            let fmt = |t: Option<f64>| match t {
                Some(t) => format!("{t:.1}{unit}"),
                None => "?".to_string(),
            };
            tracing::info!(
                "Status: {} (target {}), {:02}:{:02}, heat {}, pumps {:?}, lights {:?}",
                fmt(status.current_temperature),
                fmt(status.target_temperature),
                status.hour,
                status.minute,
                status.heat_state,
                status.pumps,
                status.lights,
            );
        }
        Message::PanelConfiguration(config) => {
            tracing::info!(
                "Panel configuration: pumps {:?}, lights {:?}, aux {:?}, blower {}, mister {}, circulation {}",
                config.pumps,
                config.lights,
                config.aux,
                config.blower,
                config.mister,
                config.circulation,
            );
        }
        Message::InformationResponse => {
            tracing::info!("Device information received");
        }
        Message::Unrecognized { message_type, payload } => {
            tracing::debug!(
                "Unrecognized message {:#08x} ({} bytes)",
                message_type,
                payload.len()
            );
        }
    }
}
