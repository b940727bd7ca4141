//! # Header Demo
//!
//! Mounts the header against the simulated wallet backend and prints every
//! rendered view as JSON. Configuration comes from `AUCTION_*` environment
//! variables (see `lib_core::config`); the session is persisted under
//! `AUCTION_SESSION_FILE` (default `data/wallet-session.json`) while the demo
//! is connected.

use std::sync::Arc;
use std::time::Duration;

use header::{ControlAction, Header, HeaderView};
use lib_core::config::{DEFAULT_SESSION_FILE, ENV_SESSION_FILE};
use lib_core::WalletClientConfig;
use lib_utils::envs::get_env_or;
use lib_wallet::{BackendEvent, FileSessionStore, Negotiated, SimulatedBackend};
use shared::{Account, Network, WalletKind};

const DEMO_ACCOUNT: &str = "0xAbC0000000000000000000000000000000000Abc";

fn print_view(view: &HeaderView) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(view)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lib_core::logging::init(None);

    let config = WalletClientConfig::from_env();
    let session_file = get_env_or(ENV_SESSION_FILE, DEFAULT_SESSION_FILE);

    let backend = Arc::new(SimulatedBackend::new().with_latency(Duration::from_millis(250)));
    let target = config
        .as_ref()
        .map(|c| c.network().clone())
        .unwrap_or_else(|_| Network::sepolia());
    backend.approve(
        WalletKind::metamask(),
        Negotiated {
            account: Account::new(DEMO_ACCOUNT),
            network: target,
        },
    );

    let header = Header::mount(config, backend.clone(), Arc::new(FileSessionStore::new(session_file)));
    print_view(&header.view())?;

    let Some(manager) = header.manager().cloned() else {
        tracing::error!("Header mounted without a wallet control, set AUCTION_CLIENT_ID");
        return Ok(());
    };

    let pump = tokio::spawn({
        let manager = manager.clone();
        async move { manager.run_backend_events().await }
    });

    let updates = manager.subscribe();
    let renderer = tokio::spawn({
        let config = manager.config().clone();
        async move {
            while let Some(session) = updates.next().await {
                let view = HeaderView::render(Ok(&config), &session);
                if let Err(e) = print_view(&view) {
                    tracing::warn!(error = %e, "Failed to render header");
                }
            }
        }
    });

    let view = header.start().await;
    if let Some(ControlAction::Connect) = view.control.action() {
        header.activate(ControlAction::Connect).await;
    }

    backend.emit(BackendEvent::AccountChanged(Account::new(
        "0xDeF0000000000000000000000000000000000dEf",
    )));
    backend.emit(BackendEvent::NetworkChanged(Network::mainnet()));
    tokio::time::sleep(Duration::from_millis(50)).await;

    header.activate(ControlAction::Disconnect).await;

    backend.close_events();
    pump.await?;
    drop(manager);
    drop(header);
    renderer.await?;

    Ok(())
}
