use fleetdash::app::{App, AppMessage};
use fleetdash::cli::{parse_args, run_cli_command, CliCommand, CliOptions};
use fleetdash::client::FleetClient;
use fleetdash::config::DashboardConfig;
use fleetdash::health::check_backend;
use fleetdash::logging::{self, LogTarget};
use fleetdash::proxy::serve_proxy_on;
use fleetdash::terminal::{setup_panic_hook, TerminalManager};
use fleetdash::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

const FRAME_TICK: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = parse_args(std::env::args())?;
    if run_cli_command(&command) {
        return Ok(());
    }

    let runtime = tokio::runtime::Runtime::new()?;
    match command {
        CliCommand::Proxy(options) => runtime.block_on(run_proxy(options)),
        CliCommand::RunTui(options) => runtime.block_on(run_tui(options)),
        CliCommand::Version | CliCommand::Help => Ok(()),
    }
}

fn load_config(options: &CliOptions) -> Result<DashboardConfig> {
    let config = options.apply(DashboardConfig::from_env()?);
    tracing::info!(
        "Config: backend={} interval={}ms click_through={}",
        config.backend_url,
        config.poll_interval.as_millis(),
        config.click_through
    );
    Ok(config)
}

async fn run_proxy(options: CliOptions) -> Result<()> {
    logging::init(LogTarget::Stderr)?;
    let config = load_config(&options)?;

    let client = FleetClient::with_reqwest(&config.backend_url);
    let (addr, server) = serve_proxy_on(config.proxy_addr, client).await?;
    println!("fleetdash proxy listening on http://{}", addr);

    tokio::select! {
        _ = server => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down proxy");
        }
    }
    Ok(())
}

async fn run_tui(options: CliOptions) -> Result<()> {
    if let Some(target) = LogTarget::default_file() {
        logging::init_or_warn(target);
    }
    let config = load_config(&options)?;
    let client = FleetClient::with_reqwest(&config.backend_url);

    setup_panic_hook();
    let mut manager = TerminalManager::new()?;

    let mut app = App::new(&config, client.clone());
    if let Some(device) = &options.device {
        app.open_device(device);
    }

    let health_tx = app.message_tx.clone();
    tokio::spawn(async move {
        let status = check_backend(&client).await;
        let _ = health_tx.send(AppMessage::HealthChecked(status));
    });

    let result = run_app(manager.terminal(), &mut app).await;

    app.shutdown();
    manager.restore()?;
    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(FRAME_TICK) => {
                app.tick();
            }

            event = event_stream.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.mark_dirty();
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!("Terminal event error: {}", e);
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }

            Some(msg) = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                app.handle_message(msg);
            }
        }
    }
}
