use anyhow::{Context, Result};

use skycast_core::{App, Config};
use skycast_ui::{shell, AppServices, DashboardModel};

fn main() -> Result<()> {
    // Logging goes to a file so it never tears the terminal UI
    let config = Config::load().context("Failed to load configuration")?;
    skycast_core::init(Some(&config.log_path()))?;

    let mut app = App::from_config(config)?;
    let services = AppServices::new(app.config())?;
    let mut model = DashboardModel::new(app.settings_store());

    tracing::info!("SkyCast started");

    let mut terminal = ratatui::try_init().context("Failed to initialize terminal")?;
    let result = shell::run(&mut terminal, &mut model, &services, &app.config().ui);
    ratatui::try_restore().context("Failed to restore terminal")?;

    // Graceful shutdown
    services.shutdown();
    app.shutdown()?;

    result
}
