use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use pos_invoice_pay::cli::{
    connect, handle_invoice_command, handle_journal_command, handle_session_command,
    InvoiceCommands, JournalCommands, SessionCommands,
};
use pos_invoice_pay::config::{InvoicePayPaths, Settings, SettingsOverrides};
use pos_invoice_pay::logging::{init_logging, LogTarget};
use pos_invoice_pay::models::{ConfigId, SessionId};
use pos_invoice_pay::rpc::RemoteCaller;
use pos_invoice_pay::services::InvoiceService;
use pos_invoice_pay::workflow::spawn_workflow;

#[derive(Parser)]
#[command(
    name = "invoice-pay",
    version,
    about = "Pay customer invoices from a point-of-sale session",
    long_about = "invoice-pay lists the unpaid invoices of an ERP server, posts \
                  drafts and registers payments against a journal, from an \
                  interactive terminal UI or from scripts."
)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Server and POS context options, each with an environment fallback
#[derive(Args)]
struct ConnectionArgs {
    /// Server base URL
    #[arg(long, global = true, env = "INVOICE_PAY_URL")]
    url: Option<String>,

    /// Database name
    #[arg(long, global = true, env = "INVOICE_PAY_DB")]
    db: Option<String>,

    /// Login
    #[arg(long, global = true, env = "INVOICE_PAY_LOGIN")]
    login: Option<String>,

    /// Password (prompted for when omitted)
    #[arg(long, global = true, env = "INVOICE_PAY_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Open POS session ID
    #[arg(long, global = true)]
    session_id: Option<SessionId>,

    /// POS configuration ID
    #[arg(long, global = true)]
    config_id: Option<ConfigId>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

impl ConnectionArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            url: self.url.clone(),
            database: self.db.clone(),
            login: self.login.clone(),
            session_id: self.session_id,
            config_id: self.config_id,
            timeout_secs: self.timeout,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    /// Invoice commands
    #[command(subcommand)]
    Invoices(InvoiceCommands),

    /// Payment journal commands
    #[command(subcommand)]
    Journals(JournalCommands),

    /// POS session commands
    #[command(subcommand)]
    Session(SessionCommands),

    /// Show current configuration and paths
    Config,

    /// Write the settings file, including any connection options given
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = InvoicePayPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    settings.apply_overrides(cli.connection.overrides());
    let password = cli.connection.password.clone();

    match cli.command {
        None | Some(Commands::Tui) => {
            init_logging(&settings.log_level, LogTarget::File(paths.log_file()))?;
            run_tui(settings, password).await
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            Ok(())
        }
        Some(Commands::Init) => {
            settings.save(&paths)?;
            println!("Settings written to {}", paths.settings_file().display());
            println!();
            println!("Run 'invoice-pay config' to review them.");
            Ok(())
        }
        Some(command) => {
            init_logging(&settings.log_level, LogTarget::Stderr)?;
            let client = connect(&settings, password).await?;
            let caller: Arc<dyn RemoteCaller> = client;

            match command {
                Commands::Invoices(cmd) => handle_invoice_command(caller, &settings, cmd).await?,
                Commands::Journals(cmd) => handle_journal_command(caller, cmd).await?,
                Commands::Session(cmd) => handle_session_command(caller, &settings, cmd).await?,
                Commands::Tui | Commands::Config | Commands::Init => {}
            }
            Ok(())
        }
    }
}

/// Connect, start the workflow and hand the terminal to the UI
async fn run_tui(settings: Settings, password: Option<String>) -> Result<()> {
    // Prompting for the password must happen before raw mode
    let client = connect(&settings, password).await?;
    let (workflow, task) = spawn_workflow(InvoiceService::new(client), settings.pos.context());

    tokio::task::spawn_blocking(move || pos_invoice_pay::tui::run_tui(workflow, settings))
        .await
        .context("terminal UI thread panicked")??;

    task.await.context("workflow task panicked")?;
    Ok(())
}

fn print_config(paths: &InvoicePayPaths, settings: &Settings) {
    let show = |value: Option<String>| value.unwrap_or_else(|| "(not set)".to_string());

    println!("invoice-pay Configuration");
    println!("=========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Server:");
    println!("  URL:      {}", settings.server.url);
    println!("  Database: {}", show(settings.server.database.clone()));
    println!("  Login:    {}", show(settings.server.login.clone()));
    println!("  Timeout:  {}s", settings.server.request_timeout_secs);
    println!();
    println!("Point of sale:");
    println!("  Session:  {}", show(settings.pos.session_id.map(|id| id.get().to_string())));
    println!("  Config:   {}", show(settings.pos.config_id.map(|id| id.get().to_string())));
    println!();
    println!("Currency symbol: {}", settings.currency_symbol);
    println!("Log level:       {}", settings.log_level);
}
