//! Journal CLI commands

use std::sync::Arc;

use clap::Subcommand;

use crate::display::format_journal_list;
use crate::error::InvoicePayResult;
use crate::rpc::RemoteCaller;
use crate::services::InvoiceService;

/// Journal subcommands
#[derive(Subcommand, Debug)]
pub enum JournalCommands {
    /// List the journals a payment can be recorded through
    List,
}

/// Handle a journal command
pub async fn handle_journal_command(caller: Arc<dyn RemoteCaller>, cmd: JournalCommands) -> InvoicePayResult<()> {
    let service = InvoiceService::new(caller);

    match cmd {
        JournalCommands::List => {
            let journals = service.get_journals().await?;
            print!("{}", format_journal_list(&journals));
        }
    }

    Ok(())
}
