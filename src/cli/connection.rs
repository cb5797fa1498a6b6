//! Server connection for command-line runs

use std::sync::Arc;

use tracing::debug;

use crate::config::{Password, Settings};
use crate::error::{InvoicePayError, InvoicePayResult};
use crate::rpc::JsonRpcClient;

/// Build a client from the settings and open an authenticated session
///
/// The password is prompted for when not given.
pub async fn connect(settings: &Settings, password: Option<String>) -> InvoicePayResult<Arc<JsonRpcClient>> {
    settings.validate_connection()?;

    let (database, login) = match (&settings.server.database, &settings.server.login) {
        (Some(database), Some(login)) => (database.as_str(), login.as_str()),
        _ => return Err(InvoicePayError::Config("Incomplete server settings".into())),
    };

    let client = JsonRpcClient::new(&settings.server)?;
    let password = Password::resolve(password, login)?;
    debug!(url = client.base_url(), database, login, "connecting");
    client.authenticate(database, login, &password).await?;

    Ok(Arc::new(client))
}
