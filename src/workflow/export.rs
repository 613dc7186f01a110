use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::AppResult;
use crate::services::{Navigator, TicketGateway};

/// Sends the user to the export endpoint; the server produces the file.
pub fn export_csv(gateway: &dyn TicketGateway, navigator: &dyn Navigator) -> AppResult<()> {
    navigator.navigate(&gateway.export_url())
}

/// Downloads the export and writes it to `destination`. Returns the bytes written.
pub async fn download_csv(gateway: &dyn TicketGateway, destination: &Path) -> AppResult<usize> {
    let csv = gateway.download_export().await?;
    if let Some(parent) = destination.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(destination, &csv)?;
    info!(path = %destination.display(), bytes = csv.len(), "ticket export saved");
    Ok(csv.len())
}
