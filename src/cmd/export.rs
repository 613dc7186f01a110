use std::path::PathBuf;

use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::export::{download_csv, export_csv};

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Save the CSV here instead of printing the download link.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run(ctx: &AppContext, args: ExportArgs) -> AppResult<()> {
    match args.output {
        Some(path) => {
            let written = download_csv(ctx.gateway.as_ref(), &path).await?;
            println!("Saved {written} bytes to {}", path.display());
            Ok(())
        }
        None => export_csv(ctx.gateway.as_ref(), ctx.navigator.as_ref()),
    }
}
