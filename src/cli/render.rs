use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::infrastructure::compose::{render_dir, render_file};
use crate::infrastructure::config::Settings;

pub fn execute(dir: Option<PathBuf>, file: Option<PathBuf>, settings: &Settings) -> Result<()> {
    match (dir, file) {
        (Some(dir), _) => {
            info!("Processing directory `{}`", dir.display());
            render_dir(&dir, &settings.output_dir)
                .with_context(|| format!("Failed to render {}", dir.display()))?;
            println!("Output written to {}", settings.output_dir.display());
        }
        (None, Some(file)) => {
            info!("Processing file `{}`", file.display());
            let Some(file_name) = file.file_name() else {
                bail!("Not a file: {}", file.display());
            };
            let output = settings.output_dir.join(file_name);
            render_file(&file, &output)
                .with_context(|| format!("Failed to render {}", file.display()))?;
            println!("Output written to {}", output.display());
        }
        (None, None) => bail!("Pass --dir or --file"),
    }

    Ok(())
}
