use anyhow::Result;

use crate::daemon::lifecycle;
use crate::infrastructure::config::Settings;

pub fn execute(settings: Settings) -> Result<()> {
    lifecycle::run(settings)
}
