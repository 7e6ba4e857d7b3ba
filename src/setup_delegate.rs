//! Stage 6 — optional local setup delegation.
//!
//! The setup script is an opaque collaborator. It is invoked through `sh`
//! explicitly so no execute bit or persistent permission change is needed;
//! nothing outside the current process is relaxed.

use std::path::Path;

use crate::exec::run_tool;
use crate::outcome::StepOutcome;

/// Run the setup script if it exists; report success or the captured failure.
pub async fn run_setup_script(work_dir: &Path, script: &Path) -> StepOutcome {
    let full = work_dir.join(script);
    if !full.exists() {
        return StepOutcome::skipped(format!("no setup script at {}", script.display()));
    }

    let script_arg = script.to_string_lossy();
    match run_tool("sh", &[script_arg.as_ref()], work_dir).await {
        Ok(out) => {
            let last = out.lines().last().unwrap_or("done").to_string();
            StepOutcome::completed(format!("setup script finished: {last}"))
        }
        Err(e) => StepOutcome::failed(format!("setup script failed: {e}")),
    }
}
