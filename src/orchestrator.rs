//! The run driver: six sequential stages.
//!
//! Holds the primary branch name explicitly and threads it through every
//! stage instead of trusting git's checkout cursor. Stages 1–2 can fail the
//! run ([`FatalError`] behind `anyhow`); everything after reports outcomes
//! and keeps going.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ForgeConfig;
use crate::doctor::{print_doctor_results, run_doctor};
use crate::error::FatalError;
use crate::fanout;
use crate::git::GitCli;
use crate::hosting::GhCli;
use crate::plan::build_plan;
use crate::prompt;
use crate::remote::{ensure_linkage, RepositoryTarget};
use crate::setup_delegate::run_setup_script;
use crate::storage::{provision_buckets, StorageOptions};

/// Everything resolvable before the run starts. Unset fields fall back to
/// `repoforge.toml`, then to an interactive prompt.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub work_dir: PathBuf,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub storage_endpoint: Option<String>,
    pub storage_key: Option<String>,
    /// Answer every prompt with its default: continue degraded when gh is
    /// missing, decline the opt-in stages unless their inputs were already
    /// supplied via flags or env.
    pub assume_yes: bool,
    pub quiet: bool,
}

/// Execute the full provisioning sequence.
///
/// Returns `Ok(())` after the final stage regardless of how many non-fatal
/// warnings were reported along the way.
pub async fn run(opts: RunOptions) -> Result<()> {
    let config = ForgeConfig::load(&opts.work_dir);
    let git = GitCli::new(&opts.work_dir);
    let primary = config.remote.primary_branch.clone();

    // ── Stage 1: environment check ───────────────────────────────────────
    let (checks, avail) = run_doctor();
    if !opts.quiet {
        print_doctor_results(&checks);
    }
    if let Some((tool, hint)) = avail.missing_mandatory() {
        return Err(FatalError::MissingTool {
            tool,
            detail: "not found in PATH".to_string(),
            hint,
        }
        .into());
    }
    if !avail.gh {
        // Default is to continue degraded; `--yes` takes the same default.
        let degrade = if opts.assume_yes {
            true
        } else {
            prompt::confirm(
                "gh CLI not found. Continue without pull-request creation?",
                true,
            )
            .unwrap_or(true)
        };
        if !degrade {
            return Err(FatalError::Declined(
                "install the gh CLI and run `gh auth login`, then re-run".to_string(),
            )
            .into());
        }
        info!("continuing in degraded mode, pull requests will be skipped");
    }
    let gh = avail.gh.then(|| GhCli::new(&opts.work_dir));

    // ── Stage 2: repository bootstrap ────────────────────────────────────
    let bootstrap = crate::bootstrap::ensure_repository(&git).await?;
    bootstrap.report("bootstrap", opts.quiet);

    // ── Stage 3: remote linkage ──────────────────────────────────────────
    let target = resolve_target(&opts, &config)?;
    if !opts.quiet {
        println!("\nLinking {} (primary branch {primary})", target.slug());
    }
    ensure_linkage(&git, gh.as_ref(), &target, &primary)
        .await
        .report(opts.quiet);

    // ── Stage 4: branch fan-out ──────────────────────────────────────────
    let plan = build_plan(&config.paths.templates_dir);
    if !opts.quiet {
        println!("\nFanning out {} feature branches", plan.len());
    }
    for report in fanout::run(&git, gh.as_ref(), &plan, &primary).await {
        report.report(opts.quiet);
    }

    // ── Stage 5: optional bucket provisioning ────────────────────────────
    run_storage_stage(&opts, &config).await;

    // ── Stage 6: optional local setup delegation ─────────────────────────
    let script = &config.paths.setup_script;
    if !opts.work_dir.join(script).exists() {
        if !opts.quiet {
            println!("\nNo setup script at {}, skipping.", script.display());
        }
    } else {
        let opted = !opts.assume_yes
            && prompt::confirm(
                &format!("Run local setup script {}?", script.display()),
                false,
            )
            .unwrap_or(false);
        if opted {
            run_setup_script(&opts.work_dir, script)
                .await
                .report("local setup", opts.quiet);
        } else if !opts.quiet {
            println!("\nSkipping local setup script.");
        }
    }

    if !opts.quiet {
        println!("\nProvisioning sequence complete.");
    }
    Ok(())
}

/// Resolve the (owner, name) target: flag/env, then config, then prompt.
pub fn resolve_target(opts: &RunOptions, config: &ForgeConfig) -> Result<RepositoryTarget> {
    let owner_default = config
        .remote
        .owner
        .clone()
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "dev".to_string());
    let name_default = config.remote.name.clone().unwrap_or_else(|| {
        opts.work_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "project".to_string())
    });

    let owner = match &opts.owner {
        Some(o) => o.clone(),
        None if opts.assume_yes => owner_default,
        None => prompt::ask_default("Repository owner", &owner_default)
            .context("cannot read repository owner")?,
    };
    let name = match &opts.repo {
        Some(n) => n.clone(),
        None if opts.assume_yes => name_default,
        None => prompt::ask_default("Repository name", &name_default)
            .context("cannot read repository name")?,
    };
    Ok(RepositoryTarget::new(owner, name))
}

/// Storage credentials fully supplied up front (flags/env, endpoint possibly
/// from config). Their presence counts as the bucket opt-in, so scripted
/// runs with `--yes` can still provision buckets.
pub fn preset_storage(opts: &RunOptions, config: &ForgeConfig) -> Option<StorageOptions> {
    let endpoint = opts
        .storage_endpoint
        .clone()
        .or_else(|| config.storage.endpoint.clone())?;
    let service_key = opts.storage_key.clone()?;
    let storage = StorageOptions {
        endpoint,
        service_key,
    };
    storage.is_usable().then_some(storage)
}

async fn run_storage_stage(opts: &RunOptions, config: &ForgeConfig) {
    if let Some(storage) = preset_storage(opts, config) {
        for (name, outcome) in provision_buckets(&storage).await {
            outcome.report(&format!("bucket {name}"), opts.quiet);
        }
        return;
    }

    let opted = !opts.assume_yes
        && prompt::confirm("Provision storage buckets through the storage API?", false)
            .unwrap_or(false);
    if !opted {
        if !opts.quiet {
            println!("\nSkipping storage bucket provisioning.");
        }
        return;
    }

    let endpoint = match opts
        .storage_endpoint
        .clone()
        .or_else(|| config.storage.endpoint.clone())
    {
        Some(e) => e,
        None => prompt::ask_optional("Storage endpoint URL (blank to skip)").unwrap_or_default(),
    };
    let service_key = match opts.storage_key.clone() {
        Some(k) => k,
        None => prompt::ask_optional("Service role key (blank to skip)").unwrap_or_default(),
    };

    let storage = StorageOptions {
        endpoint,
        service_key,
    };
    if !storage.is_usable() {
        println!("Endpoint or key not provided — skipping bucket provisioning.");
        return;
    }
    for (name, outcome) in provision_buckets(&storage).await {
        outcome.report(&format!("bucket {name}"), opts.quiet);
    }
}
