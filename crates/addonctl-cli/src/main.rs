use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use addonctl_cli::backend::HttpSigningBackend;
use addonctl_cli::{approve, sign};
use addonctl_core::{AddonctlConfig, AddonId};
use addonctl_metadata::{
    create_sqlite_pool, run_migrations, SqliteAuditLogRepository, SqliteFileRepository,
};

#[derive(Parser, Debug)]
#[command(name = "addonctl")]
#[command(about = "Administrative toolchain for add-on signing and bulk review approval", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dispatch a signing run for the given add-ons
    SignAddons {
        /// Add-on ids to sign
        #[arg(required = true)]
        ids: Vec<String>,

        /// Alternate signing service URL for this run
        #[arg(long)]
        signing_server: Option<String>,

        /// Re-sign packages even when they are already signed
        #[arg(long)]
        force: bool,

        /// Free-text audit string recorded alongside the signing run
        #[arg(long)]
        reason: Option<String>,
    },

    /// Approve all files awaiting review for the given add-on guids
    ApproveAddons {
        /// Add-on guids to approve
        #[arg(required = true)]
        guids: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = AddonctlConfig::load().context("failed to load configuration")?;

    match cli.command {
        Commands::SignAddons {
            ids,
            signing_server,
            force,
            reason,
        } => {
            let ids = ids
                .iter()
                .map(|raw| {
                    AddonId::from_str(raw).with_context(|| format!("invalid add-on id `{raw}`"))
                })
                .collect::<Result<Vec<_>>>()?;

            let options = sign::SignOptions {
                signing_server,
                force,
                reason,
            };
            let request = sign::resolve_request(&options, config.signing.server.as_deref());
            let backend = HttpSigningBackend::new(None);

            sign::sign_addons(&backend, &ids, &request).await?;
            println!("Signing run dispatched for {} add-on(s)", ids.len());
            Ok(())
        }

        Commands::ApproveAddons { guids } => {
            let task_user = config
                .task_user()
                .context("review.task_user_id must be configured for approve-addons")?;

            let pool = create_sqlite_pool(&config.database.url)
                .await
                .context("failed to open metadata store")?;
            run_migrations(&pool)
                .await
                .context("failed to apply metadata migrations")?;

            let files = SqliteFileRepository::new(pool.clone());
            let audit_logs = SqliteAuditLogRepository::new(pool);

            let candidates = approve::get_files(&files, &guids).await?;
            let total = candidates.len();
            let pairs = candidates
                .into_iter()
                .map(|candidate| {
                    let review_type = candidate.review_type();
                    (candidate, review_type)
                })
                .collect();

            let approved = approve::approve_files(&files, &audit_logs, task_user, pairs).await?;
            println!(
                "Approved {approved} of {total} file(s) awaiting review for {} guid(s)",
                guids.len()
            );
            Ok(())
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(env_filter).with_target(false).init();
}
