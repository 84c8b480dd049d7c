// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Akhmads admin console CLI
//!
//! Moderation, withdrawals, users, pricing and dashboard figures for the
//! Akhmads ad marketplace, from the terminal. Output is pretty JSON on stdout;
//! logs go to stderr.

use akhmads_admin::{
    config::Config,
    models::{PageParams, Role},
    session::{FileSessionStore, Session},
    Console,
};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOGIN_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "akhmads-admin")]
#[command(about = "Admin console for the Akhmads ad marketplace", long_about = None)]
struct Cli {
    /// Override AKHMADS_API_URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in through the Telegram bot
    Login,
    /// Show the signed-in account
    Whoami,
    /// Log out and forget local credentials
    Logout,
    /// Ad moderation
    #[command(subcommand)]
    Ads(AdsCommand),
    /// Bot moderation
    #[command(subcommand)]
    Bots(BotsCommand),
    /// Withdrawal requests
    #[command(subcommand)]
    Withdrawals(WithdrawalsCommand),
    /// User administration
    #[command(subcommand)]
    Users(UsersCommand),
    /// Admin and support roster
    #[command(subcommand)]
    Admins(AdminsCommand),
    /// Pricing tiers and platform fee
    #[command(subcommand)]
    Pricing(PricingCommand),
    /// Dashboard totals
    Stats,
    /// Support inbox
    Messages {
        /// Filter by status (new, read, resolved)
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args, Clone, Copy)]
struct PageArgs {
    /// Maximum number of items to return
    #[arg(long, default_value = "20")]
    limit: u32,
    /// Number of items to skip
    #[arg(long, default_value = "0")]
    offset: u32,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        PageParams::new(args.limit, args.offset)
    }
}

#[derive(Subcommand)]
enum AdsCommand {
    Pending {
        #[command(flatten)]
        page: PageArgs,
    },
    All {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Send an ad back to its owner for changes
    RequestEdit {
        id: String,
        instruction: String,
    },
    /// Download the impression log
    Export {
        id: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum BotsCommand {
    Pending {
        #[command(flatten)]
        page: PageArgs,
    },
    All {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum WithdrawalsCommand {
    Pending {
        #[command(flatten)]
        page: PageArgs,
    },
    All {
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(Subcommand)]
enum UsersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: String,
    },
    /// Change a user's role (user, advertiser, bot-owner, moderator, support, admin, super-admin)
    Role {
        id: String,
        role: Role,
    },
    Ban {
        id: String,
        #[arg(long)]
        reason: String,
    },
    Unban {
        id: String,
    },
}

#[derive(Subcommand)]
enum AdminsCommand {
    /// Accounts holding the admin or support role
    List,
    /// Grant a roster role by username or Telegram id
    Grant {
        who: String,
        /// admin or support
        #[arg(long, default_value = "support")]
        role: Role,
    },
    /// Demote an account back to a plain user
    Revoke {
        id: String,
    },
}

#[derive(Subcommand)]
enum PricingCommand {
    Tiers {
        /// Only tiers currently offered
        #[arg(long)]
        active: bool,
    },
    Fee,
    SetFee {
        percentage: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url).context("Invalid --api-url")?;
    }
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let store = FileSessionStore::open(&config.session_file).with_context(|| {
        format!(
            "Failed to open session file {}",
            config.session_file.display()
        )
    })?;
    let session = Session::new(Arc::new(store));
    session.on_unauthorized(|| {
        eprintln!("Session expired. Run `akhmads-admin login` to sign in again.");
    });

    let console = Console::new(config, session).context("Failed to build API client")?;
    run(&console, cli.command).await
}

async fn run(console: &Console, command: Command) -> anyhow::Result<()> {
    let services = &console.services;

    match command {
        Command::Login => login(console).await,
        Command::Whoami => print_json(&services.auth.me().await?),
        Command::Logout => {
            // Local credentials are gone even when the server call fails
            if services.auth.logout().await.is_err() {
                eprintln!("Server did not confirm logout.");
            }
            eprintln!("Logged out.");
            Ok(())
        }
        Command::Ads(cmd) => match cmd {
            AdsCommand::Pending { page } => {
                print_json(&services.moderation.pending_ads(&page.into()).await?)
            }
            AdsCommand::All { status, page } => print_json(
                &services
                    .moderation
                    .all_ads(&page.into(), status.as_deref())
                    .await?,
            ),
            AdsCommand::Show { id } => print_json(&services.moderation.ad_details(&id).await?),
            AdsCommand::Approve { id } => {
                services.moderation.approve_ad(&id).await?;
                done(&id, "approved")
            }
            AdsCommand::Reject { id, reason } => {
                services
                    .moderation
                    .reject_ad(&id, reason.as_deref())
                    .await?;
                done(&id, "rejected")
            }
            AdsCommand::RequestEdit { id, instruction } => {
                services.moderation.request_ad_edit(&id, &instruction).await?;
                done(&id, "sent back for edits")
            }
            AdsCommand::Export { id, output } => {
                let data = services.ads.export_impressions(&id).await?;
                match output {
                    Some(path) => {
                        tokio::fs::write(&path, &data)
                            .await
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        tracing::info!(path = %path.display(), bytes = data.len(), "Export written");
                    }
                    None => {
                        let mut stdout = tokio::io::stdout();
                        stdout.write_all(&data).await?;
                        stdout.flush().await?;
                    }
                }
                Ok(())
            }
        },
        Command::Bots(cmd) => match cmd {
            BotsCommand::Pending { page } => {
                print_json(&services.moderation.pending_bots(&page.into()).await?)
            }
            BotsCommand::All { status, page } => print_json(
                &services
                    .moderation
                    .all_bots(&page.into(), status.as_deref())
                    .await?,
            ),
            BotsCommand::Approve { id } => {
                services.moderation.approve_bot(&id).await?;
                done(&id, "approved")
            }
            BotsCommand::Reject { id, reason } => {
                services
                    .moderation
                    .reject_bot(&id, reason.as_deref())
                    .await?;
                done(&id, "rejected")
            }
        },
        Command::Withdrawals(cmd) => match cmd {
            WithdrawalsCommand::Pending { page } => {
                print_json(&services.withdrawals.pending(&page.into()).await?)
            }
            WithdrawalsCommand::All { status, page } => print_json(
                &services
                    .withdrawals
                    .all(&page.into(), status.as_deref())
                    .await?,
            ),
            WithdrawalsCommand::Approve { id } => {
                services.withdrawals.approve(&id).await?;
                done(&id, "approved")
            }
            WithdrawalsCommand::Reject { id, reason } => {
                services.withdrawals.reject(&id, reason.as_deref()).await?;
                done(&id, "rejected")
            }
        },
        Command::Users(cmd) => match cmd {
            UsersCommand::List { page } => print_json(&services.users.list(&page.into()).await?),
            UsersCommand::Show { id } => print_json(&services.users.details(&id).await?),
            UsersCommand::Role { id, role } => {
                services.users.update_role(&id, role).await?;
                done(&id, role.as_str())
            }
            UsersCommand::Ban { id, reason } => {
                services.users.ban(&id, &reason).await?;
                done(&id, "banned")
            }
            UsersCommand::Unban { id } => {
                services.users.unban(&id).await?;
                done(&id, "unbanned")
            }
        },
        Command::Admins(cmd) => match cmd {
            AdminsCommand::List => print_json(&services.admins.staff().await?),
            AdminsCommand::Grant { who, role } => {
                let user = services.admins.grant(&who, role).await?;
                done(&user.id, role.as_str())
            }
            AdminsCommand::Revoke { id } => {
                services.admins.revoke(&id).await?;
                done(&id, "revoked")
            }
        },
        Command::Pricing(cmd) => match cmd {
            PricingCommand::Tiers { active: true } => {
                print_json(&services.pricing.active_tiers().await?)
            }
            PricingCommand::Tiers { active: false } => print_json(&services.pricing.tiers().await?),
            PricingCommand::Fee => print_json(&services.pricing.platform_fee().await?),
            PricingCommand::SetFee { percentage } => {
                services.pricing.set_platform_fee(percentage).await?;
                done("platform fee", &format!("{}%", percentage))
            }
        },
        Command::Stats => print_json(&services.analytics.admin_stats().await?),
        Command::Messages { status, page } => print_json(
            &services
                .contact
                .messages(status.as_deref(), &page.into())
                .await?,
        ),
    }
}

/// Telegram deep-link login: show the link, then poll until the bot confirms.
async fn login(console: &Console) -> anyhow::Result<()> {
    let auth = &console.services.auth;
    let init = auth.initiate_login().await?;

    eprintln!("Open this link in Telegram to sign in:\n\n  {}\n", init.deep_link);
    eprintln!("Confirmation code: {}", init.code);

    let mut ticker = tokio::time::interval(LOGIN_POLL_INTERVAL);
    loop {
        ticker.tick().await;

        if chrono::Utc::now() >= init.expires_at {
            bail!("Login link expired, run `akhmads-admin login` again");
        }

        let status = auth.check_login_status(&init.login_token).await?;
        if !status.authorized {
            continue;
        }
        if status.tokens.is_none() {
            bail!("Login authorized but the backend issued no credentials");
        }

        let user = match status.user {
            Some(user) => user,
            None => auth.me().await?,
        };
        if !user.role.is_staff() {
            tracing::warn!(role = %user.role, "Signed-in account is not staff");
        }
        eprintln!("Signed in as {} ({})", user.display_name(), user.role);
        return Ok(());
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn done(subject: &str, outcome: &str) -> anyhow::Result<()> {
    print_json(&serde_json::json!({ "id": subject, "result": outcome }))
}

/// Logs go to stderr; `LOG_FORMAT=json` switches to the structured JSON layer.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("akhmads_admin=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
