use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use svcdesk_application::DeskContext;
use svcdesk_application::view::CreateForm;
use svcdesk_core::DeskError;
use svcdesk_core::config::{ClientConfig, DEFAULT_LOG_FILTER};
use svcdesk_core::request::{LifecycleState, Priority, RequestId};
use svcdesk_infrastructure::ConfigService;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "svcdesk")]
#[command(about = "svcdesk - register, triage and close service requests", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "SVCDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        identifier: String,
        /// Read from stdin when omitted
        #[arg(long, env = "SVCDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List requests
    List(ListArgs),
    /// Show one request with its history and available actions
    Show { id: RequestId },
    /// Register a new request
    Create {
        description: String,
        /// Required unless `--suggest` picks one
        #[arg(long = "type")]
        request_type: Option<i64>,
        #[arg(long)]
        channel: i64,
        /// Defaults to the signed-in user
        #[arg(long)]
        requester: Option<i64>,
        /// Let the classification assist pick the request type
        #[arg(long, conflicts_with = "request_type")]
        suggest: bool,
    },
    /// Classify a registered request
    Classify {
        id: RequestId,
        /// Keeps the current type when omitted
        #[arg(long = "type")]
        request_type: Option<i64>,
        /// Pre-filled from the request type when omitted
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        justification: Option<String>,
    },
    /// Assign a classified request
    Assign {
        id: RequestId,
        #[arg(long)]
        to: i64,
    },
    /// Mark a request in progress as attended
    Attend {
        id: RequestId,
        #[arg(long)]
        note: Option<String>,
    },
    /// Close an attended request
    Close { id: RequestId, note: String },
    /// Show the history of a request
    History { id: RequestId },
    /// Ask for a classification suggestion
    Suggest { id: RequestId },
    /// List request types
    Types,
    /// List channels
    Channels,
    /// List lifecycle states
    States,
    /// List users
    Users,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    state: Option<LifecycleState>,
    #[arg(long = "type")]
    request_type: Option<i64>,
    #[arg(long)]
    priority: Option<Priority>,
    #[arg(long)]
    assigned_to: Option<i64>,
}

fn load_config(path: Option<PathBuf>) -> svcdesk_core::error::Result<ClientConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    service.load()
}

fn init_tracing(config: Option<&ClientConfig>) {
    let fallback = config.map_or(DEFAULT_LOG_FILTER, |c| c.log_filter.as_str());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let (context, _routes) = DeskContext::build(config)?;

    match cli.command {
        Commands::Login {
            identifier,
            password,
        } => commands::auth::login(&context, &identifier, password).await?,
        Commands::Logout => commands::auth::logout(&context)?,
        Commands::Whoami => commands::auth::whoami(&context)?,
        Commands::List(args) => {
            commands::requests::list(
                &context,
                args.state,
                args.request_type,
                args.priority,
                args.assigned_to,
            )
            .await?
        }
        Commands::Show { id } => commands::requests::show(&context, id).await?,
        Commands::Create {
            description,
            request_type,
            channel,
            requester,
            suggest,
        } => {
            let form = CreateForm {
                description,
                request_type_id: request_type,
                channel_id: Some(channel),
                requested_by_id: requester,
                registered_at: None,
            };
            commands::requests::create(&context, form, suggest).await?
        }
        Commands::Classify {
            id,
            request_type,
            priority,
            justification,
        } => {
            commands::requests::classify(&context, id, request_type, priority, justification)
                .await?
        }
        Commands::Assign { id, to } => commands::requests::assign(&context, id, to).await?,
        Commands::Attend { id, note } => commands::requests::attend(&context, id, note).await?,
        Commands::Close { id, note } => commands::requests::close(&context, id, note).await?,
        Commands::History { id } => commands::requests::history(&context, id).await?,
        Commands::Suggest { id } => commands::requests::suggest(&context, id).await?,
        Commands::Types => commands::reference::types(&context).await?,
        Commands::Channels => commands::reference::channels(&context).await?,
        Commands::States => commands::reference::states(&context).await?,
        Commands::Users => commands::reference::users(&context).await?,
    }

    Ok(())
}

/// The message shown to the user for a failed command.
fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<DeskError>() {
        Some(desk) => desk.user_message(),
        None => err.to_string(),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            init_tracing(None);
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(Some(&config));

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {:#}", e);
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}
