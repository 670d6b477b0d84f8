/// Mixtape Server - playlist and track catalog backend
use clap::{Parser, Subcommand};
use mixtape_core::{types::CreateUser, StorageContext};
use mixtape_server::{config::ServerConfig, create_router, services::AuthService, state::AppState};
use mixtape_storage::LocalStorageContext;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mixtape-server")]
#[command(about = "Mixtape playlist and track catalog server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Grant catalog administration rights
        #[arg(long)]
        admin: bool,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mixtape_server=info,mixtape_storage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser {
            username,
            password,
            admin,
        } => add_user(config, &username, &password, admin).await?,
        Commands::ListUsers => list_users(config).await?,
    }

    Ok(())
}

async fn open_storage(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    let pool = mixtape_storage::create_pool(&config.storage.database_url).await?;
    mixtape_storage::run_migrations(&pool).await?;
    Ok(LocalStorageContext::new(pool))
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Mixtape Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let db = Arc::new(open_storage(&config).await?);
    tracing::info!("Database connected");

    let auth_service = Arc::new(auth_service(&config));
    let app_state = AppState::new(db, auth_service);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn add_user(
    config: ServerConfig,
    username: &str,
    password: &str,
    is_admin: bool,
) -> anyhow::Result<()> {
    let db = open_storage(&config).await?;
    let auth_service = auth_service(&config);

    let user = db
        .create_user(CreateUser {
            name: username.to_string(),
            is_admin,
        })
        .await?;

    let password_hash = auth_service.hash_password(password)?;
    db.set_password_hash(&user.id, &password_hash).await?;

    tracing::info!(user_id = %user.id, is_admin, "Created user {}", user.name);
    println!("{}", user.id);

    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let db = open_storage(&config).await?;
    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        let role = if user.is_admin { "admin" } else { "user" };
        println!("  {} - {} ({})", user.id, user.name, role);
    }

    Ok(())
}
