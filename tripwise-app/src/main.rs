use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tripwise_app::{App, Command, CommandError, Flow};
use tripwise_core::KeyValueStore;
use tripwise_session::{HttpAuthService, SessionGuard};
use tripwise_store::{app_config::Config, FileStore, KvTripStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripwise_app=info,tripwise_session=info,tripwise_booking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        "Starting Travel Trip against {} (data in {})",
        config.auth.base_url,
        config.storage.path.display()
    );

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.path));
    let auth = Arc::new(HttpAuthService::new(config.auth.base_url.clone()));
    let session = SessionGuard::restore(auth, store.clone(), config.auth.login_timeout()).await;
    let trips = Arc::new(KvTripStore::new(store));

    let mut app = App::new(Arc::new(session), trips);
    println!("{}", app.render().await?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match app.handle(command).await {
            Ok(Flow::Continue(screen)) => println!("{}", screen),
            Ok(Flow::Quit) => break,
            Err(e) => {
                tracing::error!("Command failed: {:#}", e);
                println!("Something went wrong: {}", e);
            }
        }
    }

    Ok(())
}
