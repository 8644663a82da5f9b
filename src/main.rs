use log::{error, info};
use std::error::Error;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match surfs_up::get_configuration() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to read configuration: {}", e);
            process::exit(1);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install CTRL+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received CTRL+C, shutting down");
    };

    if let Err(e) = surfs_up::run(settings, shutdown).await {
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(&format!(": {}", cause));
            source = cause.source();
        }
        error!("{}", message);
        process::exit(1);
    }
}
