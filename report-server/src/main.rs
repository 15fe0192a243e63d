use report_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv, logging)
    setup_environment();

    tracing::info!("PC report server starting...");

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize server state (record sources, report service)
    let state = ServerState::initialize(&config);

    // 4. Start the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
