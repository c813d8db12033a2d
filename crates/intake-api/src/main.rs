use intake_core::Config;

// mimalloc as the global allocator: lower fragmentation on musl-based containers.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, email, routes)
    let (_state, router) = intake_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    intake_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
