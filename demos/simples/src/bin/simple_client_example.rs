use notedx_client::application::client::Client;
use notedx_client::application::interfaces::notes::NoteService;
use notedx_client::utils::setup_logger;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    setup_logger();

    info!("Starting simple client example");

    // Credentials come from NOTEDX_API_KEY or NOTEDX_EMAIL/NOTEDX_PASSWORD
    info!("Creating client...");
    let client = Client::from_env().await?;
    info!("✓ Client created for {}", client.base_url());

    let status = client.get_system_status().await?;
    info!("System status: {}", status.status);
    info!("Services: {:#?}", status.services);

    Ok(())
}
