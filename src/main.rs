mod config;
mod models;
mod proto;
mod services;
mod utils;

use config::{CONFIG_FILE, Config};
use proto::practice::practice_gateway_server::PracticeGatewayServer;
use services::cleanup_service::CleanupService;
use services::execution_services::gateway_service::PracticeGatewayService;
use services::websocket::websocket_server::run_websocket_server;

use tonic::transport::Server;
use tonic_reflection::server::Builder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_file(CONFIG_FILE);
    let grpc_addr = format!("{}:{}", config.build.host, config.build.service_port).parse()?;
    let ws_addr = format!("{}:{}", config.build.host, config.build.web_socket_port);
    config::set_global_config(config);

    let service = PracticeGatewayService::from_config();

    // Configure the reflection service
    let reflection_service = Builder::configure()
        .register_encoded_file_descriptor_set(proto::practice::FILE_DESCRIPTOR_SET)
        .build()?;

    tokio::spawn(async move {
        if let Err(e) = run_websocket_server(&ws_addr).await {
            eprintln!("Editor channel error: {}", e);
        }
    });

    tokio::spawn(async move {
        CleanupService.run().await;
    });

    println!("Server listening on {}", grpc_addr);

    Server::builder()
        .add_service(PracticeGatewayServer::new(service))
        .add_service(reflection_service)
        .serve(grpc_addr)
        .await?;

    Ok(())
}
