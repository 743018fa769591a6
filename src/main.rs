//! Context Assembler - MCP server and one-shot renderer.

use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use context_assembler::config::{Args, Config, Transport};
use context_assembler::error::{Error, Result};
use context_assembler::http;
use context_assembler::mcp::handler::McpHandler;
use context_assembler::mcp::server::McpServer;
use context_assembler::mcp::transport::StdioTransport;
use context_assembler::metrics::Metrics;
use context_assembler::service::AssemblerService;
use context_assembler::tools;
use context_assembler::VERSION;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs go to stderr; stdout belongs to the protocol or the rendered document.
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Config(format!("Failed to set tracing subscriber: {}", e)))?;

    let config = Config::try_from(args)?;
    let metrics = Metrics::new();
    let service = Arc::new(AssemblerService::new(&config, metrics.clone()));

    if let Some(path) = &config.package {
        let pkg = service.load(path).await?;
        let document = service.assemble(&pkg, config.reference_time());

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", document)?;
        return Ok(());
    }

    info!("Context Assembler v{}", VERSION);
    info!("Transport: {:?}", config.transport);

    let mut handler = McpHandler::new();
    tools::register_all_tools(&mut handler, service);
    info!("Registered {} MCP tools", handler.tool_count());
    let handler = Arc::new(handler);

    match config.transport {
        Transport::Stdio => {
            let server = McpServer::new(handler, metrics, "context-assembler");
            server.run(StdioTransport::stdio()).await?;
        }
        Transport::Http => {
            http::start_server(&config, handler, metrics).await?;
        }
    }

    Ok(())
}
