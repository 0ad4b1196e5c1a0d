use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use venture_vision::cli::Args;
use venture_vision::generator::context::AnalysisContext;
use venture_vision::generator::outlet::{DiskOutlet, MarkdownRenderer, Outlet};
use venture_vision::generator::workflow::AnalysisWorkflow;
use venture_vision::llm::LLMClient;
use venture_vision::lookup::GoogleSearchClient;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.to_config()?;
    init_tracing(config.verbose);
    config.validate()?;

    let llm_client = LLMClient::new(config.llm.clone())?;
    // 启动时检查模型连接
    llm_client.check_connection().await?;
    let lookup = GoogleSearchClient::new(&config.lookup)?;

    let context = AnalysisContext::new(config, Arc::new(llm_client), Arc::new(lookup));
    let workflow = AnalysisWorkflow::new(context);

    let query = args.query_text();
    let result = match args.timeout_override() {
        Some(timeout) => workflow.run_with_timeout(&query, args.kind, timeout).await,
        None => workflow.run(&query, args.kind).await,
    };

    match result {
        Ok(report) => {
            println!("{}", MarkdownRenderer::render(&report));
            if let Some(path) = &args.output {
                DiskOutlet::new(path).save(&report)?;
            }
        }
        Err(failure) => {
            println!("{}", MarkdownRenderer::render_intent(&failure.extracted_info));
            tracing::warn!(
                "⚠️ Please provide a clearer business type in your query to proceed with analysis. ({})",
                failure.reason
            );
        }
    }

    Ok(())
}
