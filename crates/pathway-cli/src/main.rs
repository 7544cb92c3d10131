mod args;
mod client;
mod output;

use std::process::ExitCode;

use clap::Parser;
use serde_json::Map;
use tracing_subscriber::EnvFilter;

use pathway_common::{ProcessRequest, QueryRequest};

use crate::args::{parse_loose_json, Args, Command};
use crate::client::PathwayClient;
use crate::output::{print_health, print_process, print_query};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = PathwayClient::new(&args.service_url, args.token)?;

    match args.command {
        Command::Health => match client.health().await {
            Ok(health) => print_health(&health),
            Err(e) => {
                eprintln!("✗ Service unhealthy: {e}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Process { input, pipeline } => {
            let req = ProcessRequest {
                input: parse_loose_json(&input),
                pipeline,
            };
            tracing::debug!(url = %client.url("/process"), "submitting process request");
            print_process(&client.process(&req).await?);
        }
        Command::Query {
            query,
            context,
            params,
        } => {
            let parameters = (!params.is_empty()).then(|| params.into_iter().collect::<Map<_, _>>());
            let req = QueryRequest {
                query,
                context,
                parameters,
            };
            tracing::debug!(url = %client.url("/query"), "submitting query");
            print_query(&client.query(&req).await?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
