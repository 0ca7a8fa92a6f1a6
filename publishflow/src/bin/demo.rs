//! Runs the publish pipeline once against a local Ollama server.

use std::sync::Arc;

use anyhow::Context;
use publishflow::prelude::*;
use serde::Serialize;

const TITLE: &str = "Deep Learning LLMs and the Data Cloud";

const CONTENT: &str = "Modern deep learning has enabled large language models (LLMs) that perform \
reasoning, summarization, and code generation. Operationalizing LLMs at scale increasingly relies \
on the data cloud, platforms like Snowflake, BigQuery, and Databricks, for governed data access, \
feature pipelines, vector search, and cost-aware orchestration. Techniques such as \
retrieval-augmented generation (RAG), fine-tuning, and prompt engineering integrate enterprise \
data with foundation models while preserving governance and observability. MLOps for LLMs covers \
evaluation, safety, monitoring for drift/toxicity/PII, and pipeline automation to reliably move \
from experimentation to production.";

fn print_section<T: Serialize>(name: &str, value: &T) -> anyhow::Result<()> {
    println!("\n--- {name} ---");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(LogFormat::Pretty);

    let client = OllamaClient::new(ClientConfig::default()).context("invalid client config")?;
    let pipeline = PublishPipeline::new(StructuredCaller::new(Arc::new(client)))
        .with_event_sink(Arc::new(LoggingEventSink::debug()));

    println!("Multi-Agent Blog Packaging\n{}", "=".repeat(60));

    let run = pipeline
        .run(TITLE, CONTENT)
        .await
        .context("pipeline run failed")?;

    print_section("Planner (JSON)", &run.planner)?;
    print_section("Reviewer (JSON)", &run.reviewer)?;
    print_section("Finalized Output", &run.finalized)?;
    print_section("Publish Package", &run.publish)?;

    Ok(())
}
