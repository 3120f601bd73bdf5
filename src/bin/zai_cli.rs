//! zai-cli — Z.ai / 智谱 API 的命令行调试工具
//!
//! Usage:
//!   zai-cli chat [--model <m>] [--system <s>] <prompt>     One-shot chat completion
//!   zai-cli stream [--model <m>] [--system <s>] <prompt>   Streaming chat completion
//!   zai-cli embed [--model <m>] <text>...                  Embeddings for one or more texts

use anyhow::{bail, Context};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use zai_sdk::embeddings::EmbeddingsRequest;
use zai_sdk::{ChatCompletionRequest, Message, Region, ZaiClient};

const DEFAULT_CHAT_MODEL: &str = "glm-4.6";
const DEFAULT_EMBEDDING_MODEL: &str = "embedding-3";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "chat" => cmd_chat(&args[2..], false).await,
        "stream" => cmd_chat(&args[2..], true).await,
        "embed" => cmd_embed(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("zai-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"zai-cli — Z.ai API 命令行工具

USAGE:
    zai-cli <COMMAND> [OPTIONS]

COMMANDS:
    chat [--model <m>] [--system <s>] <prompt>     One-shot chat completion
    stream [--model <m>] [--system <s>] <prompt>   Streaming chat completion
    embed [--model <m>] <text>...                  Embeddings for one or more texts
    version                                        Show version information
    help                                           Show this help message

OPTIONS:
    --zhipu                     Use the mainland endpoint (open.bigmodel.cn)

ENVIRONMENT:
    ZAI_API_KEY                 API key (required)
    ZAI_BASE_URL                Override the base URL
    ZAI_HTTP_TIMEOUT_SECS       HTTP timeout in seconds (default 300)
    ZAI_PROXY_URL               Proxy for all requests
    RUST_LOG                    Log filter, e.g. zai_sdk=debug"#
    );
}

/// Flags shared by all commands plus the remaining positional arguments.
#[derive(Debug, Default)]
struct Options {
    model: Option<String>,
    system: Option<String>,
    zhipu: bool,
    positional: Vec<String>,
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut opts = Options::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--model" => opts.model = Some(iter.next().context("--model needs a value")?.clone()),
            "--system" => {
                opts.system = Some(iter.next().context("--system needs a value")?.clone())
            }
            "--zhipu" => opts.zhipu = true,
            _ => opts.positional.push(arg.clone()),
        }
    }
    Ok(opts)
}

fn build_client(opts: &Options) -> anyhow::Result<ZaiClient> {
    let region = if opts.zhipu {
        Region::Mainland
    } else {
        Region::Overseas
    };
    ZaiClient::builder()
        .region(region)
        .source_channel("rust-cli")
        .build()
        .context("failed to build client")
}

async fn cmd_chat(args: &[String], stream: bool) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    if opts.positional.is_empty() {
        bail!("missing prompt");
    }
    let client = build_client(&opts)?;

    let mut messages = Vec::new();
    if let Some(system) = &opts.system {
        messages.push(Message::system(system.as_str()));
    }
    messages.push(Message::user(opts.positional.join(" ")));
    let model = opts.model.as_deref().unwrap_or(DEFAULT_CHAT_MODEL);
    let request = ChatCompletionRequest::new(model, messages);

    if !stream {
        let completion = client.chat().create(request).await?;
        print!("{}", completion);
        return Ok(());
    }

    let mut s = client.chat().create_stream(request).await?;
    let mut stdout = std::io::stdout();
    while let Some(chunk) = s.next().await? {
        if let Some(choice) = chunk.choices.first() {
            if let Some(reasoning) = &choice.delta.reasoning_content {
                eprint!("{}", reasoning);
            }
            if let Some(content) = &choice.delta.content {
                write!(stdout, "{}", content)?;
                stdout.flush()?;
            }
        }
        if let Some(usage) = &chunk.usage {
            eprintln!();
            eprintln!(
                "[usage] prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
    }
    s.close();
    writeln!(stdout)?;
    Ok(())
}

async fn cmd_embed(args: &[String]) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    if opts.positional.is_empty() {
        bail!("missing text");
    }
    let client = build_client(&opts)?;
    let model = opts.model.as_deref().unwrap_or(DEFAULT_EMBEDDING_MODEL);
    let request = if opts.positional.len() == 1 {
        EmbeddingsRequest::new(model, opts.positional[0].as_str())
    } else {
        EmbeddingsRequest::batch(model, opts.positional.iter().cloned())
    };

    let resp = client.embeddings().create(&request).await?;
    for e in &resp.data {
        let head: Vec<String> = e.embedding.iter().take(4).map(|v| format!("{v:.4}")).collect();
        println!(
            "#{} dims={} [{}, ...]",
            e.index.unwrap_or_default(),
            e.dimensions(),
            head.join(", ")
        );
    }
    println!(
        "model={} tokens={}",
        resp.model, resp.usage.total_tokens
    );
    Ok(())
}
