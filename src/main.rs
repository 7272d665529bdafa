//! Mini-AGI Chat - terminal client
//!
//! Reads messages from stdin, sends each turn to the orchestration backend
//! and prints the answer followed by the agent timeline. Ctrl-C cancels the
//! turn in flight; Ctrl-C at the prompt exits.

use mini_agi_chat::render::{render_thread, render_timeline, render_turn};
use mini_agi_chat::{
    BackendAdapter, ChatConfig, ChatModelAdapter, LocalRuntime, LoggingAdapter, TurnOutcome,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interleave with the transcript
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_agi_chat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ChatConfig::from_env();
    let backend = BackendAdapter::new(&config)?;
    tracing::info!(endpoint = %backend.endpoint(), "Backend adapter initialized");

    let adapter: Arc<dyn ChatModelAdapter> = Arc::new(LoggingAdapter::new(Arc::new(backend)));
    let mut runtime = LocalRuntime::new(adapter);

    println!("Mini-AGI Chat");
    println!("Powered by Orchestrator + Agents + Tools");
    println!("Commands: /events, /history, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        match line.trim() {
            "" => continue,
            "/quit" | "/exit" => break,
            "/events" => {
                println!("{}\n", render_timeline(runtime.timeline()));
                continue;
            }
            "/history" => {
                println!("{}\n", render_thread(runtime.conversation().turns()));
                continue;
            }
            _ => {}
        }

        let cancel = CancellationToken::new();
        let watcher = cancel.clone();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                watcher.cancel();
            }
        });

        let outcome = runtime.submit(&line, cancel).await;
        ctrl_c.abort();

        match outcome {
            Ok(TurnOutcome::Cancelled) => println!("(cancelled)\n"),
            Ok(TurnOutcome::Completed | TurnOutcome::Recovered) => {
                if let Some(turn) = runtime.conversation().last() {
                    println!("{}\n", render_turn(turn));
                }
                println!("{}\n", render_timeline(runtime.timeline()));
            }
            Err(e) => println!("({e})\n"),
        }
    }

    tracing::info!(turns = runtime.conversation().len(), "Session ended");
    Ok(())
}
