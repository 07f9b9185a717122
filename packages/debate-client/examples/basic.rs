//! Basic debate session usage example

use std::sync::Arc;

use debate_client::{DebateClient, DebateRequest, DebateSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize from environment (DEBATE_API_URL, defaults to localhost:8000)
    let client = DebateClient::from_env()?;
    let session = DebateSession::new(Arc::new(client));

    // Print every state change while the debate streams
    let mut updates = session.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            println!("{:?} {:?}", state.phase, state.agent_status);
        }
    });

    session
        .start(DebateRequest::new("Should we move our CI to self-hosted runners?"))
        .await;

    let state = session.snapshot();
    drop(session);
    watcher.await?;

    println!("\n=== Result ===");
    println!("PRO arguments: {}", state.pro_arguments.len());
    println!("CON arguments: {}", state.con_arguments.len());
    if let Some(verdict) = &state.verdict {
        println!("Decision: {:?} ({:?} wins)", verdict.decision, verdict.winner);
        println!("{}", verdict.summary);
    }
    if let Some(error) = &state.error {
        println!("Error: {}", error);
    }

    Ok(())
}
