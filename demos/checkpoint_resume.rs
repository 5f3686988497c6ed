//! Checkpoint and Resume
//!
//! This example demonstrates persisting an engine and resuming it later.
//!
//! Key concepts:
//! - Checkpoints carry state, history and counters, never transitions
//! - JSON for inspection, bincode for compact storage
//! - Resume re-supplies the same reducer and continues the sequence
//!
//! Run with: cargo run --example checkpoint_resume

use refold::checkpoint::Checkpoint;
use refold::core::{Guard, TaggedAction};
use refold::engine::{Engine, Reducer};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Account {
    balance: i64,
    frozen: bool,
}

fn amount(action: &TaggedAction) -> i64 {
    action.field_as::<i64>("amount").unwrap_or(0)
}

fn account_reducer() -> Reducer<Account, TaggedAction> {
    Reducer::new()
        .on_guarded(
            "deposit",
            Guard::new(|s: &Account, a: &TaggedAction| !s.frozen && amount(a) > 0),
            |s: &Account, a: &TaggedAction| Account {
                balance: s.balance + amount(a),
                ..s.clone()
            },
        )
        .on_guarded(
            "withdraw",
            Guard::new(|s: &Account, a: &TaggedAction| {
                !s.frozen && amount(a) > 0 && amount(a) <= s.balance
            }),
            |s: &Account, a: &TaggedAction| Account {
                balance: s.balance - amount(a),
                ..s.clone()
            },
        )
        .on("freeze", |s: &Account, _: &TaggedAction| Account {
            frozen: true,
            ..s.clone()
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Checkpoint and Resume Example ===\n");

    let mut engine = Engine::initialize(
        account_reducer(),
        Account {
            balance: 0,
            frozen: false,
        },
    );

    engine.dispatch(&TaggedAction::new("deposit").with("amount", 100))?;
    engine.dispatch(&TaggedAction::new("withdraw").with("amount", 30))?;
    if let Err(err) = engine.dispatch(&TaggedAction::new("withdraw").with("amount", 500)) {
        println!("Overdraft refused: {err}");
    }
    println!("Before checkpoint: {:?}", engine.current_state()?);

    let checkpoint = engine.checkpoint()?;
    let json = checkpoint.to_json()?;
    let bytes = checkpoint.to_binary()?;
    println!(
        "Checkpoint {}: {} bytes as JSON, {} bytes as binary",
        checkpoint.id,
        json.len(),
        bytes.len()
    );

    // Simulate a restart
    drop(engine);

    let restored = Checkpoint::<Account>::from_binary(&bytes)?;
    let mut engine = Engine::resume(account_reducer(), restored)?;
    println!("\nResumed: {:?}", engine.current_state()?);

    engine.dispatch(&TaggedAction::new("freeze"))?;
    if let Err(err) = engine.dispatch(&TaggedAction::new("deposit").with("amount", 5)) {
        println!("Deposit on frozen account refused: {err}");
    }

    let metadata = engine.metadata();
    println!(
        "\nAccepted {} dispatches, rejected {}",
        metadata.dispatch_count, metadata.rejected_count
    );
    println!("Path: {:?}", engine.history().get_path());

    println!("\n=== Example Complete ===");
    Ok(())
}
