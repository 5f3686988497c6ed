//! Counter Reducer
//!
//! This example demonstrates the classic increment/decrement reducer.
//!
//! Key concepts:
//! - Transitions are pure functions of state and action
//! - Unknown action kinds are rejected without touching state
//! - Logging is an opt-in observer, not built into the engine
//!
//! Run with: RUST_LOG=debug cargo run --example counter

use refold::action_enum;
use refold::builder::EngineBuilder;
use refold::core::State;
use refold::engine::{DispatchError, TracingObserver};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
struct Counter {
    count: i64,
}

action_enum! {
    enum CounterAction {
        Increment => "increment",
        Decrement => "decrement",
        Add(i64) => "add",
        Bogus => "bogus",
    }
}

fn print_state<S: State>(label: &str, state: Result<&S, DispatchError>) {
    match state {
        Ok(state) => println!("  {label}: {state:?}"),
        Err(err) => println!("  {label}: <{err}>"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Counter Reducer Example ===\n");

    let mut engine = EngineBuilder::<Counter, CounterAction>::new()
        .initial(Counter { count: 0 })
        .on("increment", |s, _| Counter { count: s.count + 1 })
        .on("decrement", |s, _| Counter { count: s.count - 1 })
        .on("add", |s, action| match action {
            CounterAction::Add(n) => Counter { count: s.count + n },
            _ => s.clone(),
        })
        .observer(Arc::new(TracingObserver::new("counter")))
        .build()
        .expect("counter engine configuration is valid");

    print_state("initial", engine.current_state());

    let actions = [
        CounterAction::Increment,
        CounterAction::Add(10),
        CounterAction::Decrement,
        CounterAction::Bogus,
    ];

    for action in &actions {
        println!("\nDispatch {action:?}");
        match engine.dispatch(action) {
            Ok(state) => println!("  accepted -> {state:?}"),
            Err(err) => println!("  rejected: {err}"),
        }
        print_state("current", engine.current_state());
    }

    println!("\nHistory kinds: {:?}", engine.history().kinds());

    engine.dispose();
    println!("\nAfter dispose:");
    if let Err(err) = engine.dispatch(&CounterAction::Increment) {
        println!("  dispatch rejected: {err}");
    }

    println!("\n=== Example Complete ===");
}
