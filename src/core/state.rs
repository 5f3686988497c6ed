//! State trait for reducer-managed values.
//!
//! A state is an opaque, immutable value chosen by the caller. The engine
//! never looks inside it; it only clones, compares and persists it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Marker trait for values an engine can hold as its current state.
///
/// # Required Traits
///
/// - `Clone`: history records keep both the `from` and `to` state
/// - `PartialEq`: equality defines determinism and "unchanged" checks
/// - `Debug`: states appear in diagnostics and observer output
/// - `Serialize` + `DeserializeOwned`: states are persisted in checkpoints
///
/// Every type meeting these bounds is a `State`, so plain records work
/// without an explicit impl.
///
/// # Example
///
/// ```rust
/// use refold::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// struct Counter {
///     count: i64,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
/// assert_state(&Counter { count: 0 });
/// ```
pub trait State: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {}

impl<T> State for T where T: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync {}
