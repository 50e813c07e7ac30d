//! The engine-facing contract of Graphwave: the types and traits that connect a
//! vertex program to the bulk-synchronous superstep executor that schedules it.

use derive_new::new;
use serde_derive::{Deserialize, Serialize};
use std::fmt::Debug;
use std::mem::size_of;

// Universally used types.
pub type VertexId = u32;
pub type VertexName = u64;
pub type EdgeWeight = f64;
pub type Distance = f64;
pub type Superstep = u32;

/// A directed out-edge, stored per source vertex in the adjacency store.
///
/// Targets are dense internal [`VertexId`]s so that message routing never has
/// to consult the name interning table.
#[derive(Serialize, Deserialize, new, Clone, Copy, Debug, PartialEq)]
pub struct OutEdge {
    pub target: VertexId,
    pub weight: EdgeWeight,
}

/// A per-superstep reduction over values contributed by vertices.
///
/// Each worker owns one instance holding the worker-local partial value; the
/// executor merges locals into a single global value between supersteps using
/// the pure, associative-commutative `merge_global`. Vertex programs only ever
/// observe a fully merged global value, one superstep after it was produced.
pub trait Aggregator: Default + Clone + Send + Sync + 'static {
    type Value: Copy + Send + Debug + 'static;

    /// Zeroes the worker-local partial value at the start of a superstep.
    fn reset_local(&mut self);

    /// Adds one vertex's contribution into the worker-local partial value.
    fn accumulate_local(&mut self, value: Self::Value);

    /// The worker-local partial value accumulated this superstep.
    fn local(&self) -> Self::Value;

    /// Combines one worker's local value into the cross-worker global value.
    fn merge_global(global: &mut Self::Value, local: Self::Value);

    /// The identity the executor starts each superstep's global merge from.
    fn initial_global() -> Self::Value;
}

/// The engine state visible to a single vertex during one superstep.
///
/// Everything reachable through the context is stable for the whole superstep:
/// the vertex's own prior state, the immutable previous-superstep global
/// aggregate, and this vertex's own inbox. No other vertex's state is visible.
pub trait VertexContext {
    type Value: Copy;
    type Message: Copy;
    type Aggregate: Copy;

    /// Current round number, starting at 0.
    fn superstep(&self) -> Superstep;

    fn vertex_id(&self) -> VertexId;

    fn value(&self) -> Self::Value;

    fn set_value(&mut self, value: Self::Value);

    /// Enqueues a message for delivery at the start of the next superstep.
    /// Fire-and-forget; delivery is exactly-once.
    fn send_message(&mut self, target: VertexId, message: Self::Message);

    /// Marks this vertex inactive until a new message arrives for it.
    fn vote_to_halt(&mut self);

    /// Adds a contribution to this superstep's aggregate.
    fn accumulate(&mut self, value: Self::Aggregate);

    /// The fully merged aggregate of the previous superstep, or `None` in
    /// superstep 0 when no previous round exists.
    fn global_aggregate(&self) -> Option<Self::Aggregate>;
}

/// The primary trait of the Graphwave computation API: the per-vertex logic
/// invoked once per active vertex per superstep.
///
/// # Examples
/// ```notest
/// impl VertexProgram for Sssp {
///     type Value = Distance;
///     type Message = Distance;
///     type Aggregator = ConvergenceAggregator;
///     ...
/// }
/// ```
pub trait VertexProgram: Send + Sync + Clone + 'static {
    /// The per-vertex state mutated once per superstep.
    type Value: Copy + Send + Debug + 'static;
    /// The value carried from a vertex to a neighbor across one barrier.
    type Message: Copy + Send + 'static;
    /// The cross-vertex reduction merged once per superstep.
    type Aggregator: Aggregator;

    /// The value every vertex starts with before superstep 0 runs.
    fn initial_value(&self) -> Self::Value;

    /// One superstep of work for one vertex. `out_edges` is this vertex's
    /// adjacency, finite and stable across its lifetime; `messages` is the
    /// finite, unordered, single-pass inbox delivered this superstep. Edges
    /// are passed next to the context so a program can walk them while it
    /// sends messages through the context.
    fn compute<C, I>(&self, ctx: &mut C, out_edges: &[OutEdge], messages: I)
    where
        C: VertexContext<
            Value = Self::Value,
            Message = Self::Message,
            Aggregate = <Self::Aggregator as Aggregator>::Value,
        >,
        I: Iterator<Item = Self::Message>;

    /// Size in bytes of one vertex value on the wire.
    fn value_size() -> usize {
        size_of::<Self::Value>()
    }

    /// Size in bytes of one message value on the wire.
    fn message_size() -> usize {
        size_of::<Self::Message>()
    }
}
