use crate::framework::RoutingSystem;
use educe::Educe;
use thiserror::Error;

/// Although this is an error enum, these should be treated as warnings.
/// Nothing in the engine is fatal: anomalous input is absorbed as a
/// routing-state transition and one of these is recorded for the collaborator
/// to drain.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug)]
pub enum RoutingWarning<T: RoutingSystem + ?Sized> {
    /// A packet was delivered for a port with no link-table entry. The packet
    /// is dropped; the link may have gone down while it was in flight.
    #[error("dropped a packet that arrived on an unknown port")]
    UnknownPort { port: T::Port },
    /// A neighbour advertised a cost beyond INFINITY. The cost is clamped and
    /// folded in as "this neighbour cannot reach it".
    #[error("clamped an advertised cost of {cost} to INFINITY")]
    CostOutOfRange { cost: u16 },
}
