use crate::framework::RoutingSystem;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// A single neighbour-advertised route, cached per (port, destination).
/// Owned exclusively by the link's route cache; overwritten on every fresh
/// advertisement and purged once it outlives the expiry threshold.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RouteRecord {
    /// the cost advertised by the neighbour, before our link cost is added
    pub cost: u16,
    /// engine time at which this record was last refreshed
    pub refreshed_at: u64,
}

/// The selected route for one destination, the node's externally observable
/// routing state. A destination with no finite-cost path has no entry at all,
/// it is never stored at INFINITY.
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct BestRoute<T: RoutingSystem + ?Sized> {
    /// total cost to the destination, link cost included
    pub cost: u16,
    /// the local port leading to the next hop
    pub port: T::Port,
}
