use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Types the collaborator plugs into the engine. The engine is I/O free: it
/// never touches the network or a clock itself, it only manipulates these
/// opaque identifiers and queues outbound packets for the collaborator.
pub trait RoutingSystem {
    /// Identifies a destination (router or host) on the routing network,
    /// MUST be globally unique
    type NodeId: Ord + PartialOrd + DvData + DvKey;
    /// Identifies a local link endpoint; only unique within a single node.
    /// `Ord` is used to break equal-cost ties deterministically.
    type Port: Ord + PartialOrd + DvData + DvKey;
    /// Opaque payload carried by data packets
    type Payload: DvData;
    fn config() -> ProtocolParams {
        Default::default()
    }
}

pub trait DvData: Clone + Debug + Serialize + DeserializeOwned + Sized {}
pub trait DvKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> DvKey for T {}
impl<T: Clone + Debug + Serialize + DeserializeOwned + Sized> DvData for T {}

/// Protocol parameters. The collaborator owns the periodic timer itself; the
/// engine publishes the cadence it expects and ages records against
/// `route_expiry`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// advertise INFINITY toward a destination's own next hop (poisoned
    /// reverse); when false, plain split horizon omits the advertisement
    pub poison_reverse: bool,
    /// neighbour records older than this many time units are purged
    pub route_expiry: u64,
    /// time units between calls to [`tick`](crate::router::Router::tick).
    /// Purely advisory to the collaborator, which owns all scheduling; the
    /// engine never reads it
    pub timer_interval: u64,
}
impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            poison_reverse: true,
            route_expiry: 15,
            timer_interval: 5,
        }
    }
}
