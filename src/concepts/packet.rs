use crate::framework::RoutingSystem;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// Everything that can arrive at (or leave) a node. A closed enum: adding a
/// packet kind is a compile-time-checked change at every match site.
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub enum Packet<T: RoutingSystem + ?Sized> {
    /// a neighbour announcing the cost at which it can reach a destination,
    /// before our link cost is added
    RouteAdvertisement { destination: T::NodeId, cost: u16 },
    /// the endpoint on the sending link is a host, not a router; it does not
    /// participate in the route exchange
    HostAnnounce { source: T::NodeId },
    /// opaque traffic to be forwarded toward `destination`, never interpreted
    Data {
        destination: T::NodeId,
        payload: T::Payload,
    },
}

#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct OutboundPacket<T: RoutingSystem + ?Sized> {
    /// send over this local link
    pub port: T::Port,
    pub packet: Packet<T>,
}
