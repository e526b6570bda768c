use std::collections::HashMap;

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::concepts::route::RouteRecord;
use crate::framework::RoutingSystem;

/// What sits on the far end of a link.
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub enum LinkKind<T: RoutingSystem + ?Sized> {
    /// another router participating in the route exchange
    Router,
    /// a directly attached host; excluded from the route exchange
    Host(T::NodeId),
}

/// Local state for one attached link: the traversal cost and the cache of
/// routes the neighbour on this link has advertised. Created on link-up,
/// destroyed on link-down.
#[serde_as]
#[derive(Serialize, Deserialize, Educe)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct Link<T: RoutingSystem + ?Sized> {
    /// cost of traversing this link, INFINITY if unusable
    pub cost: u16,
    pub kind: LinkKind<T>,
    /// destination -> advertisement cache for the neighbour on this link.
    /// A host attachment is modelled as a cost-0 record that never expires,
    /// which keeps relaxation uniform across ports.
    #[serde_as(as = "Vec<(_, _)>")]
    pub routes: HashMap<T::NodeId, RouteRecord>,
}

impl<T: RoutingSystem + ?Sized> Link<T> {
    pub fn new(cost: u16) -> Self {
        Self {
            cost,
            kind: LinkKind::Router,
            routes: HashMap::new(),
        }
    }

    /// true when the neighbour on this link takes part in the route exchange
    pub fn is_router(&self) -> bool {
        matches!(self.kind, LinkKind::Router)
    }
}
