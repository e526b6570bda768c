use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::serde_as;

use crate::concepts::link::{Link, LinkKind};
use crate::concepts::packet::{OutboundPacket, Packet};
use crate::concepts::route::{BestRoute, RouteRecord};
use crate::feedback::RoutingWarning;
use crate::framework::{ProtocolParams, RoutingSystem};
use crate::util::{clamp_cost, is_reachable, sum_inf};

/// Any cost at or above this is "unreachable"
pub const INFINITY: u16 = 16;

/// Per-node distance-vector routing engine.
///
/// The collaborator owns scheduling and delivery: it invokes [`link_up`],
/// [`link_down`], [`handle_packet`] and [`tick`] one at a time (there is no
/// intra-node parallelism), and drains [`outbound_packets`] after each call.
/// Time is an abstract monotone counter supplied by the collaborator on the
/// entry points that need it.
///
/// [`link_up`]: Router::link_up
/// [`link_down`]: Router::link_down
/// [`handle_packet`]: Router::handle_packet
/// [`tick`]: Router::tick
/// [`outbound_packets`]: Router::outbound_packets
#[serde_as]
#[derive(Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Router<T: RoutingSystem + ?Sized> {
    /// port -> attached link, the source of truth for neighbours and costs
    #[serde_as(as = "Vec<(_, _)>")]
    pub links: HashMap<T::Port, Link<T>>,
    /// destination -> selected route
    #[serde_as(as = "Vec<(_, _)>")]
    pub routes: HashMap<T::NodeId, BestRoute<T>>,
    pub config: ProtocolParams,
    /// packets queued for the collaborator to deliver
    pub outbound_packets: Vec<OutboundPacket<T>>,
    /// non-fatal anomalies observed since the last drain
    #[serde(skip_serializing, skip_deserializing)]
    pub warnings: Vec<RoutingWarning<T>>,
}

impl<T: RoutingSystem> Router<T> {
    pub fn new() -> Self {
        Self::with_config(T::config())
    }

    pub fn with_config(config: ProtocolParams) -> Self {
        Self {
            links: HashMap::new(),
            routes: HashMap::new(),
            config,
            outbound_packets: Vec::new(),
            warnings: Vec::new(),
        }
    }

    // region Entry points

    /// Registers a new link and immediately greets the neighbour with our
    /// full table, so convergence starts before the next periodic round.
    pub fn link_up(&mut self, port: T::Port, cost: u16) {
        let cost = clamp_cost(cost);
        debug!("link up on {} at cost {}", json!(port), cost);
        self.links.insert(port.clone(), Link::new(cost));
        for (dest, route) in &self.routes {
            if let Some(adv) = self.advertised_cost(route, &port) {
                self.outbound_packets.push(OutboundPacket {
                    port: port.clone(),
                    packet: Packet::RouteAdvertisement {
                        destination: dest.clone(),
                        cost: adv,
                    },
                });
            }
        }
    }

    /// Tears down a link. Every destination routed through it is repaired
    /// from the remaining caches, or withdrawn if nothing else reaches it.
    pub fn link_down(&mut self, port: &T::Port) {
        if self.links.remove(port).is_none() {
            self.warnings
                .push(RoutingWarning::UnknownPort { port: port.clone() });
            return;
        }
        debug!("link down on {}", json!(port));
        let orphaned: Vec<T::NodeId> = self
            .routes
            .iter()
            .filter(|(_, route)| route.port == *port)
            .map(|(dest, _)| dest.clone())
            .collect();
        for dest in orphaned {
            self.repair_route(&dest);
        }
    }

    /// Processes one delivered packet. `now` is the collaborator's monotone
    /// clock, used to time-stamp the neighbour's advertisement cache.
    pub fn handle_packet(&mut self, packet: &Packet<T>, port: &T::Port, now: u64) {
        if !self.links.contains_key(port) {
            warn!("dropping a packet that arrived on unknown port {}", json!(port));
            self.warnings
                .push(RoutingWarning::UnknownPort { port: port.clone() });
            return;
        }
        match packet {
            Packet::RouteAdvertisement { destination, cost } => {
                self.handle_advertisement(destination, *cost, port, now)
            }
            Packet::HostAnnounce { source } => self.handle_host_announce(source, port, now),
            Packet::Data { destination, .. } => self.forward(packet, destination, port),
        }
    }

    /// Periodic maintenance: age out stale neighbour records, then send the
    /// full table to every router neighbour.
    pub fn tick(&mut self, now: u64) {
        self.sweep_expired(now);
        self.broadcast_routes();
    }

    // endregion

    // region Receive paths

    fn handle_advertisement(&mut self, destination: &T::NodeId, cost: u16, port: &T::Port, now: u64) {
        if cost > INFINITY {
            warn!(
                "clamping out-of-range cost {} advertised on {}",
                cost,
                json!(port)
            );
            self.warnings.push(RoutingWarning::CostOutOfRange { cost });
        }
        let cost = clamp_cost(cost);
        let Some(link) = self.links.get_mut(port) else {
            return;
        };
        if !link.is_router() {
            // hosts do not take part in the route exchange
            return;
        }
        link.routes.insert(
            destination.clone(),
            RouteRecord {
                cost,
                refreshed_at: now,
            },
        );
        let candidate = sum_inf(cost, link.cost);

        let current = self
            .routes
            .get(destination)
            .map(|route| (route.cost, route.port.clone()));
        match current {
            None => {
                if is_reachable(candidate) {
                    trace!(
                        "learned {} via {} at cost {}",
                        json!(destination),
                        json!(port),
                        candidate
                    );
                    self.routes.insert(
                        destination.clone(),
                        BestRoute {
                            cost: candidate,
                            port: port.clone(),
                        },
                    );
                    self.announce(destination);
                }
            }
            Some((cur_cost, cur_port)) if cur_port == *port => {
                // the selected next hop is authoritative while it stays
                // selected: adopt its cost even when it worsens
                if is_reachable(candidate) {
                    if candidate != cur_cost {
                        self.routes.insert(
                            destination.clone(),
                            BestRoute {
                                cost: candidate,
                                port: port.clone(),
                            },
                        );
                        self.announce(destination);
                    }
                } else {
                    // our next hop lost the destination, look for a fallback
                    self.repair_route(destination);
                }
            }
            Some((cur_cost, _)) => {
                // a non-selected neighbour only wins by strict improvement
                if candidate < cur_cost {
                    self.routes.insert(
                        destination.clone(),
                        BestRoute {
                            cost: candidate,
                            port: port.clone(),
                        },
                    );
                    self.announce(destination);
                }
            }
        }
    }

    fn handle_host_announce(&mut self, source: &T::NodeId, port: &T::Port, now: u64) {
        let Some(link) = self.links.get_mut(port) else {
            return;
        };
        debug!("host {} attached on {}", json!(source), json!(port));
        link.kind = LinkKind::Host(source.clone());
        // the peer was never a router: anything it supposedly advertised is
        // void, and host links are exempt from the aging sweep
        link.routes.clear();
        // zero hops past the link; the record never expires
        link.routes.insert(
            source.clone(),
            RouteRecord {
                cost: 0,
                refreshed_at: now,
            },
        );
        let direct = link.cost;
        if is_reachable(direct) {
            self.routes.insert(
                source.clone(),
                BestRoute {
                    cost: direct,
                    port: port.clone(),
                },
            );
            self.announce(source);
        }
    }

    fn forward(&mut self, packet: &Packet<T>, destination: &T::NodeId, arrival: &T::Port) {
        let Some(route) = self.routes.get(destination) else {
            trace!("no route to {}, dropping data packet", json!(destination));
            return;
        };
        if route.port == *arrival {
            // the table is transiently stale, avoid a one-hop bounce
            trace!(
                "next hop for {} is the arrival port, dropping",
                json!(destination)
            );
            return;
        }
        self.outbound_packets.push(OutboundPacket {
            port: route.port.clone(),
            packet: packet.clone(),
        });
    }

    // endregion

    // region Route selection

    /// Classic relaxation over the locally cached neighbour advertisements:
    /// the cheapest (record cost + link cost) across all ports, ties broken
    /// by the lowest port. Never re-queries neighbours.
    fn recompute(&self, dest: &T::NodeId) -> Option<BestRoute<T>> {
        let mut best: Option<BestRoute<T>> = None;
        for (port, link) in &self.links {
            let Some(record) = link.routes.get(dest) else {
                continue;
            };
            let candidate = sum_inf(record.cost, link.cost);
            if !is_reachable(candidate) {
                continue;
            }
            let better = match &best {
                None => true,
                Some(cur) => candidate < cur.cost || (candidate == cur.cost && *port < cur.port),
            };
            if better {
                best = Some(BestRoute {
                    cost: candidate,
                    port: port.clone(),
                });
            }
        }
        best
    }

    /// Re-runs relaxation for one destination whose selected route was
    /// invalidated, updating the table and emitting triggered updates.
    fn repair_route(&mut self, dest: &T::NodeId) {
        match self.recompute(dest) {
            Some(best) => {
                let changed = match self.routes.get(dest) {
                    Some(cur) => cur.cost != best.cost || cur.port != best.port,
                    None => true,
                };
                if changed {
                    debug!(
                        "rerouted {} via {} at cost {}",
                        json!(dest),
                        json!(best.port),
                        best.cost
                    );
                    self.routes.insert(dest.clone(), best);
                    self.announce(dest);
                }
            }
            None => {
                if self.routes.remove(dest).is_some() {
                    debug!("lost all routes to {}", json!(dest));
                    self.announce_unreachable(dest);
                }
            }
        }
    }

    // endregion

    // region Dissemination

    /// Cost to advertise for `route` toward `port`, or None to stay silent.
    /// Poisoned reverse advertises INFINITY toward the route's own next hop;
    /// with poisoning off this falls back to plain split horizon.
    fn advertised_cost(&self, route: &BestRoute<T>, port: &T::Port) -> Option<u16> {
        if route.port == *port {
            if self.config.poison_reverse {
                Some(INFINITY)
            } else {
                None
            }
        } else {
            Some(route.cost)
        }
    }

    /// Sends a triggered update for `dest` to every router neighbour under
    /// the advertisement policy.
    fn announce(&mut self, dest: &T::NodeId) {
        let Some(route) = self.routes.get(dest) else {
            return;
        };
        let mut queued = Vec::new();
        for (port, link) in &self.links {
            if !link.is_router() {
                continue;
            }
            if let Some(adv) = self.advertised_cost(route, port) {
                queued.push(OutboundPacket {
                    port: port.clone(),
                    packet: Packet::RouteAdvertisement {
                        destination: dest.clone(),
                        cost: adv,
                    },
                });
            }
        }
        self.outbound_packets.extend(queued);
    }

    /// Announces a withdrawn destination at INFINITY to every router
    /// neighbour.
    fn announce_unreachable(&mut self, dest: &T::NodeId) {
        for (port, link) in &self.links {
            if !link.is_router() {
                continue;
            }
            self.outbound_packets.push(OutboundPacket {
                port: port.clone(),
                packet: Packet::RouteAdvertisement {
                    destination: dest.clone(),
                    cost: INFINITY,
                },
            });
        }
    }

    /// Periodic full-table advertisement, poisoned toward each destination's
    /// own next hop.
    pub fn broadcast_routes(&mut self) {
        let mut queued = Vec::new();
        for (port, link) in &self.links {
            if !link.is_router() {
                continue;
            }
            for (dest, route) in &self.routes {
                if let Some(adv) = self.advertised_cost(route, port) {
                    queued.push(OutboundPacket {
                        port: port.clone(),
                        packet: Packet::RouteAdvertisement {
                            destination: dest.clone(),
                            cost: adv,
                        },
                    });
                }
            }
        }
        self.outbound_packets.extend(queued);
    }

    // endregion

    // region Maintenance

    fn sweep_expired(&mut self, now: u64) {
        let expiry = self.config.route_expiry;
        let routes = &self.routes;
        let mut invalidated: Vec<T::NodeId> = Vec::new();
        for (port, link) in &mut self.links {
            if !link.is_router() {
                // a host attachment does not age
                continue;
            }
            link.routes.retain(|dest, record| {
                if now.saturating_sub(record.refreshed_at) <= expiry {
                    return true;
                }
                trace!("expiring {} learned on {}", json!(dest), json!(port));
                if routes.get(dest).is_some_and(|route| route.port == *port) {
                    invalidated.push(dest.clone());
                }
                false
            });
        }
        for dest in invalidated {
            self.repair_route(&dest);
        }
    }

    // endregion
}

impl<T: RoutingSystem> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}
