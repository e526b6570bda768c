use crate::common::virtual_network::VirtualSystem;

/// five routers with uneven edge weights, hosts on nodes 4 and 5
pub fn vnet_simple_weighted() -> VirtualSystem {
    let mut net = VirtualSystem::create(
        &["1", "2", "3", "4", "5"],
        &[
            (0, "1", "2", 2),
            (1, "1", "3", 1),
            (2, "2", "3", 4),
            (3, "2", "4", 5),
            (4, "3", "4", 100),
            (5, "3", "5", 8),
            (6, "4", "5", 1),
        ],
    );
    net.attach_host("hA", "5", 20, 1);
    net.attach_host("hB", "4", 21, 1);
    net
}

/// a, b and c each a hop apart, with z one hop further out carrying host d;
/// node a ends up seeing d advertised at 5 by b and at 3 by c
pub fn vnet_two_suppliers() -> VirtualSystem {
    let mut net = VirtualSystem::create(
        &["a", "b", "c", "z"],
        &[
            (0, "a", "b", 1),
            (1, "a", "c", 1),
            (2, "b", "z", 4),
            (3, "c", "z", 2),
        ],
    );
    net.attach_host("d", "z", 10, 1);
    net
}

/// a chain h -- a -- b -- c, the smallest topology where a downstream
/// neighbour could feed a stale route back after a failure
pub fn vnet_chain() -> VirtualSystem {
    let mut net = VirtualSystem::create(&["a", "b", "c"], &[(0, "a", "b", 1), (1, "b", "c", 1)]);
    net.attach_host("h", "a", 10, 1);
    net
}

/// the failure-test topology: h1 -- s1 -- s2 -- h2 over a direct link, with
/// the longer s1 -- s3 -- s4 -- s5 -- s2 path as backup
pub fn vnet_backup_path() -> VirtualSystem {
    let mut net = VirtualSystem::create(
        &["s1", "s2", "s3", "s4", "s5"],
        &[
            (0, "s1", "s2", 1),
            (1, "s1", "s3", 1),
            (2, "s3", "s4", 1),
            (3, "s4", "s5", 1),
            (4, "s5", "s2", 1),
        ],
    );
    net.attach_host("h1", "s1", 10, 1);
    net.attach_host("h2", "s2", 11, 1);
    net
}

/// host h1 on b, reachable from a directly or through two equally priced
/// detours via c and d
pub fn vnet_twin_detours() -> VirtualSystem {
    let mut net = VirtualSystem::create(
        &["a", "b", "c", "d"],
        &[
            (0, "a", "b", 1),
            (1, "a", "c", 5),
            (2, "a", "d", 5),
            (3, "b", "c", 1),
            (4, "b", "d", 1),
        ],
    );
    net.attach_host("h1", "b", 10, 1);
    net
}
