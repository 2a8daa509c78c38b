#[cfg(test)]
mod tests {
    use explore_engine::export::{build_document, ExplorationDocument, ExplorationParams};
    use explore_engine::generator::{graph_to_tree, kary_tree, path_tree, random_tree, star_tree};
    use explore_engine::{Exploration, NodeStatus, SimulationError, Trace, TreeError, TreeIndex};
    use std::collections::HashSet;

    fn explore(children: Vec<Vec<usize>>, robots: usize) -> Trace {
        Exploration::from_children(children, 0, robots)
            .unwrap()
            .run()
            .unwrap()
    }

    fn lower_bound(nodes: usize, robots: usize, height: usize) -> u64 {
        let work = (2 * nodes.saturating_sub(1) as u64).div_ceil(robots as u64);
        work.max(2 * height as u64)
    }

    // ========== Path Scenario ==========

    #[test]
    fn test_path_group_walks_down_and_back() {
        let trace = explore(path_tree(5), 2);

        let positions: Vec<Vec<usize>> =
            trace.rounds().iter().map(|s| s.positions.clone()).collect();
        assert_eq!(
            positions,
            vec![
                vec![0, 0],
                vec![1, 1],
                vec![2, 2],
                vec![3, 3],
                vec![4, 4],
                vec![3, 3],
                vec![2, 2],
                vec![1, 1],
                vec![0, 0],
            ]
        );
        assert_eq!(trace.terminal_round(), Some(8));
        assert!(trace.last().unwrap().all_finished());
    }

    #[test]
    fn test_path_statuses_at_the_leaf() {
        let trace = explore(path_tree(5), 2);
        let at_leaf = &trace.rounds()[4];
        use NodeStatus::*;
        assert_eq!(at_leaf.status, vec![Inhabited, Inhabited, Inhabited, Inhabited, Finished]);
        assert_eq!(at_leaf.robot_count_in_subtree, vec![2, 2, 2, 2, 2]);

        // One hop back up: the leaf's parent is now vacated below and done.
        let back = &trace.rounds()[5];
        assert_eq!(back.status, vec![Inhabited, Inhabited, Inhabited, Finished, Finished]);
    }

    // ========== Star Scenario ==========

    #[test]
    fn test_star_one_robot_per_leaf() {
        let trace = explore(star_tree(4), 4);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.rounds()[1].positions, vec![1, 2, 3, 4]);
        assert_eq!(trace.rounds()[1].status[0], NodeStatus::Inhabited);
        assert_eq!(trace.rounds()[2].positions, vec![0, 0, 0, 0]);
        assert!(trace.rounds()[2].all_finished());
    }

    #[test]
    fn test_star_with_fewer_robots_than_leaves() {
        // 8 leaves, 3 robots: trips of 3, 3 and 2 leaves, two rounds each.
        let trace = explore(star_tree(8), 3);
        assert_eq!(trace.terminal_round(), Some(6));
        assert_eq!(trace.rounds()[1].positions, vec![1, 2, 3]);
        assert_eq!(trace.rounds()[3].positions, vec![4, 5, 6]);
        // Three robots over the two remaining leaves, dealt in turn.
        assert_eq!(trace.rounds()[5].positions, vec![7, 8, 7]);
    }

    #[test]
    fn test_single_node() {
        let trace = explore(vec![vec![]], 3);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.rounds()[0].status, vec![NodeStatus::Unfinished]);
        assert_eq!(trace.rounds()[1].status, vec![NodeStatus::Finished]);
        assert_eq!(trace.rounds()[1].positions, vec![0, 0, 0]);
    }

    // ========== Branching Scenario ==========

    #[test]
    fn test_busy_child_keeps_parent_unfinished() {
        //     0
        //    / \
        //   1   2
        //  / \
        // 3   4
        let trace = explore(vec![vec![1, 2], vec![3, 4], vec![], vec![], vec![]], 2);

        let positions: Vec<Vec<usize>> =
            trace.rounds().iter().map(|s| s.positions.clone()).collect();
        assert_eq!(
            positions,
            vec![
                vec![0, 0],
                vec![1, 2],
                vec![3, 0],
                vec![1, 1],
                vec![4, 4],
                vec![1, 1],
                vec![0, 0],
            ]
        );
        assert_eq!(trace.terminal_round(), Some(6));

        use NodeStatus::*;
        let status: Vec<Vec<NodeStatus>> =
            trace.rounds().iter().map(|s| s.status.clone()).collect();
        assert_eq!(status[1], vec![Unfinished, Unfinished, Finished, Unfinished, Unfinished]);
        assert_eq!(status[3], vec![Unfinished, Unfinished, Finished, Finished, Unfinished]);
        assert_eq!(status[4], vec![Inhabited, Inhabited, Finished, Finished, Finished]);
        assert_eq!(status[5], vec![Inhabited, Finished, Finished, Finished, Finished]);
    }

    #[test]
    fn test_fixed_hundred_node_tree() {
        let children: Vec<Vec<usize>> = vec![
            vec![1, 2, 3, 4, 5], vec![6], vec![], vec![], vec![7], vec![8], vec![9],
            vec![10, 11], vec![12, 13], vec![], vec![], vec![14, 15, 16], vec![17], vec![18],
            vec![19], vec![20], vec![21, 22, 23], vec![], vec![24, 25], vec![26], vec![27],
            vec![], vec![28, 29, 30], vec![31, 32], vec![33, 34], vec![35], vec![36], vec![],
            vec![], vec![37], vec![38], vec![39], vec![40, 41], vec![42, 43], vec![44, 45, 46],
            vec![47, 48, 49], vec![], vec![50], vec![51], vec![52], vec![], vec![53, 54],
            vec![], vec![55, 56], vec![], vec![57], vec![58], vec![], vec![], vec![59], vec![],
            vec![60], vec![61], vec![62], vec![63], vec![64], vec![65, 66, 67], vec![68],
            vec![69], vec![70], vec![71], vec![72], vec![73], vec![74, 75], vec![], vec![],
            vec![], vec![76], vec![77], vec![], vec![], vec![], vec![], vec![], vec![78],
            vec![79, 80], vec![81], vec![], vec![82], vec![83], vec![84], vec![85], vec![],
            vec![86], vec![87, 88], vec![89], vec![], vec![], vec![90], vec![91, 92], vec![],
            vec![], vec![93, 94], vec![95], vec![96, 97], vec![], vec![], vec![98, 99], vec![],
            vec![],
        ];
        assert_eq!(children.len(), 100);
        let trace = explore(children, 16);

        assert_eq!(trace.terminal_round(), Some(46));
        assert_eq!(
            trace.rounds()[1].positions,
            vec![1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 1, 2, 3, 4, 5, 1]
        );
        assert_eq!(
            trace.rounds()[10].positions,
            vec![16, 15, 35, 28, 35, 18, 16, 14, 14, 55, 18, 34, 16, 15, 33, 18]
        );
    }

    #[test]
    fn test_default_seed_round_count() {
        let graph = random_tree(100, 1991).unwrap();
        let (_, children) = graph_to_tree(&graph).unwrap();
        assert_eq!(explore(children, 16).terminal_round(), Some(58));
    }

    // ========== Single Robot: Depth-First Search ==========

    #[test]
    fn test_single_robot_is_depth_first() {
        let children = kary_tree(2, 3);
        let n = children.len();
        let tree = TreeIndex::new(children.clone(), 0).unwrap();
        let trace = explore(children, 1);

        assert_eq!(trace.terminal_round(), Some(2 * (n as u64 - 1)));

        let mut descended = Vec::new();
        for pair in trace.rounds().windows(2) {
            let (from, to) = (pair[0].positions[0], pair[1].positions[0]);
            assert_ne!(from, to, "a lone robot never idles before termination");
            if tree.parent(to) == Some(from) {
                descended.push((from, to));
            } else {
                assert_eq!(tree.parent(from), Some(to));
            }
        }
        let distinct: HashSet<_> = descended.iter().collect();
        assert_eq!(descended.len(), n - 1);
        assert_eq!(distinct.len(), n - 1);

        // Leftmost branch first.
        assert_eq!(&descended[..3], &[(0, 1), (1, 3), (3, 7)]);
    }

    #[test]
    fn test_single_robot_on_random_trees() {
        for seed in 0..10 {
            let graph = random_tree(25, seed).unwrap();
            let (_, children) = graph_to_tree(&graph).unwrap();
            let trace = explore(children, 1);
            assert_eq!(trace.terminal_round(), Some(48), "seed {seed}");
        }
    }

    // ========== Generator-Backed Runs ==========

    #[test]
    fn test_random_trees_terminate_at_root() {
        for seed in 0..20 {
            let graph = random_tree(30, seed).unwrap();
            let (_, children) = graph_to_tree(&graph).unwrap();
            let tree = TreeIndex::new(children.clone(), 0).unwrap();

            for robots in [1, 2, 3, 5, 8, 30] {
                let trace = explore(children.clone(), robots);
                let last = trace.last().unwrap();

                assert!(last.all_finished(), "seed {seed}, k={robots}");
                assert!(last.positions.iter().all(|&p| p == 0), "seed {seed}, k={robots}");
                assert!(last.traversed.iter().all(|&t| t), "seed {seed}, k={robots}");
                assert!(
                    last.round >= lower_bound(tree.len(), robots, tree.height()),
                    "seed {seed}, k={robots}: {} rounds",
                    last.round
                );
                // Only the final round is fully finished.
                assert!(trace.rounds()[..trace.len() - 1].iter().all(|s| !s.all_finished()));
            }
        }
    }

    #[test]
    fn test_robots_are_conserved_every_round() {
        let graph = random_tree(40, 11).unwrap();
        let (_, children) = graph_to_tree(&graph).unwrap();
        let trace = explore(children, 6);

        for snapshot in trace.rounds() {
            assert_eq!(snapshot.positions.len(), 6);
            assert_eq!(snapshot.robot_count.iter().sum::<u32>(), 6);
            assert_eq!(snapshot.robot_count_in_subtree[0], 6);
        }
    }

    #[test]
    fn test_robots_move_at_most_one_edge_per_round() {
        let children = kary_tree(3, 3);
        let tree = TreeIndex::new(children.clone(), 0).unwrap();
        let trace = explore(children, 7);

        for pair in trace.rounds().windows(2) {
            for (&from, &to) in pair[0].positions.iter().zip(&pair[1].positions) {
                assert!(
                    from == to || tree.parent(to) == Some(from) || tree.parent(from) == Some(to),
                    "round {}: {from} -> {to}",
                    pair[1].round
                );
            }
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let graph = random_tree(50, 5).unwrap();
        let (_, children) = graph_to_tree(&graph).unwrap();
        assert_eq!(explore(children.clone(), 4), explore(children, 4));
    }

    #[test]
    fn test_iteration_can_stop_early() {
        let sim = Exploration::from_children(path_tree(10), 0, 2).unwrap();
        let first_three: Vec<_> = sim.take(3).map(Result::unwrap).collect();
        assert_eq!(first_three.len(), 3);
        assert_eq!(first_three[2].round, 2);
        assert!(!first_three[2].all_finished());
    }

    // ========== Viewer Document ==========

    #[test]
    fn test_document_matches_trace() {
        let params = ExplorationParams { nodes: 12, robots: 3, seed: 1991 };
        let document = build_document(&params).unwrap();

        let graph = random_tree(12, 1991).unwrap();
        let (edges, children) = graph_to_tree(&graph).unwrap();
        let trace = explore(children.clone(), 3);

        assert_eq!(document.tree.n, 12);
        assert_eq!(document.tree.edges, edges);
        assert_eq!(document.tree.adjacency_list, children);
        assert_eq!(document.steps.len(), trace.len());
        for (step, snapshot) in document.steps.iter().zip(trace.rounds()) {
            assert_eq!(step.step, snapshot.round);
            assert_eq!(step.robots, snapshot.positions);
            assert_eq!(step.robot_count, snapshot.robot_count);
            assert_eq!(step.node_status, snapshot.status);
        }
    }

    #[test]
    fn test_document_round_trips_through_json() {
        let document = build_document(&ExplorationParams { nodes: 6, robots: 2, seed: 4 }).unwrap();
        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("\"adjacencyList\""));
        assert!(json.contains("\"robotCount\""));
        assert!(json.contains("\"nodeStatus\""));
        let parsed: ExplorationDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, document);
    }

    // ========== Rejected Inputs ==========

    #[test]
    fn test_zero_robots_rejected() {
        let err = Exploration::from_children(path_tree(3), 0, 0).unwrap_err();
        assert_eq!(err, SimulationError::NoRobots);
    }

    #[test]
    fn test_malformed_trees_rejected() {
        let cases: Vec<(Vec<Vec<usize>>, usize, TreeError)> = vec![
            (vec![], 0, TreeError::Empty),
            (vec![vec![]], 3, TreeError::RootOutOfRange { root: 3, n: 1 }),
            (vec![vec![5]], 0, TreeError::DanglingChild { parent: 0, child: 5, n: 1 }),
            (vec![vec![1, 2], vec![2], vec![]], 0, TreeError::MultipleParents { node: 2 }),
            (vec![vec![1], vec![0]], 0, TreeError::RootHasParent { root: 0, parent: 1 }),
            (vec![vec![1], vec![], vec![]], 0, TreeError::MultipleRoots(vec![0, 2])),
            (vec![vec![], vec![2], vec![1]], 0, TreeError::Cycle { root: 0, unreached: 2 }),
        ];
        for (children, root, expected) in cases {
            let err = Exploration::from_children(children, root, 1).unwrap_err();
            assert_eq!(err, SimulationError::InvalidTree(expected));
        }
    }
}
