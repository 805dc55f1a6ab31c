use iai_callgrind::{black_box, library_benchmark, library_benchmark_group, main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tourlca::{
    lca::{LcaEngine, NaiveLcaEngine},
    tree::{LabeledTree, TreeError, TreeNodeId},
};

fn built<T>(result: Result<T, TreeError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("failed to build benchmark tree: {err}"),
    }
}

// Setup: random recursive tree, node i hangs below a uniformly chosen earlier node.
fn setup_tree(size: usize) -> LabeledTree<u32> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut tree = LabeledTree::new();
    built(tree.add_root(0));
    for i in 1..size {
        let parent = TreeNodeId::from(rng.gen_range(0..i));
        built(tree.add_child(parent, i as u32));
    }
    tree
}

// A path is the worst case for the tour depth and the ladders.
fn setup_path(size: usize) -> LabeledTree<u32> {
    let mut tree = LabeledTree::new();
    built(tree.add_root(0));
    for i in 1..size {
        built(tree.add_child(TreeNodeId::from(i - 1), i as u32));
    }
    tree
}

fn setup_queries(size: usize) -> (LcaEngine<u32>, Vec<(u32, u32)>) {
    let engine = match LcaEngine::new(setup_tree(size)) {
        Ok(engine) => engine,
        Err(err) => panic!("failed to build engine: {err}"),
    };
    let mut rng = StdRng::seed_from_u64(43);
    let pairs = (0..1000)
        .map(|_| (rng.gen_range(0..size as u32), rng.gen_range(0..size as u32)))
        .collect();
    (engine, pairs)
}

#[library_benchmark]
#[bench::small(args = [100], setup = setup_tree)]
#[bench::large(args = [100_000], setup = setup_tree)]
#[bench::path(args = [100_000], setup = setup_path)]
fn bench_build_sparse(tree: LabeledTree<u32>) -> usize {
    let engine: Result<LcaEngine<u32>, _> = LcaEngine::new(tree);
    black_box(engine.map(|e| e.tour().len()).unwrap_or(0))
}

#[library_benchmark]
#[bench::small(args = [100], setup = setup_tree)]
#[bench::medium(args = [1000], setup = setup_tree)]
fn bench_build_naive(tree: LabeledTree<u32>) -> usize {
    let engine: Result<NaiveLcaEngine<u32>, _> = LcaEngine::new(tree);
    black_box(engine.map(|e| e.tour().len()).unwrap_or(0))
}

#[library_benchmark]
#[bench::large(args = [100_000], setup = setup_queries)]
fn bench_query(input: (LcaEngine<u32>, Vec<(u32, u32)>)) -> u64 {
    let (engine, pairs) = input;
    let mut sum = 0u64;
    for (u, v) in &pairs {
        if let Ok(&lca) = engine.query(u, v) {
            sum += u64::from(lca);
        }
    }
    black_box(sum)
}

#[library_benchmark]
#[bench::large(args = [100_000], setup = setup_queries)]
fn bench_level_ancestor(input: (LcaEngine<u32>, Vec<(u32, u32)>)) -> usize {
    let (engine, pairs) = input;
    let mut found = 0;
    for (u, _) in &pairs {
        if let Ok(Some(_)) = engine.level_ancestor(u, 3) {
            found += 1;
        }
    }
    black_box(found)
}

library_benchmark_group!(
    name = build_group;
    compare_by_id = true;

    benchmarks =
        bench_build_sparse,
        bench_build_naive
);

library_benchmark_group!(
    name = query_group;

    benchmarks =
        bench_query,
        bench_level_ancestor
);

main!(library_benchmark_groups = build_group, query_group);
