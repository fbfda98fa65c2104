//! Performance benchmarks for gitwalk

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gitwalk::test_utils::TestTree;
use gitwalk::{GitWalker, ParallelWalker, RuleSet, RuleStack, WalkConfig};

// A typical project ignore file
const GITIGNORE: &str = r#"# Build output
/target/
build/
dist/
*.o
*.so
*.pyc
__pycache__/

# Editors
.idea/
.vscode/
*.swp
*~

# Logs
*.log
!important.log
logs/**

# Dependencies
node_modules/
vendor/**/testdata/
"#;

fn create_tree(dirs: usize, files_per_dir: usize) -> TestTree {
    let tree = TestTree::new();
    tree.add_gitignore("", GITIGNORE);
    for d in 0..dirs {
        for f in 0..files_per_dir {
            tree.add_file(&format!("pkg_{}/src/file_{}.rs", d, f), "");
            tree.add_file(&format!("pkg_{}/src/file_{}.o", d, f), "");
        }
        tree.add_file(&format!("pkg_{}/node_modules/dep/index.js", d), "");
        tree.add_gitignore(&format!("pkg_{}", d), "*.tmp\n!keep.tmp\n");
    }
    tree
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    group.bench_function("typical_gitignore", |b| {
        b.iter(|| RuleSet::parse(black_box(GITIGNORE)))
    });

    let large: String = (0..500).map(|i| format!("dir_{}/*.ext{}\n", i, i)).collect();
    group.bench_function("500_lines", |b| b.iter(|| RuleSet::parse(black_box(&large))));

    group.finish();
}

fn bench_decide(c: &mut Criterion) {
    let stack = RuleStack::new()
        .push(RuleSet::parse(GITIGNORE))
        .push(RuleSet::parse("*.tmp\n!keep.tmp\n").with_base(["pkg"]));

    let mut group = c.benchmark_group("decide");

    group.bench_function("shallow_file", |b| {
        b.iter(|| stack.decide(black_box(&["main.rs"]), false))
    });
    group.bench_function("deep_file", |b| {
        b.iter(|| stack.decide(black_box(&["pkg", "src", "a", "b", "c", "lib.rs"]), false))
    });
    group.bench_function("ignored_directory", |b| {
        b.iter(|| stack.decide(black_box(&["pkg", "node_modules"]), true))
    });

    group.finish();
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    // Small tree (10 dirs)
    let small = create_tree(10, 10);
    group.bench_function("sequential_small", |b| {
        b.iter(|| {
            GitWalker::new(WalkConfig::default())
                .walk(black_box(small.path()))
                .count()
        })
    });

    // Larger tree (50 dirs)
    let large = create_tree(50, 20);
    group.bench_function("sequential_large", |b| {
        b.iter(|| {
            GitWalker::new(WalkConfig::default())
                .walk(black_box(large.path()))
                .count()
        })
    });
    group.bench_function("parallel_large", |b| {
        b.iter(|| {
            ParallelWalker::new(WalkConfig::default())
                .collect(black_box(large.path()))
                .entries
                .len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_decide, bench_walk);
criterion_main!(benches);
