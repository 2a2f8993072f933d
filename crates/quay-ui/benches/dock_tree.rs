//! Benchmarks for dock tree propagation and snap/unsnap churn

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use quay_core::geometry::Rect;
use quay_ui::{DockSide, DockTree, DockingStyle, GroupId, PoolLimits, SplitAxis, WindowId};

const CANVAS: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// A tree with `count` windows docked into one root, alternating axes so
/// every level nests.
fn docked_tree(count: usize) -> (DockTree, GroupId) {
    let mut tree = DockTree::new(CANVAS, DockingStyle::default(), PoolLimits::default());
    let root = tree
        .open_window(WindowId::new("root"), "root", CANVAS)
        .expect("open root window");
    let mut target = root;
    for i in 0..count {
        let name = format!("window-{i}");
        let group = tree
            .open_window(WindowId::new(&name), &name, Rect::new(0.0, 0.0, 400.0, 300.0))
            .expect("open window");
        let axis = if i % 2 == 0 { SplitAxis::Vertical } else { SplitAxis::Horizontal };
        tree.snap_group(group, target, axis, DockSide::After);
        if tree.contains_group(group) {
            target = group;
        }
    }
    tree.propagate();
    (tree, root)
}

fn bench_propagate(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");

    for size in [4, 16, 64] {
        group.throughput(Throughput::Elements(size as u64));
        let (mut tree, _) = docked_tree(size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                tree.propagate();
                black_box(&tree);
            });
        });
    }

    group.finish();
}

fn bench_snap_unsnap(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_unsnap");

    for size in [4, 16, 64] {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let (mut tree, root) = docked_tree(size);
                    let floating = tree
                        .open_window(WindowId::new("floating"), "floating", Rect::new(0.0, 0.0, 300.0, 200.0))
                        .expect("open floating window");
                    let target = tree.leaves(root).last().copied().unwrap_or(root);
                    (tree, floating, target)
                },
                |(mut tree, floating, target)| {
                    tree.snap_group(black_box(floating), target, SplitAxis::Vertical, DockSide::Before);
                    let _ = tree.unsnap_group(floating);
                    black_box(tree)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_drag_splitter(c: &mut Criterion) {
    let (mut tree, root) = docked_tree(16);
    let mut delta = 1.0;
    c.bench_function("drag_splitter", |b| {
        b.iter(|| {
            delta = -delta;
            let _ = tree.drag_splitter(root, 0, black_box(delta));
        });
    });
}

criterion_group!(benches, bench_propagate, bench_snap_unsnap, bench_drag_splitter);
criterion_main!(benches);
