use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use mazepath::grid::Grid;
use mazepath::maze::Maze;
use mazepath::pathing;
use mazepath::units::GridSize;

fn generated_grid(n: usize) -> Grid {
    let mut maze = Maze::with_seed(GridSize(n), 350).unwrap();
    maze.generate_maze().unwrap();
    maze.grid().clone()
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let g = generated_grid(200);
        let start_coord = g.start_coordinate().unwrap();
        b.iter(|| pathing::Distances::new(&g, start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let g = generated_grid(200);
        let start_coord = g.start_coordinate().unwrap();
        let distances = pathing::Distances::new(&g, start_coord).unwrap();
        b.iter(|| distances.furthest_points_on_grid())
    });
}

fn bench_shortest_path_40(c: &mut Criterion) {
    c.bench_function("shortest_path_40", |b| {
        let g = generated_grid(40);
        b.iter(|| pathing::shortest_path(&g))
    });
}

fn bench_shortest_path_200(c: &mut Criterion) {
    c.bench_function("shortest_path_200", |b| {
        let g = generated_grid(200);
        b.iter(|| pathing::shortest_path(&g))
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path_40,
    bench_shortest_path_200
);
criterion_main!(benches);
