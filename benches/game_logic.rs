use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_sumten::adapter::build_observation;
use tui_sumten::core::{cells_in, rect_from_points, Board, Session, SessionSnapshot, SimpleRng};
use tui_sumten::types::{BoardPoint, CellPos};

fn bench_generate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("board_generate", |b| {
        b.iter(|| Board::generate(black_box(&mut rng)))
    });
}

fn bench_clear_and_refill(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let board = Board::generate(&mut rng).unwrap();
    let cleared = [
        CellPos::new(1, 1),
        CellPos::new(1, 2),
        CellPos::new(2, 1),
        CellPos::new(2, 2),
    ];

    c.bench_function("clear_and_refill_2x2", |b| {
        b.iter(|| board.clear_and_refill(black_box(&cleared), &mut rng))
    });
}

fn bench_select(c: &mut Criterion) {
    c.bench_function("rect_and_cells", |b| {
        b.iter(|| {
            let rect = rect_from_points(
                black_box(BoardPoint::new(-40, 30)),
                black_box(BoardPoint::new(260, 390)),
                100,
            );
            cells_in(rect)
        })
    });
}

fn bench_gesture(c: &mut Criterion) {
    let mut session = Session::new(SimpleRng::new(12345));
    session.start().unwrap();

    c.bench_function("gesture_commit", |b| {
        b.iter(|| {
            session.begin_drag(BoardPoint::new(50, 50));
            session.move_drag(BoardPoint::new(150, 150));
            session.end_drag(black_box(BoardPoint::new(150, 150)))
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut session = Session::new(SimpleRng::new(12345));
    session.start().unwrap();
    let mut snap = SessionSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| session.snapshot_into(black_box(&mut snap)))
    });

    c.bench_function("build_observation", |b| {
        b.iter(|| build_observation(black_box(&snap), 1))
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_clear_and_refill,
    bench_select,
    bench_gesture,
    bench_snapshot
);
criterion_main!(benches);
