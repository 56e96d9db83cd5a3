use geokd::{Coord, GeoIndex, IndexConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== geokd - Getting Started ===\n");

    // === SMALL TREE ===
    println!("1. Small tree");
    println!("-------------");

    let index = GeoIndex::new();
    let count = index.rebuild(vec![
        (Coord::new(2, 3), "aa"),
        (Coord::new(5, 4), "aa1"),
        (Coord::new(9, 6), "aa2"),
        (Coord::new(4, 7), "aa3"),
        (Coord::new(-8, 1), "aa4"),
        (Coord::new(7, 2), "aa5"),
    ]);
    println!("   Indexed {} points", count);

    let target = Coord::new(-9, 2);
    let found = index.query(target)?;
    println!(
        "   Nearest to {}: {} at {} (dist {:.3}, {} nodes seen)\n",
        target,
        String::from_utf8_lossy(&found.label),
        found.coord,
        (found.distance_sq as f64).sqrt(),
        found.visited
    );

    // === ADDRESSES ===
    println!("2. Addresses in degrees");
    println!("-----------------------");

    index.rebuild(vec![
        (Coord::from_degrees(40.7484, -73.9857), "350 Fifth Avenue, New York"),
        (Coord::from_degrees(40.6892, -74.0445), "Liberty Island, New York"),
        (Coord::from_degrees(51.5014, -0.1419), "Buckingham Palace, London"),
        (Coord::from_degrees(48.8584, 2.2945), "Champ de Mars, Paris"),
    ]);

    let here = Coord::from_geo(geo::Point::new(-73.9851, 40.7580));
    let found = index.query(here)?;
    println!(
        "   Closest address to {:?}: {}\n",
        here.to_degrees(),
        String::from_utf8_lossy(&found.label)
    );

    // === LARGE TREE ===
    println!("3. Large tree");
    println!("-------------");

    let size = 1_000_000;
    let index = GeoIndex::with_config(IndexConfig::default().with_capacity(size))?;

    let mut rng = StdRng::seed_from_u64(42);
    let mut random_coord = move || {
        Coord::new(
            rng.gen_range(-1_000_000..1_000_000),
            rng.gen_range(-1_000_000..1_000_000),
        )
    };

    let points: Vec<_> = (0..size)
        .map(|i| (random_coord(), format!("addr {}", i)))
        .collect();

    let started = Instant::now();
    let summary = index.rebuild_with_summary(points);
    println!(
        "   Rebuilt {} points in {:?} (generation {})",
        summary.count,
        started.elapsed(),
        summary.generation
    );

    let runs = 100_000;
    let mut visited = 0;
    let started = Instant::now();
    for _ in 0..runs {
        visited += index.query(random_coord())?.visited;
    }
    let elapsed = started.elapsed();
    println!(
        "   {} lookups: {:.1} nodes per lookup, {:.2} us per lookup",
        runs,
        visited as f64 / runs as f64,
        elapsed.as_secs_f64() * 1e6 / runs as f64
    );

    let stats = index.stats();
    println!(
        "   Stats: {} points, {} queries, {:.0}% of capacity",
        stats.count,
        stats.queries,
        stats.fill_ratio() * 100.0
    );

    Ok(())
}
