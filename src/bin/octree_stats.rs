//! Octree stats binary. Builds a loose octree, fills it with a grid of
//! objects and reports how a camera query culls it.
//!
//! Usage: cargo run --release --bin octree_stats -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>        Load tree parameters from a JSON config
//!   --save-config <PATH>   Write the effective config as JSON
//!   --size <UNITS>         World size (default: 100)
//!   --looseness <F>        Looseness factor (default: 1.2)
//!   --depth <N>            Max depth (default: 3)
//!   --spacing <UNITS>      Object grid spacing (default: 5)
//!   --radius <UNITS>       Object radius (default: 1)
//!   --fov <DEGREES>        Camera vertical field of view (default: 60)
//!   --dump-shapes <PATH>   Write the query's debug boxes as a JSON line

use std::path::PathBuf;
use std::time::Instant;

use loctree::debug::{NoopDraw, ShapeRecorder};
use loctree::{LooseOctree, Mat4, OctreeConfig, Vec3};

fn main() {
    loctree::core::logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> loctree::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => OctreeConfig::load(&PathBuf::from(path))?,
        None => OctreeConfig::default(),
    };
    if let Some(size) = parse_f32_arg(&args, "--size") {
        config.world_size = size;
    }
    if let Some(looseness) = parse_f32_arg(&args, "--looseness") {
        config.looseness = looseness;
    }
    if let Some(depth) = parse_u8_arg(&args, "--depth") {
        config.max_depth = depth;
    }
    let spacing = parse_f32_arg(&args, "--spacing").unwrap_or(5.0).max(0.01);
    let radius = parse_f32_arg(&args, "--radius").unwrap_or(1.0);
    let fov = parse_f32_arg(&args, "--fov").unwrap_or(60.0);

    if let Some(path) = parse_str_arg(&args, "--save-config") {
        config.save(&PathBuf::from(path))?;
    }

    println!("=== Loose Octree Stats ===");
    println!("World:     {} (looseness {})", config.world_size, config.looseness);
    println!("Depth:     {}", config.max_depth);
    println!("Objects:   spacing {}, radius {}", spacing, radius);
    println!();

    let start = Instant::now();
    let mut tree: LooseOctree<u32> = LooseOctree::from_config(&config)?;
    let build_time = start.elapsed();

    // Grid of spheres over the tight world cube
    let origin = Vec3::from_array(config.center);
    let half = config.world_size * 0.5;
    let steps = (config.world_size / spacing).floor() as i32;
    let mut inserted = 0u32;
    let mut rejected = 0u32;
    let mut depth_histogram = vec![0u32; config.max_depth as usize + 1];

    let start = Instant::now();
    for ix in 0..=steps {
        for iy in 0..=steps {
            for iz in 0..=steps {
                let center = origin - Vec3::splat(half)
                    + Vec3::new(ix as f32, iy as f32, iz as f32) * spacing;
                match tree.add_sphere(inserted + rejected, center, radius) {
                    Ok(node) => {
                        depth_histogram[tree.node(node).depth() as usize] += 1;
                        inserted += 1;
                    }
                    Err(_) => rejected += 1,
                }
            }
        }
    }
    let insert_time = start.elapsed();

    // Camera outside the world looking at its center
    let eye = origin + Vec3::new(0.3, 0.2, 1.0).normalize() * config.world_size * 1.5;
    let view = Mat4::look_at_rh(eye, origin, Vec3::Y);
    let proj = Mat4::perspective_rh(fov.to_radians(), 16.0 / 9.0, 0.1, config.world_size * 3.0);

    let start = Instant::now();
    let (visible_count, visited, tested) = match parse_str_arg(&args, "--dump-shapes") {
        Some(path) => {
            let mut recorder = ShapeRecorder::new();
            let visible = tree.query(&view, &proj, &mut recorder);
            let stats = (visible.objects.len(), visible.visited_nodes, visible.tested_nodes);
            let file = std::fs::File::create(&path)?;
            recorder.write_frame(std::io::BufWriter::new(file))?;
            log::info!("Wrote debug shapes to {}", path);
            stats
        }
        None => {
            let visible = tree.query(&view, &proj, &mut NoopDraw);
            (visible.objects.len(), visible.visited_nodes, visible.tested_nodes)
        }
    };
    let query_time = start.elapsed();

    println!("=== Build ===");
    println!("Nodes:     {} in {:.2?}", tree.node_count(), build_time);
    println!("Inserted:  {} ({} rejected) in {:.2?}", inserted, rejected, insert_time);
    for (depth, count) in depth_histogram.iter().enumerate() {
        println!("  depth {}: {} objects", depth, count);
    }
    println!();
    println!("=== Query ===");
    println!("Visible:   {} of {} objects", visible_count, tree.object_count());
    println!("Nodes:     {} drawn, {} tested of {}", visited, tested, tree.node_count());
    println!("Time:      {:.2?}", query_time);

    Ok(())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u8_arg(args: &[String], flag: &str) -> Option<u8> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
