// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay a treemap viewer session without a window.
//!
//! The scripted session mirrors what an interactive viewer does:
//! - left click toggles selection of the leaf under the pointer and shows its status line,
//! - right click deletes the leaf under the pointer,
//! - up/down grow or shrink the selected leaf by one percent,
//! and every mutation is followed by a fresh layout pass before the next hit test.
//!
//! Run:
//! - `cargo run -p tessera_demos --example walkthrough`
//! - `RUST_LOG=tessera_layout=trace cargo run -p tessera_demos --example walkthrough`

use kurbo::{Point, Rect};
use tessera_layout::{Layout, LayoutEngine};
use tessera_tree::{Adjust, NodeId, Tree};
use tracing_subscriber::EnvFilter;

/// Populations in millions, grouped by region.
const REGIONS: &[(&str, &[(&str, f64)])] = &[
    (
        "Europe & Central Asia",
        &[("Germany", 83.1), ("France", 67.2), ("Spain", 47.1), ("Norway", 5.3)],
    ),
    (
        "East Asia & Pacific",
        &[("Japan", 126.3), ("Indonesia", 270.6), ("Fiji", 0.9)],
    ),
    ("South Asia", &[("India", 1366.4), ("Nepal", 28.6)]),
    ("Sub-Saharan Africa", &[("Nigeria", 201.0), ("Kenya", 52.6)]),
];

const SEPARATOR: &str = " -> ";
const SCREEN: Rect = Rect::new(0.0, 0.0, 1024.0, 576.0);

#[derive(Clone, Copy, Debug)]
enum Event {
    LeftClick(Point),
    RightClick(Point),
    Up,
    Down,
}

fn build_world() -> (Tree<&'static str>, NodeId) {
    let mut tree = Tree::with_seed(2020);
    let mut regions = Vec::new();
    for &(region, countries) in REGIONS {
        let leaves: Vec<_> = countries
            .iter()
            .map(|&(name, population)| tree.leaf(name, population))
            .collect();
        regions.push(tree.branch(region, leaves));
    }
    let world = tree.branch("World", regions);
    (tree, world)
}

fn status_line(tree: &Tree<&str>, leaf: NodeId) -> String {
    let path = tree.path_to_root(leaf, SEPARATOR).unwrap_or_default();
    format!("{path}  ({:.1})", tree.weight(leaf))
}

fn print_tiles(tree: &Tree<&str>, layout: &Layout) {
    for tile in layout.tiles() {
        let r = tile.rect;
        let c = tile.color;
        println!(
            "  {:<10} x={:>6.1} y={:>6.1} w={:>6.1} h={:>6.1}  #{:02x}{:02x}{:02x}",
            tree.label(tile.node).copied().unwrap_or("?"),
            r.x0,
            r.y0,
            r.width(),
            r.height(),
            c.r,
            c.g,
            c.b,
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tessera_tree=debug,tessera_layout=debug")),
        )
        .init();

    let (mut tree, world) = build_world();
    println!("{}", tree.outline(world));

    let engine = LayoutEngine::new();
    let mut layout = engine.layout(&tree, world, SCREEN);
    println!("initial layout: {} tiles", layout.len());
    print_tiles(&tree, &layout);

    let script = [
        Event::LeftClick(Point::new(600.0, 300.0)),
        Event::Up,
        Event::Up,
        Event::Down,
        Event::LeftClick(Point::new(600.0, 300.0)),
        Event::RightClick(Point::new(10.0, 10.0)),
        Event::LeftClick(Point::new(10.0, 10.0)),
        Event::RightClick(Point::new(5000.0, 10.0)),
    ];

    let mut selected: Option<NodeId> = None;
    for event in script {
        let mutated = match event {
            Event::LeftClick(p) => {
                let hit = layout.hit_test(p);
                if hit.is_some() && hit == selected {
                    selected = None;
                    println!("{p:?}: deselected");
                } else {
                    selected = hit;
                    match selected {
                        Some(leaf) => println!("{p:?}: {}", status_line(&tree, leaf)),
                        None => println!("{p:?}: nothing here"),
                    }
                }
                false
            }
            Event::RightClick(p) => match layout.hit_test(p) {
                Some(leaf) => {
                    println!("{p:?}: deleting {}", status_line(&tree, leaf));
                    if selected == Some(leaf) {
                        selected = None;
                    }
                    tree.delete(leaf);
                    true
                }
                None => {
                    println!("{p:?}: nothing to delete");
                    false
                }
            },
            Event::Up | Event::Down => match selected {
                Some(leaf) => {
                    let adjust = if matches!(event, Event::Up) {
                        Adjust::Grow
                    } else {
                        Adjust::Shrink
                    };
                    tree.scale_weight(leaf, adjust);
                    println!("{event:?}: {}", status_line(&tree, leaf));
                    true
                }
                None => false,
            },
        };

        if mutated {
            engine.layout_into(&tree, world, SCREEN, &mut layout);
        }
        debug_assert!(!layout.is_stale(&tree), "layout must follow every mutation");
    }

    println!("\nfinal layout: {} tiles", layout.len());
    print_tiles(&tree, &layout);
    println!("\n{}", tree.outline(world));
}
