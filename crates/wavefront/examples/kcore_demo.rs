//! K-core decomposition on a small social-network-shaped graph.
//!
//! Run with:
//!
//! ```bash
//! cargo run -p wavefront --example kcore_demo
//! ```

use std::sync::Arc;

use wavefront::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A tight clique 0-1-2-3, a triangle 4-5-6 bridged to it, and two
    // hangers-on.
    let graph = Arc::new(
        CsrGraphBuilder::new(9)
            .with_undirected_edges(&[
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 2),
                (1, 3),
                (2, 3),
                (3, 4),
                (4, 5),
                (4, 6),
                (5, 6),
                (6, 7),
                (7, 8),
            ])
            .build(),
    );

    let mut core_numbers = vec![0u32; graph.vertex_count()];
    let elapsed_ms = wavefront::kcore::run(Arc::clone(&graph), &mut core_numbers)?;

    println!("k-core decomposition ({} vertices, {} edges)", graph.vertex_count(), graph.edge_count());
    println!("==============================================");
    for (v, core) in core_numbers.iter().enumerate() {
        println!("vertex {v}: core {core}");
    }
    println!("\nelapsed: {elapsed_ms:.3} ms");

    Ok(())
}
