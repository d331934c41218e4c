//! Single-source betweenness centrality on a barbell graph.
//!
//! Two triangles joined by a bridge: the bridge endpoints carry all the
//! cross-traffic, so they dominate the centrality scores.
//!
//! Run with:
//!
//! ```bash
//! cargo run -p wavefront --example bc_demo
//! ```

use std::sync::Arc;

use wavefront::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // triangle 0-1-2, bridge 2-3, triangle 3-4-5
    let graph = Arc::new(
        CsrGraphBuilder::new(6)
            .with_undirected_edges(&[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3)])
            .build(),
    );

    let source = VertexId(0);
    let mut sigmas = vec![0.0f32; graph.vertex_count()];
    let mut bc_values = vec![0.0f32; graph.vertex_count()];
    let elapsed_ms = wavefront::bc::run(Arc::clone(&graph), source, &mut sigmas, &mut bc_values)?;

    println!("betweenness centrality from vertex {}", source.get());
    println!("=====================================");
    for v in 0..graph.vertex_count() {
        println!(
            "vertex {v}: sigma {:5.1}  bc {:6.3}",
            sigmas[v], bc_values[v]
        );
    }
    println!("\nelapsed: {elapsed_ms:.3} ms");

    Ok(())
}
