//! Fetch a quantized-mesh tile for test vector generation.
//!
//! This binary fetches a tile from a terrain server and saves the raw
//! response to disk, next to a JSON dump of the decoded tile for
//! cross-implementation comparison.
//!
//! Run: `cargo run -p quantized-mesh --features test-tools --bin fetch_test_data -- <tile_url> [name]`

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use quantized_mesh::decode::{EdgeIndices, Extensions, Indices};
use quantized_mesh::{Client, NoCache, TileData};
use serde_json::{Value, json};

const OUTPUT_DIR: &str = "test_vectors";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("usage: fetch_test_data <tile_url> [name]");
        std::process::exit(2);
    };
    let name = args.next().unwrap_or_else(|| "tile".to_string());

    // Create output directory.
    let output_path = Path::new(OUTPUT_DIR);
    fs::create_dir_all(output_path)?;

    // Create client without cache.
    let client: Client<NoCache> = Client::new();

    println!("1. Fetching {url}...");
    let bytes = client.fetch_bytes_from_url(&url).await?;
    let tile_path = output_path.join(format!("{name}.terrain"));
    File::create(&tile_path)?.write_all(&bytes)?;
    println!("   Saved {} bytes to {}", bytes.len(), tile_path.display());

    println!("\n2. Decoding...");
    let tile = quantized_mesh::decode::decode(&bytes)?;
    let json_path = output_path.join(format!("{name}.json"));
    fs::write(&json_path, serde_json::to_string_pretty(&tile_to_json(&tile))?)?;
    println!("   Saved decoded tile to {}", json_path.display());

    print_summary(&tile);

    Ok(())
}

fn tile_to_json(tile: &TileData) -> Value {
    let header: serde_json::Map<String, Value> = tile
        .header
        .fields()
        .map(|(name, value)| (name.to_string(), json!(value)))
        .collect();

    json!({
        "header": header,
        "vertex_count": tile.vertex_data.as_ref().map(|v| v.vertex_count()),
        "vertex_data": tile.vertex_data.as_ref().map(|v| v.as_slice().to_vec()),
        "triangle_indices": tile.triangle_indices.as_ref().map(Indices::to_u32_vec),
        "edge_indices": tile.edge_indices.as_ref().map(edges_to_json),
        "extensions": tile.extensions.as_ref().map(extensions_to_json),
    })
}

fn edges_to_json(edges: &EdgeIndices) -> Value {
    json!({
        "west": edges.west.to_u32_vec(),
        "south": edges.south.to_u32_vec(),
        "east": edges.east.to_u32_vec(),
        "north": edges.north.to_u32_vec(),
    })
}

fn extensions_to_json(extensions: &Extensions) -> Value {
    json!({
        "vertex_normals": extensions.vertex_normals,
        "water_mask": extensions.water_mask,
        "metadata": extensions.metadata,
        "unknown": extensions.unknown,
    })
}

fn print_summary(tile: &TileData) {
    println!("\n=== Summary ===");
    println!("Center: {:?}", tile.header.center());
    println!(
        "Height range: {:.2}..{:.2}",
        tile.header.min_height(),
        tile.header.max_height()
    );
    if let Some(vertices) = &tile.vertex_data {
        println!("Vertices: {}", vertices.vertex_count());
    }
    if let Some(count) = tile.triangle_count() {
        println!("Triangles: {count}");
    }
    if let Some(edges) = &tile.edge_indices {
        println!(
            "Edge vertices: west={} south={} east={} north={}",
            edges.west.len(),
            edges.south.len(),
            edges.east.len(),
            edges.north.len()
        );
    }
    if let Some(extensions) = &tile.extensions {
        println!(
            "Extensions: normals={} water_mask={} metadata={} unknown={:?}",
            extensions.vertex_normals.is_some(),
            extensions.water_mask.is_some(),
            extensions.metadata.is_some(),
            extensions.unknown
        );
    }
}
