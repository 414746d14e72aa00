extern crate env_logger;
extern crate meshweld;
extern crate structopt;
extern crate tobj;

use meshweld::{calculate_normals, optimize_mesh_with, DedupConfig, DedupOptions};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "weld_obj", about = "Welds duplicate vertices of every model in an OBJ file")]
struct Opt {
    /// OBJ file to load
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Search neighboring cells so duplicates straddling a cell boundary are merged too
    #[structopt(long)]
    neighbor_search: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opt = Opt::from_args();

    let options = if opt.neighbor_search {
        DedupOptions::NeighborSearch
    } else {
        DedupOptions::None
    };
    let config = DedupConfig::with_options(options);

    // without single_index every face corner keeps its own position index
    let load_options = tobj::LoadOptions {
        triangulate: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(&opt.input, &load_options)?;
    println!("# {:?}: {} models", opt.input, models.len());

    for model in &models {
        let mesh = &model.mesh;
        if mesh.positions.is_empty() {
            println!("{}: no vertices, skipped", model.name);
            continue;
        }

        let report = optimize_mesh_with(&mesh.positions, &mesh.indices, &config)?;
        println!("{}: {}", model.name, report);

        let normals = calculate_normals(&report.vertices, &report.indices)?;
        println!(
            "{}: {} normals in {:.3} ms",
            model.name,
            normals.normals.len() / 3,
            normals.processing_time_ms
        );
    }

    Ok(())
}
