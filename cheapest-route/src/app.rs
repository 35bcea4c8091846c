use std::fs::File;
use std::io::{self, BufWriter, Write};

use log::info;
use route_field::{CostField, TerrainCost};
use route_search::{Path, Searcher};

use crate::cmdline::{self, Command, RunConfig};
use crate::encoder::EncodeContext;
use crate::AppError;

/// Entry point shared by the binary and the tests: parse, search, encode.
pub fn run_cli<I, S>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match cmdline::parse(args)? {
        Command::Help => {
            print!("{}", cmdline::USAGE);
            Ok(())
        }
        Command::Run(config) => run(&config),
    }
}

/// Load the heightmap, find the route and write it out.
pub fn run(config: &RunConfig) -> Result<(), AppError> {
    let field = CostField::load(&config.heightmap)?;
    let path = find_route(config, &field)?;

    match &config.output {
        Some(file) => {
            let mut out = BufWriter::new(File::create(file)?);
            write_route(config, &field, &path, &mut out)?;
            out.flush()?;
            info!("wrote {} route to {}", config.output_format, file.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_route(config, &field, &path, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Search `field` for the cheapest route described by `config`.
pub fn find_route(config: &RunConfig, field: &CostField) -> Result<Path, AppError> {
    let cost = TerrainCost {
        friction_strength: config.friction_strength,
        wind_strength: config.wind_strength,
        ..TerrainCost::new(field, config.scaling)
    };
    let searcher = Searcher::new(config.search);
    info!(
        "searching {} -> {} on {} raster, {} sub-cells",
        config.origin,
        config.destination,
        field.domain(),
        config.search.scale
    );
    let path = searcher.search(config.origin, config.destination, field.domain(), &cost)?;
    info!(
        "route found: {} samples, total cost {:.6}",
        path.len(),
        path.total_cost()
    );
    Ok(path)
}

/// Encode `path` in the configured format.
pub fn write_route<W: Write>(
    config: &RunConfig,
    field: &CostField,
    path: &Path,
    out: &mut W,
) -> Result<(), AppError> {
    let elevations: Vec<f64> = path.iter().map(|p| field.elevation(p.location)).collect();
    let ctx = EncodeContext {
        domain: field.domain(),
        scaling: config.scaling,
        unit: config.length_unit,
        elevations: &elevations,
    };
    config.output_format.encode(out, path, &ctx)?;
    Ok(())
}
