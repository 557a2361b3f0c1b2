use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use casetools::geom::Axis;
use casetools::logging::init_logging;
use casetools::time::{BracketConfig, TimeSelector};
use casetools::tools::face_data::{FaceDataRequest, collect_face_data};
use casetools::tools::interp::{
    InterpConfig, InterpRequest, SampleConfig, interpolate_patch_field, write_vectors,
};
use casetools::tools::rays::{RayConfig, generate_rays, write_rays};
use casetools::tools::rotate::{RotateConfig, rotate_field};
use casetools::tools::set_patch::{read_values, set_patch_values};
use casetools::tools::zone_volume::cell_zone_volume;
use casetools::{CaseDir, CaseSource};
use clap::{Args, Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "casetools")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Post-processing utilities for finite-volume simulation cases")]
struct Cli {
    /// Case directory
    #[arg(long, global = true, default_value = ".")]
    case: PathBuf,

    #[command(flatten)]
    times: TimeArgs,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct TimeArgs {
    /// Times to process, e.g. "0,90:180"
    #[arg(long, global = true, allow_hyphen_values = true)]
    time: Option<String>,

    /// Process only the latest time
    #[arg(long, global = true)]
    latest_time: bool,

    /// Exclude time 0
    #[arg(long, global = true)]
    no_zero_time: bool,
}

impl From<&TimeArgs> for TimeSelector {
    fn from(args: &TimeArgs) -> Self {
        TimeSelector {
            times: args.time.clone(),
            latest_time: args.latest_time,
            no_zero_time: args.no_zero_time,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interpolate a vector field on a patch between the two nearest times
    InterpPatchField {
        field: String,
        patch: String,
        /// Target time (angle in degrees for rotating cases)
        #[arg(value_name = "TIME", allow_hyphen_values = true)]
        target: f64,
        /// Sample this far from the face centres along the probe axis
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
        #[arg(long, default_value = "z")]
        probe_axis: Axis,
        /// Length of the periodic time axis
        #[arg(long, default_value_t = 360.0)]
        period: f64,
    },
    /// Print one ray per patch face: origin and direction
    PatchRays {
        patch: String,
        /// Rays start at the face centres and follow the face normals
        #[arg(long, alias = "away-from-patch")]
        outward: bool,
        /// Print only the ray origins
        #[arg(long)]
        origins_only: bool,
    },
    /// Print the total volume of a cell zone
    CellZoneVol { zone: String },
    /// Set the values of a scalar field on a patch, read from stdin
    SetPatchField { field: String, patch: String },
    /// Rotate a vector field by minus the time in degrees
    RotateField {
        #[arg(long, default_value = "U")]
        field: String,
        #[arg(long, default_value = "Utrans")]
        output: String,
        #[arg(long, default_value = "z")]
        axis: Axis,
        /// Do not write the rotated field
        #[arg(long)]
        no_write: bool,
    },
    /// Print face values of one or more patches across times
    PatchFaceData {
        #[arg(required = true)]
        patches: Vec<String>,
        #[arg(long)]
        field: Option<String>,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        offset: f64,
        #[arg(long, default_value = "z")]
        probe_axis: Axis,
        /// Prefix each line with face centre, area vector and area
        #[arg(long)]
        face_data: bool,
        /// Write <case>/<patch>.<field> instead of printing
        #[arg(long)]
        to_csv: bool,
    },
}

fn run(cli: Cli) -> Result<()> {
    let mut case = CaseDir::open(&cli.case)?;
    let times = case.select_times(&TimeSelector::from(&cli.times))?;
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::InterpPatchField {
            field,
            patch,
            target,
            offset,
            probe_axis,
            period,
        } => {
            let request = InterpRequest {
                offset,
                ..InterpRequest::new(&field, &patch, target)
            };
            let config = InterpConfig {
                bracket: BracketConfig {
                    period,
                    ..BracketConfig::new()
                },
                sample: SampleConfig {
                    probe_axis,
                    ..SampleConfig::new()
                },
            };
            let values = interpolate_patch_field(&case, &times, &request, &config)?;
            write_vectors(&mut out, &values)?;
        }
        Commands::PatchRays {
            patch,
            outward,
            origins_only,
        } => {
            let config = RayConfig {
                outward,
                origins_only,
            };
            let rays = generate_rays(&case, &times, &patch, &config)?;
            write_rays(&mut out, &rays)?;
        }
        Commands::CellZoneVol { zone } => {
            let mesh = case.read_mesh(&times[0])?;
            writeln!(out, "{}", cell_zone_volume(&mesh, &zone)?)?;
        }
        Commands::SetPatchField { field, patch } => {
            let values = read_values(std::io::stdin().lock())?;
            let report = set_patch_values(&mut case, &times, &field, &patch, &values)?;
            info!("Updated {} of {} times", report.updated.len(), times.len());
        }
        Commands::RotateField {
            field,
            output,
            axis,
            no_write,
        } => {
            let config = RotateConfig {
                field,
                output,
                axis,
                no_write,
            };
            let rotated = rotate_field(&mut case, &times, &config)?;
            info!("Rotated {} of {} times", rotated.len(), times.len());
        }
        Commands::PatchFaceData {
            patches,
            field,
            offset,
            probe_axis,
            face_data,
            to_csv,
        } => {
            let request = FaceDataRequest {
                patches,
                field,
                offset,
                face_data,
            };
            let config = SampleConfig {
                probe_axis,
                ..SampleConfig::new()
            };
            let tables = collect_face_data(&case, &times, &request, &config)?;
            for table in tables.iter() {
                if to_csv {
                    table.write_csv(case.root(), request.field.as_deref())?;
                } else {
                    table.write_to(&mut out)?;
                }
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{e:#}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
