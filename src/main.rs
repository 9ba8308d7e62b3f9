// src/main.rs
//! Survey Area - polygon area estimation for map marker traces

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use survey_area::{
    config::EstimatorConfig,
    export::{TraceExporter, TraceFormat},
    input, logging,
    survey::{sample_survey_points, PointPlot, SurveyPoint},
    DragTrace, GeoPoint, MarkerDragListener, Projection, RingClosure, VertexValidation,
};

#[derive(Parser)]
#[command(name = "survey-area", version, about = "Estimate the area of a traced survey polygon")]
struct Cli {
    /// Log filter, overriding the configured one (e.g. "survey_area=debug")
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the area enclosed by a list of points
    Area {
        #[command(flatten)]
        points: PointSource,
        #[command(flatten)]
        estimator: EstimatorArgs,
    },
    /// Replay points as marker drops, logging the running area
    Trace {
        #[command(flatten)]
        points: PointSource,
        #[command(flatten)]
        estimator: EstimatorArgs,
        /// Write the finished trace to this file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Export format; guessed from the file extension when omitted
        #[arg(long, value_enum, requires = "export")]
        format: Option<TraceFormat>,
    },
    /// List survey points and resolve a click on one of them
    Survey {
        /// JSON array of survey records; the demo points are used otherwise
        #[arg(long)]
        file: Option<PathBuf>,
        /// Index of the plotted point to click
        #[arg(long)]
        click: Option<usize>,
    },
}

#[derive(Args)]
struct PointSource {
    /// Inline points, "lat,lon; lat,lon ..."
    #[arg(long, conflicts_with = "file")]
    points: Option<String>,
    /// JSON or CSV file of points
    #[arg(long)]
    file: Option<PathBuf>,
}

impl PointSource {
    fn load(&self) -> anyhow::Result<Vec<GeoPoint>> {
        match (&self.points, &self.file) {
            (Some(text), _) => Ok(input::parse_point_list(text)?),
            (None, Some(path)) => input::load_points(path)
                .with_context(|| format!("Failed to load points from {}", path.display())),
            (None, None) => bail!("Provide points with --points or --file"),
        }
    }
}

#[derive(Args)]
struct EstimatorArgs {
    #[arg(long, value_enum)]
    closure: Option<RingClosure>,
    #[arg(long, value_enum)]
    projection: Option<Projection>,
    /// Reject traces with fewer than three vertices
    #[arg(long)]
    strict: bool,
    /// Reproduce the Android survey app (open path, degree-scaled northing)
    #[arg(long, conflicts_with_all = ["closure", "projection"])]
    source_compatible: bool,
    /// Persist the resulting estimator options
    #[arg(long)]
    save_config: bool,
}

impl EstimatorArgs {
    fn apply(&self, config: &mut EstimatorConfig) -> anyhow::Result<()> {
        if self.source_compatible {
            config.update_source_compatible();
        }
        if let Some(closure) = self.closure {
            config.update_closure(closure);
        }
        if let Some(projection) = self.projection {
            config.update_projection(projection);
        }
        if self.strict {
            config.update_validation(VertexValidation::Strict);
        }
        if self.save_config {
            config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = EstimatorConfig::load().unwrap_or_else(|e| {
        eprintln!("Using default configuration: {}", e);
        EstimatorConfig::default()
    });
    logging::init(cli.log_level.as_deref(), &config.log_filter);

    match cli.command {
        Command::Area { points, estimator } => {
            estimator.apply(&mut config)?;
            let points = points.load()?;
            let area = config.estimator().estimate_area(&points)?;
            tracing::debug!(
                projection = config.projection.display_name(),
                closure = ?config.closure,
                vertices = points.len(),
                "Area estimated"
            );
            println!("{:.2}", area);
        }
        Command::Trace {
            points,
            estimator,
            export,
            format,
        } => {
            estimator.apply(&mut config)?;
            run_trace(&points.load()?, &config, export.as_deref(), format)?;
        }
        Command::Survey { file, click } => {
            let models = match file {
                Some(path) => input::load_survey_points(&path)
                    .with_context(|| format!("Failed to load survey points from {}", path.display()))?,
                None => sample_survey_points(),
            };
            run_survey(models, click)?;
        }
    }

    Ok(())
}

fn run_trace(
    points: &[GeoPoint],
    config: &EstimatorConfig,
    export: Option<&Path>,
    format: Option<TraceFormat>,
) -> anyhow::Result<()> {
    let mut trace = DragTrace::new(config.estimator());

    for &point in points {
        trace.on_marker_drag_start(point);
        trace.on_marker_drag_end(point)?;
    }

    let report = trace.report()?;
    println!(
        "{} vertices, {} ({})",
        report.vertices,
        report.format_area(),
        trace.estimator().projection.display_name()
    );

    if let Some(path) = export {
        let format = match format.or_else(|| TraceFormat::from_path(path)) {
            Some(format) => format,
            None => {
                let known: Vec<&str> = TraceFormat::value_variants()
                    .iter()
                    .map(TraceFormat::extension)
                    .collect();
                bail!(
                    "Cannot guess export format for {} (known extensions: {}); pass --format",
                    path.display(),
                    known.join(", ")
                )
            }
        };
        TraceExporter::new(trace.points(), report)
            .export_to_file(path, format)
            .with_context(|| format!("Failed to export trace to {}", path.display()))?;
    }

    Ok(())
}

fn run_survey(models: Vec<SurveyPoint>, click: Option<usize>) -> anyhow::Result<()> {
    let mut plot = PointPlot::new(models, |point: &SurveyPoint| {
        println!("Clicked {} ({}, {})", point.point_name, point.latitude, point.longitude);
    });

    for (i, (point, model)) in plot.labelled_points().iter().zip(plot.models()).enumerate() {
        println!("{:>3}  {:<12} {:<6} {}", i, point.label, model.color, point.point);
    }

    if let Some(index) = click {
        if plot.click(index).is_none() {
            bail!("No survey point at index {}", index);
        }
    }

    Ok(())
}
