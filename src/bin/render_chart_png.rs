//! Renders a chart description (JSON) to a PNG at progress 1.
//!
//! Usage: `render_chart_png <input.json> <output.png>`

#[cfg(feature = "cairo-backend")]
use linechart_rs::core::{Annotation, AnnotationTick, Sample, Viewport};
#[cfg(feature = "cairo-backend")]
use serde::Deserialize;
#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
#[derive(Debug, Deserialize)]
struct ChartDescription {
    viewport: Viewport,
    samples: Vec<Sample>,
    #[serde(default)]
    annotations: Vec<Annotation>,
    #[serde(default)]
    annotation_ticks: Vec<AnnotationTick>,
    #[serde(default)]
    config: linechart_rs::ChartConfigPatch,
}

#[cfg(feature = "cairo-backend")]
struct Args {
    input_path: PathBuf,
    output_path: PathBuf,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = linechart_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args_os().skip(1);
    let input_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| "missing <input.json>".to_owned())?;
    let output_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| "missing <output.png>".to_owned())?;
    if args.next().is_some() {
        return Err("unexpected extra arguments".to_owned());
    }
    Ok(Args {
        input_path,
        output_path,
    })
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use linechart_rs::render::{CairoRasterSurface, CairoVectorSurface};
    use linechart_rs::runtime::ManualFrameScheduler;
    use linechart_rs::{ChartConfig, LineChart};

    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input_path).map_err(|err| {
        format!(
            "failed to read input `{}`: {err}",
            args.input_path.display()
        )
    })?;
    let description: ChartDescription =
        serde_json::from_str(&raw).map_err(|err| format!("failed to parse input json: {err}"))?;

    let viewport = description.viewport;
    let width = i32::try_from(viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;

    let config = ChartConfig::default()
        .merged(&description.config)
        .map_err(|err| err.to_string())?;
    let mut chart = LineChart::new(
        CairoVectorSurface::new(width, height).map_err(|err| err.to_string())?,
        CairoRasterSurface::new(width, height).map_err(|err| err.to_string())?,
        ManualFrameScheduler::new(),
        viewport,
        config,
    )
    .map_err(|err| err.to_string())?;

    chart
        .set_enable_animation(false, None)
        .and_then(|chart| chart.set_annotation_ticks(description.annotation_ticks))
        .and_then(|chart| chart.set_annotations(description.annotations))
        .and_then(|chart| chart.set_data(description.samples))
        .map_err(|err| err.to_string())?;

    let output = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .map_err(|err| format!("failed to create output surface: {err}"))?;
    let context =
        cairo::Context::new(&output).map_err(|err| format!("failed to create context: {err}"))?;
    context.set_source_rgb(1.0, 1.0, 1.0);
    context
        .paint()
        .map_err(|err| format!("failed to paint background: {err}"))?;
    chart
        .vector_surface()
        .paint_on(&context)
        .map_err(|err| err.to_string())?;
    context
        .set_source_surface(chart.raster_surface().surface(), 0.0, 0.0)
        .map_err(|err| format!("failed to set raster source: {err}"))?;
    context
        .paint()
        .map_err(|err| format!("failed to composite raster layer: {err}"))?;
    drop(context);

    let mut file = File::create(&args.output_path).map_err(|err| {
        format!(
            "failed to create output `{}`: {err}",
            args.output_path.display()
        )
    })?;
    output
        .write_to_png(&mut file)
        .map_err(|err| format!("failed to write png: {err}"))?;

    for marker in chart.markers() {
        println!(
            "marker {} at ({:.1}, {:.1}) {}x{}: {}",
            marker.index, marker.left, marker.top, marker.width, marker.height, marker.content
        );
    }
    println!("wrote {}", args.output_path.display());
    Ok(())
}
