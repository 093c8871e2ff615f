use cairo::{Context, Format, ImageSurface, Operator};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, Extent, LinearGradient, Path, PathCommand, RasterSurface, Rect, Stroke, TextAnchor,
    VectorElement, VectorShape, VectorSurface,
};

/// Font size used when measuring annotation overlays as plain text.
const OVERLAY_FONT_SIZE_PX: f64 = 12.0;

fn create_surface(width: i32, height: i32) -> ChartResult<ImageSurface> {
    if width <= 0 || height <= 0 {
        return Err(ChartError::Backend(
            "cairo surface size must be > 0".to_owned(),
        ));
    }
    ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))
}

/// Raster layer backed by a Cairo image surface.
pub struct CairoRasterSurface {
    surface: ImageSurface,
    context: Context,
}

impl std::fmt::Debug for CairoRasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CairoRasterSurface")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .finish()
    }
}

impl CairoRasterSurface {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        let surface = create_surface(width, height)?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self { surface, context })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }
}

impl RasterSurface for CairoRasterSurface {
    fn clear(&mut self, region: Rect) -> ChartResult<()> {
        self.save()?;
        self.context.set_operator(Operator::Clear);
        self.context
            .rectangle(region.x, region.y, region.width, region.height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to clear region", err))?;
        self.restore()
    }

    fn save(&mut self) -> ChartResult<()> {
        self.context
            .save()
            .map_err(|err| map_backend_error("failed to save state", err))
    }

    fn restore(&mut self) -> ChartResult<()> {
        self.context
            .restore()
            .map_err(|err| map_backend_error("failed to restore state", err))
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> ChartResult<()> {
        append_path(&self.context, path);
        apply_color(&self.context, stroke.color);
        self.context.set_line_width(stroke.width_px);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_path(&mut self, path: &Path, fill: &LinearGradient) -> ChartResult<()> {
        let gradient = cairo::LinearGradient::new(fill.x0, fill.y0, fill.x1, fill.y1);
        for stop in &fill.stops {
            gradient.add_color_stop_rgba(
                stop.offset,
                stop.color.red,
                stop.color.green,
                stop.color.blue,
                stop.color.alpha,
            );
        }
        append_path(&self.context, path);
        self.context
            .set_source(&gradient)
            .map_err(|err| map_backend_error("failed to set gradient source", err))?;
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }
}

/// Vector layer that retains its elements and paints them with Cairo/Pango.
pub struct CairoVectorSurface {
    surface: ImageSurface,
    elements: Vec<VectorElement>,
}

impl std::fmt::Debug for CairoVectorSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CairoVectorSurface")
            .field("elements", &self.elements.len())
            .finish()
    }
}

impl CairoVectorSurface {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        Ok(Self {
            surface: create_surface(width, height)?,
            elements: Vec::new(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn elements(&self) -> &[VectorElement] {
        &self.elements
    }

    /// Repaints the retained elements onto the owned image surface.
    pub fn paint(&self) -> ChartResult<()> {
        let context = self.context()?;
        context.set_operator(Operator::Clear);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context.set_operator(Operator::Over);
        self.paint_on(&context)
    }

    /// Paints the retained elements onto an external context (e.g. a widget
    /// draw callback) without clearing it.
    pub fn paint_on(&self, context: &Context) -> ChartResult<()> {
        for element in &self.elements {
            match &element.shape {
                VectorShape::Line(line) => {
                    apply_color(context, line.color);
                    context.set_line_width(line.stroke_width);
                    context.set_dash(&line.dash, 0.0);
                    context.move_to(line.x1, line.y1);
                    context.line_to(line.x2, line.y2);
                    context
                        .stroke()
                        .map_err(|err| map_backend_error("failed to stroke line", err))?;
                    context.set_dash(&[], 0.0);
                }
                VectorShape::Text(text) => {
                    let layout = pangocairo::functions::create_layout(context);
                    layout.set_font_description(Some(&font(text.font_size_px)));
                    layout.set_text(&text.text);

                    let (text_width, _) = layout.pixel_size();
                    let text_width = f64::from(text_width);
                    let x = match text.anchor {
                        TextAnchor::Start => text.x,
                        TextAnchor::Middle => text.x - text_width / 2.0,
                        TextAnchor::End => text.x - text_width,
                    };
                    let ascent = f64::from(layout.baseline()) / f64::from(pango::SCALE);

                    apply_color(context, text.color);
                    context.move_to(x, text.baseline_y() - ascent);
                    pangocairo::functions::show_layout(context, &layout);
                }
            }
        }
        Ok(())
    }

    fn context(&self) -> ChartResult<Context> {
        Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))
    }

    fn measure(&self, text: &str, font_size_px: f64) -> Extent {
        let Ok(context) = self.context() else {
            return Extent::default();
        };
        let layout = pangocairo::functions::create_layout(&context);
        layout.set_font_description(Some(&font(font_size_px)));
        layout.set_text(text);
        let (width, height) = layout.pixel_size();
        Extent::new(f64::from(width), f64::from(height))
    }
}

impl VectorSurface for CairoVectorSurface {
    fn clear(&mut self) {
        self.elements.clear();
    }

    fn append(&mut self, element: &VectorElement) -> ChartResult<()> {
        element.validate()?;
        self.elements.push(element.clone());
        Ok(())
    }

    fn measure_text(&mut self, text: &str, font_size_px: f64) -> Extent {
        self.measure(text, font_size_px)
    }

    fn measure_overlay(&mut self, content: &str) -> Extent {
        self.measure(content, OVERLAY_FONT_SIZE_PX)
    }
}

fn font(size_px: f64) -> FontDescription {
    let mut description = FontDescription::from_string("Sans");
    description.set_absolute_size(size_px * f64::from(pango::SCALE));
    description
}

fn append_path(context: &Context, path: &Path) {
    context.new_path();
    for command in path.commands() {
        match *command {
            PathCommand::MoveTo { x, y } => context.move_to(x, y),
            PathCommand::LineTo { x, y } => context.line_to(x, y),
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => context.curve_to(x1, y1, x2, y2, x, y),
            PathCommand::Close => context.close_path(),
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
