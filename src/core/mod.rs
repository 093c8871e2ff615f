pub mod context;
pub mod geometry;
pub mod primitives;
pub mod scale;
pub mod simplify;
pub mod ticks;
pub mod types;

pub use context::RenderContext;
pub use geometry::perpendicular_distance;
pub use scale::{LinearScale, ScaleState};
pub use simplify::{EpsilonPolicy, SimplifyPolicy, simplify};
pub use ticks::{TickValues, extend_domain_floor, nice_ticks};
pub use types::{Annotation, AnnotationTick, Margins, PixelPoint, PlotBounds, Sample, Viewport};
