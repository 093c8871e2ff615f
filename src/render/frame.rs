use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, TextPrimitive, VectorSurface};

/// Role of a retained vector element, used by hosts to style or query it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementClass {
    GridLine,
    YAxisLabel,
    XAxis,
    AnnotationTick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum VectorShape {
    Line(LinePrimitive),
    Text(TextPrimitive),
}

/// One labeled element of the vector (axes/labels) layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorElement {
    pub class: ElementClass,
    pub shape: VectorShape,
}

impl VectorElement {
    #[must_use]
    pub fn line(class: ElementClass, line: LinePrimitive) -> Self {
        Self {
            class,
            shape: VectorShape::Line(line),
        }
    }

    #[must_use]
    pub fn text(class: ElementClass, text: TextPrimitive) -> Self {
        Self {
            class,
            shape: VectorShape::Text(text),
        }
    }

    #[must_use]
    pub fn as_line(&self) -> Option<&LinePrimitive> {
        match &self.shape {
            VectorShape::Line(line) => Some(line),
            VectorShape::Text(_) => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match &self.shape {
            VectorShape::Text(text) => Some(text),
            VectorShape::Line(_) => None,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match &self.shape {
            VectorShape::Line(line) => line.validate(),
            VectorShape::Text(text) => text.validate(),
        }
    }
}

/// Backend-agnostic scene for the axis/grid layer of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub viewport: Viewport,
    pub elements: Vec<VectorElement>,
}

impl AxisFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: VectorElement) {
        self.elements.push(element);
    }

    pub fn elements_of(&self, class: ElementClass) -> impl Iterator<Item = &VectorElement> {
        self.elements
            .iter()
            .filter(move |element| element.class == class)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for element in &self.elements {
            element.validate()?;
        }
        Ok(())
    }

    /// Replaces the surface content with this frame.
    pub fn draw<S: VectorSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        self.validate()?;
        surface.clear();
        for element in &self.elements {
            surface.append(element)?;
        }
        Ok(())
    }
}
