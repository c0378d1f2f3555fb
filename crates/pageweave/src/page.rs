//! Whole-page composition.
//!
//! A [`PageView`] supplies the four classic slots of a page (title, header,
//! body, footer) and renders them through the shared `page.html` skeleton.
//! Implementors override only the slots they care about; everything else
//! falls back to an empty string and disappears from the output.

use pageweave_render::{tag_values, RenderError};

use crate::generator::Generator;

/// One renderable page, composed from four named slots.
pub trait PageView {
    /// Document title.
    fn title(&self) -> String {
        String::new()
    }

    /// Markup above the body.
    fn header(&self) -> String {
        String::new()
    }

    /// Main content.
    fn body(&self) -> String {
        String::new()
    }

    /// Markup below the body.
    fn footer(&self) -> String {
        String::new()
    }

    /// Renders this view through the `page` template.
    fn generate(&self, generator: &Generator<'_>) -> Result<String, RenderError> {
        let values = tag_values([
            ("title", self.title()),
            ("header", self.header()),
            ("body", self.body()),
            ("footer", self.footer()),
        ]);
        generator.generate("page", &values)
    }
}
