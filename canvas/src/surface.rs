//! Browser drawing surface backed by a 2D canvas context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It owns the background image
//! element whose `src` the engine switches between images, and the marker
//! sprite.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::consts::LABEL_FONT;
use crate::render::{RenderError, Surface};
use crate::transform::Size;

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    image: HtmlImageElement,
    sprite: HtmlImageElement,
}

impl CanvasSurface {
    /// Wrap `canvas` and start loading the marker sprite from `sprite_url`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas has no 2D context or an image element
    /// cannot be created.
    pub fn new(canvas: HtmlCanvasElement, sprite_url: &str) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let image = HtmlImageElement::new()?;
        let sprite = HtmlImageElement::new()?;
        sprite.set_src(sprite_url);
        Ok(Self { canvas, ctx, image, sprite })
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The background image element.
    #[must_use]
    pub fn image(&self) -> &HtmlImageElement {
        &self.image
    }

    /// Natural size of the background image as decoded by the browser.
    #[must_use]
    pub fn natural_size(&self) -> Size {
        Size::new(f64::from(self.image.natural_width()), f64::from(self.image.natural_height()))
    }
}

fn js_err(e: JsValue) -> RenderError {
    RenderError::Surface(format!("{e:?}"))
}

impl Surface for CanvasSurface {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn resize(&mut self, size: Size) -> Result<(), RenderError> {
        self.canvas.set_width(size.width.max(0.0) as u32);
        self.canvas.set_height(size.height.max(0.0) as u32);
        Ok(())
    }

    fn clear(&mut self, color: &str) -> Result<(), RenderError> {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, f64::from(self.canvas.width()), f64::from(self.canvas.height()));
        Ok(())
    }

    fn draw_image(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), RenderError> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(&self.image, x, y, width, height)
            .map_err(js_err)
    }

    fn draw_sprite(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<(), RenderError> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(&self.sprite, x, y, width, height)
            .map_err(js_err)
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, RenderError> {
        self.ctx.set_font(LABEL_FONT);
        Ok(self.ctx.measure_text(text).map_err(js_err)?.width())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str, alpha: f64) -> Result<(), RenderError> {
        self.ctx.set_global_alpha(alpha);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
        self.ctx.set_global_alpha(1.0);
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str) -> Result<(), RenderError> {
        self.ctx.set_font(LABEL_FONT);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_text(text, x, y).map_err(js_err)
    }
}
