//! A [`Canvas`] that records drawing as SVG markup.
//!
//! Text is measured with the Helvetica advance widths (Arial shares them), so layout
//! decisions match what an SVG viewer with Arial installed will show.

use std::fmt::Write;

use super::canvas::{
    AvatarImage, Canvas, CanvasResult, SurfaceFactory, TextAlign, TextMeasure,
};
use crate::text::font::{FontDescriptor, FontWeight};

// Advance widths in 1/1000 em for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333,
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584,
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778,
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500,
    500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333,
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 333, 333, 584, 584,
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778,
    722, 278, 556, 722, 611, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556,
    500, 389, 280, 389, 584,
];

const DEFAULT_CHAR_WIDTH: u16 = 556;
const DEFAULT_FONT_SIZE: f32 = 10.0; // Same as a fresh 2D context

fn char_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c {
        ' '..='~' => table[c as usize - 32],
        '\u{a0}' => table[0],
        '•' => 350,
        '→' | '—' | '…' => 1000,
        '–' => 556,
        _ => DEFAULT_CHAR_WIDTH,
    }
}

/// Escapes special XML characters for SVG text content.
///
/// Characters XML 1.0 does not allow at all (most C0 controls, U+FFFE, U+FFFF) are
/// dropped, since no escape makes them legal.
pub fn escape_svg_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escapes a value for a double-quoted SVG attribute.
pub fn escape_svg_attr(value: &str) -> String {
    escape_svg_text(value).replace('"', "&quot;")
}

#[derive(Debug, Clone)]
struct DrawState {
    font: Option<FontDescriptor>,
    fill: String,
    stroke: String,
    line_width: f32,
    alpha: f32,
    align: TextAlign,
    clip: Option<String>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            font: None,
            fill: "#000000".to_string(),
            stroke: "#000000".to_string(),
            line_width: 1.0,
            alpha: 1.0,
            align: TextAlign::Left,
            clip: None,
        }
    }
}

/// One slide's worth of SVG.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: u32,
    height: u32,
    family: String,
    defs: String,
    body: String,
    clip_count: usize,
    state: DrawState,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32, family: impl Into<String>) -> Self {
        Self {
            width,
            height,
            family: family.into(),
            defs: String::new(),
            body: String::new(),
            clip_count: 0,
            state: DrawState::default(),
        }
    }

    /// The complete SVG document drawn so far.
    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(self.body.len() + self.defs.len() + 160);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        if !self.defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&self.defs);
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    pub fn finish(self) -> String {
        self.to_svg()
    }

    fn current_font(&self) -> (FontWeight, f32) {
        self.state
            .font
            .as_ref()
            .map(|f| (f.weight, f.size))
            .unwrap_or((FontWeight::Normal, DEFAULT_FONT_SIZE))
    }

    /// Shared presentation attributes: opacity and clip.
    fn write_common_attrs(&mut self, opacity_attr: &str) -> CanvasResult<()> {
        if self.state.alpha < 1.0 {
            write!(self.body, r#" {}="{}""#, opacity_attr, self.state.alpha)?;
        }
        if let Some(clip) = &self.state.clip {
            write!(self.body, r#" clip-path="url(#{})""#, clip)?;
        }
        Ok(())
    }
}

impl TextMeasure for SvgCanvas {
    fn measure_text(&self, text: &str) -> CanvasResult<f32> {
        let (weight, size) = self.current_font();
        let units: u32 = text.chars().map(|c| u32::from(char_width(c, weight))).sum();
        Ok(units as f32 * size / 1000.0)
    }
}

impl Canvas for SvgCanvas {
    fn set_font(&mut self, font: &FontDescriptor) -> CanvasResult<()> {
        self.state.font = Some(font.clone());
        Ok(())
    }

    fn set_fill_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.fill = color.to_string();
        Ok(())
    }

    fn set_stroke_color(&mut self, color: &str) -> CanvasResult<()> {
        self.state.stroke = color.to_string();
        Ok(())
    }

    fn set_line_width(&mut self, width: f32) -> CanvasResult<()> {
        self.state.line_width = width;
        Ok(())
    }

    fn set_alpha(&mut self, alpha: f32) -> CanvasResult<()> {
        self.state.alpha = alpha.clamp(0.0, 1.0);
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) -> CanvasResult<()> {
        self.state.align = align;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> CanvasResult<()> {
        let (weight, size) = self.current_font();
        write!(
            self.body,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}""#,
            x,
            y,
            escape_svg_attr(&self.family),
            size,
            weight,
            escape_svg_attr(&self.state.fill)
        )?;
        if self.state.align == TextAlign::Right {
            write!(self.body, r#" text-anchor="end""#)?;
        }
        self.write_common_attrs("fill-opacity")?;
        write!(
            self.body,
            r#" xml:space="preserve">{}</text>"#,
            escape_svg_text(text)
        )?;
        Ok(())
    }

    fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> CanvasResult<()> {
        write!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
            x1,
            y1,
            x2,
            y2,
            escape_svg_attr(&self.state.stroke),
            self.state.line_width
        )?;
        self.write_common_attrs("stroke-opacity")?;
        write!(self.body, "/>")?;
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> CanvasResult<()> {
        self.fill_rounded_rect(x, y, width, height, 0.0)
    }

    fn fill_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
    ) -> CanvasResult<()> {
        write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            x, y, width, height
        )?;
        if radius > 0.0 {
            write!(self.body, r#" rx="{}" ry="{}""#, radius, radius)?;
        }
        write!(self.body, r#" fill="{}""#, escape_svg_attr(&self.state.fill))?;
        self.write_common_attrs("fill-opacity")?;
        write!(self.body, "/>")?;
        Ok(())
    }

    fn clip_circle(&mut self, cx: f32, cy: f32, radius: f32) -> CanvasResult<()> {
        self.clip_count += 1;
        let id = format!("clip{}", self.clip_count);
        write!(
            self.defs,
            r#"<clipPath id="{}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
            id, cx, cy, radius
        )?;
        self.state.clip = Some(id);
        Ok(())
    }

    fn reset_clip(&mut self) -> CanvasResult<()> {
        self.state.clip = None;
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &AvatarImage,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> CanvasResult<()> {
        write!(
            self.body,
            r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice""#,
            escape_svg_attr(&image.href),
            x,
            y,
            width,
            height
        )?;
        self.write_common_attrs("opacity")?;
        write!(self.body, "/>")?;
        Ok(())
    }
}

/// Creates [`SvgCanvas`] surfaces drawing with one font family.
#[derive(Debug, Clone)]
pub struct SvgSurfaceFactory {
    family: String,
}

impl SvgSurfaceFactory {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }
}

impl SurfaceFactory for SvgSurfaceFactory {
    type Surface = SvgCanvas;

    fn new_surface(&self, width: u32, height: u32) -> CanvasResult<SvgCanvas> {
        Ok(SvgCanvas::new(width, height, self.family.clone()))
    }
}
