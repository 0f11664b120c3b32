//! JavaScript bindings.

use wasm_bindgen::prelude::*;

use crate::config::CarouselConfig;
use crate::converters::markdown::markdown_to_slides;
use crate::models::settings::CarouselSettings;
use crate::models::slide::Slide;
use crate::render::canvas::HrefAvatarLoader;
use crate::render::slide::{render_slide, SlidePosition};
use crate::render::svg::SvgCanvas;
use crate::render::resolve_avatar;
use crate::text::font::FontCache;

/// Routes `log` output to the browser console and panics to `console.error`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Converts markdown into the slide list, serialized as JSON.
#[wasm_bindgen(js_name = markdownToSlides)]
pub fn markdown_to_slides_json(text: &str) -> Result<String, JsValue> {
    let slides = markdown_to_slides(text).map_err(to_js)?;
    serde_json::to_string(&slides).map_err(to_js)
}

/// Renders one slide (JSON) to an SVG document using the default configuration.
///
/// `settings_json` may be empty.
#[wasm_bindgen(js_name = renderSlideSvg)]
pub fn render_slide_svg(
    slide_json: &str,
    settings_json: &str,
    number: usize,
    total: usize,
) -> Result<String, JsValue> {
    let slide: Slide = serde_json::from_str(slide_json).map_err(to_js)?;
    let settings: CarouselSettings = if settings_json.trim().is_empty() {
        CarouselSettings::default()
    } else {
        serde_json::from_str(settings_json).map_err(to_js)?
    };
    render_svg(&slide, &settings, SlidePosition { number, total }).map_err(to_js)
}

fn render_svg(
    slide: &Slide,
    settings: &CarouselSettings,
    position: SlidePosition,
) -> crate::Result<String> {
    let config = CarouselConfig::default();
    let avatar = resolve_avatar(&HrefAvatarLoader, settings);
    let mut fonts = FontCache::new(config.fonts.family.clone());
    let mut canvas = SvgCanvas::new(config.canvas.width, config.canvas.height, fonts.family());
    render_slide(
        &mut canvas,
        &mut fonts,
        &config,
        settings,
        slide,
        position,
        avatar.as_ref(),
    )?;
    Ok(canvas.finish())
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
