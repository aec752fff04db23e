//! `wasm-bindgen` exports. Compiled for `wasm32` only.

use crate::{presets_json, randomized_texts, DEFAULT_CANVAS_ID};
use shaderdeck_core::render::GlContext;
use shaderdeck_core::{Deck, DeckConfig, DeckError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// GL context, deck and canvas, shared by the exported methods and the
/// frame callback.
struct Shared {
    gpu: GlContext,
    deck: Deck<GlContext>,
    canvas: HtmlCanvasElement,
}

/// A running shader deck bound to one canvas.
#[wasm_bindgen]
pub struct WebDeck {
    shared: Rc<RefCell<Shared>>,
    frame: FrameCallback,
}

fn to_js(e: DeckError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // A second deck on the page finds the logger already installed.
    console_log::init_with_level(log::Level::Info).ok();
}

fn request_frame(frame: &FrameCallback) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let slot = frame.borrow();
    let callback = slot
        .as_ref()
        .ok_or_else(|| JsValue::from_str("frame callback not installed"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

#[wasm_bindgen]
impl WebDeck {
    /// Binds `canvas` and builds the configured preset.
    ///
    /// `config_json` is a `DeckConfig` document; an empty string means
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str) -> Result<WebDeck, JsValue> {
        init_logging();
        let config = DeckConfig::from_json(config_json).map_err(to_js)?;

        let context = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("WebGL2 is not available"))?
            .dyn_into::<WebGl2RenderingContext>()?;
        let gpu = GlContext::new(glow::Context::from_webgl2_context(context));

        let seed = js_sys::Date::now().to_bits();
        let deck = Deck::new(&gpu, &config, seed).map_err(to_js)?;
        log::info!(
            "deck ready on {}x{} canvas",
            canvas.width(),
            canvas.height()
        );

        Ok(WebDeck {
            shared: Rc::new(RefCell::new(Shared { gpu, deck, canvas })),
            frame: Rc::new(RefCell::new(None)),
        })
    }

    /// Binds the canvas with id `shader-canvas`.
    pub fn attach(config_json: &str) -> Result<WebDeck, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(DEFAULT_CANVAS_ID)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{DEFAULT_CANVAS_ID}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("#{DEFAULT_CANVAS_ID} is not a canvas")))?;
        Self::new(canvas, config_json)
    }

    /// Switches preset. On failure the previous preset keeps rendering.
    pub fn select_preset(&self, key: &str) -> Result<(), JsValue> {
        let mut shared = self.shared.borrow_mut();
        let Shared { gpu, deck, .. } = &mut *shared;
        deck.select_preset(gpu, key).map_err(to_js)
    }

    /// Stores the text of a control; read on the next frame.
    pub fn set_control(&self, name: &str, text: &str) {
        self.shared.borrow_mut().deck.set_control(name, text);
    }

    /// Draws new noise factor and time speed values and returns their texts,
    /// so the page can update its inputs.
    pub fn randomize(&self) -> js_sys::Array {
        let draw = self.shared.borrow_mut().deck.randomize();
        randomized_texts(&draw)
            .iter()
            .map(|text| JsValue::from_str(text))
            .collect()
    }

    /// The preset catalog as JSON.
    pub fn presets(&self) -> String {
        presets_json()
    }

    /// Key of the preset on screen.
    pub fn preset(&self) -> Option<String> {
        self.shared
            .borrow()
            .deck
            .preset()
            .map(|preset| preset.key.to_string())
    }

    /// Starts the `requestAnimationFrame` loop. Calling it again is a no-op.
    pub fn start(&self) -> Result<(), JsValue> {
        if self.frame.borrow().is_some() {
            return Ok(());
        }

        let shared = Rc::clone(&self.shared);
        let next = Rc::clone(&self.frame);
        let callback = Closure::wrap(Box::new(move |now_ms: f64| {
            {
                let mut shared = shared.borrow_mut();
                let Shared { gpu, deck, canvas } = &mut *shared;
                deck.frame(gpu, now_ms, canvas.width(), canvas.height());
            }
            if let Err(e) = request_frame(&next) {
                log::error!("frame loop stopped: {e:?}");
            }
        }) as Box<dyn FnMut(f64)>);

        *self.frame.borrow_mut() = Some(callback);
        request_frame(&self.frame)?;
        log::info!("frame loop started");
        Ok(())
    }
}
