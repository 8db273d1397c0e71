use crate::constants::*;
use crate::core::{LifecycleState, ParticleField};
use crate::dom;
use glam::Vec2;
use instant::Instant;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// CSS `filter` for the tank glass at a given lifecycle state.
///
/// Steady slowly brightens over the cycle; a transient flickers and shifts
/// hue, settling as its progress runs out.
pub fn tank_filter(state: LifecycleState, jitter: f32) -> String {
    let p = state.progress.clamp(0.0, 1.0);
    if state.is_transient() {
        let decay = 1.0 - p;
        let flicker = 1.0 - FLICKER_DEPTH * decay * jitter.clamp(0.0, 1.0);
        let hue = HUE_JITTER_DEG * decay * (jitter * 2.0 - 1.0);
        format!(
            "brightness({:.3}) hue-rotate({:.1}deg) contrast(1.2)",
            BRIGHTNESS_BASE * flicker,
            hue
        )
    } else {
        format!("brightness({:.3})", BRIGHTNESS_BASE + BRIGHTNESS_SPAN * p)
    }
}

/// Lifecycle observer that drives the tank's filter and glitch class.
pub fn apply_tank_state(tank: &web::HtmlElement, state: LifecycleState) -> anyhow::Result<()> {
    let jitter = js_sys::Math::random() as f32;
    tank.style()
        .set_property("filter", &tank_filter(state, jitter))
        .map_err(|e| anyhow::anyhow!("filter update failed: {:?}", e))?;
    dom::set_class(tank, TRANSIENT_CLASS, state.is_transient());
    Ok(())
}

/// Particle field drawn onto a 2D canvas every animation frame.
pub struct ParticleView {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: ParticleField,
    last_instant: Instant,
    running: bool,
}

impl ParticleView {
    pub fn new(canvas: web::HtmlCanvasElement, count: usize, seed: u64) -> anyhow::Result<Self> {
        dom::sync_canvas_backing_size(&canvas);
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let bounds = canvas_bounds(&canvas);
        Ok(Self {
            field: ParticleField::new(count, bounds, seed),
            canvas,
            ctx,
            last_instant: Instant::now(),
            running: true,
        })
    }

    pub fn apply_lifecycle(&mut self, state: LifecycleState) {
        self.field.apply_lifecycle(state);
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
        // avoid a large step after a pause
        self.last_instant = Instant::now();
    }

    pub fn resize(&mut self) {
        dom::sync_canvas_backing_size(&self.canvas);
        self.field.resize(canvas_bounds(&self.canvas));
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        if self.running {
            self.field.step(dt_sec);
        }
        self.draw();
    }

    fn draw(&self) {
        let size = self.field.bounds();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
        self.ctx.set_global_alpha(self.field.opacity() as f64);
        #[allow(deprecated)]
        self.ctx.set_fill_style(&JsValue::from_str(PARTICLE_COLOR));
        for p in self.field.particles() {
            self.ctx.begin_path();
            _ = self.ctx.arc(
                p.pos.x as f64,
                p.pos.y as f64,
                p.radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }
        self.ctx.set_global_alpha(1.0);
    }
}

fn canvas_bounds(canvas: &web::HtmlCanvasElement) -> Vec2 {
    Vec2::new(canvas.width() as f32, canvas.height() as f32)
}
