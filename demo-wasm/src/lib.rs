use springy::overlay::{debug_shapes, DebugShape};
use springy::{BodyId, ScenarioConfig, Scene, Vec2};
use wasm_bindgen::prelude::*;

// ---- Scene Demo ----

#[wasm_bindgen]
pub struct SceneDemo {
    scene: Scene<f32>,
}

#[wasm_bindgen]
impl SceneDemo {
    /// The reference scene: two hanging bodies joined by a spring, pinned to
    /// a body resting on the floor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SceneDemo, JsValue> {
        let scene = ScenarioConfig::<f32>::reference()
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SceneDemo { scene })
    }

    /// Build a scene from a JSON scenario description.
    pub fn from_json(json: &str) -> Result<SceneDemo, JsValue> {
        let config: ScenarioConfig<f32> =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let scene = config.build().map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(SceneDemo { scene })
    }

    /// Feed frame time in seconds. Returns the number of fixed ticks run.
    pub fn update(&mut self, dt: f32) -> usize {
        self.scene.simulator.advance(dt)
    }

    /// Kick a random candidate body away from the click.
    pub fn click(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.scene
            .injector
            .inject(&mut self.scene.simulator, Vec2::new(x, y))
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Drag a body, e.g. the grounded one, to a new position.
    pub fn move_body(&mut self, index: usize, x: f32, y: f32) -> Result<(), JsValue> {
        self.scene
            .simulator
            .set_position(BodyId::new(index), Vec2::new(x, y))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) -> Result<(), JsValue> {
        self.scene
            .simulator
            .set_enabled(BodyId::new(index), enabled)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns flat [x0, y0, x1, y1, ...] positions
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.scene.simulator.body_count() * 2);
        for p in self.scene.simulator.positions() {
            out.push(p.x);
            out.push(p.y);
        }
        out
    }

    /// Returns flat [kind, x0, y0, x1, y1, ...] line segments for the debug
    /// overlay. Kind is 0 for springs, 1 for pins and 2 for velocities.
    pub fn overlay(&self) -> Vec<f32> {
        let shapes = debug_shapes(&self.scene.simulator);
        let mut out = Vec::with_capacity(shapes.len() * 5);
        for shape in shapes {
            let (kind, from, to) = match shape {
                DebugShape::Spring { from, to, .. } => (0.0, from, to),
                DebugShape::Pin { anchor, target } => (1.0, anchor, target),
                DebugShape::Velocity { origin, velocity } => (2.0, origin, origin + velocity),
            };
            out.extend_from_slice(&[kind, from.x, from.y, to.x, to.y]);
        }
        out
    }

    pub fn body_count(&self) -> usize {
        self.scene.simulator.body_count()
    }

    pub fn floor_y(&self) -> f32 {
        self.scene.simulator.config().floor_y
    }
}
