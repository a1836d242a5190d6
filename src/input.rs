use crate::geometry;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Mouse position in canvas backing pixels.
#[inline]
pub fn mouse_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    geometry::client_to_canvas_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Horizontal client position of a mouse or the first touch.
#[inline]
pub fn client_x(ev: &web::Event) -> Option<f32> {
    if let Some(m) = ev.dyn_ref::<web::MouseEvent>() {
        return Some(m.client_x() as f32);
    }
    ev.dyn_ref::<web::TouchEvent>()
        .and_then(|t| t.touches().get(0))
        .map(|t| t.client_x() as f32)
}

#[inline]
pub fn wheel_delta_y(ev: &web::Event) -> Option<f32> {
    ev.dyn_ref::<web::WheelEvent>().map(|w| w.delta_y() as f32)
}
