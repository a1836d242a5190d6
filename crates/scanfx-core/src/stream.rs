//! Card strip kinematics: a 1-D slider driven by drag, wheel and idle drift.
//!
//! `position` is the horizontal offset of the strip inside its container.
//! The strip loops: leaving the track on one side re-enters from the other.

use crate::constants::{
    CARD_GAP, CARD_WIDTH, CRUISE_VELOCITY, DRAG_VELOCITY_SCALE, FRICTION, MIN_VELOCITY, WHEEL_STEP,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Drifting,
    Dragging,
    Paused,
}

#[derive(Clone, Debug)]
pub struct CardStream {
    pub position: f32,
    pub velocity: f32,
    /// +1 moves right, -1 moves left.
    pub direction: f32,
    dragging: bool,
    paused: bool,
    container_width: f32,
    track_length: f32,
    last_pointer_x: f32,
    pointer_velocity: f32,
}

impl CardStream {
    pub fn new(container_width: f32, card_count: usize) -> Self {
        Self {
            position: 0.0,
            velocity: CRUISE_VELOCITY,
            direction: -1.0,
            dragging: false,
            paused: false,
            container_width: container_width.max(0.0),
            track_length: track_length_for(card_count),
            last_pointer_x: 0.0,
            pointer_velocity: 0.0,
        }
    }

    pub fn state(&self) -> Motion {
        if self.dragging {
            Motion::Dragging
        } else if self.paused {
            Motion::Paused
        } else {
            Motion::Drifting
        }
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    #[inline]
    pub fn track_length(&self) -> f32 {
        self.track_length
    }

    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = if width.is_finite() { width.max(0.0) } else { 0.0 };
    }

    pub fn set_card_count(&mut self, count: usize) {
        self.track_length = track_length_for(count);
    }

    /// Speed read-out in whole units per second.
    pub fn speed(&self) -> i32 {
        self.velocity.round() as i32
    }

    /// Freeze autonomous motion and follow the pointer from `pointer_x`.
    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.dragging = true;
        self.last_pointer_x = pointer_x;
        self.pointer_velocity = 0.0;
    }

    pub fn drag_to(&mut self, pointer_x: f32) {
        if !self.dragging {
            return;
        }
        let dx = pointer_x - self.last_pointer_x;
        self.position += dx;
        self.pointer_velocity = dx * DRAG_VELOCITY_SCALE;
        self.last_pointer_x = pointer_x;
    }

    /// Fling with the last pointer velocity if it beats the floor, else
    /// fall back to cruise speed in the current direction.
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        if self.pointer_velocity.abs() > MIN_VELOCITY {
            self.velocity = self.pointer_velocity.abs();
            self.direction = if self.pointer_velocity > 0.0 { 1.0 } else { -1.0 };
        } else {
            self.velocity = CRUISE_VELOCITY;
        }
    }

    /// Nudge by a fixed step per wheel event regardless of velocity.
    pub fn wheel(&mut self, delta_y: f32) {
        self.position += if delta_y > 0.0 { WHEEL_STEP } else { -WHEEL_STEP };
        self.wrap();
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    /// Back to the right edge of the container, cruising left.
    pub fn reset(&mut self) {
        self.position = self.container_width;
        self.velocity = CRUISE_VELOCITY;
        self.direction = -1.0;
        self.dragging = false;
        self.paused = false;
        self.pointer_velocity = 0.0;
    }

    /// Advance autonomous motion. Returns whether the strip moved.
    pub fn tick(&mut self, dt_sec: f32) -> bool {
        if self.dragging || self.paused {
            return false;
        }
        let dt = if dt_sec.is_finite() { dt_sec.max(0.0) } else { 0.0 };
        self.velocity = (self.velocity * FRICTION).max(MIN_VELOCITY);
        self.position += self.velocity * self.direction * dt;
        self.wrap();
        true
    }

    pub fn wrap(&mut self) {
        if self.position < -self.track_length {
            self.position = self.container_width;
        } else if self.position > self.container_width {
            self.position = -self.track_length;
        }
    }
}

#[inline]
pub fn track_length_for(card_count: usize) -> f32 {
    (CARD_WIDTH + CARD_GAP) * card_count as f32
}
