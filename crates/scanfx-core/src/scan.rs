//! Per-card clip masks against the vertical scan line.
//!
//! Each registered card has two faces: the plain face is clipped from the
//! right at `normal_clip_right` percent and the decoded face from the left
//! at `ascii_clip_left` percent. As a card crosses the line the two meet,
//! producing a wipe between them.

use crate::constants::SCAN_LINE_WIDTH;
use smallvec::SmallVec;

pub type CardId = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanLine {
    pub center: f32,
    pub width: f32,
}

impl ScanLine {
    pub fn centered(viewport_width: f32) -> Self {
        Self {
            center: viewport_width * 0.5,
            width: SCAN_LINE_WIDTH,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center - self.width * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center + self.width * 0.5
    }
}

/// Horizontal extent of a card in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardMask {
    pub normal_clip_right: f32,
    pub ascii_clip_left: f32,
}

impl CardMask {
    /// Entirely past the line: decoded face shown.
    pub const PASSED: CardMask = CardMask {
        normal_clip_right: 100.0,
        ascii_clip_left: 100.0,
    };
    /// Not yet reached: plain face shown.
    pub const AHEAD: CardMask = CardMask {
        normal_clip_right: 0.0,
        ascii_clip_left: 0.0,
    };
}

#[derive(Clone, Debug, Default)]
pub struct ScanReport {
    pub masks: Vec<(CardId, CardMask)>,
    pub pulses: SmallVec<[CardId; 4]>,
    pub any_active: bool,
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    id: CardId,
    scanned: bool,
}

#[derive(Clone, Debug)]
pub struct ScanController {
    line: ScanLine,
    slots: Vec<Slot>,
}

impl ScanController {
    pub fn new(line: ScanLine) -> Self {
        Self {
            line,
            slots: Vec::new(),
        }
    }

    #[inline]
    pub fn line(&self) -> ScanLine {
        self.line
    }

    pub fn set_line(&mut self, line: ScanLine) {
        self.line = line;
    }

    pub fn register(&mut self, id: CardId) {
        if !self.slots.iter().any(|s| s.id == id) {
            self.slots.push(Slot { id, scanned: false });
        }
    }

    pub fn unregister(&mut self, id: CardId) {
        self.slots.retain(|s| s.id != id);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.slots.iter().map(|s| s.id)
    }

    /// Recompute every registered card. `measure` returns the current span
    /// of a card, or `None` if it is not laid out (skipped this frame).
    pub fn update(&mut self, mut measure: impl FnMut(CardId) -> Option<Span>) -> ScanReport {
        let line = self.line;
        let mut report = ScanReport {
            masks: Vec::with_capacity(self.slots.len()),
            ..ScanReport::default()
        };
        for slot in &mut self.slots {
            let Some(span) = measure(slot.id) else {
                continue;
            };
            let (mask, crossing) = mask_for(span, line);
            match crossing {
                Crossing::Under { past_left_edge } => {
                    report.any_active = true;
                    if past_left_edge && !slot.scanned {
                        slot.scanned = true;
                        report.pulses.push(slot.id);
                    }
                }
                Crossing::Clear => slot.scanned = false,
            }
            report.masks.push((slot.id, mask));
        }
        report
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crossing {
    /// Overlapping the line; `past_left_edge` once the line's left edge is
    /// inside the card.
    Under { past_left_edge: bool },
    Clear,
}

/// Clip percentages for one card against the line.
pub fn mask_for(span: Span, line: ScanLine) -> (CardMask, Crossing) {
    let width = span.width();
    let (sl, sr) = (line.left(), line.right());
    let overlapping = span.left < sr && span.right > sl;

    if overlapping && width > 0.0 {
        let intersect_left = (sl - span.left).max(0.0);
        let intersect_right = (sr - span.left).min(width);
        let mask = CardMask {
            normal_clip_right: intersect_left / width * 100.0,
            ascii_clip_left: intersect_right / width * 100.0,
        };
        return (
            mask,
            Crossing::Under {
                past_left_edge: intersect_left > 0.0,
            },
        );
    }

    let mask = if span.right < sl {
        CardMask::PASSED
    } else {
        CardMask::AHEAD
    };
    (mask, Crossing::Clear)
}
