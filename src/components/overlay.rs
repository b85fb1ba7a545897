//! Note overlay components.
//!
//! While a note is being read the scene holds one entity carrying
//! [`NoteOverlay`] plus four [`OverlayElement`] entities that a renderer
//! draws on top of the world:
//!
//! | element  | depth | contents                                   |
//! |----------|-------|--------------------------------------------|
//! | backdrop | 1000  | full-view black rectangle, alpha 0.9       |
//! | panel    | 1001  | white note paper, clamped to the view      |
//! | body     | 1002  | the note text, centered and wrapped        |
//! | hint     | 1002  | "Press A to close", near the panel bottom  |
//!
//! Closing the overlay despawns all of them.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::{Component, Entity};
use glam::Vec2;

use crate::resources::input::EdgeDetector;

pub const BACKDROP_DEPTH: i32 = 1000;
pub const PANEL_DEPTH: i32 = 1001;
pub const TEXT_DEPTH: i32 = 1002;
pub const PANEL_MAX_SIZE: Vec2 = Vec2::new(800.0, 500.0);
pub const CLOSE_HINT: &str = "Press A to close";

/// Where the overlay is in its open/close protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    /// Grace period right after opening; close input is ignored.
    Opening,
    /// Grace period over; the next action press edge closes the overlay.
    AwaitingClose,
}

/// State of an open note overlay.
#[derive(Component, Debug, Clone)]
pub struct NoteOverlay {
    pub note: String,
    pub phase: OverlayPhase,
    /// Close-press edge, sampled only by the overlay's close check.
    pub close_edge: EdgeDetector,
    pub elements: ArrayVec<Entity, 4>,
}

impl NoteOverlay {
    /// `action_held` is the action state on the frame the overlay opens, so
    /// the press that opened it is never mistaken for a close press.
    pub fn new(note: impl Into<String>, action_held: bool) -> Self {
        Self {
            note: note.into(),
            phase: OverlayPhase::Opening,
            close_edge: EdgeDetector::primed(action_held),
            elements: ArrayVec::new(),
        }
    }

    pub fn can_close(&self) -> bool {
        self.phase == OverlayPhase::AwaitingClose
    }

    pub fn finish_grace(&mut self) {
        self.phase = OverlayPhase::AwaitingClose;
    }

    /// Feed this frame's action state. Returns true when the overlay should
    /// close: grace is over and the action went from released to held.
    pub fn poll_close(&mut self, action_held: bool) -> bool {
        let edge = self.close_edge.sample(action_held);
        self.can_close() && edge
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayElementKind {
    Backdrop,
    Panel,
    Body,
    Hint,
}

/// One drawable piece of the overlay, in view (screen) coordinates.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OverlayElement {
    pub kind: OverlayElementKind,
    pub center: Vec2,
    pub size: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    pub alpha: f32,
    pub depth: i32,
    pub text: Option<String>,
    pub font_size: f32,
    pub wrap_width: Option<f32>,
}

impl OverlayElement {
    fn rect(kind: OverlayElementKind, center: Vec2, size: Vec2, color: u32, alpha: f32, depth: i32) -> Self {
        Self {
            kind,
            center,
            size,
            color,
            alpha,
            depth,
            text: None,
            font_size: 0.0,
            wrap_width: None,
        }
    }

    fn label(kind: OverlayElementKind, center: Vec2, text: &str, font_size: f32, color: u32) -> Self {
        Self {
            kind,
            center,
            size: Vec2::ZERO,
            color,
            alpha: 1.0,
            depth: TEXT_DEPTH,
            text: Some(text.to_string()),
            font_size,
            wrap_width: None,
        }
    }
}

/// Overlay geometry for a given view size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub view: Vec2,
}

impl OverlayLayout {
    pub fn new(view_width: f32, view_height: f32) -> Self {
        Self {
            view: Vec2::new(view_width, view_height),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.view * 0.5
    }

    pub fn panel_size(&self) -> Vec2 {
        Vec2::new(
            PANEL_MAX_SIZE.x.min(self.view.x - 40.0),
            PANEL_MAX_SIZE.y.min(self.view.y - 100.0),
        )
    }

    /// Build the four elements in draw order.
    pub fn elements(&self, text: &str) -> [OverlayElement; 4] {
        let center = self.center();
        let panel = self.panel_size();
        let mut body = OverlayElement::label(OverlayElementKind::Body, center, text, 16.0, 0x000000);
        body.wrap_width = Some(panel.x - 50.0);
        let hint = OverlayElement::label(
            OverlayElementKind::Hint,
            Vec2::new(center.x, center.y + panel.y * 0.5 - 30.0),
            CLOSE_HINT,
            14.0,
            0x666666,
        );
        [
            OverlayElement::rect(OverlayElementKind::Backdrop, center, self.view, 0x000000, 0.9, BACKDROP_DEPTH),
            OverlayElement::rect(OverlayElementKind::Panel, center, panel, 0xffffff, 1.0, PANEL_DEPTH),
            body,
            hint,
        ]
    }
}
