//! Project carousel: index state, its transitions, and the controller that
//! maps button, keyboard and pointer input onto them.

use crate::domain::ports::{Anchor, RenderTarget};
use std::fmt;
use std::str::FromStr;

/// Horizontal travel (px) a drag must exceed to change slides.
pub const DRAG_THRESHOLD_PX: f64 = 60.0;

/// Elements under which a pointer-down keeps its normal activation.
const INTERACTIVE_TAGS: [&str; 5] = ["a", "button", "input", "textarea", "select"];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    pointer_id: i32,
    start_x: f64,
    delta: f64,
}

/// Slide index over a non-empty slide set plus the transient drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    index: usize,
    len: usize,
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCommit {
    Previous,
    Next,
    Stay,
}

impl DragCommit {
    pub fn for_delta(delta: f64) -> Self {
        if delta > DRAG_THRESHOLD_PX {
            DragCommit::Previous
        } else if delta < -DRAG_THRESHOLD_PX {
            DragCommit::Next
        } else {
            DragCommit::Stay
        }
    }
}

impl CarouselState {
    /// `None` for an empty slide set.
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self {
            index: 0,
            len,
            drag: None,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag.map(|d| d.delta).unwrap_or(0.0)
    }

    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    pub fn previous(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }

    /// Out-of-range positions leave the state unchanged.
    pub fn jump_to(self, index: usize) -> Self {
        if index < self.len {
            Self { index, ..self }
        } else {
            self
        }
    }

    pub fn begin_drag(self, pointer_id: i32, start_x: f64) -> Self {
        Self {
            drag: Some(Drag {
                pointer_id,
                start_x,
                delta: 0.0,
            }),
            ..self
        }
    }

    pub fn drag_to(self, x: f64) -> Self {
        match self.drag {
            Some(drag) => Self {
                drag: Some(Drag {
                    delta: x - drag.start_x,
                    ..drag
                }),
                ..self
            },
            None => self,
        }
    }

    /// Finish the drag and apply whatever the travelled distance commits to.
    pub fn end_drag(self) -> (Self, DragCommit) {
        let commit = DragCommit::for_delta(self.drag_offset());
        let settled = Self { drag: None, ..self };
        let settled = match commit {
            DragCommit::Previous => settled.previous(),
            DragCommit::Next => settled.next(),
            DragCommit::Stay => settled,
        };
        (settled, commit)
    }

    pub fn cancel_drag(self) -> Self {
        Self { drag: None, ..self }
    }

    fn drag_pointer(&self) -> Option<i32> {
        self.drag.map(|d| d.pointer_id)
    }
}

pub fn track_transform(index: usize) -> String {
    format!("translateX(-{}%)", index * 100)
}

pub fn drag_transform(index: usize, delta: f64) -> String {
    format!("translateX(calc(-{}% + {}px))", index * 100, delta)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl From<&str> for Key {
    fn from(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

/// One event delivered to the carousel.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselInput {
    PrevButton,
    NextButton,
    Indicator(usize),
    Focus,
    Blur,
    Key(Key),
    /// `path` lists tag names from the hit element up to the track.
    PointerDown {
        pointer_id: i32,
        client_x: f64,
        path: Vec<String>,
    },
    PointerMove {
        pointer_id: i32,
        client_x: f64,
    },
    PointerUp {
        pointer_id: i32,
    },
    PointerCancel {
        pointer_id: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInputError(String);

impl fmt::Display for ParseInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised carousel input '{}'", self.0)
    }
}

impl std::error::Error for ParseInputError {}

/// Parses a whole scripted gesture. `drag:<dx>` expands to a full
/// down/move/up sequence starting at x = 0.
pub fn parse_inputs(script: &str) -> Result<Vec<CarouselInput>, ParseInputError> {
    let mut inputs = Vec::new();
    for token in script.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if let Some(dx) = token.strip_prefix("drag:") {
            let dx: f64 = dx.parse().map_err(|_| ParseInputError(token.to_string()))?;
            inputs.push(CarouselInput::PointerDown {
                pointer_id: 1,
                client_x: 0.0,
                path: vec!["div".to_string()],
            });
            inputs.push(CarouselInput::PointerMove {
                pointer_id: 1,
                client_x: dx,
            });
            inputs.push(CarouselInput::PointerUp { pointer_id: 1 });
        } else {
            inputs.push(token.parse()?);
        }
    }
    Ok(inputs)
}

impl FromStr for CarouselInput {
    type Err = ParseInputError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let err = || ParseInputError(token.to_string());
        let input = match token {
            "prev" | "previous" => CarouselInput::PrevButton,
            "next" => CarouselInput::NextButton,
            "focus" => CarouselInput::Focus,
            "blur" => CarouselInput::Blur,
            "left" => CarouselInput::Key(Key::ArrowLeft),
            "right" => CarouselInput::Key(Key::ArrowRight),
            "cancel" => CarouselInput::PointerCancel { pointer_id: 1 },
            _ => {
                let (kind, arg) = token.split_once(':').ok_or_else(err)?;
                match kind {
                    "dot" => CarouselInput::Indicator(arg.parse().map_err(|_| err())?),
                    "key" => CarouselInput::Key(Key::from(arg)),
                    "down" => CarouselInput::PointerDown {
                        pointer_id: 1,
                        client_x: arg.parse().map_err(|_| err())?,
                        path: vec!["div".to_string()],
                    },
                    "move" => CarouselInput::PointerMove {
                        pointer_id: 1,
                        client_x: arg.parse().map_err(|_| err())?,
                    },
                    "up" => CarouselInput::PointerUp {
                        pointer_id: arg.parse().map_err(|_| err())?,
                    },
                    _ => return Err(err()),
                }
            }
        };
        Ok(input)
    }
}

/// Controller bound to one rendered slide set. Build a new one whenever the
/// slides are re-rendered; a stale controller must not be reused.
#[derive(Debug, Clone)]
pub struct Carousel {
    state: CarouselState,
    indicators: usize,
    prev_bound: bool,
    next_bound: bool,
    keyboard_bound: bool,
    focused: bool,
}

impl Carousel {
    /// Bind to the current slide set. Returns `None` (after a warning) when
    /// the track, slides or indicators are missing.
    pub fn bind(target: &mut dyn RenderTarget) -> Option<Self> {
        let slides = target.child_count(Anchor::CarouselTrack);
        let indicators = target.child_count(Anchor::CarouselDots);

        let state = match CarouselState::new(slides) {
            Some(state) if target.has(Anchor::CarouselTrack) && indicators > 0 => state,
            _ => {
                tracing::warn!(
                    "[Carousel] required elements not found; skipping carousel initialization"
                );
                return None;
            }
        };

        let keyboard_bound = target.has(Anchor::CarouselRegion);
        if keyboard_bound {
            target.set_attribute(Anchor::CarouselRegion, "tabindex", "0");
        }

        let carousel = Self {
            state,
            indicators,
            prev_bound: target.has(Anchor::CarouselPrev),
            next_bound: target.has(Anchor::CarouselNext),
            keyboard_bound,
            focused: false,
        };
        tracing::debug!("Carousel bound to {} slides", slides);
        carousel.reconcile(target);
        Some(carousel)
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.state.index()
    }

    pub fn next(&mut self, target: &mut dyn RenderTarget) {
        self.state = self.state.next();
        self.reconcile(target);
    }

    pub fn previous(&mut self, target: &mut dyn RenderTarget) {
        self.state = self.state.previous();
        self.reconcile(target);
    }

    pub fn jump_to(&mut self, index: usize, target: &mut dyn RenderTarget) {
        if index >= self.indicators {
            tracing::debug!("Ignoring jump to missing indicator {}", index);
            return;
        }
        self.state = self.state.jump_to(index);
        self.reconcile(target);
    }

    /// Apply the committed index to the track and indicators.
    pub fn reconcile(&self, target: &mut dyn RenderTarget) {
        let index = self.state.index();
        target.set_style(Anchor::CarouselTrack, "transform", &track_transform(index));
        for i in 0..self.indicators {
            let current = if i == index { "true" } else { "false" };
            target.set_child_attribute(Anchor::CarouselDots, i, "aria-current", current);
        }
    }

    pub fn handle(&mut self, input: CarouselInput, target: &mut dyn RenderTarget) {
        match input {
            CarouselInput::PrevButton if self.prev_bound => self.previous(target),
            CarouselInput::NextButton if self.next_bound => self.next(target),
            CarouselInput::Indicator(index) => self.jump_to(index, target),
            CarouselInput::Focus => self.focused = self.keyboard_bound,
            CarouselInput::Blur => self.focused = false,
            CarouselInput::Key(key) if self.focused => match key {
                Key::ArrowLeft => self.previous(target),
                Key::ArrowRight => self.next(target),
                Key::Other(_) => {}
            },
            CarouselInput::PointerDown {
                pointer_id,
                client_x,
                path,
            } => self.pointer_down(pointer_id, client_x, &path, target),
            CarouselInput::PointerMove {
                pointer_id,
                client_x,
            } => self.pointer_move(pointer_id, client_x, target),
            CarouselInput::PointerUp { pointer_id } => self.pointer_up(pointer_id, target),
            CarouselInput::PointerCancel { pointer_id } => self.pointer_cancel(pointer_id, target),
            ignored => tracing::debug!("Carousel ignoring {:?}", ignored),
        }
    }

    fn pointer_down(
        &mut self,
        pointer_id: i32,
        client_x: f64,
        path: &[String],
        target: &mut dyn RenderTarget,
    ) {
        if self.state.is_dragging() {
            return;
        }
        if path
            .iter()
            .any(|tag| INTERACTIVE_TAGS.contains(&tag.to_ascii_lowercase().as_str()))
        {
            return;
        }
        self.state = self.state.begin_drag(pointer_id, client_x);
        target.set_style(Anchor::CarouselTrack, "transition", "none");
        target.capture_pointer(Anchor::CarouselTrack, pointer_id);
    }

    fn pointer_move(&mut self, pointer_id: i32, client_x: f64, target: &mut dyn RenderTarget) {
        if self.state.drag_pointer() != Some(pointer_id) {
            return;
        }
        self.state = self.state.drag_to(client_x);
        target.set_style(
            Anchor::CarouselTrack,
            "transform",
            &drag_transform(self.state.index(), self.state.drag_offset()),
        );
    }

    fn pointer_up(&mut self, pointer_id: i32, target: &mut dyn RenderTarget) {
        if self.state.drag_pointer() != Some(pointer_id) {
            return;
        }
        target.set_style(Anchor::CarouselTrack, "transition", "");
        let (state, commit) = self.state.end_drag();
        self.state = state;
        tracing::debug!("Drag committed: {:?}", commit);
        self.reconcile(target);
        target.release_pointer(Anchor::CarouselTrack, pointer_id);
    }

    fn pointer_cancel(&mut self, pointer_id: i32, target: &mut dyn RenderTarget) {
        if self.state.drag_pointer() != Some(pointer_id) {
            return;
        }
        self.state = self.state.cancel_drag();
        target.set_style(Anchor::CarouselTrack, "transition", "");
        target.release_pointer(Anchor::CarouselTrack, pointer_id);
        self.reconcile(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPage;

    fn page_with_slides(n: usize) -> InMemoryPage {
        let mut page = InMemoryPage::listing();
        page.render_list(
            Anchor::CarouselTrack,
            (0..n).map(|i| format!("<div class=\"carousel-slide\">{}</div>", i)).collect(),
        );
        page.render_list(
            Anchor::CarouselDots,
            (0..n).map(crate::core::markup::indicator).collect(),
        );
        page
    }

    fn current_indicators(page: &InMemoryPage, n: usize) -> Vec<usize> {
        (0..n)
            .filter(|i| page.child_attribute(Anchor::CarouselDots, *i, "aria-current") == Some("true"))
            .collect()
    }

    fn drag(carousel: &mut Carousel, page: &mut InMemoryPage, dx: f64) {
        for input in parse_inputs(&format!("drag:{}", dx)).unwrap() {
            carousel.handle(input, page);
        }
    }

    #[test]
    fn next_cycles_back_to_start() {
        for n in 1..=7 {
            for start in 0..n {
                let begin = CarouselState::new(n).unwrap().jump_to(start);
                let mut state = begin;
                for _ in 0..n {
                    state = state.next();
                }
                assert_eq!(state, begin, "n={} start={}", n, start);
            }
        }
    }

    #[test]
    fn previous_undoes_next() {
        for n in 1..=7 {
            for start in 0..n {
                let state = CarouselState::new(n).unwrap().jump_to(start);
                assert_eq!(state.next().previous().index(), start);
                assert_eq!(state.previous().next().index(), start);
            }
        }
    }

    #[test]
    fn wraps_in_both_directions() {
        let state = CarouselState::new(3).unwrap();
        assert_eq!(state.previous().index(), 2);
        assert_eq!(state.jump_to(2).next().index(), 0);
    }

    #[test]
    fn empty_slide_set_has_no_state() {
        assert!(CarouselState::new(0).is_none());
    }

    #[test]
    fn drag_thresholds() {
        assert_eq!(DragCommit::for_delta(61.0), DragCommit::Previous);
        assert_eq!(DragCommit::for_delta(-61.0), DragCommit::Next);
        assert_eq!(DragCommit::for_delta(60.0), DragCommit::Stay);
        assert_eq!(DragCommit::for_delta(-60.0), DragCommit::Stay);
        assert_eq!(DragCommit::for_delta(0.0), DragCommit::Stay);
    }

    #[test]
    fn bind_marks_first_slide_and_makes_region_focusable() {
        let mut page = page_with_slides(3);
        let carousel = Carousel::bind(&mut page).unwrap();
        assert_eq!(carousel.index(), 0);
        assert_eq!(page.style(Anchor::CarouselTrack, "transform"), Some("translateX(-0%)"));
        assert_eq!(page.attribute(Anchor::CarouselRegion, "tabindex"), Some("0"));
        assert_eq!(current_indicators(&page, 3), vec![0]);
    }

    #[test]
    fn bind_refuses_missing_structure() {
        let mut page = page_with_slides(0);
        assert!(Carousel::bind(&mut page).is_none());

        let mut no_dots = page_with_slides(2);
        no_dots.render_list(Anchor::CarouselDots, Vec::new());
        assert!(Carousel::bind(&mut no_dots).is_none());

        let mut bare = InMemoryPage::new();
        assert!(Carousel::bind(&mut bare).is_none());
    }

    #[test]
    fn jump_marks_exactly_one_indicator() {
        let mut page = page_with_slides(4);
        let mut carousel = Carousel::bind(&mut page).unwrap();
        for i in 0..4 {
            carousel.handle(CarouselInput::Indicator(i), &mut page);
            assert_eq!(carousel.index(), i);
            assert_eq!(current_indicators(&page, 4), vec![i]);
            assert_eq!(
                page.style(Anchor::CarouselTrack, "transform"),
                Some(track_transform(i).as_str())
            );
        }
        carousel.handle(CarouselInput::Indicator(9), &mut page);
        assert_eq!(carousel.index(), 3);
    }

    #[test]
    fn buttons_navigate() {
        let mut page = page_with_slides(3);
        let mut carousel = Carousel::bind(&mut page).unwrap();
        carousel.handle(CarouselInput::PrevButton, &mut page);
        assert_eq!(carousel.index(), 2);
        carousel.handle(CarouselInput::NextButton, &mut page);
        carousel.handle(CarouselInput::NextButton, &mut page);
        assert_eq!(carousel.index(), 1);
        assert_eq!(page.style(Anchor::CarouselTrack, "transform"), Some("translateX(-100%)"));
    }

    #[test]
    fn keys_need_focus() {
        let mut page = page_with_slides(3);
        let mut carousel = Carousel::bind(&mut page).unwrap();

        carousel.handle(CarouselInput::Key(Key::ArrowRight), &mut page);
        assert_eq!(carousel.index(), 0);

        carousel.handle(CarouselInput::Focus, &mut page);
        carousel.handle(CarouselInput::Key(Key::ArrowRight), &mut page);
        assert_eq!(carousel.index(), 1);
        carousel.handle(CarouselInput::Key(Key::ArrowLeft), &mut page);
        carousel.handle(CarouselInput::Key(Key::ArrowLeft), &mut page);
        assert_eq!(carousel.index(), 2);
        carousel.handle(CarouselInput::Key(Key::from("Enter")), &mut page);
        assert_eq!(carousel.index(), 2);

        carousel.handle(CarouselInput::Blur, &mut page);
        carousel.handle(CarouselInput::Key(Key::ArrowRight), &mut page);
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn drag_commits_like_buttons() {
        let mut page = page_with_slides(3);
        let mut carousel = Carousel::bind(&mut page).unwrap();

        drag(&mut carousel, &mut page, -61.0);
        assert_eq!(carousel.index(), 1);
        drag(&mut carousel, &mut page, 61.0);
        assert_eq!(carousel.index(), 0);
        drag(&mut carousel, &mut page, 0.0);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.state().drag_offset(), 0.0);
        assert_eq!(current_indicators(&page, 3), vec![0]);
    }

    #[test]
    fn drag_renders_interim_offset_without_moving_index() {
        let mut page = page_with_slides(3);
        let mut carousel = Carousel::bind(&mut page).unwrap();
        carousel.handle(CarouselInput::NextButton, &mut page);

        carousel.handle(
            CarouselInput::PointerDown {
                pointer_id: 7,
                client_x: 200.0,
                path: vec!["div".to_string(), "article".to_string()],
            },
            &mut page,
        );
        assert_eq!(page.style(Anchor::CarouselTrack, "transition"), Some("none"));
        assert_eq!(page.captured_pointer(Anchor::CarouselTrack), Some(7));

        carousel.handle(
            CarouselInput::PointerMove {
                pointer_id: 7,
                client_x: 150.0,
            },
            &mut page,
        );
        assert_eq!(carousel.index(), 1);
        assert_eq!(
            page.style(Anchor::CarouselTrack, "transform"),
            Some("translateX(calc(-100% + -50px))")
        );

        carousel.handle(CarouselInput::PointerUp { pointer_id: 7 }, &mut page);
        assert_eq!(carousel.index(), 1);
        assert_eq!(page.style(Anchor::CarouselTrack, "transition"), None);
        assert_eq!(page.captured_pointer(Anchor::CarouselTrack), None);
        assert_eq!(page.style(Anchor::CarouselTrack, "transform"), Some("translateX(-100%)"));
    }

    #[test]
    fn pointer_down_on_links_is_ignored() {
        let mut page = page_with_slides(3);
        let mut carousel = Carousel::bind(&mut page).unwrap();
        carousel.handle(
            CarouselInput::PointerDown {
                pointer_id: 1,
                client_x: 0.0,
                path: vec!["span".to_string(), "A".to_string(), "div".to_string()],
            },
            &mut page,
        );
        assert!(!carousel.state().is_dragging());
        assert_eq!(page.captured_pointer(Anchor::CarouselTrack), None);

        carousel.handle(CarouselInput::PointerMove { pointer_id: 1, client_x: -200.0 }, &mut page);
        carousel.handle(CarouselInput::PointerUp { pointer_id: 1 }, &mut page);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn cancel_aborts_without_commit() {
        let mut page = page_with_slides(3);
        let mut carousel = Carousel::bind(&mut page).unwrap();
        for input in parse_inputs("down:0,move:-300,cancel").unwrap() {
            carousel.handle(input, &mut page);
        }
        assert_eq!(carousel.index(), 0);
        assert!(!carousel.state().is_dragging());
        assert_eq!(page.style(Anchor::CarouselTrack, "transform"), Some("translateX(-0%)"));
        assert_eq!(page.captured_pointer(Anchor::CarouselTrack), None);

        // a later pointer-up must not commit the aborted delta
        carousel.handle(CarouselInput::PointerUp { pointer_id: 1 }, &mut page);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn parses_scripts() {
        let inputs = parse_inputs("next, dot:2 ,key:ArrowLeft,drag:-80").unwrap();
        assert_eq!(inputs.len(), 6);
        assert_eq!(inputs[0], CarouselInput::NextButton);
        assert_eq!(inputs[1], CarouselInput::Indicator(2));
        assert_eq!(inputs[2], CarouselInput::Key(Key::ArrowLeft));
        assert!(parse_inputs("jump").is_err());
        assert!(parse_inputs("dot:x").is_err());
    }
}
