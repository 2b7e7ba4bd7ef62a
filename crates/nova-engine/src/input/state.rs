use super::queue::BoundedQueue;
use super::types::{CharInput, InputEvent, KeyInput, Modifiers, MouseButtonInput, MousePosition, ScrollInput};

/// The five independent event queues plus the little state the platform
/// needs to fill in events (modifiers, cursor position).
///
/// Each queue is FIFO and bounded; see [`BoundedQueue`] for the overflow policy.
/// Draining one queue never touches another.
#[derive(Debug)]
pub struct InputQueues {
    /// Current modifier state, stamped onto button and key events.
    pub modifiers: Modifiers,

    /// Last cursor position in physical pixels.
    pub cursor: Option<(f64, f64)>,

    mouse_button: BoundedQueue<MouseButtonInput>,
    mouse_position: BoundedQueue<MousePosition>,
    mouse_scroll: BoundedQueue<ScrollInput>,
    key_press: BoundedQueue<KeyInput>,
    key_char: BoundedQueue<CharInput>,
}

impl InputQueues {
    pub fn new(capacity: usize) -> Self {
        Self {
            modifiers: Modifiers::default(),
            cursor: None,
            mouse_button: BoundedQueue::new(capacity),
            mouse_position: BoundedQueue::new(capacity),
            mouse_scroll: BoundedQueue::new(capacity),
            key_press: BoundedQueue::new(capacity),
            key_char: BoundedQueue::new(capacity),
        }
    }

    /// Routes an event to its queue.
    pub fn push(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::MouseButton(b) => {
                self.mouse_button.push(b);
            }
            InputEvent::MousePosition(p) => {
                self.cursor = Some((f64::from(p.x), f64::from(p.y)));
                self.mouse_position.push(p);
            }
            InputEvent::Scroll(s) => {
                self.mouse_scroll.push(s);
            }
            InputEvent::Key(k) => {
                self.key_press.push(k);
            }
            InputEvent::Char(c) => {
                self.key_char.push(c);
            }
        }
    }

    pub fn next_mouse_button(&mut self) -> Option<MouseButtonInput> {
        self.mouse_button.pop()
    }

    pub fn next_mouse_position(&mut self) -> Option<MousePosition> {
        self.mouse_position.pop()
    }

    pub fn next_mouse_scroll(&mut self) -> Option<ScrollInput> {
        self.mouse_scroll.pop()
    }

    pub fn next_key_press(&mut self) -> Option<KeyInput> {
        self.key_press.pop()
    }

    pub fn next_key_char(&mut self) -> Option<CharInput> {
        self.key_char.pop()
    }

    /// Total events waiting across all queues.
    pub fn pending(&self) -> usize {
        self.mouse_button.len()
            + self.mouse_position.len()
            + self.mouse_scroll.len()
            + self.key_press.len()
            + self.key_char.len()
    }

    /// Events dropped over the engine's lifetime, across all queues.
    pub fn dropped(&self) -> u64 {
        self.mouse_button.dropped()
            + self.mouse_position.dropped()
            + self.mouse_scroll.dropped()
            + self.key_press.dropped()
            + self.key_char.dropped()
    }

    /// Logs one warning per queue that overflowed since the last report.
    pub fn report_drops(&mut self) {
        let counts = [
            ("mouse button", self.mouse_button.take_dropped()),
            ("mouse position", self.mouse_position.take_dropped()),
            ("mouse scroll", self.mouse_scroll.take_dropped()),
            ("key press", self.key_press.take_dropped()),
            ("key char", self.key_char.take_dropped()),
        ];
        for (queue, n) in counts {
            if n > 0 {
                log::warn!("{queue} queue overflowed, dropped {n} oldest events; drain it every frame");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyAction, MouseButton};

    fn key(code: i32) -> InputEvent {
        InputEvent::Key(KeyInput {
            key: code,
            scancode: 0,
            action: KeyAction::Press,
            modifiers: Modifiers::default(),
        })
    }

    // ── routing ───────────────────────────────────────────────────────────

    #[test]
    fn queues_are_independent() {
        let mut q = InputQueues::new(8);
        q.push(key(65));
        q.push(InputEvent::MouseButton(MouseButtonInput {
            button: MouseButton::Left,
            action: KeyAction::Press,
            modifiers: Modifiers::default(),
        }));

        assert!(q.next_mouse_button().is_some());
        assert!(q.next_mouse_button().is_none());
        assert_eq!(q.next_key_press().map(|k| k.key), Some(65));
    }

    #[test]
    fn position_updates_cursor() {
        let mut q = InputQueues::new(8);
        q.push(InputEvent::MousePosition(MousePosition { x: 10, y: 20 }));
        assert_eq!(q.cursor, Some((10.0, 20.0)));
        assert_eq!(q.pending(), 1);
    }

    // ── draining ──────────────────────────────────────────────────────────

    #[test]
    fn drains_in_arrival_order_then_empty() {
        let mut q = InputQueues::new(8);
        for c in ['n', 'o', 'v', 'a'] {
            q.push(InputEvent::Char(CharInput(c)));
        }
        let drained: String = std::iter::from_fn(|| q.next_key_char()).map(|c| c.0).collect();
        assert_eq!(drained, "nova");
        assert!(q.next_key_char().is_none());
    }

    #[test]
    fn overflow_is_counted_per_queue() {
        let mut q = InputQueues::new(2);
        for code in 0..5 {
            q.push(key(code));
        }
        assert_eq!(q.dropped(), 3);
        assert_eq!(q.next_key_press().map(|k| k.key), Some(3));
        q.report_drops();
        assert_eq!(q.pending(), 1);
    }
}
