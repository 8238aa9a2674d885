/// Pointer transition on an arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Enter(usize),
    Leave(usize),
}

/// Turns successive pick results into enter/leave events.
///
/// One event per actual change, no debouncing: moving straight from one
/// arrow to another yields `Leave(old)` followed by `Enter(new)`.
#[derive(Debug, Default)]
pub struct HoverTracker {
    current: Option<usize>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Feed the arrow under the pointer (if any) and get the transitions
    pub fn update(&mut self, picked: Option<usize>) -> Vec<HoverEvent> {
        if picked == self.current {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(old) = self.current {
            events.push(HoverEvent::Leave(old));
        }
        if let Some(new) = picked {
            events.push(HoverEvent::Enter(new));
        }
        self.current = picked;
        events
    }

    /// Forget the hovered arrow, e.g. when arrows are hidden
    pub fn clear(&mut self) -> Option<HoverEvent> {
        self.current.take().map(HoverEvent::Leave)
    }
}
