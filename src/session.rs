use crate::market::{Segment, Timeframe};

/// Per-session filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub segment: Segment,
    pub timeframe: Timeframe,
    pub fetch_requested: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            segment: Segment::default(),
            timeframe: Timeframe::default(),
            fetch_requested: true,
        }
    }
}

impl Selection {
    pub fn new(segment: Segment, timeframe: Timeframe, fetch_on_load: bool) -> Self {
        Self {
            segment,
            timeframe,
            fetch_requested: fetch_on_load,
        }
    }

    pub fn request_fetch(&mut self) {
        self.fetch_requested = true;
    }

    /// Returns true when the value actually changed.
    pub fn set_segment(&mut self, segment: Segment) -> bool {
        let changed = self.segment != segment;
        self.segment = segment;
        changed
    }

    pub fn set_timeframe(&mut self, timeframe: Timeframe) -> bool {
        let changed = self.timeframe != timeframe;
        self.timeframe = timeframe;
        changed
    }
}
