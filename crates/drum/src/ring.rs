/// Sentinel slots padded before and after the items of a finite ring.
pub const PADDING: usize = 3;

/// Replication factor for infinite rings; short lists get more copies.
pub fn loop_size(length: usize) -> usize {
    let bits = (usize::BITS - length.leading_zeros()).max(1);
    1 << (3 - bits.min(3))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSlot {
    /// Index into the host's item list; `None` for a sentinel.
    pub item: Option<usize>,
    pub depth: i64,
}

impl RingSlot {
    pub fn is_sentinel(&self) -> bool {
        self.item.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingMode {
    Finite,
    Infinite { loop_size: usize },
}

/// Circular sequence of slots. Physical order is `slots[(head + i) % len]`,
/// so rotating the ring only moves `head`.
#[derive(Debug, Clone)]
pub struct Ring {
    slots: Vec<RingSlot>,
    head: usize,
    length: usize,
    mode: RingMode,
    in_motion: bool,
}

impl Ring {
    pub fn build(length: usize, infinite: bool, value: usize) -> Self {
        let (mode, slots) = if infinite {
            let loop_size = loop_size(length);
            let slots = (0..length * loop_size * 2)
                .map(|i| RingSlot {
                    item: Some(i % length),
                    depth: 0,
                })
                .collect();
            (RingMode::Infinite { loop_size }, slots)
        } else {
            let sentinel = RingSlot {
                item: None,
                depth: 0,
            };
            let slots = std::iter::repeat_n(sentinel, PADDING)
                .chain((0..length).map(|i| RingSlot {
                    item: Some(i),
                    depth: 0,
                }))
                .chain(std::iter::repeat_n(sentinel, PADDING))
                .collect();
            (RingMode::Finite, slots)
        };

        let mut ring = Self {
            slots,
            head: 0,
            length,
            mode,
            in_motion: false,
        };
        if infinite {
            ring.rotate(value as i64, value);
        } else {
            ring.retag(value, 0);
        }
        ring
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn mode(&self) -> RingMode {
        self.mode
    }

    pub fn is_in_motion(&self) -> bool {
        self.in_motion
    }

    /// Slot at a physical position, counted from the top of the ring.
    pub fn get(&self, physical: usize) -> Option<&RingSlot> {
        (physical < self.slots.len()).then(|| &self.slots[self.index(physical)])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RingSlot> + '_ {
        (0..self.slots.len()).map(|i| &self.slots[self.index(i)])
    }

    pub fn items(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.iter().map(|s| s.item)
    }

    fn index(&self, physical: usize) -> usize {
        (self.head + physical) % self.slots.len()
    }

    /// Physical index of the slot drawn at the visual center.
    ///
    /// `nth` is the offset of an infinite ring from its rest position; finite
    /// rings are centered on `value` directly.
    pub fn center(&self, value: usize, nth: i64) -> i64 {
        match self.mode {
            RingMode::Infinite { loop_size } => (self.length * loop_size) as i64 + nth,
            // no slot of an empty ring may sit at the center
            RingMode::Finite if self.length == 0 => self.slots.len() as i64,
            RingMode::Finite => (PADDING + value) as i64,
        }
    }

    pub fn retag(&mut self, value: usize, nth: i64) {
        let center = self.center(value, nth);
        for i in 0..self.slots.len() {
            let idx = self.index(i);
            self.slots[idx].depth = i as i64 - center;
        }
    }

    /// Re-tags depths for a rotation that has just started.
    pub fn begin_motion(&mut self, value: usize, nth: i64) {
        self.retag(value, nth);
        self.in_motion = true;
    }

    /// Moves `steps` slots from the front to the back (or back to front when
    /// negative) and settles the depths around the rest center.
    pub fn rotate(&mut self, steps: i64, value: usize) {
        if !self.slots.is_empty() {
            let len = self.slots.len() as i64;
            self.head = (self.head as i64 + steps).rem_euclid(len) as usize;
        }
        self.retag(value, 0);
        self.in_motion = false;
    }

    pub fn settle(&mut self, value: usize) {
        self.retag(value, 0);
        self.in_motion = false;
    }

    pub fn centered(&self) -> Option<&RingSlot> {
        self.iter().find(|s| s.depth == 0)
    }
}
