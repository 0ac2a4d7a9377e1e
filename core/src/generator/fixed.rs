use std::collections::VecDeque;

use super::*;

/// Replays preset layouts in order, then keeps repeating the last one.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedLayoutGenerator {
    queue: VecDeque<MineSet>,
    last: MineSet,
}

impl FixedLayoutGenerator {
    pub fn new(layout: MineSet) -> Self {
        Self {
            queue: VecDeque::from([layout.clone()]),
            last: layout,
        }
    }

    pub fn from_indices(indices: &[CellIndex]) -> Result<Self> {
        MineSet::from_indices(indices).map(Self::new)
    }

    /// Queues `layout` to be handed out after the ones already queued.
    pub fn then(mut self, layout: MineSet) -> Self {
        self.queue.push_back(layout);
        self
    }
}

impl LayoutGenerator for FixedLayoutGenerator {
    /// A preset with the wrong mine count is rejected and stays queued.
    fn generate(&mut self, mine_count: CellCount) -> Result<MineSet> {
        let next = self.queue.front().unwrap_or(&self.last);
        if next.mine_count() != mine_count {
            log::warn!(
                "Preset layout has {} mines, requested {}",
                next.mine_count(),
                mine_count
            );
            return Err(GameError::InvalidLayout(mine_count));
        }

        if let Some(next) = self.queue.pop_front() {
            self.last = next;
        }
        Ok(self.last.clone())
    }
}
