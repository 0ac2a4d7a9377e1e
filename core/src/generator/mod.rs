use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of mine layouts for new rounds.
///
/// Implementations must hand back exactly `mine_count` mines or fail with
/// [`GameError::InvalidLayout`].
pub trait LayoutGenerator {
    fn generate(&mut self, mine_count: CellCount) -> Result<MineSet>;
}

impl<G: LayoutGenerator + ?Sized> LayoutGenerator for &mut G {
    fn generate(&mut self, mine_count: CellCount) -> Result<MineSet> {
        (**self).generate(mine_count)
    }
}

impl<G: LayoutGenerator + ?Sized> LayoutGenerator for Box<G> {
    fn generate(&mut self, mine_count: CellCount) -> Result<MineSet> {
        (**self).generate(mine_count)
    }
}
