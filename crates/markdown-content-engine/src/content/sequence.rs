use std::ops::Deref;
use std::sync::Arc;

use crate::blocks::Block;

/// Immutable, ordered list of blocks backing a [`Content`](super::Content).
///
/// Storage is shared, so clones are cheap and the sequence can be read from
/// several threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSequence(Arc<[Block]>);

impl BlockSequence {
    /// Collects the direct children of every block, in order.
    ///
    /// Returns `None` when no block contributed any child.
    pub fn flatten_children(&self) -> Option<BlockSequence> {
        let children: Vec<Block> = self
            .0
            .iter()
            .flat_map(|block| block.children())
            .cloned()
            .collect();
        if children.is_empty() {
            None
        } else {
            Some(BlockSequence::from(children))
        }
    }

    /// Concatenates sequences in order.
    pub fn concat<'s>(sequences: impl IntoIterator<Item = &'s BlockSequence>) -> BlockSequence {
        let blocks: Vec<Block> = sequences
            .into_iter()
            .flat_map(|sequence| sequence.iter().cloned())
            .collect();
        BlockSequence::from(blocks)
    }
}

impl Default for BlockSequence {
    fn default() -> Self {
        BlockSequence(Arc::from(Vec::new()))
    }
}

impl Deref for BlockSequence {
    type Target = [Block];

    fn deref(&self) -> &[Block] {
        &self.0
    }
}

impl From<Vec<Block>> for BlockSequence {
    fn from(blocks: Vec<Block>) -> Self {
        BlockSequence(Arc::from(blocks))
    }
}

impl FromIterator<Block> for BlockSequence {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        BlockSequence(iter.into_iter().collect())
    }
}

impl<'s> IntoIterator for &'s BlockSequence {
    type Item = &'s Block;
    type IntoIter = std::slice::Iter<'s, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ListItem;

    #[test]
    fn leaf_only_sequence_has_no_children() {
        let sequence = BlockSequence::from(vec![Block::paragraph("a"), Block::ThematicBreak]);
        assert_eq!(sequence.flatten_children(), None);
    }

    #[test]
    fn flattening_is_one_level_deep() {
        let inner = Block::BlockQuote(vec![Block::paragraph("deep")]);
        let sequence = BlockSequence::from(vec![Block::BlockQuote(vec![inner.clone()])]);
        let children = sequence.flatten_children().unwrap();
        assert_eq!(&*children, &[inner]);
    }

    #[test]
    fn flattening_preserves_order_across_blocks() {
        let sequence = BlockSequence::from(vec![
            Block::BlockQuote(vec![Block::paragraph("a"), Block::paragraph("b")]),
            Block::paragraph("skipped"),
            Block::BulletedList {
                tight: true,
                items: vec![ListItem::new(vec![Block::paragraph("c")])],
            },
        ]);
        let children = sequence.flatten_children().unwrap();
        assert_eq!(
            &*children,
            &[
                Block::paragraph("a"),
                Block::paragraph("b"),
                Block::paragraph("c"),
            ]
        );
    }

    #[test]
    fn concat_keeps_argument_order() {
        let first = BlockSequence::from(vec![Block::paragraph("1")]);
        let empty = BlockSequence::default();
        let second = BlockSequence::from(vec![Block::paragraph("2")]);
        let joined = BlockSequence::concat([&first, &empty, &second]);
        assert_eq!(&*joined, &[Block::paragraph("1"), Block::paragraph("2")]);
    }
}
