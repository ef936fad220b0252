use crate::{
    core::category_index::{CategoryIndex, ChainBreak},
    domain::{Flow, LedgerTransaction},
    errors::AggregationError,
};

pub struct FlowService;

impl FlowService {
    /// Rolls every transaction value up its category's ancestor chain.
    ///
    /// Flows come back in category order. Both income and expense chains end
    /// at the shared root, so the first root's value is halved afterwards.
    pub fn rollup<'d, I>(
        index: &CategoryIndex<'_>,
        transactions: I,
    ) -> Result<Vec<Flow>, AggregationError>
    where
        I: IntoIterator<Item = &'d LedgerTransaction>,
    {
        let mut flows: Vec<Flow> = (0..index.len())
            .map(|position| Flow::from_category(index.get(position)))
            .collect();

        for txn in transactions {
            let Some(position) = index.position(&txn.category_id) else {
                continue;
            };
            flows[position].value += txn.value;
            for ancestor in index.ancestors(position) {
                let ancestor = ancestor.map_err(|chain| Self::chain_error(index, chain))?;
                flows[ancestor].value += txn.value;
            }
        }

        if let Some(root) = (0..index.len()).find(|position| index.get(*position).is_root()) {
            flows[root].value /= 2.0;
        }
        Ok(flows)
    }

    fn chain_error(index: &CategoryIndex<'_>, chain: ChainBreak) -> AggregationError {
        match chain {
            ChainBreak::Unresolved(position) => {
                let category = index.get(position);
                AggregationError::UnresolvedParent {
                    category_id: category.id.clone(),
                    parent: category.parent_ref().unwrap_or_default().to_string(),
                }
            }
            ChainBreak::Cycle(position) => AggregationError::ParentCycle {
                category_id: index.get(position).id.clone(),
            },
        }
    }
}
