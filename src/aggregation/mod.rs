pub mod group_map;
pub mod ranking;
pub mod reducers;

use std::collections::BTreeMap;

use crate::record::ContractRecord;
pub use group_map::GroupMap;
pub use ranking::{top_n, top_n_by, RankValue};
pub use reducers::{
    dashboard_reducers, GroupTotals, BY_ADMINISTRATION, BY_AI_CATEGORY, BY_PNRR, BY_SECTOR,
    BY_YEAR, NON_PNRR_LABEL, PNRR_LABEL,
};

type KeyFn<'f> = Box<dyn Fn(&ContractRecord) -> &str + 'f>;
type UpdateFn<'f, V> = Box<dyn Fn(&mut V, &ContractRecord) + 'f>;

/// A named group-by: how to key a record, how to fold it in, and where
/// each group starts.
pub struct Reducer<'f, V> {
    name: String,
    key: KeyFn<'f>,
    update: UpdateFn<'f, V>,
    initial: V,
}

impl<'f, V: Clone> Reducer<'f, V> {
    pub fn new<K, U>(name: impl Into<String>, key: K, update: U, initial: V) -> Self
    where
        K: Fn(&ContractRecord) -> &str + 'f,
        U: Fn(&mut V, &ContractRecord) + 'f,
    {
        Self {
            name: name.into(),
            key: Box::new(key),
            update: Box::new(update),
            initial,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Reducer name -> that reducer's group map.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregates<V> {
    groups: BTreeMap<String, GroupMap<V>>,
}

impl<V> Aggregates<V> {
    pub fn get(&self, name: &str) -> Option<&GroupMap<V>> {
        self.groups.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Run every reducer over `records` in a single traversal.
///
/// Every reducer name is present in the output, with an empty map when
/// there were no records. Keys are compared by exact string equality,
/// sentinels included. If two reducers share a name the later one wins.
pub fn aggregate<'r, V, I>(records: I, reducers: &[Reducer<'_, V>]) -> Aggregates<V>
where
    V: Clone,
    I: IntoIterator<Item = &'r ContractRecord>,
{
    let mut maps: Vec<GroupMap<V>> = reducers.iter().map(|_| GroupMap::new()).collect();

    for record in records {
        for (reducer, map) in reducers.iter().zip(maps.iter_mut()) {
            let key = (reducer.key)(record);
            let acc = map.entry_or_insert_with(key, || reducer.initial.clone());
            (reducer.update)(acc, record);
        }
    }

    let groups = reducers
        .iter()
        .zip(maps)
        .map(|(reducer, map)| (reducer.name.clone(), map))
        .collect();

    Aggregates { groups }
}
