//! Operations for callers whose keys and values may be missing.
//!
//! Each method mirrors a `ProbingTable` operation but takes `Option`
//! arguments. A `None` where a key or value is required is rejected with
//! `ProbeError::InvalidArgument` before any hashing happens.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use crate::error::{ProbeError, Result};
use crate::table::ProbingTable;

const ABSENT_KEY: ProbeError = ProbeError::InvalidArgument("key must not be absent");
const ABSENT_VALUE: ProbeError = ProbeError::InvalidArgument("value must not be absent");

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// `insert` for a possibly missing key or value. The key is checked first.
    pub fn try_insert(&mut self, key: Option<K>, value: Option<V>) -> Result<bool> {
        let key = key.ok_or(ABSENT_KEY)?;
        let value = value.ok_or(ABSENT_VALUE)?;
        Ok(self.insert(key, value))
    }

    pub fn try_find<Q>(&self, key: Option<&Q>) -> Result<Option<&V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = key.ok_or(ABSENT_KEY)?;
        Ok(self.find(key))
    }

    pub fn try_delete<Q>(&mut self, key: Option<&Q>) -> Result<bool>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let key = key.ok_or(ABSENT_KEY)?;
        Ok(self.delete(key))
    }

    /// Home index of `key`, or `-1` when there is no key
    pub fn hash_index_of<Q>(&self, key: Option<&Q>) -> i64
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        key.map_or(-1, |key| self.hash_index(key) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::{IdentityState, init_test_logger};

    #[test]
    fn test_absent_arguments_are_rejected() {
        init_test_logger();
        let mut table: ProbingTable<String, String> = ProbingTable::new();

        assert_eq!(
            table.try_insert(None, Some("v".to_string())),
            Err(ProbeError::InvalidArgument("key must not be absent"))
        );
        assert_eq!(
            table.try_insert(Some("k".to_string()), None),
            Err(ProbeError::InvalidArgument("value must not be absent"))
        );
        assert_eq!(table.try_insert(None, None), Err(ABSENT_KEY));
        assert_eq!(table.try_find::<str>(None), Err(ABSENT_KEY));
        assert_eq!(table.try_delete::<str>(None), Err(ABSENT_KEY));

        // rejected calls leave the table untouched
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 3);
    }

    #[test]
    fn test_present_arguments_pass_through() {
        let mut table: ProbingTable<String, u32> = ProbingTable::new();

        assert_eq!(table.try_insert(Some("k".to_string()), Some(1)), Ok(true));
        assert_eq!(table.try_insert(Some("k".to_string()), Some(2)), Ok(false));
        assert_eq!(table.try_find(Some("k")), Ok(Some(&1)));
        assert_eq!(table.try_delete(Some("k")), Ok(true));
        assert_eq!(table.try_delete(Some("k")), Ok(false));
        assert_eq!(table.try_find(Some("k")), Ok(None));
    }

    #[test]
    fn test_hash_index_of_absent_key_is_negative_one() {
        let table: ProbingTable<u64, u64, IdentityState> = ProbingTable::default();

        assert_eq!(table.hash_index_of::<u64>(None), -1);
        assert_eq!(table.hash_index_of(Some(&7u64)), 1);
    }
}
