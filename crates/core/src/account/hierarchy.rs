//! Parent/child account index for statement rollups.
//!
//! Built once per request from the full account list, then queried for
//! descendant-leaf rollups. This avoids repeated recursive lookups while
//! deriving statements.

use std::collections::HashMap;

use partida_shared::types::AccountId;
use rust_decimal::Decimal;

use super::types::Account;

/// Index over the account hierarchy.
pub struct AccountIndex<'a> {
    by_id: HashMap<AccountId, &'a Account>,
    children: HashMap<AccountId, Vec<AccountId>>,
}

impl<'a> AccountIndex<'a> {
    /// Builds the index from a slice of accounts.
    #[must_use]
    pub fn build(accounts: &'a [Account]) -> Self {
        let mut by_id = HashMap::with_capacity(accounts.len());
        let mut children: HashMap<AccountId, Vec<AccountId>> = HashMap::new();

        for account in accounts {
            by_id.insert(account.id, account);
            if let Some(parent) = account.parent {
                children.entry(parent).or_default().push(account.id);
            }
        }
        // Deterministic traversal order: children sorted by code.
        for ids in children.values_mut() {
            ids.sort_by_key(|id| by_id.get(id).map(|a| a.code.clone()));
        }

        Self { by_id, children }
    }

    /// Looks up an account by ID.
    #[must_use]
    pub fn account(&self, id: AccountId) -> Option<&'a Account> {
        self.by_id.get(&id).copied()
    }

    /// Returns the direct children of an account.
    #[must_use]
    pub fn children(&self, id: AccountId) -> &[AccountId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Returns all movement-accepting descendants of an account, including
    /// the account itself if it accepts movements.
    #[must_use]
    pub fn descendant_leaves(&self, id: AccountId) -> Vec<&'a Account> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(account) = self.account(current) {
                if account.accepts_movements {
                    leaves.push(account);
                }
            }
            stack.extend(self.children(current).iter().copied());
        }
        leaves
    }

    /// Sums the balances of all descendant leaves under an account.
    ///
    /// Leaves missing from the balance map contribute zero - the map only
    /// holds accounts with activity.
    #[must_use]
    pub fn rollup(&self, id: AccountId, leaf_balances: &HashMap<AccountId, Decimal>) -> Decimal {
        self.descendant_leaves(id)
            .iter()
            .filter_map(|leaf| leaf_balances.get(&leaf.id))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::types::{AccountStatus, AccountType};
    use rust_decimal_macros::dec;

    fn make_account(
        code: &str,
        level: u8,
        parent: Option<AccountId>,
        accepts_movements: bool,
    ) -> Account {
        Account {
            id: AccountId::new(),
            code: code.to_string(),
            name: code.to_string(),
            account_type: AccountType::Asset,
            level,
            parent,
            accepts_movements,
            status: AccountStatus::Active,
        }
    }

    /// 1 (group) -> 1.1 (group) -> {1.1.01, 1.1.02}, and 1 -> 1.2 (leaf).
    fn make_tree() -> Vec<Account> {
        let root = make_account("1", 1, None, false);
        let group = make_account("1.1", 2, Some(root.id), false);
        let leaf_a = make_account("1.1.01", 3, Some(group.id), true);
        let leaf_b = make_account("1.1.02", 3, Some(group.id), true);
        let leaf_c = make_account("1.2", 2, Some(root.id), true);
        vec![root, group, leaf_a, leaf_b, leaf_c]
    }

    #[test]
    fn test_descendant_leaves_skip_grouping_accounts() {
        let accounts = make_tree();
        let index = AccountIndex::build(&accounts);

        let mut codes: Vec<_> = index
            .descendant_leaves(accounts[0].id)
            .iter()
            .map(|a| a.code.clone())
            .collect();
        codes.sort();
        assert_eq!(codes, vec!["1.1.01", "1.1.02", "1.2"]);
    }

    #[test]
    fn test_leaf_is_its_own_descendant() {
        let accounts = make_tree();
        let index = AccountIndex::build(&accounts);

        let leaves = index.descendant_leaves(accounts[4].id);
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].code, "1.2");
    }

    #[test]
    fn test_rollup_sums_descendant_leaves() {
        let accounts = make_tree();
        let index = AccountIndex::build(&accounts);

        let mut balances = HashMap::new();
        balances.insert(accounts[2].id, dec!(100.00));
        balances.insert(accounts[3].id, dec!(50.00));
        balances.insert(accounts[4].id, dec!(25.00));

        assert_eq!(index.rollup(accounts[0].id, &balances), dec!(175.00));
        assert_eq!(index.rollup(accounts[1].id, &balances), dec!(150.00));
        assert_eq!(index.rollup(accounts[4].id, &balances), dec!(25.00));
    }

    #[test]
    fn test_rollup_missing_leaves_are_zero() {
        let accounts = make_tree();
        let index = AccountIndex::build(&accounts);

        let balances = HashMap::new();
        assert_eq!(index.rollup(accounts[0].id, &balances), dec!(0));
    }
}
