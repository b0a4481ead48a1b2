//! Ordered, uniquely identified collection of accounts

use crate::accounts::Account;
use crate::types::EXAMPLE_SECRET;
use std::collections::BTreeSet;
use tracing::{debug, warn};
use uuid::Uuid;

/// Accounts in display order
///
/// The list is owned by the caller and passed to whatever needs it.
/// Ids are unique: adding an account whose id is already present
/// assigns it a fresh one.
#[derive(Debug, Clone, Default)]
pub struct AccountList {
    accounts: Vec<Account>,
}

impl AccountList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an account, returning a reference to the stored entry
    pub fn add_account(&mut self, mut account: Account) -> &Account {
        if self.get(account.id).is_some() {
            let fresh = Uuid::new_v4();
            warn!("Duplicate account id {}, reassigned to {}", account.id, fresh);
            account.id = fresh;
        }
        debug!("Added account {}", account.id);
        self.accounts.push(account);
        &self.accounts[self.accounts.len() - 1]
    }

    /// Append a placeholder account named after its position
    pub fn add_example_account(&mut self) -> &Account {
        let name = format!("Example Account {}", self.accounts.len() + 1);
        self.add_account(Account::new(name, EXAMPLE_SECRET))
    }

    /// Remove the accounts at the given positions
    ///
    /// Offsets refer to positions before removal. Out-of-range and repeated
    /// offsets are ignored. Returns the number of accounts removed.
    pub fn remove_at_offsets(&mut self, offsets: &[usize]) -> usize {
        let offsets: BTreeSet<usize> = offsets
            .iter()
            .copied()
            .filter(|&i| i < self.accounts.len())
            .collect();

        for &index in offsets.iter().rev() {
            let removed = self.accounts.remove(index);
            debug!("Removed account {}", removed.id);
        }

        offsets.len()
    }

    /// Look up an account by id
    pub fn get(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl<'a> IntoIterator for &'a AccountList {
    type Item = &'a Account;
    type IntoIter = std::slice::Iter<'a, Account>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
