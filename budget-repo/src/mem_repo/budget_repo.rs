use crate::budget_repo::{newest_first, Budget, BudgetRepo, BudgetRepoError, NewBudget};
use crate::user_repo::UserId;
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    budgets: HashMap<i32, Budget>,
    user_budgets: HashMap<UserId, HashSet<i32>>,
    next_id: i32,
}

pub struct MemBudgetRepo {
    state: RwLock<State>,
}

impl MemBudgetRepo {
    pub fn new() -> MemBudgetRepo {
        let state = State {
            budgets: HashMap::new(),
            user_budgets: HashMap::new(),
            next_id: 1,
        };
        MemBudgetRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

#[async_trait]
impl BudgetRepo for MemBudgetRepo {
    async fn create_budget(
        &self,
        user_id: UserId,
        new_budget: NewBudget,
    ) -> Result<Budget, BudgetRepoError> {
        let mut write_guard = self.write_lock()?;

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let budget = new_budget.to_budget(id, user_id, Utc::now());

        write_guard.budgets.insert(id, budget.clone());
        write_guard
            .user_budgets
            .entry(user_id)
            .or_insert_with(HashSet::new)
            .insert(id);

        Ok(budget)
    }

    async fn get_budgets(&self, user_id: UserId) -> Result<Vec<Budget>, BudgetRepoError> {
        let read_guard = self.read_lock()?;

        let Some(budget_ids) = read_guard.user_budgets.get(&user_id) else {
            return Ok(Vec::new());
        };

        let mut budgets: Vec<Budget> = budget_ids
            .iter()
            .map(|id| {
                read_guard
                    .budgets
                    .get(id)
                    .expect("budgets should have all the ids from user_budgets")
            })
            .cloned()
            .collect();
        budgets.sort_by(newest_first);

        Ok(budgets)
    }
}
