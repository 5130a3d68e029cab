//! Smart meter to price plan account mapping

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Maps smart meter ids to the id of the price plan their account is on.
#[derive(Clone)]
pub struct AccountStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Associate a smart meter with a price plan
    pub async fn assign(&self, smart_meter_id: &str, plan_id: &str) {
        let mut map = self.inner.write().await;
        map.insert(smart_meter_id.to_string(), plan_id.to_string());
    }

    /// Price plan id for a smart meter, or `None` when no account exists
    pub async fn plan_id_for(&self, smart_meter_id: &str) -> Option<String> {
        let map = self.inner.read().await;
        map.get(smart_meter_id).cloned()
    }

    /// All smart meter ids with an account
    pub async fn meter_ids(&self) -> Vec<String> {
        let map = self.inner.read().await;
        map.keys().cloned().collect()
    }
}

impl Default for AccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assign_and_look_up_plan() {
        let store = AccountStore::new();
        store.assign("smart-meter-0", "price-plan-0").await;
        assert_eq!(
            store.plan_id_for("smart-meter-0").await.as_deref(),
            Some("price-plan-0")
        );
    }

    #[tokio::test]
    async fn test_unknown_meter_has_no_plan() {
        let store = AccountStore::new();
        assert!(store.plan_id_for("smart-meter-9").await.is_none());
    }
}
