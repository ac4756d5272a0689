use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use foerdercheck_core::{Email, RegistryError, VerifiedEmailRegistry};

#[derive(Debug, Default, Clone)]
pub struct HashSetVerifiedEmailRegistry {
    verified: Arc<RwLock<HashSet<Email>>>,
}

impl HashSetVerifiedEmailRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VerifiedEmailRegistry for HashSetVerifiedEmailRegistry {
    async fn mark_verified(&self, email: &Email) -> Result<(), RegistryError> {
        let mut verified = self.verified.write().await;
        verified.insert(email.clone());
        Ok(())
    }

    async fn is_verified(&self, email: &Email) -> Result<bool, RegistryError> {
        let verified = self.verified.read().await;
        Ok(verified.contains(email))
    }
}
