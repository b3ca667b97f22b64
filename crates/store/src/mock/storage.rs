use async_trait::async_trait;
use eyre::Result;
use mockall::mock;

use crate::storage::Storage;

// Mock storage backend for exercising failure paths in tests
mock! {
    pub Storage {}

    #[async_trait]
    impl Storage for Storage {
        async fn get(&self, key: &str) -> Result<Option<String>>;
        async fn set(&self, key: &str, value: &str) -> Result<()>;
        async fn remove(&self, key: &str) -> Result<()>;
    }
}
