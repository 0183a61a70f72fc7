use crate::{
    abstract_trait::product::repository::{DynProductRepository, ProductRepositoryTrait},
    model::product::Product as ProductModel,
};
use async_trait::async_trait;
use shared::{
    abstract_trait::StoreConnectorTrait, config::ConnectionTarget, errors::ConnectionError,
    errors::RepositoryError,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

#[derive(Debug, Clone, Copy)]
pub enum Failure {
    Unavailable,
    Custom,
}

impl Failure {
    fn into_error(self) -> RepositoryError {
        match self {
            Failure::Unavailable => RepositoryError::Unavailable("connection reset".into()),
            Failure::Custom => RepositoryError::Custom("write rejected".into()),
        }
    }
}

/// Products kept in memory, ordered the way the store orders them.
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<ProductModel>>,
    fail_next: Mutex<Option<Failure>>,
}

impl InMemoryProductRepository {
    pub fn fail_next(&self, failure: Failure) {
        *self.fail_next.lock().unwrap() = Some(failure);
    }

    pub fn len(&self) -> usize {
        self.products.lock().unwrap().len()
    }

    fn take_failure(&self) -> Result<(), RepositoryError> {
        match self.fail_next.lock().unwrap().take() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductRepositoryTrait for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        self.take_failure()?;

        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(products)
    }

    async fn insert_many(
        &self,
        products: Vec<ProductModel>,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        self.take_failure()?;

        self.products.lock().unwrap().extend(products.iter().cloned());
        Ok(products)
    }
}

/// Hands out the shared in-memory repository and counts connect calls.
pub struct InMemoryConnector {
    pub repository: Arc<InMemoryProductRepository>,
    calls: AtomicUsize,
    refuse: AtomicBool,
}

impl InMemoryConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            repository: Arc::new(InMemoryProductRepository::default()),
            calls: AtomicUsize::new(0),
            refuse: AtomicBool::new(false),
        })
    }

    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnectorTrait for InMemoryConnector {
    type Handle = DynProductRepository;

    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<DynProductRepository, ConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.refuse.load(Ordering::SeqCst) {
            return Err(ConnectionError::Unreachable(format!(
                "connection refused by {}",
                target.redacted_uri()
            )));
        }

        Ok(self.repository.clone())
    }
}
