//! Product catalog listing shaped for the home screen

use std::sync::Arc;

use crate::api::{ProductRecord, ProductSource};
use crate::error::Result;
use crate::types::{ExerciseItem, ExerciseStatus};

pub struct CatalogService {
    source: Arc<dyn ProductSource>,
    limit: u32,
}

impl CatalogService {
    pub fn new(source: Arc<dyn ProductSource>, limit: u32) -> Self {
        Self { source, limit }
    }

    /// Fetch and shape the listing; failures are returned, not masked
    pub async fn list(&self) -> Result<Vec<ExerciseItem>> {
        let products = self.source.products(self.limit).await?;
        tracing::debug!(count = products.len(), "Catalog loaded");
        Ok(products.into_iter().map(shape_product).collect())
    }
}

pub fn shape_product(product: ProductRecord) -> ExerciseItem {
    ExerciseItem {
        id: product.id_string(),
        title: product.title,
        description: product.description,
        muscle: None,
        difficulty: None,
        exercise_type: None,
        equipment: None,
        status: ExerciseStatus::from_rating(product.rating),
        image: product.thumbnail,
    }
}
