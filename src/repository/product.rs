use crate::{
    domain::product::{Product, ProductListQuery},
    repository::{ProductReader, RepositoryResult, StaticRepository},
};

impl ProductReader for StaticRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<Product>> {
        Ok(self
            .catalog()
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }

    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<Vec<Product>> {
        let matching = self
            .catalog()
            .products
            .iter()
            .filter(|product| query.matches(product))
            .cloned();

        let items = match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        };

        Ok(items)
    }
}
