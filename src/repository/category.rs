use crate::{
    domain::category::Category,
    repository::{CategoryReader, RepositoryResult, StaticRepository},
};

impl CategoryReader for StaticRepository {
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        Ok(self
            .catalog()
            .categories
            .iter()
            .find(|category| category.slug == slug)
            .cloned())
    }

    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.catalog().categories.clone())
    }
}
