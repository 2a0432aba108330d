use std::io::Write;

use tempfile::NamedTempFile;

use zenith_finds::repository::{
    BlogPostReader, CategoryReader, ProductReader, RepositoryError, StaticRepository,
};

#[test]
fn catalog_file_on_disk_replaces_bundled_data() {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(
        file,
        r#"{{
            "categories": [
                {{"id": "c1", "name": "Garden", "slug": "garden", "description": "Grow", "image": "g.jpg"}}
            ],
            "products": [
                {{"id": "hose", "title": "Flexi Hose", "category": "garden", "price": 19.5,
                  "originalPrice": 25.0, "rating": 4.2, "reviewCount": 12, "image": "h.jpg",
                  "shortDescription": "Light hose", "fullDescription": "A light hose.",
                  "affiliateLink": "https://example.com/hose", "isFeatured": true}}
            ],
            "blogPosts": []
        }}"#
    )
    .expect("write catalog");

    let repo = StaticRepository::from_path(file.path()).expect("catalog loads");

    let hose = repo
        .get_product_by_id("hose")
        .expect("lookup succeeds")
        .expect("product exists");
    assert_eq!(hose.discount_percent(), Some(22));
    assert!(hose.is_featured);
    assert!(hose.gallery.is_empty());
    assert_eq!(
        repo.get_category_by_slug("garden")
            .expect("lookup succeeds")
            .map(|c| c.name),
        Some("Garden".to_string())
    );
    assert!(repo.list_blog_posts(None).expect("list succeeds").is_empty());
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("create temp dir");

    let result = StaticRepository::from_path(dir.path().join("absent.json"));

    assert!(matches!(result, Err(RepositoryError::Io(_))));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(b"{ not json").expect("write catalog");

    let result = StaticRepository::from_path(file.path());

    assert!(matches!(result, Err(RepositoryError::Parse(_))));
}
