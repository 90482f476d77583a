//! Tests for reading domain lists from files.

use domain_validator::input::read_domain_list;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_list_with_comments_and_blanks() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "# storefronts\nshop.example\n\n  api.example\t\n# retired\n#old.example\nstatus.example"
    )
    .unwrap();

    let domains = read_domain_list(file.path()).await.unwrap();
    assert_eq!(domains, vec!["shop.example", "api.example", "status.example"]);
}

#[tokio::test]
async fn test_empty_list() {
    let file = NamedTempFile::new().unwrap();
    let domains = read_domain_list(file.path()).await.unwrap();
    assert!(domains.is_empty());
}

#[tokio::test]
async fn test_missing_list_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");
    assert!(read_domain_list(&path).await.is_err());
}
