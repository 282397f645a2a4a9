//! Menu catalog: the `menu.data` file listing the slideshow categories.
//!
//! Each row is `id:directory:enabled:name[:description]`. Only rows with
//! `enabled == 1` become categories, in file order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::constants::MENU_FILE_NAME;
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    /// Image directory, already resolved against the catalog root.
    pub directory: PathBuf,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

/// Result of parsing a catalog document. Rows that failed to parse are kept
/// aside so the caller can report them without losing the good rows.
#[derive(Debug, Default)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub rejected: Vec<CatalogError>,
}

pub fn parse_catalog(root: &Path, text: &str) -> Catalog {
    let mut catalog = Catalog::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_row(root, index + 1, line) {
            Ok(Some(category)) => catalog.categories.push(category),
            Ok(None) => {}
            Err(e) => catalog.rejected.push(e),
        }
    }

    catalog
}

// Ok(None) means the row is well formed but not shown (disabled or short).
fn parse_row(root: &Path, line: usize, row: &str) -> Result<Option<Category>, CatalogError> {
    let fields: Vec<&str> = row.splitn(5, ':').map(str::trim).collect();
    if fields.len() < 4 {
        return Ok(None);
    }

    let enabled = parse_int(line, "enabled", fields[2])?;
    if enabled != 1 {
        return Ok(None);
    }
    let id = parse_int(line, "id", fields[0])?;

    Ok(Some(Category {
        id,
        directory: root.join(fields[1]),
        name: fields[3].to_string(),
        description: fields.get(4).map(|s| s.to_string()).unwrap_or_default(),
        enabled: true,
    }))
}

fn parse_int(line: usize, field: &'static str, value: &str) -> Result<i64, CatalogError> {
    value.parse().map_err(|_| CatalogError::InvalidField {
        line,
        field,
        value: value.to_string(),
    })
}

/// Reads `<root>/menu.data`. A missing or unreadable file, or one with no
/// enabled rows, is fatal: there is nothing to show.
pub fn load_catalog(root: &Path) -> Result<Vec<Category>, CatalogError> {
    let path = root.join(MENU_FILE_NAME);
    let text = fs::read_to_string(&path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CatalogError::Missing(path.clone()),
        _ => CatalogError::Unreadable {
            path: path.clone(),
            source,
        },
    })?;

    let catalog = parse_catalog(root, &text);
    for rejected in &catalog.rejected {
        warn!("Skipping catalog row: {}", rejected);
    }
    if catalog.categories.is_empty() {
        return Err(CatalogError::Empty(path));
    }

    info!(
        "Loaded {} categories from {}",
        catalog.categories.len(),
        path.display()
    );
    Ok(catalog.categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_disabled_rows_are_filtered() {
        let catalog = parse_catalog(Path::new("root"), "1:a:1:Nature:x\n2:b:0:City:y\n");

        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].name, "Nature");
        assert_eq!(catalog.categories[0].directory, Path::new("root").join("a"));
        assert!(catalog.rejected.is_empty());
    }

    #[test]
    fn test_file_order_and_duplicate_ids_are_kept() {
        let text = "9:z:1:Last\n3:a:1:First:desc\n3:b:1:Again:other\n";
        let catalog = parse_catalog(Path::new("."), text);

        let names: Vec<_> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Last", "First", "Again"]);
        assert_eq!(catalog.categories[1].id, 3);
        assert_eq!(catalog.categories[2].id, 3);
        assert_eq!(catalog.categories[0].description, "");
    }

    #[test]
    fn test_short_blank_and_comment_rows_are_ignored() {
        let text = "# id:dir:enabled:name:desc\n\n1:a:1\n2:b:1:Beach: sand : sea \n";
        let catalog = parse_catalog(Path::new("."), text);

        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.categories[0].name, "Beach");
        assert_eq!(catalog.categories[0].description, "sand : sea");
    }

    #[test]
    fn test_bad_field_rejects_only_that_row() {
        let text = "x:a:1:Broken\n2:b:yes:AlsoBroken\n3:c:1:Fine\n";
        let catalog = parse_catalog(Path::new("."), text);

        assert_eq!(catalog.categories.len(), 1);
        assert_eq!(catalog.rejected.len(), 2);
        assert!(matches!(
            catalog.rejected[0],
            CatalogError::InvalidField { line: 1, field: "id", .. }
        ));
        assert!(matches!(
            catalog.rejected[1],
            CatalogError::InvalidField { line: 2, field: "enabled", .. }
        ));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Missing(_)));
    }

    #[test]
    fn test_all_disabled_is_fatal() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MENU_FILE_NAME), "1:a:0:Off:x\n").unwrap();

        let err = load_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Empty(_)));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MENU_FILE_NAME),
            "1:nature:1:Nature:Landscape photos\n2:city:1:City:Urban photos\n",
        )
        .unwrap();

        let categories = load_catalog(dir.path()).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].directory, dir.path().join("city"));
    }
}
