use std::collections::HashMap;

use anyhow::Result;
use tracing::debug;

use super::Column;
use crate::error::ImportError;

/// Turn a raw header cell into a column name:
///  - spaces become underscores
///  - periods are removed
///  - hyphens become underscores
///  - the result is lower-cased
pub fn sanitize_header(raw: &str) -> String {
    raw.replace(' ', "_")
        .replace('.', "")
        .replace('-', "_")
        .to_lowercase()
}

/// Build one TEXT column per header, in header order.
///
/// Headers that sanitize to nothing, or to a name an earlier header already
/// took, are rejected instead of being handed to the store.
pub fn derive_columns(headers: &[String]) -> Result<Vec<Column>> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(headers.len());
    let mut cols = Vec::with_capacity(headers.len());

    for (idx, raw) in headers.iter().enumerate() {
        let name = sanitize_header(raw);
        if name.is_empty() {
            return Err(ImportError::EmptyColumnName { index: idx }.into());
        }
        if let Some(&first) = seen.get(&name) {
            return Err(ImportError::DuplicateColumn {
                name,
                first,
                second: idx,
            }
            .into());
        }
        debug!("derive_columns: `{}` -> `{}`", raw, name);
        seen.insert(name.clone(), idx);
        cols.push(Column::text(name));
    }

    Ok(cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sanitizes_mixed_header() {
        let cols = derive_columns(&headers(&["First Name", "Last-Name", "Score."])).unwrap();
        let names: Vec<&str> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["first_name", "last_name", "score"]);
        assert!(cols.iter().all(|c| c.ty == "TEXT"));
    }

    #[test]
    fn leaves_other_characters_alone() {
        assert_eq!(sanitize_header("Unit (kg)"), "unit_(kg)");
        assert_eq!(sanitize_header("A.B.C"), "abc");
        assert_eq!(sanitize_header("  x-y "), "__x_y_");
        assert_eq!(sanitize_header("Größe"), "größe");
    }

    #[test]
    fn rejects_duplicate_after_sanitizing() {
        let err = derive_columns(&headers(&["id", "First Name", "first_name"])).unwrap_err();
        match err.downcast_ref::<ImportError>() {
            Some(ImportError::DuplicateColumn {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "first_name");
                assert_eq!((*first, *second), (1, 2));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn rejects_header_that_sanitizes_to_nothing() {
        let err = derive_columns(&headers(&["a", "..."])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImportError>(),
            Some(ImportError::EmptyColumnName { index: 1 })
        ));
    }
}
