//! Helpers shaping documents before they reach the database.

use mongodb::bson::{Bson, Document};

/// Shallow merge of `over` on top of `base`. Keys in `over` win.
pub fn merge(base: Document, over: Document) -> Document {
    let mut merged = base;
    for (key, value) in over {
        merged.insert(key, value);
    }
    merged
}

/// Flattens nested documents into dot-path keys suitable for `$set`.
///
/// Arrays and empty documents are kept as values so they still replace
/// the stored field.
pub fn flatten(changes: Document) -> Document {
    let mut flat = Document::new();
    flatten_into(&mut flat, None, changes);
    flat
}

fn flatten_into(flat: &mut Document, prefix: Option<&str>, changes: Document) {
    for (key, value) in changes {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key,
        };

        match value {
            Bson::Document(nested) if !nested.is_empty() => {
                flatten_into(flat, Some(&path), nested);
            }
            other => {
                flat.insert(path, other);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[test]
    fn merge_prefers_the_overriding_document() {
        let merged = merge(doc! { "id": 2, "active": true }, doc! { "active": false });

        assert_eq!(merged, doc! { "id": 2, "active": false });
    }

    #[test]
    fn flatten_builds_dot_paths() {
        let flat = flatten(doc! {
            "name": "Chippy",
            "address": { "city": "Kingston", "geo": { "lat": 18 } },
        });

        assert_eq!(
            flat,
            doc! { "name": "Chippy", "address.city": "Kingston", "address.geo.lat": 18 }
        );
    }

    #[test]
    fn flatten_keeps_arrays_and_empty_documents() {
        let flat = flatten(doc! { "tags": ["a", { "b": 1 }], "meta": {} });

        assert_eq!(flat, doc! { "tags": ["a", { "b": 1 }], "meta": {} });
    }
}
