//! Canonical client envelope and list-shape normalization
//!
//! Deployed servers have answered list calls three ways: a bare array,
//! `{items, pagination}`, and the canonical `{data, meta}`. All three are
//! folded into one envelope here; anything else is an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use fleetops_shared::constants::DEFAULT_PAGE_SIZE;
use fleetops_shared::types::PageMeta;

use crate::error::ClientError;

/// Canonical `{data, meta}` pair handed to callers.
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub data: T,
    pub meta: Option<PageMeta>,
}

pub(crate) fn normalize_list<T: DeserializeOwned>(
    body: Value,
    per_page_hint: Option<u32>,
) -> Result<Envelope<Vec<T>>, ClientError> {
    // Bare array: synthesize single-page metadata.
    if body.is_array() {
        let data: Vec<T> =
            serde_json::from_value(body).map_err(|_| ClientError::UnexpectedFormat)?;
        let total = data.len() as u64;
        let meta = PageMeta {
            current_page: 1,
            per_page: per_page_hint.unwrap_or(DEFAULT_PAGE_SIZE),
            total,
            last_page: 1,
            from: (total > 0).then_some(1),
            to: (total > 0).then_some(total),
        };
        return Ok(Envelope {
            data,
            meta: Some(meta),
        });
    }

    if let Some(object) = body.as_object() {
        // Legacy items/pagination pair.
        if let (Some(items), Some(pagination)) = (object.get("items"), object.get("pagination")) {
            let data = serde_json::from_value(items.clone())
                .map_err(|_| ClientError::UnexpectedFormat)?;
            let meta = serde_json::from_value(pagination.clone())
                .map_err(|_| ClientError::UnexpectedFormat)?;
            return Ok(Envelope {
                data,
                meta: Some(meta),
            });
        }

        // Canonical data/meta (the `success` flag, if present, is implied).
        if let (Some(data), Some(meta)) = (object.get("data"), object.get("meta")) {
            let data =
                serde_json::from_value(data.clone()).map_err(|_| ClientError::UnexpectedFormat)?;
            let meta =
                serde_json::from_value(meta.clone()).map_err(|_| ClientError::UnexpectedFormat)?;
            return Ok(Envelope {
                data,
                meta: Some(meta),
            });
        }
    }

    Err(ClientError::UnexpectedFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonical() -> Value {
        json!({
            "success": true,
            "data": [{"name": "a"}, {"name": "b"}],
            "meta": {
                "current_page": 1, "per_page": 15, "total": 2,
                "last_page": 1, "from": 1, "to": 2
            }
        })
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn all_three_shapes_agree() {
        let bare = json!([{"name": "a"}, {"name": "b"}]);
        let legacy = json!({
            "items": [{"name": "a"}, {"name": "b"}],
            "pagination": {
                "current_page": 1, "per_page": 15, "total": 2,
                "last_page": 1, "from": 1, "to": 2
            }
        });

        let from_bare: Envelope<Vec<Named>> = normalize_list(bare, Some(15)).unwrap();
        let from_legacy: Envelope<Vec<Named>> = normalize_list(legacy, Some(15)).unwrap();
        let from_canonical: Envelope<Vec<Named>> = normalize_list(canonical(), Some(15)).unwrap();

        assert_eq!(from_bare.data, from_legacy.data);
        assert_eq!(from_legacy.data, from_canonical.data);

        let totals: Vec<u64> = [&from_bare, &from_legacy, &from_canonical]
            .iter()
            .map(|e| e.meta.as_ref().unwrap().total)
            .collect();
        assert_eq!(totals, vec![2, 2, 2]);
    }

    #[test]
    fn empty_bare_array_has_no_from_to() {
        let envelope: Envelope<Vec<Named>> = normalize_list(json!([]), None).unwrap();
        let meta = envelope.meta.unwrap();
        assert_eq!(meta.total, 0);
        assert_eq!(meta.from, None);
        assert_eq!(meta.to, None);
    }

    #[test]
    fn unknown_shape_is_an_error() {
        let err =
            normalize_list::<Named>(json!({"rows": [], "count": 0}), None).unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedFormat));
    }
}
