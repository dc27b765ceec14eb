use serde_json::{Map, Value};

use super::ContentId;

/// Field of the plugin data holding the published ids
pub const PUBLISHED_POSTS_KEY: &str = "published_posts";

/// Ordered, duplicate-free record of ids already announced on Bluesky.
///
/// Only ever grows: ids are appended after a confirmed remote write and never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishedSet {
    ids: Vec<ContentId>,
}

impl PublishedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `published_posts` from plugin data. A missing field is an empty set;
    /// duplicates in stored data collapse onto their first occurrence.
    pub fn from_data(data: &Map<String, Value>) -> anyhow::Result<Self> {
        let Some(raw) = data.get(PUBLISHED_POSTS_KEY) else {
            return Ok(Self::new());
        };

        let stored: Vec<ContentId> = serde_json::from_value(raw.clone()).map_err(|e| {
            anyhow::anyhow!("{} is not a list of post ids: {}", PUBLISHED_POSTS_KEY, e)
        })?;

        let mut set = Self::new();
        for id in stored {
            set.insert(id);
        }
        Ok(set)
    }

    /// Write the set back into plugin data, leaving other fields untouched
    pub fn write_into(&self, data: &mut Map<String, Value>) {
        let ids = self.ids.iter().map(|id| Value::from(id.as_i64())).collect();
        data.insert(PUBLISHED_POSTS_KEY.to_string(), Value::Array(ids));
    }

    pub fn contains(&self, id: ContentId) -> bool {
        self.ids.contains(&id)
    }

    /// Append `id`; returns false if it was already present
    pub fn insert(&mut self, id: ContentId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn ids(&self) -> &[ContentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn missing_field_is_an_empty_set() {
        let set = PublishedSet::from_data(&Map::new()).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let mut set = PublishedSet::new();
        assert!(set.insert(ContentId::new(7)));
        assert!(set.insert(ContentId::new(2)));
        assert!(!set.insert(ContentId::new(7)));

        assert_eq!(set.ids(), &[ContentId::new(7), ContentId::new(2)]);
    }

    #[test]
    fn round_trip_preserves_order_uniqueness_and_other_fields() {
        let mut data = object(json!({ "published_posts": [5, 3, 5, 9], "note": "keep" }));

        let mut set = PublishedSet::from_data(&data).unwrap();
        assert_eq!(set.len(), 3);
        set.insert(ContentId::new(1));
        set.write_into(&mut data);

        assert_eq!(
            Value::Object(data.clone()),
            json!({ "published_posts": [5, 3, 9, 1], "note": "keep" })
        );
        assert_eq!(PublishedSet::from_data(&data).unwrap(), set);
    }

    #[test]
    fn non_list_field_is_rejected() {
        let data = object(json!({ "published_posts": "1,2,3" }));
        assert!(PublishedSet::from_data(&data).is_err());
    }
}
