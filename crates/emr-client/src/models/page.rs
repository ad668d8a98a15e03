use serde::{Deserialize, Serialize};

/// List envelope shared by every paginated endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            page: 1,
            page_size: 0,
            total_pages: 0,
        }
    }
}

impl<T> Paginated<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_data_defaults() {
        let page: Paginated<serde_json::Value> = serde_json::from_value(json!({"total": 3})).unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
    }
}
