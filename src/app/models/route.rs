//! # Route Model
//!
//! A named view plus free-form parameters.

use crate::app::events::RouteName;
use serde_json::{Map, Value};

/// Route parameters, an arbitrary string-keyed mapping
pub type RouteParams = Map<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub name: RouteName,
    pub params: RouteParams,
}

impl Route {
    pub fn new(name: impl Into<RouteName>, params: RouteParams) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn home() -> Self {
        Self::new(RouteName::Home, RouteParams::new())
    }

    /// The `id` parameter as a content id, when present and numeric
    pub fn content_id(&self) -> Option<u32> {
        self.params
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())
    }
}

/// Parameters for the detail page of `id`
pub fn detail_params(id: u32) -> RouteParams {
    let mut params = RouteParams::new();
    params.insert("id".to_string(), Value::from(id));
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_should_read_numeric_id_param() {
        let route = Route::new("detail", detail_params(104));
        assert_eq!(route.name, RouteName::Detail);
        assert_eq!(route.content_id(), Some(104));
    }

    #[test]
    fn content_id_should_ignore_non_numeric_values() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), Value::from("abc"));
        assert_eq!(Route::new("detail", params).content_id(), None);
        assert_eq!(Route::home().content_id(), None);
    }
}
