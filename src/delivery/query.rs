//! Query parameters accepted by the items endpoint.

use serde::{Deserialize, Serialize};

/// Direction of an ordering parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn suffix(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// One filtering or ordering parameter of an items request.
///
/// Field paths address either a system attribute (`system.type`) or an
/// element value (`elements.post_date`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParameter {
    /// Keep only items whose field equals the given value
    Equals { field: String, value: String },

    /// Order items by the given field
    Order { field: String, order: SortOrder },
}

impl QueryParameter {
    /// Render the parameter as a URL query pair
    pub fn as_pair(&self) -> (&str, String) {
        match self {
            QueryParameter::Equals { field, value } => (field.as_str(), value.clone()),
            QueryParameter::Order { field, order } => {
                ("order", format!("{}[{}]", field, order.suffix()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_renders_field_as_key() {
        let param = QueryParameter::Equals {
            field: "system.type".into(),
            value: "article".into(),
        };
        assert_eq!(param.as_pair(), ("system.type", "article".to_string()));
    }

    #[test]
    fn test_order_renders_direction_suffix() {
        let param = QueryParameter::Order {
            field: "elements.post_date".into(),
            order: SortOrder::Descending,
        };
        assert_eq!(
            param.as_pair(),
            ("order", "elements.post_date[desc]".to_string())
        );

        let param = QueryParameter::Order {
            field: "system.name".into(),
            order: SortOrder::Ascending,
        };
        assert_eq!(param.as_pair(), ("order", "system.name[asc]".to_string()));
    }
}
