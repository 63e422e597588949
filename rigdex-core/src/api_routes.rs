macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API route definitions shared by the server and its tests.
pub mod v1 {
    pub const ROOT: &str = "/api/v1";
    pub const VERSION: &str = "v1";

    /// Relative paths mounted under every resource segment.
    pub mod resource {
        pub const PAGEABLE: &str = "/pageable";
        pub const ITEM: &str = "/{id}";
    }

    pub mod sockets {
        pub const COLLECTION: &str = v1_path!("/sockets");
        pub const PAGEABLE: &str = v1_path!("/sockets/pageable");
        pub const ITEM: &str = v1_path!("/sockets/{id}");
    }

    pub mod vendors {
        pub const COLLECTION: &str = v1_path!("/vendors");
        pub const PAGEABLE: &str = v1_path!("/vendors/pageable");
        pub const ITEM: &str = v1_path!("/vendors/{id}");
    }

    pub mod chipsets {
        pub const COLLECTION: &str = v1_path!("/chipsets");
        pub const PAGEABLE: &str = v1_path!("/chipsets/pageable");
        pub const ITEM: &str = v1_path!("/chipsets/{id}");
    }

    pub mod designs {
        pub const COLLECTION: &str = v1_path!("/designs");
        pub const PAGEABLE: &str = v1_path!("/designs/pageable");
        pub const ITEM: &str = v1_path!("/designs/{id}");
    }

    pub mod fan_sizes {
        pub const COLLECTION: &str = v1_path!("/fan-sizes");
        pub const PAGEABLE: &str = v1_path!("/fan-sizes/pageable");
        pub const ITEM: &str = v1_path!("/fan-sizes/{id}");
    }
}

pub const PING: &str = "/ping";
pub const HEALTH: &str = "/health";

pub mod utils {
    use super::v1;

    /// Replace a single path parameter (e.g. `"{id}"`) with the provided value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Append query parameters to the provided route.
    pub fn with_query(route: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return route.to_string();
        }

        let mut path =
            String::with_capacity(route.len() + 1 + params.len() * 8);
        path.push_str(route);
        path.push('?');

        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                path.push('&');
            }
            path.push_str(key);
            path.push('=');
            path.push_str(value);
        }

        path
    }

    /// `/api/v1/<segment>` for any catalog resource.
    pub fn collection(segment: &str) -> String {
        format!("{}/{}", v1::ROOT, segment)
    }

    /// `/api/v1/<segment>/<id>` for any catalog resource.
    pub fn item(segment: &str, id: impl std::fmt::Display) -> String {
        format!("{}/{}/{}", v1::ROOT, segment, id)
    }

    /// `/api/v1/<segment>/pageable` for any catalog resource.
    pub fn pageable(segment: &str) -> String {
        format!("{}/{}/pageable", v1::ROOT, segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helpers_agree_with_constants() {
        assert_eq!(utils::collection("sockets"), v1::sockets::COLLECTION);
        assert_eq!(utils::pageable("fan-sizes"), v1::fan_sizes::PAGEABLE);
        assert_eq!(
            utils::item("chipsets", "abc"),
            utils::replace_param(v1::chipsets::ITEM, "{id}", "abc")
        );
    }

    #[test]
    fn with_query_joins_pairs() {
        assert_eq!(
            utils::with_query("/x", &[("page", "1"), ("size", "5")]),
            "/x?page=1&size=5"
        );
        assert_eq!(utils::with_query("/x", &[]), "/x");
    }
}
