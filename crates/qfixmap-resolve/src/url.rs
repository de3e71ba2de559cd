//! Booking-URL construction.
//!
//! The portal URL is part of the external compatibility contract: query
//! parameters appear in the fixed order `category_id`, `material_id`,
//! `service_id`, each only when its ID resolved, and the URL degrades to the
//! bare base when nothing resolved. IDs are numeric, so no escaping is
//! needed.

/// Builder for one booking URL against a base portal address.
#[derive(Debug, Clone)]
pub struct QfixUrl<'a> {
    base: &'a str,
    category_id: Option<i64>,
    material_id: Option<i64>,
    service_id: Option<i64>,
}

impl<'a> QfixUrl<'a> {
    #[must_use]
    pub fn new(base: &'a str) -> Self {
        Self {
            base,
            category_id: None,
            material_id: None,
            service_id: None,
        }
    }

    #[must_use]
    pub fn category_id(mut self, id: Option<i64>) -> Self {
        self.category_id = id;
        self
    }

    #[must_use]
    pub fn material_id(mut self, id: Option<i64>) -> Self {
        self.material_id = id;
        self
    }

    #[must_use]
    pub fn service_id(mut self, id: Option<i64>) -> Self {
        self.service_id = id;
        self
    }

    /// Renders the URL. Parameter order is fixed regardless of the order the
    /// builder methods were called in.
    #[must_use]
    pub fn build(&self) -> String {
        let mut url = self.base.to_string();
        let mut next_sep = if self.base.contains('?') { '&' } else { '?' };
        let params = [
            ("category_id", self.category_id),
            ("material_id", self.material_id),
            ("service_id", self.service_id),
        ];
        for (key, value) in params {
            if let Some(id) = value {
                url.push(next_sep);
                url.push_str(key);
                url.push('=');
                url.push_str(&id.to_string());
                next_sep = '&';
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://kappahl.dev.qfixr.me/sv/";

    #[test]
    fn no_ids_degrades_to_base_url() {
        assert_eq!(QfixUrl::new(BASE).build(), BASE);
    }

    #[test]
    fn category_only() {
        let url = QfixUrl::new(BASE).category_id(Some(173)).build();
        assert_eq!(url, "https://kappahl.dev.qfixr.me/sv/?category_id=173");
    }

    #[test]
    fn material_only() {
        let url = QfixUrl::new(BASE).material_id(Some(69)).build();
        assert_eq!(url, "https://kappahl.dev.qfixr.me/sv/?material_id=69");
    }

    #[test]
    fn category_precedes_material_regardless_of_call_order() {
        let url = QfixUrl::new(BASE)
            .material_id(Some(69))
            .category_id(Some(173))
            .build();
        assert_eq!(
            url,
            "https://kappahl.dev.qfixr.me/sv/?category_id=173&material_id=69"
        );
    }

    #[test]
    fn service_id_comes_last() {
        let url = QfixUrl::new(BASE)
            .service_id(Some(12))
            .material_id(Some(69))
            .category_id(Some(173))
            .build();
        assert_eq!(
            url,
            "https://kappahl.dev.qfixr.me/sv/?category_id=173&material_id=69&service_id=12"
        );
    }

    #[test]
    fn base_with_existing_query_extends_with_ampersand() {
        let url = QfixUrl::new("https://portal.example/sv/?lang=sv")
            .category_id(Some(60))
            .build();
        assert_eq!(url, "https://portal.example/sv/?lang=sv&category_id=60");
    }
}
