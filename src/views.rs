use std::sync::Arc;

use axum::response::Html;
use handlebars::Handlebars;

use crate::error::AppError;

/// Compiled page templates, built once at startup and shared through an
/// axum `Extension`.
#[derive(Clone)]
pub struct Views {
    registry: Arc<Handlebars<'static>>,
}

impl Views {
    pub fn build() -> Self {
        let mut registry = Handlebars::new();
        registry
            .register_template_string("listing", include_str!("../templates/listing.hbs"))
            .expect("listing template");
        registry
            .register_template_string(
                "report_lost_form",
                include_str!("../templates/report_lost_form.hbs"),
            )
            .expect("report_lost_form template");
        registry
            .register_template_string(
                "report_found_form",
                include_str!("../templates/report_found_form.hbs"),
            )
            .expect("report_found_form template");
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn render(
        &self,
        name: &str,
        data: &serde_json::Value,
    ) -> Result<Html<String>, AppError> {
        Ok(Html(self.registry.render(name, data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_pages_render() {
        let views = Views::build();

        let listing = views
            .render(
                "listing",
                &json!({
                    "lost_reports": [{
                        "id": 1, "pet_type": "dog", "breed": "corgi", "color": "brown",
                        "features": "short legs", "lost_location_text": "Willow Park",
                        "contact_info": "555-0100", "is_found": false,
                        "photos": ["a.png"], "created_at": "2026-03-01T18:30:00"
                    }],
                    "found_reports": [],
                    "show_lost": true,
                    "show_found": true,
                    "search_params": {},
                    "flash": {"kind": "success", "message": "Report published!"}
                }),
            )
            .unwrap();
        assert!(listing.0.contains("Willow Park"));
        assert!(listing.0.contains("Report published!"));

        let form = views
            .render(
                "report_lost_form",
                &json!({
                    "form_data": {"pet_type": "cat"},
                    "error": "Please fill in all required fields: color"
                }),
            )
            .unwrap();
        assert!(form.0.contains("required fields"));

        assert!(views
            .render("report_found_form", &json!({"form_data": {}}))
            .is_ok());
    }
}
