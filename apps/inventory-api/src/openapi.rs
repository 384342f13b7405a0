//! OpenAPI documentation configuration

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the bearer token scheme referenced by protected operations
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// Combined OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Product catalog, stock ledger, reports and user authentication",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    modifiers(&BearerAuth),
    security(("bearer_auth" = [])),
    nest(
        (path = "/api/v1/auth", api = domain_users::ApiDoc),
        (path = "/api/v1", api = domain_inventory::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_versioned() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/v1/auth/register",
            "/api/v1/auth/login",
            "/api/v1/auth/me",
            "/api/v1/products",
            "/api/v1/products/{id}",
            "/api/v1/inventories/add-stock",
            "/api/v1/inventories/withdraw-stock",
            "/api/v1/inventories/transactions/{id}",
            "/api/v1/reports/inventory-valuation",
            "/api/v1/reports/low-stock",
            "/api/v1/reports/search-products",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {} in {:?}",
                expected,
                paths
            );
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }

    #[test]
    fn test_delete_product_documents_empty_envelope() {
        let doc = ApiDoc::openapi();
        let item = &doc.paths.paths["/api/v1/products/{id}"];
        let delete = item.delete.as_ref().expect("delete operation");

        for status in ["200", "404", "500"] {
            assert!(
                delete.responses.responses.contains_key(status),
                "delete lacks {status} response"
            );
        }

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json["components"]["schemas"]["EmptyApiResponse"].is_object());
    }
}
