#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        let schema = components.schemas.get(name).unwrap();

        if let utoipa::openapi::RefOr::T(utoipa::openapi::schema::Schema::Object(obj)) = schema {
            obj.properties.keys().cloned().collect()
        } else {
            panic!("{} should be an object schema", name);
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        // Test that the OpenAPI schema can be generated without errors
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        for name in ["ErrorResponse", "HealthResponse", "ChartSpec", "ControlPanel", "ControlEvent"] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        // Verify that the schema can be serialized to JSON without errors
        let json_result = serde_json::to_string(&openapi);
        assert!(json_result.is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");

        assert!(properties.contains(&"error".to_string()));
        assert!(properties.contains(&"code".to_string()));
        assert!(properties.contains(&"success".to_string()));
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");

        assert!(properties.contains(&"status".to_string()));
        assert!(properties.contains(&"version".to_string()));
        assert!(properties.contains(&"records".to_string()));
        assert!(properties.contains(&"sessions".to_string()));
    }

    #[test]
    fn test_control_update_schema_structure() {
        let properties = object_properties("ControlUpdate");

        for field in ["outcome", "generation", "chart", "notice", "error_code"] {
            assert!(properties.contains(&field.to_string()), "missing {}", field);
        }
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();

        // Verify that the /health endpoint is properly defined
        assert!(openapi.paths.paths.contains_key("/health"));

        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path.operations.get(&utoipa::openapi::PathItemType::Get);
        assert!(health_get.is_some());

        let responses = &health_get.unwrap().responses;
        // Check that both 200 and 500 responses are defined
        assert!(responses.responses.contains_key("200"));
        assert!(responses.responses.contains_key("500"));
    }

    #[test]
    fn test_openapi_paths_contain_session_endpoints() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        assert!(paths.contains_key("/"));
        assert!(paths.contains_key("/api/v1/controls"));
        assert!(paths.contains_key("/api/v1/dataset"));
        assert!(paths.contains_key("/api/v1/chart"));
        assert!(paths.contains_key("/api/v1/sessions"));
        assert!(paths.contains_key("/api/v1/sessions/{session_id}"));

        let events = paths.get("/api/v1/sessions/{session_id}/events").unwrap();
        let post = events
            .operations
            .get(&utoipa::openapi::PathItemType::Post)
            .unwrap();
        for status in ["200", "404", "422", "500"] {
            assert!(post.responses.responses.contains_key(status), "missing {}", status);
        }
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi = ApiDoc::openapi();
        let openapi_json = serde_json::to_string(&openapi).unwrap();

        // Ensure no references to crate.schemas.ErrorResponse exist
        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));

        assert!(openapi_json.contains("ErrorResponse"));
    }
}
