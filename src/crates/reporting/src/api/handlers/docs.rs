//! OpenAPI document served at /static/swagger.json

use axum::{response::IntoResponse, Json};
use serde_json::{json, Map, Value};

/// One documented operation; paths use OpenAPI `{param}` syntax
struct Operation {
    method: &'static str,
    path: &'static str,
    tag: &'static str,
    summary: &'static str,
}

const fn op(method: &'static str, path: &'static str, tag: &'static str, summary: &'static str) -> Operation {
    Operation {
        method,
        path,
        tag,
        summary,
    }
}

const ENTITIES: [(&str, &str, &str); 6] = [
    ("/api/requirements", "requirements", "requirement"),
    ("/api/testcases", "testcases", "test case"),
    ("/api/testruns", "testruns", "test run"),
    ("/api/defects", "defects", "defect"),
    ("/api/testtypesummary", "testtypesummary", "test type summary"),
    ("/api/transitmetricsdaily", "transitmetricsdaily", "transit metric"),
];

const OPERATIONS: &[Operation] = &[
    op("post", "/api/signup", "auth", "User signup"),
    op("post", "/api/login", "auth", "User login"),
    op("get", "/api/me", "auth", "Current user"),
    op("post", "/api/forgot-password", "auth", "Request a password reset token"),
    op("post", "/api/reset-password", "auth", "Reset password with a reset token"),
    op("get", "/health", "health", "Health check"),
    op("get", "/api/health", "health", "Health check"),
    op("get", "/api/v1/health", "health", "Health check"),
    op("get", "/api/startup", "health", "Startup check without database access"),
    op("get", "/api/check-schema", "health", "Check the users table"),
    op("get", "/api/test-db", "health", "Connection and user creation test"),
    op("get", "/admin/db-info", "admin", "Database type and connection string"),
    op("get", "/admin/db-test", "admin", "Database version"),
    op("get", "/admin/schema-info", "admin", "Users columns and table list"),
    op("post", "/admin/generate-data", "admin", "Generate dummy data"),
    op("post", "/admin/reset-db", "admin", "Drop and recreate the schema"),
    op("post", "/admin/delete-db", "admin", "Delete all rows"),
    op("get", "/api/testcases/with-descriptions", "testcases", "Test cases with requirement descriptions"),
    op("post", "/api/v1/results", "results", "Unified results upload"),
    op("get", "/api/v1/results/test-runs", "results", "List test runs"),
    op("post", "/api/v1/results/test-runs", "results", "Upload runner test runs"),
    op("get", "/api/v1/results/test-runs/{test_run_id}", "results", "Test runs of one batch"),
    op("get", "/api/v1/results/customers/{customer_id}/test-runs", "results", "Test runs of one customer"),
    op("get", "/static/swagger.json", "docs", "This document"),
];

fn operation_body(tag: &str, summary: String) -> Value {
    json!({
        "tags": [tag],
        "summary": summary,
        "responses": {
            "200": {"description": "Success"},
            "400": {"description": "Invalid request"},
            "500": {"description": "Internal server error"}
        }
    })
}

fn insert(paths: &mut Map<String, Value>, path: &str, method: &str, body: Value) {
    let entry = paths.entry(path.to_string()).or_insert_with(|| json!({}));
    if let Value::Object(methods) = entry {
        methods.insert(method.to_string(), body);
    }
}

/// Build the OpenAPI 3.0 document
pub fn openapi_document() -> Value {
    let mut paths = Map::new();

    for (base, tag, name) in ENTITIES {
        let item = format!("{}/{{id}}", base);
        let bulk = format!("{}/bulk", base);
        insert(&mut paths, base, "get", operation_body(tag, format!("List every {}", name)));
        insert(&mut paths, base, "post", operation_body(tag, format!("Create a {}", name)));
        insert(&mut paths, &bulk, "post", operation_body(tag, format!("Bulk create {} records", name)));
        insert(&mut paths, &item, "get", operation_body(tag, format!("Get a {}", name)));
        insert(&mut paths, &item, "put", operation_body(tag, format!("Update a {}", name)));
        insert(&mut paths, &item, "delete", operation_body(tag, format!("Delete a {}", name)));
    }
    for operation in OPERATIONS {
        insert(
            &mut paths,
            operation.path,
            operation.method,
            operation_body(operation.tag, operation.summary.to_string()),
        );
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Transit Reporting API",
            "version": crate::version::VERSION,
            "description": "REST API for the transit test-reporting dashboard"
        },
        "paths": paths,
    })
}

/// GET /static/swagger.json
pub async fn swagger() -> impl IntoResponse {
    Json(openapi_document())
}
