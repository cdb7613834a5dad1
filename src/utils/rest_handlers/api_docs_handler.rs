use crate::utils::xlsx_export::export_file::XLSX_CONTENT_TYPE;
use axum::{Json, response::Html};
use serde_json::{Value, json};

/// `GET /apispec_1.json`: OpenAPI 2.0 description of the export API.
pub async fn apispec_handler() -> Json<Value> {
    Json(openapi_document())
}

/// `GET /docs`: Swagger UI page reading the description above.
pub async fn docs_handler() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

pub fn openapi_document() -> Value {
    json!({
        "swagger": "2.0",
        "info": {
            "title": "Query export API",
            "description": "Runs a SQL query and exports the result to an Excel file",
            "version": env!("CARGO_PKG_VERSION")
        },
        "paths": {
            "/export": {"post": export_operation()},
            "/download/{filename}": {"get": download_operation()}
        },
        "definitions": {
            "Error": {
                "type": "object",
                "properties": {"error": {"type": "string"}}
            }
        }
    })
}

fn export_body_schema() -> Value {
    let db_config = json!({
        "type": "object",
        "properties": {
            "host": {"type": "string", "example": "localhost"},
            "port": {"type": "integer", "example": 3306},
            "user": {"type": "string", "example": "root"},
            "password": {"type": "string", "example": "mypassword"},
            "database": {"type": "string", "example": "test"}
        }
    });
    json!({
        "type": "object",
        "required": ["query"],
        "properties": {
            "db_config": db_config,
            "query": {"type": "string", "example": "SELECT * FROM users LIMIT 100"},
            "header": {
                "type": "array",
                "items": {"type": "string"},
                "example": ["ID", "Name", "Email"]
            }
        }
    })
}

fn export_operation() -> Value {
    let ok = json!({
        "description": "Download URL of the Excel file, or an info message for an empty result",
        "schema": {
            "type": "object",
            "properties": {
                "download_url": {"type": "string"},
                "time": {"type": "string"},
                "info": {"type": "string"}
            }
        }
    });
    json!({
        "tags": ["Export"],
        "summary": "Export a query result to an Excel file",
        "consumes": ["application/json"],
        "produces": ["application/json"],
        "parameters": [{
            "name": "body",
            "in": "body",
            "required": true,
            "schema": export_body_schema()
        }],
        "responses": {
            "200": ok,
            "400": error_response("Invalid body or SQL query error"),
            "500": error_response("Server error")
        }
    })
}

fn download_operation() -> Value {
    json!({
        "tags": ["Export"],
        "summary": "Download an exported Excel file",
        "produces": [XLSX_CONTENT_TYPE],
        "parameters": [{
            "name": "filename",
            "in": "path",
            "type": "string",
            "required": true,
            "description": "Name of the exported file"
        }],
        "responses": {
            "200": {"description": "File download", "schema": {"type": "file"}},
            "404": error_response("File not found")
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({"description": description, "schema": {"$ref": "#/definitions/Error"}})
}

const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>Query export API docs</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist/swagger-ui.css">
  <style>
    body { margin:0; background:#fcfcfc; }
  </style>
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist/swagger-ui-bundle.js"></script>
  <script src="https://unpkg.com/swagger-ui-dist/swagger-ui-standalone-preset.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({
        url: "apispec_1.json",
        dom_id: '#swagger-ui',
        presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],
        layout: "BaseLayout"
      });
    };
  </script>
</body>
</html>
"#;
