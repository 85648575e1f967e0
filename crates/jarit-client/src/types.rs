//! Request and response types for the JarIt API.

use serde::{Deserialize, Serialize};

// ---------- Users ----------

/// Role assigned to an account by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    User,
}

/// Current user profile (from GET /users/me).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// ---------- Auth ----------

/// Request body for POST /auth/register.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Created-account summary from registration. No token is included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: String,
}

/// Bearer token returned by POST /auth/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

// ---------- API keys ----------

/// A stored integration key (e.g. service_name "mealie").
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    pub service_name: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

/// Request body for POST /users/me/api-keys (upsert).
///
/// `base_url` serializes as an explicit `null` when absent; the backend
/// distinguishes a cleared URL from a missing field.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyRequest {
    pub service_name: String,
    pub api_key: String,
    pub base_url: Option<String>,
}

// ---------- Recipes (schema.org shape) ----------

/// Recipe author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    pub name: String,
}

/// A single instruction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HowToStep {
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    pub text: String,
}

/// A named group of instruction steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HowToSection {
    pub name: Option<String>,
    #[serde(rename = "itemListElement")]
    pub item_list_element: Vec<HowToStep>,
}

/// Instructions arrive either as flat steps or as named sections; both forms
/// can appear in the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstructionEntry {
    Section(HowToSection),
    Step(HowToStep),
}

/// The backend emits either a single image URL or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeImage {
    One(String),
    Many(Vec<String>),
}

/// Structured recipe record, schema.org `Recipe` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<RecipeImage>,
    pub recipe_yield: String,
    pub recipe_ingredient: Vec<String>,
    pub recipe_instructions: Option<Vec<InstructionEntry>>,
    /// ISO-8601-like durations, e.g. "PT15M".
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub recipe_category: String,
    pub recipe_cuisine: String,
    pub keywords: Option<Vec<String>>,
    pub suitable_for_diet: String,
    pub author: Option<Author>,
    pub video: Option<String>,
    pub url: Option<String>,
}

/// Extraction diagnostics; travels alongside a possibly-partial recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeError {
    pub error: String,
    #[serde(default)]
    pub missing_fields: Vec<String>,
}

/// Request body for POST /recipes/extract-recipe.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRecipeRequest {
    pub url: String,
    pub target_language: String,
}

/// Response from POST /recipes/extract-recipe.
///
/// All three fields are independent optionals: the backend may return a partial
/// recipe together with diagnostics, or a suggested variant without a primary
/// recipe. None of them implies the absence of another.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRecipeResponse {
    #[serde(default)]
    pub recipe: Option<Recipe>,
    #[serde(default)]
    pub suggested_version: Option<Recipe>,
    #[serde(default)]
    pub error_info: Option<RecipeError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_role_parses_backend_strings() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "email": "a@b.c",
            "username": "alice",
            "role": "ADMIN",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .expect("user");
        assert!(user.is_admin());
    }

    #[test]
    fn create_api_key_serializes_explicit_null_base_url() {
        let req = CreateApiKeyRequest {
            service_name: "mealie".into(),
            api_key: "secret".into(),
            base_url: None,
        };
        let value = serde_json::to_value(&req).expect("serialize");
        assert_eq!(value["base_url"], serde_json::Value::Null);
    }

    #[test]
    fn instructions_parse_flat_steps() {
        let entries: Vec<InstructionEntry> = serde_json::from_value(json!([
            { "@type": "HowToStep", "text": "Chop the onions" },
            { "text": "Fry them" }
        ]))
        .expect("steps");
        assert!(matches!(&entries[0], InstructionEntry::Step(s) if s.text == "Chop the onions"));
        assert!(matches!(&entries[1], InstructionEntry::Step(_)));
    }

    #[test]
    fn instructions_parse_named_sections() {
        let entries: Vec<InstructionEntry> = serde_json::from_value(json!([
            {
                "name": "Dough",
                "itemListElement": [{ "text": "Mix flour and water" }]
            }
        ]))
        .expect("sections");
        match &entries[0] {
            InstructionEntry::Section(section) => {
                assert_eq!(section.name.as_deref(), Some("Dough"));
                assert_eq!(section.item_list_element.len(), 1);
            }
            other => panic!("expected section, got {other:?}"),
        }
    }

    #[test]
    fn recipe_image_accepts_single_or_list() {
        let one: RecipeImage = serde_json::from_value(json!("https://img/1.png")).expect("one");
        let many: RecipeImage =
            serde_json::from_value(json!(["https://img/1.png", "https://img/2.png"]))
                .expect("many");
        assert_eq!(one, RecipeImage::One("https://img/1.png".into()));
        assert!(matches!(many, RecipeImage::Many(urls) if urls.len() == 2));
    }

    #[test]
    fn extract_response_fields_are_independent() {
        let resp: ExtractRecipeResponse = serde_json::from_value(json!({
            "recipe": null,
            "suggested_version": null,
            "error_info": { "error": "low confidence", "missing_fields": ["cookTime"] }
        }))
        .expect("response");
        assert!(resp.recipe.is_none());
        assert!(resp.suggested_version.is_none());
        let info = resp.error_info.expect("error_info");
        assert_eq!(info.missing_fields, vec!["cookTime"]);
    }
}
