//! Prompt templates for Onboard.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// JSON shape the model is asked to fill in.
pub const EXTRACTION_SCHEMA: &str = r#"{
  "business_name": "str",
  "company_info": {
    "name": "str",
    "description": "str",
    "sector": "str",
    "founding_year": "str"
  },
  "contact": {
    "email": "str",
    "phone": "str",
    "social": {
      "linkedin": "str",
      "twitter": "str",
      "instagram": "str"
    }
  },
  "locations": [{
    "kind": "str",
    "address": {
      "street": "str",
      "city": "str",
      "region": "str",
      "postal_code": "str"
    },
    "hours": [{
      "day": "str",
      "open_time": "str",
      "close_time": "str"
    }]
  }],
  "extra_info": "str"
}"#;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub extraction: ExtractionPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for structured extraction of business data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPrompts {
    pub system: String,
}

impl Default for ExtractionPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert at extracting business data from web content and converting it to JSON.
The response must be a single JSON object with the following properties:

{{schema}}

Rules:
- "business_name" is the trading name of the business the page is about
- Use an empty string for anything the page does not state; never invent data
- List every physical location mentioned, one entry per distinct address
- Put any other relevant facts (services, menu highlights, awards) in "extra_info"

Provide the extracted information in a format that matches this JSON schema."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let extraction_path = custom_path.join("extraction.toml");
            if extraction_path.exists() {
                let content = std::fs::read_to_string(&extraction_path)?;
                prompts.extraction = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// The extraction system prompt with the schema filled in.
    pub fn extraction_system(&self) -> String {
        let mut vars = HashMap::new();
        vars.insert("schema".to_string(), EXTRACTION_SCHEMA.to_string());
        self.render_with_custom(&self.extraction.system, &vars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ExtractedRecord;

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_extraction_system_contains_schema() {
        let prompt = Prompts::default().extraction_system();
        assert!(prompt.contains("\"business_name\""));
        assert!(prompt.contains("\"postal_code\""));
        assert!(!prompt.contains("{{schema}}"));
    }

    #[test]
    fn test_custom_variables_do_not_override_schema() {
        let mut vars = HashMap::new();
        vars.insert("schema".to_string(), "nope".to_string());
        let prompts = Prompts::load(None, Some(&vars)).unwrap();
        assert!(prompts.extraction_system().contains("\"extra_info\""));
    }

    #[test]
    fn test_schema_parses_as_record() {
        let record: ExtractedRecord = serde_json::from_str(EXTRACTION_SCHEMA).unwrap();
        assert_eq!(record.business_name, "str");
        assert_eq!(record.locations.len(), 1);
        assert_eq!(record.locations[0].hours[0].day, "str");
    }

    #[test]
    fn test_load_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("extraction.toml"),
            "system = \"Extract for {{market}}: {{schema}}\"\n",
        )
        .unwrap();

        let mut vars = HashMap::new();
        vars.insert("market".to_string(), "Barcelona".to_string());
        let prompts = Prompts::load(dir.path().to_str(), Some(&vars)).unwrap();

        let rendered = prompts.extraction_system();
        assert!(rendered.starts_with("Extract for Barcelona: {"));
    }
}
