pub mod cli;
pub mod config;
pub mod deck;
pub mod docs;
pub mod generator;
pub mod parser;
pub mod template;
pub mod text;
pub mod validate;

pub fn get_backend_types() -> Vec<String> {
    vec!["html".to_string(), "json".to_string()]
}

pub fn get_template_names() -> Vec<String> {
    template::SLIDE_TEMPLATES
        .iter()
        .map(|t| t.name.to_string())
        .collect()
}
