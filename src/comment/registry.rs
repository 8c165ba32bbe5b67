use std::collections::HashMap;

use super::HeaderFormat;

/// A named group of file extensions sharing one header format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatAssociation {
    pub name: String,
    pub extensions: Vec<String>,
    pub format: HeaderFormat,
}

impl FormatAssociation {
    #[must_use]
    pub fn new(name: &str, extensions: Vec<&str>, format: HeaderFormat) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.into_iter().map(String::from).collect(),
            format,
        }
    }
}

/// Default header format per file extension.
#[derive(Debug)]
pub struct FormatRegistry {
    associations: Vec<FormatAssociation>,
    extension_map: HashMap<String, usize>,
}

impl FormatRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            associations: Vec::new(),
            extension_map: HashMap::new(),
        }
    }

    pub fn register(&mut self, association: FormatAssociation) {
        let idx = self.associations.len();
        for ext in &association.extensions {
            self.extension_map.insert(ext.clone(), idx);
        }
        self.associations.push(association);
    }

    #[must_use]
    pub fn get_by_extension(&self, ext: &str) -> Option<HeaderFormat> {
        self.extension_map
            .get(ext)
            .map(|&idx| self.associations[idx].format)
    }

    #[must_use]
    pub fn all(&self) -> &[FormatAssociation] {
        &self.associations
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        registry.register(FormatAssociation::new(
            "C-like",
            vec![
                "c", "h", "cpp", "hpp", "cc", "cxx", "hxx", "java", "kt", "kts", "scala", "groovy",
                "gradle", "js", "mjs", "cjs", "ts", "mts", "cts", "tsx", "jsx", "cs", "css",
                "swift", "php",
            ],
            HeaderFormat::Block,
        ));

        registry.register(FormatAssociation::new(
            "Slash",
            vec!["rs", "go", "dart", "zig", "proto"],
            HeaderFormat::Line,
        ));

        registry.register(FormatAssociation::new(
            "Markup",
            vec!["xml", "html", "htm", "xhtml", "svg", "vue", "fxml", "md"],
            HeaderFormat::Xml,
        ));

        registry.register(FormatAssociation::new(
            "Hash",
            vec![
                "py", "pyi", "sh", "bash", "zsh", "rb", "pl", "toml", "yaml", "yml", "cmake", "r",
                "tf", "nix",
            ],
            HeaderFormat::Hash,
        ));

        registry
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
