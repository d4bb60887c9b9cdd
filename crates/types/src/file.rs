//! Host language detection: [`Language`].

use std::path::Path;

/// Source language of a host document (determines extraction strategy).
///
/// GraphQL files are parsed whole. Script files carry GraphQL inside tagged
/// template literals, Reason files inside `[%relay.*]` / `[%graphql]`
/// extension points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Raw GraphQL files (.graphql, .gql)
    GraphQL,
    /// TypeScript (.ts, .tsx)
    TypeScript,
    /// JavaScript (.js, .jsx, .mjs, .cjs)
    JavaScript,
    /// Vue Single File Components (.vue)
    Vue,
    /// Reason (.re)
    Reason,
}

impl Language {
    /// Resolve an editor language identifier.
    ///
    /// Returns `None` for identifiers that never carry GraphQL.
    #[must_use]
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "graphql" => Some(Self::GraphQL),
            "typescript" | "typescriptreact" => Some(Self::TypeScript),
            "javascript" | "javascriptreact" => Some(Self::JavaScript),
            "vue" => Some(Self::Vue),
            "reason" => Some(Self::Reason),
            _ => None,
        }
    }

    /// Detect language from a file path based on its extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        match extension {
            "graphql" | "gql" => Some(Self::GraphQL),
            "ts" | "tsx" => Some(Self::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "vue" => Some(Self::Vue),
            "re" => Some(Self::Reason),
            _ => None,
        }
    }

    /// Canonical editor language identifier.
    #[must_use]
    pub const fn language_id(self) -> &'static str {
        match self {
            Self::GraphQL => "graphql",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Vue => "vue",
            Self::Reason => "reason",
        }
    }

    /// Returns `true` for languages that embed GraphQL in tagged template literals.
    #[must_use]
    pub const fn uses_template_tags(self) -> bool {
        matches!(self, Self::TypeScript | Self::JavaScript | Self::Vue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_language_from_language_id() {
        assert_eq!(Language::from_language_id("graphql"), Some(Language::GraphQL));
        assert_eq!(
            Language::from_language_id("typescriptreact"),
            Some(Language::TypeScript)
        );
        assert_eq!(
            Language::from_language_id("javascriptreact"),
            Some(Language::JavaScript)
        );
        assert_eq!(Language::from_language_id("vue"), Some(Language::Vue));
        assert_eq!(Language::from_language_id("reason"), Some(Language::Reason));
        assert_eq!(Language::from_language_id("unknown-lang"), None);
        assert_eq!(Language::from_language_id("ocaml"), None);
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(
            Language::from_path(&PathBuf::from("schema.graphql")),
            Some(Language::GraphQL)
        );
        assert_eq!(
            Language::from_path(&PathBuf::from("component.tsx")),
            Some(Language::TypeScript)
        );
        assert_eq!(
            Language::from_path(&PathBuf::from("script.mjs")),
            Some(Language::JavaScript)
        );
        assert_eq!(
            Language::from_path(&PathBuf::from("UserProfile.re")),
            Some(Language::Reason)
        );
        assert_eq!(Language::from_path(&PathBuf::from("README.md")), None);
    }

    #[test]
    fn test_language_id_round_trips() {
        for language in [
            Language::GraphQL,
            Language::TypeScript,
            Language::JavaScript,
            Language::Vue,
            Language::Reason,
        ] {
            assert_eq!(Language::from_language_id(language.language_id()), Some(language));
        }
    }

    #[test]
    fn test_uses_template_tags() {
        assert!(Language::TypeScript.uses_template_tags());
        assert!(Language::Vue.uses_template_tags());
        assert!(!Language::GraphQL.uses_template_tags());
        assert!(!Language::Reason.uses_template_tags());
    }
}
