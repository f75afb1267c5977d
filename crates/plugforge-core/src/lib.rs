// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plugforge descriptor pipeline.
//!
//! Holds the error type and the small set of domain types every other crate
//! in the workspace shares: the closed [`Category`] enumeration, the three
//! [`CallbackRole`]s, the read-only [`SourceArtifact`], and the
//! caller-supplied [`ProjectContext`].

pub mod error;
pub mod types;

pub use error::PlugforgeError;
pub use types::{CallbackRole, Category, ProjectContext, SourceArtifact};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn category_parses_tag_and_directory_forms() {
        assert_eq!(Category::from_tag("ROUTING"), Some(Category::Routing));
        assert_eq!(Category::from_tag("routing"), Some(Category::Routing));
        assert_eq!(Category::from_tag("NEXTJS"), Some(Category::Nextjs));
        assert_eq!(Category::from_tag("UI"), Some(Category::Ui));
        assert_eq!(Category::from_tag("ROUTER"), None);
    }

    #[test]
    fn category_display_round_trips() {
        for category in Category::all() {
            let tag = category.to_string();
            assert_eq!(tag, tag.to_uppercase());
            assert_eq!(Category::from_str(&tag).unwrap(), category);
        }
        assert_eq!(Category::all().len(), 11);
    }

    #[test]
    fn category_serializes_as_tag() {
        let json = serde_json::to_string(&Category::Http).unwrap();
        assert_eq!(json, "\"HTTP\"");
    }

    #[test]
    fn callback_roles_map_to_builder_steps() {
        let steps: Vec<_> = CallbackRole::all()
            .iter()
            .map(|r| r.builder_step())
            .collect();
        assert_eq!(steps, ["withDetect", "withInstall", "withConfigure"]);
        assert!(!CallbackRole::Detect.is_async());
        assert!(CallbackRole::Install.is_async());
        assert_eq!(CallbackRole::from_str("configure").unwrap(), CallbackRole::Configure);
        assert_eq!(CallbackRole::Configure.to_string(), "configure");
    }

    #[test]
    fn project_context_builders() {
        let ctx = ProjectContext::new("react")
            .with_dependency("zustand", "^4.5.0")
            .with_typescript(true)
            .with_bundler("vite");
        assert!(ctx.has_dependency("zustand"));
        assert!(!ctx.has_dependency("axios"));
        assert!(ctx.typescript);
        assert_eq!(ctx.bundler.as_deref(), Some("vite"));
    }

    #[test]
    fn source_artifact_label() {
        let artifact = SourceArtifact::new("state", "zustand", "export const x = 1");
        assert_eq!(artifact.label(), "state/zustand");
        assert_eq!(artifact.path, std::path::Path::new("state").join("zustand"));
    }

    #[test]
    fn error_messages_name_the_offenders() {
        let err = PlugforgeError::IdentifierCollision {
            identifier: "abPlugin".into(),
            names: vec!["@a/b".into(), "a-b".into()],
        };
        assert_eq!(
            err.to_string(),
            "identifier collision: `abPlugin` is derived from @a/b, a-b"
        );

        let err = PlugforgeError::DuplicateName {
            name: "axios".into(),
            paths: vec!["http/axios.ts".into(), "utils/axios.ts".into()],
        };
        assert!(err.to_string().contains("http/axios.ts, utils/axios.ts"));

        let err = PlugforgeError::io(
            "failed to read descriptor",
            "state/zustand.ts",
            std::io::Error::other("denied"),
        );
        assert_eq!(err.to_string(), "io error: failed to read descriptor: denied");
    }
}
