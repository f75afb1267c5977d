// SPDX-FileCopyrightText: 2026 Plugforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the scanner and metadata extractor.

use plugforge_core::{CallbackRole, SourceArtifact};
use plugforge_extract::{Delimiter, extract_balanced, extract_callback, extract_metadata};
use proptest::prelude::*;
use regex::Regex;

/// Text with no delimiters, quotes, comment starts or backslashes.
fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 =;+.,]{0,40}"
}

/// Return type annotations as they appear on descriptor callbacks.
fn return_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "",
        ": boolean",
        ": Promise<InstallResult>",
        ": Promise<{ success: boolean }>",
        ": Promise<Array<{ path: string }>>",
        ": { files: string[]; success: boolean }",
        ": 'ok' | 'skipped'",
        ": Promise<void | { error: string }>",
    ])
}

proptest! {
    #[test]
    fn name_is_always_recovered(name in "[a-z@][a-z0-9@/_.-]{0,30}", filler in plain_text()) {
        let text = format!("{filler}\nexport const p = {{ name: \"{name}\", frameworks: ['react'] }}");
        let record = extract_metadata(&SourceArtifact::new("ui", "p", text)).unwrap();
        prop_assert_eq!(record.name, name);
    }

    #[test]
    fn balanced_body_is_returned_exactly(body in plain_text(), tail in plain_text()) {
        let src = format!("detect(ctx) {{{body}}}{tail}");
        let anchor = Regex::new("detect").unwrap();
        let region = extract_balanced(&src, &anchor, Delimiter::Brace);
        let expected = format!("{{{body}}}");
        prop_assert_eq!(region, Some(expected.as_str()));
    }

    #[test]
    fn unterminated_region_is_none(body in plain_text()) {
        let src = format!("detect(ctx) {{ {body} {{ {body}");
        let anchor = Regex::new("detect").unwrap();
        prop_assert_eq!(extract_balanced(&src, &anchor, Delimiter::Brace), None);
    }

    #[test]
    fn quoted_closers_are_kept(prefix in plain_text(), closers in "[}{]{1,5}", quote in prop::sample::select(vec!['"', '\'', '`'])) {
        let src = format!("install() {{ const s = {quote}{closers}{quote}; {prefix} return 1 }}");
        let body = extract_callback(&src, CallbackRole::Install).unwrap().body;
        let expected_literal = format!("{quote}{closers}{quote}");
        prop_assert!(body.contains(&expected_literal));
        prop_assert!(body.ends_with("return 1"));
    }

    #[test]
    fn signature_shape_never_leaks_into_body(
        param in "[a-z][a-zA-Z0-9_]{0,10}",
        ret in return_type(),
        arrow in any::<bool>(),
        body in plain_text(),
    ) {
        let signature = if arrow {
            format!("install: async ({param}: ProjectContext){ret} =>")
        } else {
            format!("async install({param}: ProjectContext){ret}")
        };
        let src = format!("const r = install({param});\n{signature} {{ {body} }}");
        let callback = extract_callback(&src, CallbackRole::Install).unwrap();
        prop_assert_eq!(callback.params, format!("{param}: ProjectContext"));
        prop_assert_eq!(callback.body, body.trim());
    }
}
