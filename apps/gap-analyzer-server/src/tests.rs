//! HTTP-level and property-based tests for the gap analyzer server
//!
//! Test categories:
//! - Route behaviour through axum-test
//! - Batch isolation of per-document failures
//! - Markdown report rendering under arbitrary input

#[cfg(test)]
mod http_tests {
    use axum_test::TestServer;
    use checklist_engine::ChecklistRegistry;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{app, AppState};

    const PROTOCOL: &str = "Clinical investigation protocol. The protocol is approved by an \
        Ethics Committee? Informed consent procedures are described and compliant? \
        Is there a monitoring plan described? Adverse event reporting procedures are detailed?";

    fn create_test_server() -> TestServer {
        let state = AppState::new(ChecklistRegistry::builtin().clone(), &[], 1024 * 1024).unwrap();
        TestServer::new(app(state)).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_200() {
        let server = create_test_server();
        let response = server.get("/health").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["service"], "gap-analyzer-server");
    }

    #[tokio::test]
    async fn test_checklists_lists_catalog() {
        let server = create_test_server();
        let response = server.get("/api/checklists").await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["count"], 4);
        assert_eq!(json["checklists"][0]["name"], "ISO 14155");
        assert_eq!(
            json["checklists"][0]["requirements"].as_array().unwrap().len(),
            5
        );
        assert_eq!(json["default_selection"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_classify_prefers_protocol() {
        let server = create_test_server();
        let response = server
            .post("/api/classify")
            .json(&json!({ "text": "SOP for protocol deviations" }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["document_type"], "Protocol");
    }

    #[tokio::test]
    async fn test_analyze_protocol_against_iso() {
        let server = create_test_server();
        let response = server
            .post("/api/analyze")
            .json(&json!({
                "documents": [{ "filename": "protocol.txt", "text": PROTOCOL }],
                "standards": ["iso-14155"]
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["analyzed_count"], 1);
        assert_eq!(json["failed_count"], 0);

        let doc = &json["documents"][0];
        assert_eq!(doc["status"], "analyzed");
        assert_eq!(doc["document_type"], "Protocol");
        assert_eq!(doc["results"].as_array().unwrap().len(), 1);
        assert_eq!(doc["results"][0]["items"].as_array().unwrap().len(), 5);
        assert_eq!(
            doc["results"][0]["items"][0]["verdict"],
            "likely_addressed"
        );
        assert_eq!(doc["summary"]["confidences"][0]["name"], "ISO 14155");
    }

    #[tokio::test]
    async fn test_analyze_uses_default_selection() {
        let server = create_test_server();
        let response = server
            .post("/api/analyze")
            .json(&json!({ "documents": [{ "filename": "blank.txt", "text": "" }] }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        let doc = &json["documents"][0];
        assert_eq!(doc["results"].as_array().unwrap().len(), 4);
        assert_eq!(doc["summary"]["overall_confidence"], 0.0);
        assert_eq!(doc["summary"]["tier"], "low");
    }

    #[tokio::test]
    async fn test_analyze_empty_selection_has_no_summary() {
        let server = create_test_server();
        let response = server
            .post("/api/analyze")
            .json(&json!({
                "documents": [{ "filename": "a.txt", "text": PROTOCOL }],
                "standards": []
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert!(json["documents"][0]["summary"].is_null());
    }

    #[tokio::test]
    async fn test_analyze_isolates_failed_documents() {
        let server = create_test_server();
        let response = server
            .post("/api/analyze")
            .json(&json!({
                "documents": [
                    { "filename": "one.txt", "text": PROTOCOL },
                    { "filename": "two.docx", "content_base64": "UEsDBA==",
                      "content_type": "application/vnd.openxmlformats-officedocument.wordprocessingml.document" },
                    // "SOP archive"
                    { "filename": "three.txt", "content_base64": "U09QIGFyY2hpdmU=" }
                ],
                "standards": ["fda-21-cfr-812"]
            }))
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        assert_eq!(json["analyzed_count"], 2);
        assert_eq!(json["failed_count"], 1);

        let docs = json["documents"].as_array().unwrap();
        assert_eq!(docs[0]["status"], "analyzed");
        assert_eq!(docs[1]["status"], "failed");
        assert_eq!(docs[1]["filename"], "two.docx");
        assert!(docs[1]["error"]
            .as_str()
            .unwrap()
            .contains("Unsupported document format"));
        assert_eq!(docs[2]["status"], "analyzed");
        assert_eq!(docs[2]["document_type"], "SOP");
        assert_eq!(docs[2]["results"][0]["items"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_analyze_rejects_unknown_standard() {
        let server = create_test_server();
        let response = server
            .post("/api/analyze")
            .json(&json!({
                "documents": [{ "filename": "a.txt", "text": "x" }],
                "standards": ["iso-9001"]
            }))
            .await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "UNKNOWN_CHECKLIST");
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_batch() {
        let server = create_test_server();
        let response = server
            .post("/api/analyze")
            .json(&json!({ "documents": [] }))
            .await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_report_returns_markdown() {
        let server = create_test_server();
        let response = server
            .post("/api/report")
            .json(&json!({
                "documents": [{ "filename": "protocol.txt", "text": PROTOCOL }],
                "standards": ["ISO 14155", "FDA 21 CFR Part 812"]
            }))
            .await;
        response.assert_status_ok();

        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().starts_with("text/markdown"));

        let body = response.text();
        assert!(body.contains("### 📋 ISO 14155 Compliance Check"));
        assert!(body.contains("### 📋 FDA 21 CFR Part 812 Compliance Check"));
        assert!(body.contains("**Overall confidence:**"));
    }
}

#[cfg(test)]
mod property_tests {
    use checklist_engine::GapAnalyzer;
    use proptest::prelude::*;
    use shared_types::BatchEntry;

    use crate::render::render_markdown;

    fn filename() -> impl Strategy<Value = String> {
        "[a-z]{1,12}\\.(txt|pdf)"
    }

    proptest! {
        /// Property: every document gets its own section, in batch order
        #[test]
        fn report_has_section_per_document(
            texts in prop::collection::vec(("[a-zA-Z ?]{0,120}", filename()), 1..6)
        ) {
            let analyzer = GapAnalyzer::new();
            let selection: Vec<_> = analyzer.registry().iter().collect();
            let entries: Vec<BatchEntry> = analyzer.analyze_batch(
                texts.iter().map(|(t, f)| (f.clone(), Ok::<_, String>(t.clone()))),
                &selection,
            );

            let md = render_markdown(&entries);
            prop_assert_eq!(md.matches("\n## 📎 ").count(), texts.len());
            prop_assert_eq!(
                md.matches("Compliance Check").count(),
                texts.len() * selection.len()
            );

            let mut cursor = 0;
            for (_, name) in &texts {
                let heading = format!("## 📎 {}", name);
                let found = md[cursor..].find(&heading);
                prop_assert!(found.is_some(), "missing section for {}", name);
                cursor += found.unwrap() + heading.len();
            }
        }

        /// Property: failures render in place without hiding other documents
        #[test]
        fn failures_render_in_place(fail_index in 0usize..3) {
            let analyzer = GapAnalyzer::new();
            let selection = analyzer.select(&["iso-14155"]).unwrap();
            let docs = (0..3).map(|i| {
                let text = if i == fail_index {
                    Err("unreadable".to_string())
                } else {
                    Ok("protocol text".to_string())
                };
                (format!("doc{}.txt", i), text)
            });

            let entries = analyzer.analyze_batch(docs, &selection);
            let md = render_markdown(&entries);

            prop_assert_eq!(md.matches("Could not analyze document").count(), 1);
            prop_assert_eq!(md.matches("ISO 14155 Compliance Check").count(), 2);
        }
    }
}

#[cfg(test)]
mod config_tests {
    use crate::burst_size;

    #[test]
    fn test_burst_size_doubles_rate() {
        assert_eq!(burst_size(10), 20);
    }

    #[test]
    fn test_burst_size_saturates_on_large_rates() {
        assert_eq!(burst_size(u32::MAX), u32::MAX);
        assert_eq!(burst_size(u32::MAX / 2 + 1), u32::MAX);
    }
}
