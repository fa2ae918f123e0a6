use std::sync::Arc;

use digest_core::Document;
use tracing::{info, warn};

use crate::prompt::{self, COMPRESS_TEMPLATE};
use crate::provider::{GenerateOptions, LlmProvider};

const COMPRESS_OPTIONS: GenerateOptions = GenerateOptions {
    temperature: 0.2,
    max_output_tokens: 8000,
    json_response: false,
};

/// What the router did with a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Short enough to use as-is; no model call.
    PassThrough,
    /// Replaced by the model's key-point extraction.
    Compressed {
        original_chars: usize,
        compressed_chars: usize,
    },
    /// Compression was attempted and failed; the full text is used.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutedText {
    pub text: String,
    pub route: Route,
}

/// Decides whether a document goes to analysis unchanged or is first
/// condensed by a single model pass.
pub struct DocumentRouter {
    provider: Arc<dyn LlmProvider>,
    page_threshold: usize,
}

impl DocumentRouter {
    pub fn new(provider: Arc<dyn LlmProvider>, page_threshold: usize) -> Self {
        Self {
            provider,
            page_threshold,
        }
    }

    pub fn needs_compression(&self, page_count: usize) -> bool {
        page_count > self.page_threshold
    }

    /// Never fails: a failed compression degrades to the original text.
    pub async fn route(&self, document: &Document) -> RoutedText {
        if !self.needs_compression(document.page_count) {
            return RoutedText {
                text: document.text.clone(),
                route: Route::PassThrough,
            };
        }

        info!(
            pages = document.page_count,
            threshold = self.page_threshold,
            "Long document detected, running intelligent extraction"
        );

        let page_count = document.page_count.to_string();
        let request = prompt::render(
            COMPRESS_TEMPLATE,
            &[("page_count", page_count.as_str())],
            &document.text,
        );

        match self.provider.generate(&request, &COMPRESS_OPTIONS).await {
            Ok(extracted) => {
                let original_chars = document.char_count();
                let compressed_chars = extracted.chars().count();
                info!(original_chars, compressed_chars, "Extracted key points");
                RoutedText {
                    text: extracted,
                    route: Route::Compressed {
                        original_chars,
                        compressed_chars,
                    },
                }
            }
            Err(e) => {
                warn!(error = %e, "Intelligent extraction failed, falling back to full document");
                RoutedText {
                    text: document.text.clone(),
                    route: Route::Fallback {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::ScriptedProvider;

    fn router(provider: &Arc<ScriptedProvider>) -> DocumentRouter {
        DocumentRouter::new(provider.clone(), 10)
    }

    #[tokio::test]
    async fn short_documents_pass_through_without_calls() {
        let provider = Arc::new(ScriptedProvider::new().reply("should not be used"));
        for pages in [0, 1, 5, 10] {
            let doc = Document::new("r.pdf", "Revenue grew 12%.\n", pages);
            let routed = router(&provider).route(&doc).await;
            assert_eq!(routed.text, doc.text);
            assert_eq!(routed.route, Route::PassThrough);
        }
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn long_documents_compress_once() {
        let provider = Arc::new(ScriptedProvider::new().reply("• Revenue grew 12%"));
        let doc = Document::new("r.pdf", "Page text ".repeat(100), 11);

        let routed = router(&provider).route(&doc).await;

        assert_eq!(routed.text, "• Revenue grew 12%");
        assert_eq!(
            routed.route,
            Route::Compressed {
                original_chars: 1000,
                compressed_chars: 18,
            }
        );

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("(11 pages)"));
        assert!(calls[0].prompt.contains(&doc.text));
        assert_eq!(calls[0].options, COMPRESS_OPTIONS);
        assert!(!calls[0].options.json_response);
    }

    #[tokio::test]
    async fn failed_compression_returns_original_text() {
        let provider = Arc::new(ScriptedProvider::new().fail("quota exceeded"));
        let doc = Document::new("r.pdf", "Full original text", 42);

        let routed = router(&provider).route(&doc).await;

        assert_eq!(routed.text, "Full original text");
        match routed.route {
            Route::Fallback { reason } => assert!(reason.contains("quota exceeded")),
            other => panic!("expected fallback, got {other:?}"),
        }
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn threshold_is_exclusive() {
        let provider = Arc::new(ScriptedProvider::new());
        let router = router(&provider);
        assert!(!router.needs_compression(10));
        assert!(router.needs_compression(11));
    }
}
