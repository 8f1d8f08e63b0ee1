mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use certigen::render::{
    ImageOptions, PdfOptions, PlaceholderBackend, RenderChain, RenderError, RenderTarget,
};
use certigen::OutputFormat;

use common::{ScriptedBackend, SharedBackend};

fn pdf_target() -> RenderTarget {
    RenderTarget::Pdf(PdfOptions::default())
}

#[tokio::test]
async fn first_available_backend_wins() {
    common::init_logging();
    let chain = RenderChain::new(
        "pdf",
        vec![
            Box::new(ScriptedBackend::succeeding("primary", b"primary-bytes")),
            Box::new(ScriptedBackend::succeeding("secondary", b"secondary-bytes")),
        ],
    );

    let bytes = chain.convert("<html></html>", &pdf_target()).await.unwrap();
    assert_eq!(bytes, b"primary-bytes");
}

#[tokio::test]
async fn unavailable_backends_are_skipped_without_invocation() {
    let skipped = Arc::new(ScriptedBackend::unavailable("skipped"));
    let chain = RenderChain::new(
        "pdf",
        vec![
            Box::new(SharedBackend(skipped.clone())),
            Box::new(ScriptedBackend::succeeding("fallback", b"fallback-bytes")),
        ],
    );

    let bytes = chain.convert("<html></html>", &pdf_target()).await.unwrap();
    assert_eq!(bytes, b"fallback-bytes");
    assert_eq!(skipped.attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_backend_falls_through_to_next() {
    let chain = RenderChain::new(
        "pdf",
        vec![
            Box::new(ScriptedBackend::failing("broken", "segfault")),
            Box::new(ScriptedBackend::succeeding("working", b"good-bytes")),
        ],
    );

    // The result equals what the later backend alone would produce.
    let bytes = chain.convert("<html></html>", &pdf_target()).await.unwrap();
    assert_eq!(bytes, b"good-bytes");
}

#[tokio::test]
async fn exhausted_chain_names_every_attempted_backend() {
    let chain = RenderChain::new(
        "pdf",
        vec![
            Box::new(ScriptedBackend::unavailable("wkhtmltopdf")),
            Box::new(ScriptedBackend::failing("browser-script", "crash")),
            Box::new(ScriptedBackend::unavailable("chromium")),
        ],
    );

    let err = chain.convert("<html></html>", &pdf_target()).await.unwrap_err();
    let RenderError::NoBackendAvailable { attempted } = err;
    assert_eq!(attempted, vec!["wkhtmltopdf", "browser-script", "chromium"]);
}

#[tokio::test]
async fn empty_backend_output_counts_as_failure() {
    let chain = RenderChain::new(
        "pdf",
        vec![
            Box::new(ScriptedBackend::succeeding("empty", b"")),
            Box::new(ScriptedBackend::succeeding("real", b"real-bytes")),
        ],
    );

    let bytes = chain.convert("<html></html>", &pdf_target()).await.unwrap();
    assert_eq!(bytes, b"real-bytes");
}

#[tokio::test]
async fn image_chain_with_placeholder_tail_always_succeeds() {
    let chain = RenderChain::new(
        "image",
        vec![
            Box::new(ScriptedBackend::unavailable("wkhtmltoimage")),
            Box::new(ScriptedBackend::failing("browser-script", "no display")),
            Box::new(PlaceholderBackend),
        ],
    );

    let target = RenderTarget::Image(ImageOptions {
        format: OutputFormat::Png,
        ..ImageOptions::default()
    });
    let bytes = chain.convert("<html></html>", &target).await.unwrap();
    assert!(!bytes.is_empty());
    assert!(image::load_from_memory(&bytes).is_ok());
}

#[tokio::test]
async fn backend_names_follow_registration_order() {
    let chain = RenderChain::new(
        "pdf",
        vec![
            Box::new(ScriptedBackend::succeeding("a", b"x")),
            Box::new(ScriptedBackend::succeeding("b", b"y")),
        ],
    );
    assert_eq!(chain.backend_names(), vec!["a", "b"]);
}
