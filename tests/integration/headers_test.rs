//! Session headers set on every outbound request.

use acme_augment::{EnrollmentSession, HttpTransport, RequestAugmenter, Transport};
use std::sync::Arc;

use crate::integration::{
    augmenter_for, directory_for, header_value, test_client, MockCaServer, NoopSigner, PATH_ORDER,
    TEST_AGENT,
};

#[tokio::test]
async fn test_charset_language_and_compression_headers() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    augmenter
        .send(client.get(mock.endpoint(PATH_ORDER)))
        .await
        .expect("request succeeds");

    let requests = mock.received().await;
    let request = &requests[0];

    assert_eq!(
        header_value(request, "accept-charset").as_deref(),
        Some("utf-8")
    );
    assert_eq!(header_value(request, "accept-language").as_deref(), Some("en"));
    assert_eq!(
        header_value(request, "accept-encoding").as_deref(),
        Some("gzip")
    );
    assert_eq!(
        header_value(request, "user-agent").as_deref(),
        Some(TEST_AGENT)
    );
}

#[tokio::test]
async fn test_compression_header_omitted_when_disabled() {
    let mock = MockCaServer::start().await;
    let client = test_client();

    let session = EnrollmentSession::builder()
        .server_url(mock.url())
        .expect("URL parses")
        .user_agent(TEST_AGENT)
        .language("et")
        .disable_compression()
        .build()
        .expect("session builds");

    let mut augmenter = RequestAugmenter::new(
        HttpTransport::new(Arc::new(NoopSigner)),
        directory_for(&mock.url()),
        session,
    );

    augmenter
        .send(client.get(mock.endpoint(PATH_ORDER)))
        .await
        .expect("request succeeds");

    let requests = mock.received().await;
    let request = &requests[0];

    assert!(header_value(request, "accept-encoding").is_none());
    assert_eq!(header_value(request, "accept-language").as_deref(), Some("et"));
}

#[tokio::test]
async fn test_signed_body_carries_jose_content_type() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    let payload = crate::integration::finalize_payload(&crate::integration::plain_csr());
    augmenter
        .send_signed(
            client.post(mock.endpoint(crate::integration::PATH_FINALIZE)),
            &payload,
        )
        .await
        .expect("finalize succeeds");

    let requests = mock.received().await;
    assert_eq!(
        header_value(&requests[0], "content-type").as_deref(),
        Some("application/jose+json")
    );
    assert!(!requests[0].body.is_empty());
}
