//! Profile header injection across the outbound call path.

use acme_augment::{AugmentError, SignedPayload, Transport};

use crate::integration::{
    augmenter_for, auth_csr, finalize_payload, header_value, plain_csr, signing_csr, test_client,
    MockCaServer, TEST_AGENT, PATH_FINALIZE, PATH_ORDER,
};

#[tokio::test]
async fn test_signing_csr_injects_signing_profile() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    augmenter
        .send_signed(
            client.post(mock.endpoint(PATH_FINALIZE)),
            &finalize_payload(&signing_csr()),
        )
        .await
        .expect("finalize succeeds");

    let requests = mock.received().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        header_value(&requests[0], "user-agent").as_deref(),
        Some(format!("profileID=SIGN1 {TEST_AGENT}").as_str())
    );
}

#[tokio::test]
async fn test_auth_csr_injects_auth_profile() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    augmenter
        .send_signed(
            client.post(mock.endpoint(PATH_FINALIZE)),
            &finalize_payload(&auth_csr()),
        )
        .await
        .expect("finalize succeeds");

    let requests = mock.received().await;
    assert_eq!(
        header_value(&requests[0], "user-agent").as_deref(),
        Some(format!("profileID=AUTH1 {TEST_AGENT}").as_str())
    );
}

#[tokio::test]
async fn test_csr_without_key_usage_injects_no_profile() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    augmenter
        .send_signed(
            client.post(mock.endpoint(PATH_FINALIZE)),
            &finalize_payload(&plain_csr()),
        )
        .await
        .expect("finalize succeeds");

    let requests = mock.received().await;
    // No profile fragment, but the session headers are still present.
    assert_eq!(
        header_value(&requests[0], "user-agent").as_deref(),
        Some(TEST_AGENT)
    );
    assert_eq!(
        header_value(&requests[0], "accept-charset").as_deref(),
        Some("utf-8")
    );
}

#[tokio::test]
async fn test_unmatched_host_skips_profile_silently() {
    let mock = MockCaServer::start().await;
    let client = test_client();

    // Directory knows a different CA than the one being contacted.
    let mut augmenter = acme_augment::RequestAugmenter::new(
        acme_augment::HttpTransport::new(std::sync::Arc::new(crate::integration::NoopSigner)),
        crate::integration::directory_for("https://elsewhere.example.com/acme/directory"),
        crate::integration::session_for(&mock.url()),
    );

    augmenter
        .send_signed(
            client.post(mock.endpoint(PATH_FINALIZE)),
            &finalize_payload(&signing_csr()),
        )
        .await
        .expect("finalize still succeeds without a profile");

    let requests = mock.received().await;
    assert_eq!(
        header_value(&requests[0], "user-agent").as_deref(),
        Some(TEST_AGENT)
    );
}

#[tokio::test]
async fn test_profile_persists_for_later_polling_calls() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    augmenter
        .send_signed(
            client.post(mock.endpoint(PATH_FINALIZE)),
            &finalize_payload(&signing_csr()),
        )
        .await
        .expect("finalize succeeds");

    // Poll the order twice; neither request carries a CSR.
    for _ in 0..2 {
        augmenter
            .send(client.get(mock.endpoint(PATH_ORDER)))
            .await
            .expect("poll succeeds");
    }

    let requests = mock.received().await;
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(
            header_value(request, "user-agent").as_deref(),
            Some(format!("profileID=SIGN1 {TEST_AGENT}").as_str())
        );
    }
}

#[tokio::test]
async fn test_malformed_csr_fails_before_any_request() {
    let mock = MockCaServer::start().await;
    let client = test_client();
    let mut augmenter = augmenter_for(&mock.url());

    let mut payload = SignedPayload::new();
    payload.set_csr(b"truncated garbage");

    let err = augmenter
        .send_signed(client.post(mock.endpoint(PATH_FINALIZE)), &payload)
        .await
        .unwrap_err();

    assert!(matches!(err, AugmentError::CsrParse(_)));
    assert!(!err.is_transport());
    assert!(mock.received().await.is_empty());
}

#[tokio::test]
async fn test_concurrent_operations_stay_isolated() {
    let mock = MockCaServer::start().await;
    let client = test_client();

    // Operation A resolves a signing profile; operation B never sees a CSR.
    let mut op_a = augmenter_for(&mock.url());
    let mut op_b = augmenter_for(&mock.url());

    op_a.send_signed(
        client.post(mock.endpoint(PATH_FINALIZE)),
        &finalize_payload(&signing_csr()),
    )
    .await
    .expect("finalize succeeds");

    op_b.send(client.get(mock.endpoint(PATH_ORDER)))
        .await
        .expect("poll succeeds");

    let requests = mock.received().await;
    assert_eq!(requests.len(), 2);

    let finalize = requests
        .iter()
        .find(|r| r.url.path() == PATH_FINALIZE)
        .unwrap();
    let poll = requests.iter().find(|r| r.url.path() == PATH_ORDER).unwrap();

    assert_eq!(
        header_value(finalize, "user-agent").as_deref(),
        Some(format!("profileID=SIGN1 {TEST_AGENT}").as_str())
    );
    assert_eq!(header_value(poll, "user-agent").as_deref(), Some(TEST_AGENT));
}

#[tokio::test]
async fn test_transport_failure_is_a_single_io_kind() {
    // Bind an ephemeral port and release it so nothing is listening there;
    // the connection is refused instead of served.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind succeeds");
        listener.local_addr().expect("bound address").port()
    };
    let url = format!("http://127.0.0.1:{port}{PATH_ORDER}");

    let client = test_client();
    // No server is involved; any augmenter works here.
    let mut augmenter = augmenter_for("https://ca.example.com/acme/directory");

    let err = augmenter.send(client.get(url)).await.unwrap_err();
    assert!(err.is_transport());
    assert!(matches!(err, AugmentError::TransportIo(_)));
}
