//! Chat and image service tests over the shared dispatch pipeline.

use ember_net::ai::{ChatConfig, ChatService, ChatTurn, ImageConfig, ImageOptions, ImageService};
use ember_net::{Dispatcher, NetError};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;

fn chat_service(base_url: &str) -> ChatService {
    ChatService::new(
        Arc::new(Dispatcher::new().unwrap()),
        ChatConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            model: "chat-1".to_string(),
        },
    )
}

fn image_service(base_url: &str) -> ImageService {
    ImageService::new(
        Arc::new(Dispatcher::new().unwrap()),
        ImageConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            model: "img-1".to_string(),
        },
    )
}

#[tokio::test]
async fn chat_sends_history_and_returns_first_choice() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "chat-1",
            "stream": false,
            "messages": [
                {"role": "system", "content": [{"type": "text", "text": "be brief"}]},
                {"role": "user", "content": [{"type": "text", "text": "hi"}]},
                {"role": "assistant", "content": [{"type": "text", "text": "hello"}]},
                {"role": "user", "content": [{"type": "text", "text": "how are you?"}]}
            ]
        })))
        .with_status(200)
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "doing well"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let history = vec![ChatTurn::user("hi"), ChatTurn::assistant("hello")];
    let reply = chat_service(&server.url())
        .send_message("how are you?", None, Some("be brief"), &history)
        .await
        .unwrap();

    assert_eq!(reply, "doing well");
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_attaches_image_content_block() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": "what is this?"},
                    {"type": "image_url", "image_url": {"url": "http://img/x.png"}}
                ]
            }]
        })))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"a lamp"}}]}"#)
        .create_async()
        .await;

    let reply = chat_service(&server.url())
        .send_message("what is this?", Some("http://img/x.png"), None, &[])
        .await
        .unwrap();

    assert_eq!(reply, "a lamp");
    mock.assert_async().await;
}

#[tokio::test]
async fn chat_with_no_choices_is_no_data() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    assert!(matches!(
        chat_service(&server.url())
            .initiate_conversation(Some("greet the user"))
            .await,
        Err(NetError::NoData)
    ));
}

#[tokio::test]
async fn chat_surfaces_provider_rejection_as_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"message":"rate limited","code":429}"#)
        .create_async()
        .await;

    match chat_service(&server.url())
        .send_message("hi", None, None, &[])
        .await
    {
        Err(NetError::Api { message, code }) => {
            assert_eq!(message, "rate limited");
            assert_eq!(code, Some(429));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn image_generation_returns_first_url() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/images/generations")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "img-1",
            "prompt": "a quiet harbor at dawn",
            "response_format": "url",
            "size": "720x1280",
            "guidance_scale": 2.5,
            "watermark": false
        })))
        .with_status(200)
        .with_body(
            json!({
                "model": "img-1",
                "created": 1700000000,
                "data": [{"url": "http://cdn/img-1.png", "revised_prompt": null}],
                "usage": {"generated_images": 1, "output_tokens": 512, "total_tokens": 512}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let url = image_service(&server.url())
        .generate_image("a quiet harbor at dawn", ImageOptions::default())
        .await
        .unwrap();

    assert_eq!(url, "http://cdn/img-1.png");
    mock.assert_async().await;
}

#[tokio::test]
async fn image_payload_without_url_is_no_data() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/images/generations")
        .with_status(200)
        .with_body(r#"{"data":[{"b64_json":"…"}]}"#)
        .create_async()
        .await;

    assert!(matches!(
        image_service(&server.url())
            .generate_image("anything", ImageOptions::default())
            .await,
        Err(NetError::NoData)
    ));
}
