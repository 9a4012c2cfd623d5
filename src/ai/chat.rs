//! Chat completion service.
//!
//! Converts conversation history into role-tagged wire messages, packages the
//! request body, and dispatches it through the shared pipeline. The model
//! answer is the first choice's message content.

use crate::ai::AiEndpoint;
use crate::dispatcher::Dispatcher;
use crate::{NetError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One turn of local conversation history.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub content: String,
    pub from_user: bool,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            from_user: true,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            from_user: false,
        }
    }
}

/// Provider endpoint and model selection for the chat service.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

// Wire shapes, snake_case field names per the provider API.

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f64,
    max_tokens: u32,
    top_p: f64,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<ImageRef>,
}

#[derive(Debug, Serialize)]
struct ImageRef {
    url: String,
}

impl ContentPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: Some(text.into()),
            image_url: None,
        }
    }

    fn image(url: impl Into<String>) -> Self {
        Self {
            kind: "image_url",
            text: None,
            image_url: Some(ImageRef { url: url.into() }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Chat completion over the shared dispatch pipeline.
pub struct ChatService {
    dispatcher: Arc<Dispatcher>,
    config: ChatConfig,
}

impl ChatService {
    pub fn new(dispatcher: Arc<Dispatcher>, config: ChatConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Send a user message with optional image attachment, system prompt, and
    /// prior conversation history. Returns the model's reply text.
    pub async fn send_message(
        &self,
        user_message: &str,
        image_url: Option<&str>,
        system_message: Option<&str>,
        history: &[ChatTurn],
    ) -> Result<String> {
        let mut messages = Vec::new();

        if let Some(system) = system_message {
            messages.push(WireMessage {
                role: "system",
                content: vec![ContentPart::text(system)],
            });
        }

        messages.extend(history.iter().map(|turn| WireMessage {
            role: if turn.from_user { "user" } else { "assistant" },
            content: vec![ContentPart::text(&*turn.content)],
        }));

        let mut content = vec![ContentPart::text(user_message)];
        if let Some(url) = image_url {
            content.push(ContentPart::image(url));
        }
        messages.push(WireMessage {
            role: "user",
            content,
        });

        self.complete(messages).await
    }

    /// Have the model open the conversation instead of the user.
    pub async fn initiate_conversation(&self, system_message: Option<&str>) -> Result<String> {
        let mut messages = Vec::new();

        if let Some(system) = system_message {
            messages.push(WireMessage {
                role: "system",
                content: vec![ContentPart::text(system)],
            });
        }

        // An opening user turn prompts the first reply.
        messages.push(WireMessage {
            role: "user",
            content: vec![ContentPart::text("Please start our conversation.")],
        });

        self.complete(messages).await
    }

    async fn complete(&self, messages: Vec<WireMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 0.9,
            stream: false,
        };
        let body = serde_json::to_vec(&request).map_err(NetError::Encoding)?;

        let endpoint = AiEndpoint {
            url: format!("{}/chat/completions", self.config.base_url),
            api_key: self.config.api_key.clone(),
            body,
        };
        let payload = self.dispatcher.dispatch(&endpoint).await?;
        let response: ChatResponse =
            serde_json::from_value(payload).map_err(NetError::Decoding)?;

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.message.content),
            None => Err(NetError::NoData),
        }
    }
}
