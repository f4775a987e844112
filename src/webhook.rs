//! The calendar chat-bot plugin.
//!
//! Receives a slash-command payload and echoes its text back to the
//! payload's response URL.  Unlike the renderer this talks to the
//! network directly, and every failure comes back typed.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use error::WebhookError;

/// Chat clients show ephemeral responses only to the caller.
const RESPONSE_TYPE: &str = "ephemeral";

/// An incoming command.  Both fields are optional; anything else the
/// chat service sends is ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Payload {
    /// What the user typed after the command.
    pub text: Option<String>,
    /// Where the answer goes.
    pub response_url: Option<String>,
}

impl Payload {
    /// Parse a JSON payload.
    pub fn from_json(body: &str) -> Result<Payload, WebhookError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// The message posted back to the chat service.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Response {
    /// The echoed text.
    pub text: String,
    /// Who sees the answer.
    pub response_type: &'static str,
}

/// Static description of the plugin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PluginInfo {
    /// Short identifier.
    pub name: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Plugin version.
    pub version: f64,
}

/// The calendar plugin.  Holds the HTTP client used for callbacks.
#[derive(Debug)]
pub struct Calendar {
    client: Client,
}

impl Calendar {
    /// A plugin with a default HTTP client.
    pub fn new() -> Result<Self, WebhookError> {
        let client = Client::builder()
            .build()
            .map_err(|error| WebhookError::Network {
                url: String::new(),
                error,
            })?;
        Ok(Calendar { client })
    }

    /// Describes the plugin.
    pub fn info() -> PluginInfo {
        PluginInfo {
            name: "calendar",
            title: "Calendar of Events",
            description: "Calendar of Events",
            version: 1.0,
        }
    }

    /// The echo for `payload`.  Missing text is echoed as `None`.
    pub fn message(payload: &Payload) -> String {
        match payload.text {
            Some(ref text) => format!("echo: {}", text),
            None => "echo: None".to_string(),
        }
    }

    /// Answer `payload`.  Returns the message that was posted, or
    /// `None` when the payload has nowhere to post it.
    pub fn respond(&self, payload: &Payload) -> Result<Option<String>, WebhookError> {
        let message = Calendar::message(payload);
        let url = match payload.response_url {
            Some(ref url) if !url.is_empty() => url,
            _ => {
                debug!("no response url, not answering {:?}", message);
                return Ok(None);
            }
        };
        debug!("posting {:?} to {}", message, url);

        let body = Response {
            text: message.clone(),
            response_type: RESPONSE_TYPE,
        };
        let response = self
            .client
            .post(url.as_str())
            .json(&body)
            .send()
            .map_err(|error| WebhookError::Network {
                url: url.clone(),
                error,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Downstream {
                url: url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(Some(message))
    }

    /// Parse and answer a raw JSON body, logging any failure with the
    /// plugin's name before handing it back.
    pub fn handle(&self, body: &str) -> Result<Option<String>, WebhookError> {
        let name = Calendar::info().name;
        let result = Payload::from_json(body).and_then(|payload| {
            debug!("loading {} with {:?}", name, payload);
            self.respond(&payload)
        });
        if let Err(ref err) = result {
            match *err {
                WebhookError::MalformedPayload(_) => warn!("plugin {}: {}", name, err),
                _ => error!("plugin {}: {}", name, err),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_payloads() {
        let payload =
            Payload::from_json(r#"{"text": "hi", "response_url": "http://x/y", "user": 7}"#)
                .unwrap();
        assert_eq!(payload.text, Some("hi".to_string()));
        assert_eq!(payload.response_url, Some("http://x/y".to_string()));
        assert_eq!(Payload::from_json("{}").unwrap(), Payload::default());
    }

    #[test]
    fn malformed_payloads_are_typed() {
        match Payload::from_json("not json") {
            Err(WebhookError::MalformedPayload(_)) => {}
            other => panic!("expected a malformed payload, got {:?}", other),
        }
    }

    #[test]
    fn echoes_text() {
        let payload = Payload {
            text: Some("standup at ten".to_string()),
            response_url: None,
        };
        assert_eq!(Calendar::message(&payload), "echo: standup at ten");
        assert_eq!(Calendar::message(&Payload::default()), "echo: None");
    }

    #[test]
    fn no_url_means_no_response() {
        let calendar = Calendar::new().unwrap();
        let payload = Payload {
            text: Some("hello".to_string()),
            response_url: None,
        };
        assert_eq!(calendar.respond(&payload).unwrap(), None);
        assert_eq!(calendar.handle(r#"{"text": "hello"}"#).unwrap(), None);
    }

    #[test]
    fn unreachable_callback_is_a_network_error() {
        let calendar = Calendar::new().unwrap();
        match calendar.handle(r#"{"text": "hi", "response_url": "http://127.0.0.1:9/hook"}"#) {
            Err(WebhookError::Network { ref url, .. }) => assert_eq!(url, "http://127.0.0.1:9/hook"),
            other => panic!("expected a network error, got {:?}", other),
        }
    }

    #[test]
    fn response_body_shape() {
        let body = Response {
            text: "echo: hi".to_string(),
            response_type: RESPONSE_TYPE,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"text": "echo: hi", "response_type": "ephemeral"})
        );
    }

    #[test]
    fn info_describes_the_plugin() {
        let info = Calendar::info();
        assert_eq!(info.name, "calendar");
        assert_eq!(info.title, "Calendar of Events");
    }
}
