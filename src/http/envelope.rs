//! The uniform response envelope.
//!
//! Every call returns `{ code, message, data? }` whether it was served by a
//! real backend or by the synthetic emulation. A non-200 `code` is normal
//! data (a domain miss), not an error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Value> {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// 200 with data.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Any code without data.
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::status(404, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::status(401, message)
    }

    pub fn is_success(&self) -> bool {
        self.code == 200
    }

    /// Consume the envelope, keeping only successful data.
    pub fn into_data(self) -> Option<T> {
        if self.is_success() {
            self.data
        } else {
            None
        }
    }
}

impl Envelope<Value> {
    /// Serialize typed data into a JSON envelope.
    pub fn ok_json<T: Serialize>(message: impl Into<String>, data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::ok(message, serde_json::to_value(data)?))
    }

    /// Recognize an envelope-shaped JSON body.
    ///
    /// Returns the body back unchanged when it does not have a numeric `code`
    /// and a string `message`.
    pub fn from_value(body: Value) -> Result<Self, Value> {
        let shaped = match &body {
            Value::Object(map) => {
                map.get("code").and_then(Value::as_u64).is_some_and(|c| c <= u16::MAX as u64)
                    && map.get("message").is_some_and(Value::is_string)
            }
            _ => false,
        };
        if !shaped {
            return Err(body);
        }
        serde_json::from_value(body.clone()).map_err(|_| body)
    }

    /// Deserialize `data` into a concrete type. `null` data becomes `None`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, serde_json::Error> {
        let data = match self.data {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };
        Ok(Envelope {
            code: self.code,
            message: self.message,
            data,
        })
    }
}
