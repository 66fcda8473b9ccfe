//! # Message Data Model
//!
//! Defines the unit of exchange between sender and server: an ordered
//! sequence of opaque string fields.
//!
//! Messages are serialized to JSON and sent over TCP with a 4-byte length
//! prefix (see [`connection`](super::connection)). Fields are immutable once
//! the message is constructed, and empty fields survive the round trip: an
//! empty string is a present field, not a missing one.

use serde::{Deserialize, Serialize};

/// One message on the wire: an ordered, immutable sequence of string fields.
///
/// The sender CLI always builds arity-3 messages, but the type itself places
/// no bound on arity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Ordered payload fields. Private so a constructed message cannot be
    /// mutated; read access goes through [`Message::fields`].
    fields: Vec<String>,
}

impl Message {
    /// Create a message from an ordered list of fields.
    ///
    /// # Example
    /// ```ignore
    /// let msg = Message::new(vec!["a".to_string(), "b".to_string()]);
    /// ```
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Create the three-field message the sender CLI transmits.
    pub fn hello(
        field1: impl Into<String>,
        field2: impl Into<String>,
        field3: impl Into<String>,
    ) -> Self {
        Self {
            fields: vec![field1.into(), field2.into(), field3.into()],
        }
    }

    /// The ordered payload fields.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Serialize the message to JSON bytes for transmission.
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Deserialize a message from JSON bytes received from the network.
    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_field_order() {
        let msg = Message::hello("a", "b", "c");
        let bytes = msg.to_bytes().unwrap();
        let decoded = Message::from_bytes(&bytes).unwrap();

        assert_eq!(decoded.fields(), &["a", "b", "c"]);
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_empty_fields_are_present_fields() {
        let msg = Message::new(vec![String::new(), "x".to_string(), String::new()]);
        let decoded = Message::from_bytes(&msg.to_bytes().unwrap()).unwrap();

        assert_eq!(decoded.fields().len(), 3);
        assert_eq!(decoded.fields()[0], "");
        assert_eq!(decoded.fields()[2], "");
    }

    #[test]
    fn test_malformed_bytes_fail_to_decode() {
        assert!(Message::from_bytes(b"not json at all").is_err());
        assert!(Message::from_bytes(b"{\"wrong\":\"shape\"}").is_err());
    }
}
