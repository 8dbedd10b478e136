//! WebSocket Message Types
//!
//! Defines the message types exchanged between the dashboard page and the
//! server over the reactive channel.

use serde::{Deserialize, Serialize};

use crate::dashboard::ChartDescription;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Dropdown value changed
    SelectSymbol {
        /// Selected ticker symbol
        symbol: String,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
        /// Selector options in display order
        symbols: Vec<String>,
        /// Initial selector value
        default_symbol: String,
    },
    /// Chart for a selection
    Chart {
        /// Symbol the chart was built for
        symbol: String,
        /// Plotly figure
        figure: ChartDescription,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_chart;
    use crate::data::PriceLoader;

    #[test]
    fn test_client_message_deserialize_select() {
        let json = r#"{"type": "select_symbol", "symbol": "AAPL"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::SelectSymbol { symbol } => assert_eq!(symbol, "AAPL"),
            _ => panic!("Expected SelectSymbol"),
        }
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_missing_symbol_rejected() {
        let json = r#"{"type": "select_symbol"}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
            symbols: vec!["AAPL".to_string(), "MSFT".to_string()],
            default_symbol: "AAPL".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"symbols\":[\"AAPL\",\"MSFT\"]"));
        assert!(json.contains("\"default_symbol\":\"AAPL\""));
    }

    #[test]
    fn test_server_message_serialize_chart() {
        let table = PriceLoader::new()
            .load_str("symbol,Date,Next_Close,prediction\nAAPL,2024-01-02,100.0,101.5")
            .unwrap();
        let msg = ServerMessage::Chart {
            symbol: "AAPL".to_string(),
            figure: build_chart(&table, "AAPL"),
        };

        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "chart");
        assert_eq!(json["symbol"], "AAPL");
        assert_eq!(json["figure"]["data"][0]["y"][0], 100.0);
    }
}
