//! WebSocket Reactive Channel
//!
//! Binds the dashboard dropdown to the chart: the page sends the selected
//! symbol, the server recomputes the chart and pushes it back.
//!
//! ## Usage
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({type: 'select_symbol', symbol: 'AAPL'}));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'chart') Plotly.react('stock-graph', msg.figure.data, msg.figure.layout);
//! };
//! ```

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::{ClientMessage, ServerMessage};
