//! Dashboard Page
//!
//! Renders the single HTML page: heading, symbol dropdown and chart
//! container. The embedded script opens the `/ws` channel, sends a
//! `select_symbol` message on every dropdown change and draws each pushed
//! figure with Plotly. Without a socket it falls back to `/api/v1/chart`.

use crate::data::PriceTable;

const PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

const PAGE_SCRIPT: &str = r#"
(function () {
  const dropdown = document.getElementById('symbol-dropdown');
  const graph = 'stock-graph';
  let socket = null;

  function draw(figure) {
    Plotly.react(graph, figure.data, figure.layout, {responsive: true});
  }

  function fetchChart(symbol) {
    fetch('/api/v1/chart?symbol=' + encodeURIComponent(symbol))
      .then(function (r) { return r.json(); })
      .then(draw)
      .catch(function (e) { console.error('chart request failed', e); });
  }

  function select(symbol) {
    if (socket && socket.readyState === WebSocket.OPEN) {
      socket.send(JSON.stringify({type: 'select_symbol', symbol: symbol}));
    } else {
      fetchChart(symbol);
    }
  }

  function connect() {
    const scheme = location.protocol === 'https:' ? 'wss' : 'ws';
    socket = new WebSocket(scheme + '://' + location.host + '/ws');
    socket.onmessage = function (event) {
      const msg = JSON.parse(event.data);
      if (msg.type === 'chart' && msg.symbol === dropdown.value) {
        draw(msg.figure);
      } else if (msg.type === 'error') {
        console.warn('server error:', msg.message);
      }
    };
    socket.onopen = function () { select(dropdown.value); };
    socket.onclose = function () { socket = null; };
  }

  dropdown.addEventListener('change', function () { select(dropdown.value); });
  connect();
})();
"#;

/// Render the dashboard page for a loaded table
pub fn render_page(title: &str, table: &PriceTable) -> String {
    let default_symbol = table.default_symbol();

    let options: String = table
        .symbols()
        .iter()
        .map(|symbol| {
            let escaped = escape_html(symbol);
            let selected = if symbol == default_symbol { " selected" } else { "" };
            format!(
                "      <option value=\"{}\"{}>{}</option>\n",
                escaped, selected, escaped
            )
        })
        .collect();

    let title = escape_html(title);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="{plotly}"></script>
  <style>
    body {{ font-family: sans-serif; margin: 24px; }}
    #symbol-dropdown {{ min-width: 200px; padding: 4px; }}
    #stock-graph {{ width: 100%; height: 520px; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <select id="symbol-dropdown">
{options}  </select>
  <div id="stock-graph"></div>
  <script>{script}</script>
</body>
</html>
"#,
        title = title,
        plotly = PLOTLY_SRC,
        options = options,
        script = PAGE_SCRIPT,
    )
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PriceLoader;

    #[test]
    fn test_page_lists_symbols_with_default_selected() {
        let table = PriceLoader::new()
            .load_str(
                "symbol,Date,Next_Close,prediction
MSFT,2024-01-02,300.0,299.0
AAPL,2024-01-02,100.0,101.5",
            )
            .unwrap();

        let html = render_page("Stock Price Prediction Dashboard", &table);

        assert!(html.contains("<h1>Stock Price Prediction Dashboard</h1>"));
        assert!(html.contains(r#"<option value="MSFT" selected>MSFT</option>"#));
        assert!(html.contains(r#"<option value="AAPL">AAPL</option>"#));
        assert!(html.find("MSFT").unwrap() < html.find("AAPL").unwrap());
        assert!(html.contains("id=\"stock-graph\""));
    }

    #[test]
    fn test_symbols_are_escaped() {
        let table = PriceLoader::new()
            .load_str(
                "symbol,Date,Next_Close,prediction
\"<b>&\",2024-01-02,1.0,2.0",
            )
            .unwrap();

        let html = render_page("Dash", &table);
        assert!(html.contains("&lt;b&gt;&amp;"));
        assert!(!html.contains("<b>&"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A&B"), "A&amp;B");
        assert_eq!(escape_html("\"x'"), "&quot;x&#39;");
        assert_eq!(escape_html("BRK.B"), "BRK.B");
    }
}
