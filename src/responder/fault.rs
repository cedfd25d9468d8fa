//! Canned SOAP fault envelope for internal errors

const FAULT_HEAD: &str = concat!(
    r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" "#,
    r#"xmlns:ns1="http://www.daisy.org/ns/daisy-online/">"#,
    "<SOAP-ENV:Body><SOAP-ENV:Fault>",
    "<faultcode>SOAP-ENV:Server</faultcode>",
    "<faultstring>",
);

const FAULT_TAIL: &str = concat!(
    "</faultstring>",
    "<faultactor></faultactor>",
    "<detail><ns1:internalServerErrorFault/></detail>",
    "</SOAP-ENV:Fault></SOAP-ENV:Body></SOAP-ENV:Envelope>",
);

/// Build a server fault envelope carrying `fault_string`
pub fn fault_envelope(fault_string: &str) -> String {
    let escaped = escape_text(fault_string);
    let mut envelope = String::with_capacity(FAULT_HEAD.len() + escaped.len() + FAULT_TAIL.len());
    envelope.push_str(FAULT_HEAD);
    envelope.push_str(&escaped);
    envelope.push_str(FAULT_TAIL);
    envelope
}

/// Escape XML markup characters in element text
fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
