//! Response rendering: JSON envelopes and HTML fragments.
//!
//! HTML fragments are swapped into the portal pages by HTMX, so they are
//! always sent with status 200.

use actix_web::{http::header::ContentType, HttpResponse};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::Error;

/// Label shown when no verification policy was ticked.
pub const DEFAULT_POLICIES_LABEL: &str = "All verification policies (default)";

/// Label shown when no credential type was entered.
pub const DEFAULT_TYPE_LABEL: &str = "VerifiablePortableDocumentA1 (default)";

/// `{"success": true, "data": …}`
pub fn success_envelope<T: Serialize>(data: &T) -> Value {
    json!({
        "success": true,
        "data": data,
    })
}

/// `{"success": false, "error": …, "details": …}`
#[must_use]
pub fn error_envelope(err: &Error) -> Value {
    json!({
        "success": false,
        "error": err.summary(),
        "details": err.to_string(),
    })
}

/// Wraps an HTML fragment in a 200 response.
#[must_use]
pub fn html(fragment: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(fragment)
}

/// Escapes text for interpolation into HTML.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The fragment shown after a credential offer was created.
#[must_use]
pub fn issued_fragment(credential_label: &str, holder: &str, offer_link: &str) -> String {
    format!(
        r#"<div id="result" class="success-message">
    <div class="success-icon">&#10003;</div>
    <h3>{label} Credential Generated!</h3>
    <p>Credential issued for: <strong>{holder}</strong></p>
    <div class="credential-link-container">
        <label>Credential Link:</label>
        <div class="link-display">
            <textarea id="credentialLink" readonly>{link}</textarea>
            <button onclick="copyLink('credentialLink', this)" class="copy-btn">Copy Link</button>
        </div>
    </div>
    <div class="instructions">
        <h4>Next Steps:</h4>
        <ol>
            <li>Copy the credential link above</li>
            <li>Open your digital wallet app</li>
            <li>Paste the link to import your credential</li>
            <li>Your digital ID is now ready to use!</li>
        </ol>
    </div>
    <button onclick="location.href='/'" class="btn-secondary">Issue Another Credential</button>
</div>
{script}"#,
        label = escape(credential_label),
        holder = escape(holder),
        link = escape(offer_link),
        script = COPY_SCRIPT,
    )
}

/// The fragment shown after a presentation request was created.
///
/// An empty `policies` list means the authority applies its defaults.
#[must_use]
pub fn verification_fragment(credential_type: &str, policies: &[&str], link: &str) -> String {
    let policies = if policies.is_empty() {
        format!("<p>{DEFAULT_POLICIES_LABEL}</p>")
    } else {
        let items: String = policies
            .iter()
            .map(|policy| format!("<li>{}</li>", escape(policy)))
            .collect();
        format!("<ul>{items}</ul>")
    };

    format!(
        r#"<div id="result" class="success-message">
    <div class="success-icon">&#10003;</div>
    <h3>Verification Request Generated!</h3>
    <p>A credential verification request has been successfully created.</p>
    <div class="verification-details">
        <h4>Verification Configuration:</h4>
        <div class="detail-item"><strong>Credential Type:</strong> {credential_type}</div>
        <div class="detail-item"><strong>Policies Checked:</strong> {policies}</div>
    </div>
    <div class="verification-link-container">
        <label>Verification Link:</label>
        <div class="link-display">
            <textarea id="verificationLink" readonly>{link}</textarea>
            <button onclick="copyLink('verificationLink', this)" class="copy-btn">Copy Link</button>
        </div>
    </div>
    <div class="instructions">
        <h4>Next Steps:</h4>
        <ol>
            <li>Copy the verification link above</li>
            <li>Share this link with the credential holder</li>
            <li>The holder opens the link in their digital wallet</li>
            <li>The wallet presents the credential for verification</li>
        </ol>
    </div>
    <button onclick="location.reload()" class="btn-secondary">Verify Another Credential</button>
</div>
{script}"#,
        credential_type = escape(credential_type),
        link = escape(link),
        script = COPY_SCRIPT,
    )
}

/// The fragment shown when a portal request fails.
#[must_use]
pub fn error_fragment(message: &str) -> String {
    format!(
        r#"<div id="result" class="error-message">
    <div class="error-icon">&#10007;</div>
    <h3>Error</h3>
    <p>{}</p>
    <button onclick="location.href='/'" class="btn-secondary">Try Again</button>
</div>"#,
        escape(message)
    )
}

const COPY_SCRIPT: &str = r"<script>
function copyLink(id, btn) {
    const field = document.getElementById(id);
    field.select();
    navigator.clipboard.writeText(field.value);
    const original = btn.textContent;
    btn.textContent = 'Copied!';
    setTimeout(() => { btn.textContent = original; }, 2000);
}
</script>";
