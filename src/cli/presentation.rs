//! CLI presentation: text and json formatters per command.

use crate::admin::{
    coerce_string, collection_name, enumerator_item_name, enumerator_item_values,
    enumerator_items, enumerator_version, format_config_value, token_roles, token_value,
    value_description, value_of, version_number,
};
use crate::auth::Credential;
use crate::error::ListkitError;
use crate::format::format_date;
use crate::http::ConfigResponse;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::{json, Value};

/// Columns shown for a page of items: `id` and `name` first, then the rest
/// of the first item's keys.
fn columns(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for preferred in ["id", "name"] {
        if items.iter().any(|item| item.get(preferred).is_some()) {
            columns.push(preferred.to_string());
        }
    }
    if let Some(Value::Object(first)) = items.first() {
        for key in first.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }
    columns
}

pub fn format_list_result(
    items: &[Value],
    has_more: bool,
    format: &str,
) -> Result<String, ListkitError> {
    if format == "json" {
        let body = json!({ "items": items, "has_more": has_more });
        return Ok(serde_json::to_string_pretty(&body)?);
    }

    if items.is_empty() {
        return Ok("No items found.".to_string());
    }

    let columns = columns(items);
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(columns.clone());
    for item in items {
        table.add_row(
            columns
                .iter()
                .map(|c| item.get(c).map(coerce_string).unwrap_or_default())
                .collect::<Vec<_>>(),
        );
    }

    let footer = if has_more {
        "More items available (use --pages to fetch further)"
    } else {
        "End of list"
    };
    Ok(format!("{}\n{} item(s). {}", table, items.len(), footer))
}

pub fn format_login_result(credential: &Credential) -> String {
    let roles = if credential.roles.is_empty() {
        "(none)".to_string()
    } else {
        credential.roles.join(", ")
    };
    format!(
        "Logged in. Roles: {}. Expires: {}",
        roles,
        format_date(Some(&credential.expires_at))
    )
}

pub fn format_whoami(authenticated: bool, credential: Option<&Credential>) -> String {
    match credential {
        Some(credential) if authenticated => format_login_result(credential).replacen(
            "Logged in.",
            "Authenticated.",
            1,
        ),
        Some(credential) => format!(
            "Session expired at {}. Run `listkit login` again.",
            format_date(Some(&credential.expires_at))
        ),
        None => "Not logged in.".to_string(),
    }
}

pub fn format_admin_config(config: &ConfigResponse) -> String {
    let mut out = String::new();

    out.push_str("Configuration\n");
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Value", "From"]);
    for item in &config.config_items {
        table.add_row(vec![
            item.get("name").map(coerce_string).unwrap_or_default(),
            format_config_value(item.get("value")),
            item.get("from").map(coerce_string).unwrap_or_default(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str("Collection versions\n");
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Collection", "Version"]);
    for version in &config.versions {
        table.add_row(vec![collection_name(version), version_number(version)]);
    }
    out.push_str(&format!("{}\n\n", table));

    for enumerator in &config.enumerators {
        out.push_str(&format!("Enumerators (version {})\n", enumerator_version(enumerator)));
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Enumerator", "Value", "Description"]);
        for item in enumerator_items(enumerator) {
            let item = Value::Object(item);
            let name = enumerator_item_name(&item);
            for value in enumerator_item_values(&item) {
                let value = Value::Object(value);
                table.add_row(vec![name.clone(), value_of(&value), value_description(&value)]);
            }
        }
        out.push_str(&format!("{}\n\n", table));
    }

    let token = config.token.as_ref();
    out.push_str("Token\n");
    for claim in ["sub", "iss", "aud"] {
        if let Some(value) = token_value(token, claim) {
            out.push_str(&format!("  {}: {}\n", claim, value));
        }
    }
    for claim in ["exp", "iat", "nbf"] {
        if let Some(value) = token_value(token, claim) {
            out.push_str(&format!("  {}: {}\n", claim, value));
        }
    }
    let roles = token_roles(token);
    if !roles.is_empty() {
        out.push_str(&format!("  roles: {}\n", roles.join(", ")));
    }

    out.trim_end().to_string()
}
