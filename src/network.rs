use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

// Redirects are not followed: add-to-cart answers with one when the server
// decides to re-render the cart page, and we need to see that as a redirect
// rather than as the page body.
static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build http client")
});

/// Body shape shared by all four cart mutations.
#[derive(Debug, Deserialize)]
pub struct ApiReply {
    pub success: bool,
    pub message: Option<String>,
}

/// Application-level result of a mutation. Transport failures never reach
/// this type; they surface as `Err` from the calls below.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted,
    Rejected(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The server redirected instead of answering with JSON; the cart
    /// changed server-side and should be refetched.
    Redirected,
    Rejected(String),
}

#[derive(Debug, Deserialize)]
pub struct SnapshotItem {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

// The payload also carries the server's grand total; it is not mirrored
// here because the displayed total is always re-derived from the visible
// line totals.
#[derive(Debug, Deserialize)]
pub struct CartSnapshot {
    pub items: Vec<SnapshotItem>,
}

fn reply_outcome(reply: ApiReply) -> Outcome {
    if reply.success {
        Outcome::Accepted
    } else {
        Outcome::Rejected(
            reply
                .message
                .unwrap_or_else(|| "unknown server error".to_string()),
        )
    }
}

/// Fetches the current cart for the initial page state and for refreshes.
pub async fn fetch_cart(base_url: &str) -> Result<CartSnapshot> {
    let resp = CLIENT
        .get(format!("{base_url}/cart"))
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(anyhow!("cart request failed with {}", resp.status()));
    }
    Ok(resp.json().await?)
}

pub async fn add_item(base_url: &str, product_id: &str, quantity: u32) -> Result<AddOutcome> {
    let resp = CLIENT
        .post(format!("{base_url}/add-to-cart/{product_id}"))
        .form(&[("quantity", quantity.to_string())])
        .send()
        .await?;
    if resp.status().is_redirection() {
        return Ok(AddOutcome::Redirected);
    }
    if !resp.status().is_success() {
        return Err(anyhow!("server returned {}", resp.status()));
    }
    let reply: ApiReply = resp.json().await?;
    Ok(match reply_outcome(reply) {
        Outcome::Accepted => AddOutcome::Added,
        Outcome::Rejected(message) => AddOutcome::Rejected(message),
    })
}

pub async fn update_quantity(base_url: &str, item_id: &str, quantity: u32) -> Result<Outcome> {
    let resp = CLIENT
        .post(format!("{base_url}/update-cart-item/{item_id}"))
        .json(&serde_json::json!({ "quantity": quantity }))
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(anyhow!("server returned {}", resp.status()));
    }
    let reply: ApiReply = resp.json().await?;
    Ok(reply_outcome(reply))
}

pub async fn remove_item(base_url: &str, item_id: &str) -> Result<Outcome> {
    let resp = CLIENT
        .post(format!("{base_url}/remove-from-cart/{item_id}"))
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(anyhow!("server returned {}", resp.status()));
    }
    let reply: ApiReply = resp.json().await?;
    Ok(reply_outcome(reply))
}

pub async fn clear_cart(base_url: &str) -> Result<Outcome> {
    let resp = CLIENT.post(format!("{base_url}/clear-cart")).send().await?;
    if !resp.status().is_success() {
        return Err(anyhow!("server returned {}", resp.status()));
    }
    let reply: ApiReply = resp.json().await?;
    Ok(reply_outcome(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_with_success_flag_is_accepted() {
        let reply: ApiReply = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(reply_outcome(reply), Outcome::Accepted);
    }

    #[test]
    fn reply_with_false_flag_carries_the_server_message() {
        let reply: ApiReply =
            serde_json::from_str(r#"{"success": false, "message": "Not enough stock"}"#).unwrap();
        assert_eq!(
            reply_outcome(reply),
            Outcome::Rejected("Not enough stock".to_string())
        );
    }

    #[test]
    fn rejection_without_message_still_reports_something() {
        let reply: ApiReply = serde_json::from_str(r#"{"success": false}"#).unwrap();
        match reply_outcome(reply) {
            Outcome::Rejected(msg) => assert!(!msg.is_empty()),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn cart_snapshot_deserializes_and_ignores_the_server_total() {
        let snap: CartSnapshot = serde_json::from_str(
            r#"{"items": [{"id": 7, "name": "Coffee", "price": 10.0, "quantity": 2}],
                "total": 20.0}"#,
        )
        .unwrap();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.items[0].id, 7);
        assert_eq!(snap.items[0].quantity, 2);
    }
}
